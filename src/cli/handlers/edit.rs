// src/cli/handlers/edit.rs

use anyhow::Result;
use colored::Colorize;

use super::{Flow, commons};
use crate::{cli::editor, cli::prompt::Prompt, state::AppState};

/// The handler for "Edit existing pizza".
/// Lets the user pick pizzas from the cart and edit them, one after another,
/// until they choose "Back".
pub fn handle(state: &mut AppState, prompt: &mut dyn Prompt) -> Result<Flow> {
    if commons::report_empty_cart(state) {
        return Ok(Flow::Continue);
    }

    while let Some(index) = commons::pick_pizza(prompt, state, t!("edit.prompt.pick"))? {
        let Some(current) = state.cart().get(index).cloned() else {
            continue;
        };

        let Some(edited) = editor::edit_pizza(prompt, state.menu(), &current)? else {
            println!("{}", t!("edit.info.unchanged").dimmed());
            continue;
        };

        if edited != current {
            log::debug!("Replacing cart item {}", index);
            if let Some(slot) = state.cart_mut().get_mut(index) {
                *slot = edited;
            }
            commons::persist_cart(state);
        }
    }
    Ok(Flow::Continue)
}
