// src/cli/handlers/remove.rs

use anyhow::Result;
use colored::Colorize;

use super::{Flow, commons};
use crate::{cli::prompt::Prompt, state::AppState};

/// The handler for "Remove a pizza".
/// Each removal is confirmed first; the loop ends on "Back" or once the cart is empty.
pub fn handle(state: &mut AppState, prompt: &mut dyn Prompt) -> Result<Flow> {
    if commons::report_empty_cart(state) {
        return Ok(Flow::Continue);
    }

    while let Some(index) = commons::pick_pizza(prompt, state, t!("remove.prompt.pick"))? {
        let Some(name) = state.cart().get(index).map(|pizza| pizza.display_name()) else {
            continue;
        };

        let question = format!(t!("remove.prompt.confirm"), name = name);
        if !prompt.confirm(&question)? {
            continue;
        }

        state.cart_mut().remove(index);
        println!("{}", format!(t!("remove.success.removed"), name = name).green());
        commons::persist_cart(state);

        if state.cart().is_empty() {
            break;
        }
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::handlers::testing::{pizza, state_in};
    use crate::cli::prompt::scripted::{Answer::*, ScriptedPrompt};
    use crate::core::cart_store;
    use tempfile::tempdir;

    #[test]
    fn test_remove_needs_confirmation() {
        let dir = tempdir().unwrap();
        let mut state = state_in(&dir, vec![pizza("ana", "small"), pizza("bo", "large")]);
        let mut prompt = ScriptedPrompt::new([
            Pick("Ana's pizza"),
            Confirm(false),
            Pick("Ana's pizza"),
            Confirm(true),
            Pick("Back"),
        ]);

        handle(&mut state, &mut prompt).unwrap();

        assert!(prompt.is_finished());
        assert_eq!(state.cart(), &vec![pizza("bo", "large")]);
        let saved = cart_store::load_cart(&state.settings().cart_file).unwrap().unwrap();
        assert_eq!(&saved, state.cart());
    }

    #[test]
    fn test_removing_the_last_pizza_leaves_the_loop() {
        let dir = tempdir().unwrap();
        let mut state = state_in(&dir, vec![pizza("ana", "small")]);
        let mut prompt = ScriptedPrompt::new([Pick("Ana's pizza"), Confirm(true)]);

        handle(&mut state, &mut prompt).unwrap();

        assert!(prompt.is_finished());
        assert!(state.cart().is_empty());
    }
}
