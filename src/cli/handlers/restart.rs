// src/cli/handlers/restart.rs

use anyhow::Result;
use colored::Colorize;

use super::Flow;
use crate::{cli::prompt::Prompt, state::AppState};

/// The handler for "Start over": deletes the cart file and empties the cart.
///
/// If the file cannot be deleted the cart is kept as it is and the error is shown.
pub fn handle(state: &mut AppState, prompt: &mut dyn Prompt) -> Result<Flow> {
    let question = format!(t!("restart.prompt.confirm"), count = state.cart().len());
    if !prompt.confirm(&question)? {
        return Ok(Flow::Continue);
    }

    match state.clear_cart() {
        Ok(()) => println!("{}", t!("restart.success.cleared").green()),
        Err(e) => {
            log::warn!("Cart could not be cleared: {}", e);
            println!("{} {}", t!("restart.error.clear").red(), e);
        }
    }
    Ok(Flow::Continue)
}
