// src/cli/handlers/new.rs

use anyhow::Result;
use colored::Colorize;

use super::{Flow, commons};
use crate::{cli::editor, cli::prompt::Prompt, models::Pizza, state::AppState};

/// The handler for "New pizza".
/// Builds a pizza with every category unselected and adds it to the cart once the
/// editor finishes. A cancelled pizza is dropped.
pub fn handle(state: &mut AppState, prompt: &mut dyn Prompt) -> Result<Flow> {
    let blank = Pizza::new_for_menu(state.menu());

    match editor::edit_pizza(prompt, state.menu(), &blank)? {
        Some(pizza) => {
            println!(
                "{}",
                format!(t!("new.success.added"), name = pizza.display_name()).green()
            );
            state.cart_mut().push(pizza);
            commons::persist_cart(state);
        }
        None => println!("{}", t!("new.info.discarded").dimmed()),
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::handlers::testing::state_in;
    use crate::cli::prompt::scripted::{Answer::*, ScriptedPrompt};
    use crate::core::cart_store;
    use tempfile::tempdir;

    #[test]
    fn test_finished_pizza_is_added_and_saved() {
        let dir = tempdir().unwrap();
        let mut state = state_in(&dir, Vec::new());
        let mut prompt = ScriptedPrompt::new([
            Pick("Size"),
            Pick("Large"),
            Pick("Crust"),
            Pick("Deep Dish"),
            Pick("Toppings"),
            Pick("Pepperoni"),
            Pick("Save"),
            Pick("Finish"),
            Type("gus"),
        ]);

        assert_eq!(handle(&mut state, &mut prompt).unwrap(), Flow::Continue);

        assert_eq!(state.cart().len(), 1);
        let saved = cart_store::load_cart(&state.settings().cart_file).unwrap().unwrap();
        assert_eq!(&saved, state.cart());
        assert_eq!(saved[0].selection("crust"), Some("deep dish"));
        assert_eq!(saved[0].toppings, ["pepperoni"]);
    }

    #[test]
    fn test_cancelled_pizza_is_not_added() {
        let dir = tempdir().unwrap();
        let mut state = state_in(&dir, Vec::new());
        let mut prompt = ScriptedPrompt::new([
            Pick("Size"),
            Pick("Small"),
            Pick("Cancel"),
            Confirm(true),
        ]);

        handle(&mut state, &mut prompt).unwrap();

        assert!(state.cart().is_empty());
        assert!(!state.needs_saving());
        assert!(!state.settings().cart_file.exists());
    }
}
