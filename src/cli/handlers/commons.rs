// src/cli/handlers/commons.rs

// Helpers shared by the handlers that work on one pizza of the cart.

use anyhow::Result;
use colored::Colorize;

use crate::{
    cli::prompt::Prompt,
    core::{commons::priced_line, pricing},
    models::{Menu, Pizza},
    state::AppState,
};

/// The cart line of a pizza: `Ana's pizza` and its price.
pub fn pizza_label(pizza: &Pizza, menu: &Menu) -> String {
    priced_line(&pizza.display_name(), pricing::pizza_price(pizza, menu))
}

/// Lists the cart followed by "Back" and returns the index of the chosen pizza,
/// or `None` for "Back".
pub fn pick_pizza(prompt: &mut dyn Prompt, state: &AppState, question: &str) -> Result<Option<usize>> {
    let mut labels: Vec<String> = state
        .cart()
        .iter()
        .map(|pizza| pizza_label(pizza, state.menu()))
        .collect();
    labels.push(t!("common.back").to_string());

    let selection = prompt.select(question, &labels, 0)?;
    Ok((selection < state.cart().len()).then_some(selection))
}

/// Prints the notice shown when a command needs pizzas and the cart has none.
/// Returns whether the cart is empty.
pub fn report_empty_cart(state: &AppState) -> bool {
    let empty = state.cart().is_empty();
    if empty {
        println!("{}", t!("cart.empty").yellow());
    }
    empty
}

/// Saves the cart if it changed. A failure is reported and logged, but the session
/// goes on with the in-memory cart and the save is retried after the next change.
pub fn persist_cart(state: &mut AppState) {
    match state.persist() {
        Ok(true) => log::info!("Cart saved to '{}'", state.settings().cart_file.display()),
        Ok(false) => {}
        Err(e) => {
            log::warn!("Cart could not be saved: {}", e);
            println!("{} {}", t!("cart.error.save").red(), e);
        }
    }
}
