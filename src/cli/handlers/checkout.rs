// src/cli/handlers/checkout.rs

use anyhow::Result;
use chrono::Local;
use colored::Colorize;

use super::{Flow, commons};
use crate::{
    cli::prompt::Prompt,
    core::{commons::title_case, order_writer, pricing, receipt},
    state::AppState,
};

/// The handler for "Checkout".
///
/// Prints the receipt, asks for confirmation and writes the order file. On success
/// the cart is cleared and the program ends; on failure the cart is kept and the
/// user is back at the main menu.
pub fn handle(state: &mut AppState, prompt: &mut dyn Prompt) -> Result<Flow> {
    if commons::report_empty_cart(state) {
        return Ok(Flow::Continue);
    }

    // Pizzas can lose a selection when the menu changes between runs.
    if !incomplete_pizzas_reported(state) {
        return Ok(Flow::Continue);
    }

    println!();
    for line in receipt::cart_lines(state.cart(), state.menu()) {
        println!("{}", line);
    }
    println!();

    if !prompt.confirm(t!("checkout.prompt.place_order"))? {
        return Ok(Flow::Continue);
    }

    let order = match order_writer::create_order(&state.settings().orders_dir, state.cart(), Local::now()) {
        Ok(order) => order,
        Err(e) => {
            log::warn!("Checkout failed, the cart is kept: {}", e);
            println!("{} {}", t!("checkout.error.order").red(), e);
            return Ok(Flow::Continue);
        }
    };

    println!(
        "{}",
        format!(
            t!("checkout.success.order_placed"),
            id = order.id,
            path = order.path.display()
        )
        .green()
    );

    // The order is on disk; a cart that cannot be deleted would only come back next run.
    if let Err(e) = state.clear_cart() {
        log::warn!("Order placed but the cart could not be cleared: {}", e);
        println!("{} {}", t!("restart.error.clear").yellow(), e);
    }

    println!("{}", t!("checkout.success.thanks").bold());
    Ok(Flow::Exit)
}

/// Prints every pizza that still misses a selection. Returns `true` when there is none.
fn incomplete_pizzas_reported(state: &AppState) -> bool {
    let mut complete = true;
    for pizza in state.cart() {
        let missing = pricing::missing_categories(pizza, state.menu());
        if missing.is_empty() {
            continue;
        }
        complete = false;
        let missing: Vec<String> = missing.into_iter().map(title_case).collect();
        println!(
            "{}",
            format!(
                t!("checkout.error.incomplete"),
                name = pizza.display_name(),
                missing = missing.join(", ")
            )
            .yellow()
        );
    }
    complete
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::handlers::testing::{pizza, state_in};
    use crate::cli::prompt::scripted::{Answer::*, ScriptedPrompt};
    use crate::models::Order;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_checkout_writes_order_and_exits() {
        let dir = tempdir().unwrap();
        let mut state = state_in(&dir, Vec::new());
        state.cart_mut().extend([pizza("ana", "small"), pizza("bo", "large")]);
        state.persist().unwrap();
        let expected = state.cart().clone();

        let mut prompt = ScriptedPrompt::new([Confirm(true)]);
        assert_eq!(handle(&mut state, &mut prompt).unwrap(), Flow::Exit);

        let orders: Vec<_> = fs::read_dir(&state.settings().orders_dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(orders.len(), 1);
        let order: Order = serde_json::from_str(&fs::read_to_string(&orders[0]).unwrap()).unwrap();
        assert_eq!(order.items, expected);

        assert!(state.cart().is_empty());
        assert!(!state.settings().cart_file.exists());
    }

    #[test]
    fn test_declined_checkout_keeps_the_cart() {
        let dir = tempdir().unwrap();
        let mut state = state_in(&dir, vec![pizza("ana", "small")]);

        let mut prompt = ScriptedPrompt::new([Confirm(false)]);
        assert_eq!(handle(&mut state, &mut prompt).unwrap(), Flow::Continue);

        assert_eq!(state.cart().len(), 1);
        assert!(!state.settings().orders_dir.exists());
    }

    #[test]
    fn test_failed_order_keeps_the_cart() {
        let dir = tempdir().unwrap();
        let mut state = state_in(&dir, vec![pizza("ana", "small")]);
        // A plain file where the orders directory should be.
        fs::write(&state.settings().orders_dir, "").unwrap();

        let mut prompt = ScriptedPrompt::new([Confirm(true)]);
        assert_eq!(handle(&mut state, &mut prompt).unwrap(), Flow::Continue);

        assert_eq!(state.cart(), &vec![pizza("ana", "small")]);
    }

    #[test]
    fn test_incomplete_pizza_blocks_checkout() {
        let dir = tempdir().unwrap();
        let mut unfinished = pizza("ana", "small");
        unfinished.base_options.insert("crust".to_string(), None);
        let mut state = state_in(&dir, vec![unfinished]);

        let mut prompt = ScriptedPrompt::default();
        assert_eq!(handle(&mut state, &mut prompt).unwrap(), Flow::Continue);

        assert!(prompt.shown.is_empty());
        assert!(!state.settings().orders_dir.exists());
    }

    #[test]
    fn test_empty_cart_cannot_check_out() {
        let dir = tempdir().unwrap();
        let mut state = state_in(&dir, Vec::new());

        let mut prompt = ScriptedPrompt::default();
        assert_eq!(handle(&mut state, &mut prompt).unwrap(), Flow::Continue);
        assert!(prompt.shown.is_empty());
    }
}
