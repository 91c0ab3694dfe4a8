// src/core/receipt.rs

use crate::{
    core::{
        commons::{priced_line, rule, title_case},
        pricing,
    },
    models::{Menu, Pizza},
};

/// Renders the receipt block of one pizza: header, base options, toppings and subtotal.
/// `number` is the 1-based position of the pizza in the cart.
pub fn pizza_lines(number: usize, pizza: &Pizza, menu: &Menu) -> Vec<String> {
    let mut lines = vec![
        rule('='),
        format!(t!("receipt.pizza_header"), number = number),
        format!(t!("receipt.recipient"), recipient = title_case(&pizza.recipient)),
        rule('-'),
    ];

    for category in menu.categories() {
        if let Some(option) = pizza.selection(&category.name) {
            let price = category.options.get(option).copied().unwrap_or_default();
            lines.push(priced_line(&title_case(option), price));
        }
    }

    for topping in &pizza.toppings {
        let price = menu.topping_price(topping).unwrap_or_default();
        let label = format!(t!("receipt.topping"), topping = title_case(topping));
        lines.push(priced_line(&label, price));
    }

    lines.push(rule('-'));
    lines.push(priced_line(
        t!("receipt.subtotal"),
        pricing::pizza_price(pizza, menu),
    ));
    lines
}

/// Renders the full checkout receipt: every pizza followed by the grand total.
pub fn cart_lines(cart: &[Pizza], menu: &Menu) -> Vec<String> {
    let mut lines: Vec<String> = cart
        .iter()
        .enumerate()
        .flat_map(|(i, pizza)| pizza_lines(i + 1, pizza, menu))
        .collect();

    lines.push(rule('='));
    lines.push(priced_line(
        t!("receipt.grand_total"),
        pricing::cart_total(cart, menu),
    ));
    lines.push(rule('='));
    lines
}
