// src/core/commons.rs

use rust_decimal::Decimal;

use crate::constants::{LABEL_WIDTH, PRICE_WIDTH, RULE_WIDTH};

/// Capitalizes the first letter of every word and lowercases the rest.
/// A word starts after any non-alphabetic character, so `"bbq-chicken"` becomes `"Bbq-Chicken"`.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }
    result
}

/// Formats an amount with two decimals, e.g. `13.5` -> `"13.50"`.
pub fn format_price(price: Decimal) -> String {
    format!("{:.2}", price.round_dp(2))
}

/// Formats a label and an amount as two aligned columns:
/// `Large                                  $   12.00`.
pub fn priced_line(label: &str, price: Decimal) -> String {
    format!(
        "{:<label_width$} ${:>price_width$}",
        label,
        format_price(price),
        label_width = LABEL_WIDTH,
        price_width = PRICE_WIDTH
    )
}

/// A horizontal rule the width of a priced line.
pub fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}
