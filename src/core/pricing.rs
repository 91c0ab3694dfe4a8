//! # Pricing
//!
//! Pure price and eligibility computations over a [`Pizza`] and the [`Menu`] it was
//! built from. Nothing here mutates its inputs, so the same functions serve the live
//! totals shown while editing, the checkout receipt and the cart total.
//!
//! A selection or topping the menu does not know about contributes nothing; stale
//! references are pruned when the cart is loaded, this only keeps pricing total.

use rust_decimal::Decimal;

use crate::models::{Menu, Pizza};

/// The sum of the prices of the selected base options.
pub fn base_options_price(pizza: &Pizza, menu: &Menu) -> Decimal {
    menu.categories()
        .iter()
        .filter_map(|category| {
            let selection = pizza.selection(&category.name)?;
            category.options.get(selection).copied()
        })
        .sum()
}

/// The sum of the prices of the selected toppings.
pub fn toppings_price(pizza: &Pizza, menu: &Menu) -> Decimal {
    pizza
        .toppings
        .iter()
        .filter_map(|topping| menu.topping_price(topping))
        .sum()
}

/// The full price of a pizza: base options plus toppings.
pub fn pizza_price(pizza: &Pizza, menu: &Menu) -> Decimal {
    base_options_price(pizza, menu) + toppings_price(pizza, menu)
}

/// The sum of [`pizza_price`] over the whole cart.
pub fn cart_total(cart: &[Pizza], menu: &Menu) -> Decimal {
    cart.iter().map(|pizza| pizza_price(pizza, menu)).sum()
}

/// Names of the menu categories the pizza has no valid selection for, in menu order.
pub fn missing_categories<'m>(pizza: &Pizza, menu: &'m Menu) -> Vec<&'m str> {
    menu.categories()
        .iter()
        .filter(|category| {
            pizza
                .selection(&category.name)
                .is_none_or(|option| !category.options.contains_key(option))
        })
        .map(|category| category.name.as_str())
        .collect()
}

/// Whether every category has a selection, i.e. the pizza may be finished and checked out.
pub fn is_complete(pizza: &Pizza, menu: &Menu) -> bool {
    missing_categories(pizza, menu).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuDocument;

    fn sample_menu() -> Menu {
        let document: MenuDocument = serde_json::from_str(
            r#"{
                "base_options": [{"category": "size", "options": {"small": 8.00, "large": 12.00}}],
                "toppings": {"cheese": 1.50}
            }"#,
        )
        .unwrap();
        Menu::try_from(document).unwrap()
    }

    fn two_category_menu() -> Menu {
        let document: MenuDocument = serde_json::from_str(
            r#"{
                "base_options": [
                    {"category": "size", "options": {"small": 8, "large": 12}},
                    {"category": "crust", "options": {"thin": 0, "stuffed": 2.5}}
                ],
                "toppings": {"cheese": 1.5, "ham": 2, "olives": 0.75}
            }"#,
        )
        .unwrap();
        Menu::try_from(document).unwrap()
    }

    #[test]
    fn test_large_with_cheese_costs_13_50() {
        let menu = sample_menu();
        let mut pizza = Pizza::new_for_menu(&menu);
        pizza.select("size", "large");
        pizza.toggle_topping("cheese");

        assert_eq!(pizza_price(&pizza, &menu), Decimal::new(1350, 2));
    }

    #[test]
    fn test_price_is_the_sum_of_parts_and_pure() {
        let menu = two_category_menu();
        let mut pizza = Pizza::new_for_menu(&menu);
        assert_eq!(pizza_price(&pizza, &menu), Decimal::ZERO);

        pizza.select("size", "small");
        pizza.toggle_topping("ham");
        pizza.toggle_topping("olives");
        let before = pizza.clone();

        let first = pizza_price(&pizza, &menu);
        let second = pizza_price(&pizza, &menu);
        assert_eq!(first, second);
        assert_eq!(first, Decimal::new(1075, 2));
        assert_eq!(
            first,
            base_options_price(&pizza, &menu) + toppings_price(&pizza, &menu)
        );
        assert_eq!(pizza, before);
    }

    #[test]
    fn test_unknown_references_price_as_zero() {
        let menu = two_category_menu();
        let mut pizza = Pizza::new_for_menu(&menu);
        pizza.select("size", "family");
        pizza.select("sauce", "bbq");
        pizza.toggle_topping("anchovies");
        pizza.toggle_topping("cheese");

        assert_eq!(pizza_price(&pizza, &menu), Decimal::new(15, 1));
    }

    #[test]
    fn test_cart_total() {
        let menu = sample_menu();
        let mut small = Pizza::new_for_menu(&menu);
        small.select("size", "small");
        let mut large = Pizza::new_for_menu(&menu);
        large.select("size", "large");
        large.toggle_topping("cheese");

        assert_eq!(cart_total(&[], &menu), Decimal::ZERO);
        assert_eq!(cart_total(&[small, large], &menu), Decimal::new(2150, 2));
    }

    #[test]
    fn test_completeness_requires_every_category() {
        let menu = two_category_menu();
        let mut pizza = Pizza::new_for_menu(&menu);
        assert!(!is_complete(&pizza, &menu));
        assert_eq!(missing_categories(&pizza, &menu), ["size", "crust"]);

        pizza.select("size", "large");
        assert!(!is_complete(&pizza, &menu));
        assert_eq!(missing_categories(&pizza, &menu), ["crust"]);

        pizza.select("crust", "thin");
        assert!(is_complete(&pizza, &menu));

        // Toppings do not affect eligibility.
        pizza.toggle_topping("cheese");
        assert!(is_complete(&pizza, &menu));

        pizza.base_options.insert("crust".to_string(), None);
        assert!(!is_complete(&pizza, &menu));
    }
}
