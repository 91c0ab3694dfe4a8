// src/models.rs

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::commons::title_case;

// --- MENU WIRE MODELS (What the endpoint and the cache file contain) ---

/// The raw menu document as served by the endpoint.
///
/// Only `Deserialize` is needed: the cache file stores the response body verbatim,
/// so this shape is never written back.
#[derive(Deserialize, Debug, Clone)]
pub struct MenuDocument {
    /// Required categories, in display order.
    pub base_options: Vec<CategoryDocument>,
    /// Optional add-ons and their prices.
    pub toppings: IndexMap<String, Decimal>,
}

/// One entry of `base_options` in a [`MenuDocument`].
#[derive(Deserialize, Debug, Clone)]
pub struct CategoryDocument {
    /// The category name (e.g. `size`).
    pub category: String,
    /// Option name to price.
    pub options: IndexMap<String, Decimal>,
}

/// Reasons a structurally valid JSON document is not a usable menu.
#[derive(Error, Debug)]
pub enum ShapeError {
    /// The document does not have the expected fields or field types.
    #[error("{0}")]
    Structure(#[from] serde_json::Error),
    /// `base_options` is an empty list.
    #[error("'base_options' must list at least one category")]
    NoCategories,
    /// A category has a blank name.
    #[error("category #{position} has an empty name")]
    BlankCategory {
        /// 1-based position of the category in `base_options`.
        position: usize,
    },
    /// Two entries of `base_options` share a name.
    #[error("category '{category}' is listed more than once")]
    DuplicateCategory {
        /// The repeated name.
        category: String,
    },
    /// A category has no options to choose from.
    #[error("category '{category}' has no options")]
    NoOptions {
        /// The category without options.
        category: String,
    },
    /// `toppings` is an empty mapping.
    #[error("'toppings' must list at least one topping")]
    NoToppings,
    /// An option or topping has a price below zero.
    #[error("'{item}' has a negative price ({price})")]
    NegativePrice {
        /// The offending option or topping.
        item: String,
        /// The price found in the document.
        price: Decimal,
    },
}

// --- IN-MEMORY MENU ---

/// A required choice group, such as size or crust.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// The category name.
    pub name: String,
    /// Option name to price, in menu order.
    pub options: IndexMap<String, Decimal>,
}

/// The validated menu: every pizza picks exactly one option per category and
/// any number of toppings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Menu {
    categories: Vec<Category>,
    toppings: IndexMap<String, Decimal>,
}

impl Menu {
    /// All categories in menu order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks up a category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// All toppings in menu order.
    pub fn toppings(&self) -> &IndexMap<String, Decimal> {
        &self.toppings
    }

    /// The price of `option` within `category`, if both exist.
    pub fn option_price(&self, category: &str, option: &str) -> Option<Decimal> {
        self.category(category)?.options.get(option).copied()
    }

    /// The price of a topping, if it exists.
    pub fn topping_price(&self, topping: &str) -> Option<Decimal> {
        self.toppings.get(topping).copied()
    }
}

impl TryFrom<MenuDocument> for Menu {
    type Error = ShapeError;

    fn try_from(document: MenuDocument) -> Result<Self, Self::Error> {
        if document.base_options.is_empty() {
            return Err(ShapeError::NoCategories);
        }
        if document.toppings.is_empty() {
            return Err(ShapeError::NoToppings);
        }

        let mut categories: Vec<Category> = Vec::with_capacity(document.base_options.len());
        for (position, entry) in document.base_options.into_iter().enumerate() {
            let name = entry.category.trim().to_string();
            if name.is_empty() {
                return Err(ShapeError::BlankCategory {
                    position: position + 1,
                });
            }
            if categories.iter().any(|c| c.name == name) {
                return Err(ShapeError::DuplicateCategory { category: name });
            }
            if entry.options.is_empty() {
                return Err(ShapeError::NoOptions { category: name });
            }
            reject_negative_prices(&entry.options)?;
            categories.push(Category {
                name,
                options: entry.options,
            });
        }

        reject_negative_prices(&document.toppings)?;

        Ok(Self {
            categories,
            toppings: document.toppings,
        })
    }
}

fn reject_negative_prices(prices: &IndexMap<String, Decimal>) -> Result<(), ShapeError> {
    match prices.iter().find(|(_, price)| **price < Decimal::ZERO) {
        Some((item, price)) => Err(ShapeError::NegativePrice {
            item: item.clone(),
            price: *price,
        }),
        None => Ok(()),
    }
}

// --- CART MODELS (What is persisted in the cart and order files) ---

/// One pizza configuration in the cart.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Pizza {
    /// Category name to the selected option; `None` while unselected.
    pub base_options: IndexMap<String, Option<String>>,
    /// Selected toppings, in the order they were added. Never contains duplicates.
    #[serde(default)]
    pub toppings: Vec<String>,
    /// Who the pizza is for. Empty until the pizza is finished the first time.
    #[serde(default)]
    pub recipient: String,
}

impl Pizza {
    /// Creates a pizza with every category of `menu` unselected.
    pub fn new_for_menu(menu: &Menu) -> Self {
        Self {
            base_options: menu
                .categories()
                .iter()
                .map(|c| (c.name.clone(), None))
                .collect(),
            ..Default::default()
        }
    }

    /// The option selected for `category`, if any.
    pub fn selection(&self, category: &str) -> Option<&str> {
        self.base_options.get(category)?.as_deref()
    }

    /// Selects `option` for `category`.
    pub fn select(&mut self, category: &str, option: &str) {
        self.base_options
            .insert(category.to_string(), Some(option.to_string()));
    }

    /// Whether `topping` is currently on the pizza.
    pub fn has_topping(&self, topping: &str) -> bool {
        self.toppings.iter().any(|t| t == topping)
    }

    /// Adds `topping` if missing, removes it if present.
    /// Returns whether the topping is on the pizza afterwards.
    pub fn toggle_topping(&mut self, topping: &str) -> bool {
        if let Some(position) = self.toppings.iter().position(|t| t == topping) {
            self.toppings.remove(position);
            false
        } else {
            self.toppings.push(topping.to_string());
            true
        }
    }

    /// The label used when listing the pizza, e.g. `Ana's pizza`.
    pub fn display_name(&self) -> String {
        format!(t!("pizza.display_name"), recipient = title_case(&self.recipient))
    }
}

/// The in-progress order: pizzas in the order they were created.
pub type Cart = Vec<Pizza>;

/// A finalized cart, as written to the orders directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    /// `YYYYMMDD_HHMMSS` of the checkout time.
    pub id: String,
    /// ISO-8601 checkout time.
    pub date: DateTime<Local>,
    /// Snapshot of the cart at checkout.
    pub items: Cart,
}
