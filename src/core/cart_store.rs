// src/core/cart_store.rs

use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Cart, Menu, Pizza};

/// Represents errors that can occur while persisting the cart.
#[derive(Error, Debug)]
pub enum CartError {
    /// The cart file exists but could not be read.
    #[error("Failed to read cart file '{path}': {source}")]
    Read {
        /// The cart file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The cart file is not a JSON list of pizzas.
    #[error("Malformed cart data in '{path}': {source}")]
    Parse {
        /// The cart file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The cart could not be serialized.
    #[error("Failed to serialize cart: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The cart file or its parent directory could not be written.
    #[error("Failed to save cart to '{path}': {source}")]
    Write {
        /// The cart file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The cart file could not be deleted.
    #[error("Failed to clear cart file '{path}': {source}")]
    Delete {
        /// The cart file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

type CartResult<T> = Result<T, CartError>;

/// Loads the cart saved at `path`.
///
/// Returns `Ok(None)` if there is no cart file yet, which is the normal state
/// for a first run or after a checkout.
pub fn load_cart(path: &Path) -> CartResult<Option<Cart>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No cart file at '{}'", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(CartError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let cart: Cart = serde_json::from_str(&data).map_err(|source| CartError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {} pizza(s) from '{}'", cart.len(), path.display());
    Ok(Some(cart))
}

/// Writes the whole cart to `path`, replacing any previous content.
/// Missing parent directories are created.
pub fn save_cart(path: &Path, cart: &[Pizza]) -> CartResult<()> {
    let data = serde_json::to_string_pretty(cart).map_err(CartError::Serialize)?;

    let write_error = |source| CartError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, data).map_err(write_error)?;

    debug!("Saved {} pizza(s) to '{}'", cart.len(), path.display());
    Ok(())
}

/// Deletes the cart file (if any) and then empties `cart`.
///
/// The in-memory cart is only emptied once the file is gone, so a failed delete
/// never leaves the two out of step.
pub fn clear_cart(path: &Path, cart: &mut Cart) -> CartResult<()> {
    match fs::remove_file(path) {
        Ok(()) => debug!("Deleted cart file '{}'", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(CartError::Delete {
                path: path.to_path_buf(),
                source,
            });
        }
    }
    cart.clear();
    Ok(())
}

/// Aligns every pizza of `cart` with `menu` after a menu refresh:
///
/// - selections of categories the menu no longer has are dropped,
/// - selections of options the menu no longer offers are reset to unselected,
/// - categories new to the menu are added as unselected,
/// - toppings the menu no longer offers are removed,
/// - repeated toppings are kept once.
///
/// Returns the number of stale references that were removed or reset.
pub fn reconcile_cart(cart: &mut Cart, menu: &Menu) -> usize {
    let mut changed = 0;

    for pizza in cart.iter_mut() {
        let before = pizza.base_options.len();
        pizza
            .base_options
            .retain(|category, _| menu.category(category).is_some());
        changed += before - pizza.base_options.len();

        for category in menu.categories() {
            let slot = pizza
                .base_options
                .entry(category.name.clone())
                .or_insert(None);
            if slot
                .as_ref()
                .is_some_and(|option| !category.options.contains_key(option))
            {
                *slot = None;
                changed += 1;
            }
        }

        // Keep the pizza's categories in menu order.
        let menu_position = |category: &String| {
            menu.categories()
                .iter()
                .position(|c| &c.name == category)
                .unwrap_or(usize::MAX)
        };
        pizza
            .base_options
            .sort_by(|a, _, b, _| menu_position(a).cmp(&menu_position(b)));

        let before = pizza.toppings.len();
        let mut seen = HashSet::new();
        pizza.toppings.retain(|topping| {
            menu.topping_price(topping).is_some() && seen.insert(topping.clone())
        });
        changed += before - pizza.toppings.len();
    }

    if changed > 0 {
        warn!("Pruned {} stale menu reference(s) from the cart", changed);
    }
    changed
}
