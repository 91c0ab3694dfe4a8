// src/state.rs

use crate::core::cart_store::{self, CartError};
use crate::core::settings::Settings;
use crate::models::{Cart, Menu};

/// Represents the state of the cart relative to the cart file.
/// It holds the current cart and, once a change was requested, a snapshot of the
/// cart as it was last written.
#[derive(Debug)]
enum CartState {
    /// The in-memory cart matches what is on disk.
    Saved(Cart),
    /// A mutation has been requested. We now hold both the saved snapshot and the
    /// current, mutable cart.
    Dirty { saved: Cart, current: Cart },
}

impl CartState {
    fn current(&self) -> &Cart {
        match self {
            Self::Saved(cart) => cart,
            Self::Dirty { current, .. } => current,
        }
    }

    /// Transitions to `Dirty` (cloning the cart once) and hands out the current cart.
    fn make_mut(&mut self) -> &mut Cart {
        if let Self::Saved(cart) = self {
            let current = std::mem::take(cart);
            *self = Self::Dirty {
                saved: current.clone(),
                current,
            };
        }
        match self {
            Self::Dirty { current, .. } => current,
            Self::Saved(cart) => cart,
        }
    }

    fn mark_saved(&mut self) {
        if let Self::Dirty { current, .. } = self {
            *self = Self::Saved(std::mem::take(current));
        }
    }
}

/// The application context: settings, menu and cart of the running session.
/// It is owned by `main` and handed to every command by reference.
#[derive(Debug)]
pub struct AppState {
    settings: Settings,
    menu: Menu,
    cart: CartState,
}

impl AppState {
    /// Creates the context. `cart` is assumed to match the cart file.
    pub fn new(settings: Settings, menu: Menu, cart: Cart) -> Self {
        Self {
            settings,
            menu,
            cart: CartState::Saved(cart),
        }
    }

    /// The session settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The menu loaded at startup.
    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Read-only access to the cart.
    pub fn cart(&self) -> &Cart {
        self.cart.current()
    }

    /// Mutable access to the cart. The cart is considered changed from here on
    /// until [`AppState::persist`] writes it.
    pub fn cart_mut(&mut self) -> &mut Cart {
        self.cart.make_mut()
    }

    /// Checks if the cart needs saving by comparing it against the saved snapshot.
    pub fn needs_saving(&self) -> bool {
        match &self.cart {
            CartState::Saved(_) => false,
            CartState::Dirty { saved, current } => saved != current,
        }
    }

    /// Writes the cart file if the cart changed since the last save.
    /// Returns whether anything was written.
    ///
    /// On failure the cart stays dirty, so the next call tries again.
    pub fn persist(&mut self) -> Result<bool, CartError> {
        if !self.needs_saving() {
            self.cart.mark_saved();
            return Ok(false);
        }
        cart_store::save_cart(&self.settings.cart_file, self.cart.current())?;
        self.cart.mark_saved();
        Ok(true)
    }

    /// Deletes the cart file and empties the cart.
    pub fn clear_cart(&mut self) -> Result<(), CartError> {
        cart_store::clear_cart(&self.settings.cart_file, self.cart.make_mut())?;
        self.cart.mark_saved();
        Ok(())
    }

    /// Prunes cart references the menu no longer knows about.
    /// Returns the number of references removed or reset.
    pub fn reconcile_cart(&mut self) -> usize {
        cart_store::reconcile_cart(self.cart.make_mut(), &self.menu)
    }
}
