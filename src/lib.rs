//! `pizza-prompter`: an interactive, menu-driven pizza ordering prompt.
//!
//! The menu is downloaded once at startup (with a local cache as fallback),
//! pizzas are assembled in a cart that is persisted after every change, and
//! checkout writes the cart as a timestamped order file.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

/// Command-line surface, prompts, the pizza editor screens and the main menu.
pub mod cli;
/// Defaults and fixed values.
pub mod constants;
/// Menu loading, cart and order storage, pricing, settings.
pub mod core;
/// Menu, pizza, cart and order types.
pub mod models;
/// The session context handed to every command.
pub mod state;
/// Network access.
pub mod system;
