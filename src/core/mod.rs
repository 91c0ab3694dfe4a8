// src/core/mod.rs

/// Reading, writing and clearing the cart file.
pub mod cart_store;
/// Text helpers for names, prices and receipt lines.
pub mod commons;
/// Menu download with cache fallback.
pub mod menu_loader;
/// Writing the cart as an order file.
pub mod order_writer;
/// Path expansion and config locations.
pub mod paths;
pub mod pizza_editor;
/// Price computation and completeness checks.
pub mod pricing;
/// Receipt lines printed at checkout.
pub mod receipt;
pub mod settings;
