// src/cli/handlers/mod.rs

// One module per entry of the main menu.

/// "Checkout".
pub mod checkout;
/// Helpers shared by the handlers.
pub mod commons;
/// "Edit existing pizza".
pub mod edit;
/// "New pizza".
pub mod new;
/// "Remove a pizza".
pub mod remove;
/// "Start over".
pub mod restart;

/// Tells the command loop whether to keep going after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Show the main menu again.
    Continue,
    /// Leave the program (after a successful checkout).
    Exit,
}
