// src/cli/dispatcher.rs

use anyhow::Result;
use colored::Colorize;

use crate::{
    cli::{
        handlers::{self, Flow, commons},
        prompt::Prompt,
    },
    core::{commons::priced_line, pricing},
    state::AppState,
};

// --- Command Definition and Registry ---

/// Defines an entry of the main menu: its name (for logs), how it is labelled and
/// the handler that runs it.
struct CommandDefinition {
    name: &'static str,
    label: fn(&AppState) -> String,
    handler: fn(&mut AppState, &mut dyn Prompt) -> Result<Flow>,
}

/// The single source of truth for the main menu, in display order.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "new",
        label: |_| t!("menu.new").to_string(),
        handler: handlers::new::handle,
    },
    CommandDefinition {
        name: "edit",
        label: |_| t!("menu.edit").to_string(),
        handler: handlers::edit::handle,
    },
    CommandDefinition {
        name: "remove",
        label: |_| t!("menu.remove").to_string(),
        handler: handlers::remove::handle,
    },
    CommandDefinition {
        name: "restart",
        label: |_| t!("menu.restart").to_string(),
        handler: handlers::restart::handle,
    },
    CommandDefinition {
        name: "checkout",
        label: |state| {
            priced_line(
                t!("menu.checkout"),
                pricing::cart_total(state.cart(), state.menu()),
            )
        },
        handler: handlers::checkout::handle,
    },
];

/// Runs the main menu until a handler asks to exit.
///
/// The cart is saved after every command that changed it. Console errors end the
/// loop and are returned to the caller.
pub fn run_command_loop(state: &mut AppState, prompt: &mut dyn Prompt) -> Result<()> {
    println!("{}", t!("menu.welcome").bold());

    loop {
        let current: &AppState = state;
        let labels: Vec<String> = COMMAND_REGISTRY
            .iter()
            .map(|command| (command.label)(current))
            .collect();

        let selection = prompt.select(t!("menu.prompt"), &labels, 0)?;
        let Some(command) = COMMAND_REGISTRY.get(selection) else {
            continue;
        };
        log::debug!("Dispatching command '{}'", command.name);

        let flow = (command.handler)(state, prompt)?;
        if state.needs_saving() {
            commons::persist_cart(state);
        }
        if flow == Flow::Exit {
            return Ok(());
        }
    }
}
