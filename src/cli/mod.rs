// src/cli/mod.rs

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use crate::{
    core::{
        cart_store,
        menu_loader::{self, MenuOrigin},
        settings::{Settings, SettingsOverrides},
    },
    state::AppState,
    system::http::MenuFetcher,
};

/// The main menu loop.
pub mod dispatcher;
/// Terminal screens of the pizza editor.
pub mod editor;
/// One handler per main menu entry.
pub mod handlers;
/// Terminal input behind a trait.
pub mod prompt;

/// Builds the color-aware help string at runtime.
fn build_help_string() -> &'static str {
    // Replaces the semantic tags of the template (`<title>`, `<cmd>`, ...) with
    // ANSI styles, or with nothing when colors are off.
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let template = t!("cli.help.template");

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    let formatted_string = template
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// pizza: an interactive pizza ordering prompt.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    help_template = { build_help_string() },
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
pub struct Cli {
    /// Settings file to use instead of `./pizza.toml` or the user config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// URL of the menu document.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Where the cart is kept.
    #[arg(long = "cart", value_name = "PATH")]
    pub cart_file: Option<String>,

    /// Where the last downloaded menu is kept.
    #[arg(long = "cache", value_name = "PATH")]
    pub cache_file: Option<String>,

    /// Where orders are written.
    #[arg(long, value_name = "PATH")]
    pub orders_dir: Option<String>,

    /// Skip the download and use the cached menu.
    #[arg(long)]
    pub offline: bool,
}

impl Cli {
    /// The settings given on the command line.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            config: self.config.clone(),
            endpoint: self.endpoint.clone(),
            cache_file: self.cache_file.clone(),
            cart_file: self.cart_file.clone(),
            orders_dir: self.orders_dir.clone(),
            offline: self.offline,
        }
    }
}

/// Prepares a session: loads the menu (fatal on failure), loads the cart (tolerant)
/// and aligns the cart with the menu.
pub fn bootstrap(settings: Settings, fetcher: &dyn MenuFetcher) -> Result<AppState> {
    let load = menu_loader::load_menu(fetcher, &settings.cache_file)
        .with_context(|| t!("startup.error.menu"))?;

    if load.origin == MenuOrigin::Cache {
        println!(
            "{}",
            format!(t!("startup.warn.offline"), path = settings.cache_file.display()).yellow()
        );
    }
    if let Some(e) = &load.cache_error {
        println!("{} {}", t!("startup.warn.cache_write").dimmed(), e);
    }

    let cart = match cart_store::load_cart(&settings.cart_file) {
        Ok(Some(cart)) => cart,
        Ok(None) => {
            println!(
                "{}",
                format!(t!("startup.info.new_cart"), path = settings.cart_file.display()).dimmed()
            );
            Vec::new()
        }
        Err(e) => {
            log::warn!("Starting with an empty cart: {}", e);
            println!("{} {}", t!("startup.warn.cart_unreadable").yellow(), e);
            Vec::new()
        }
    };

    let mut state = AppState::new(settings, load.menu, cart);
    let pruned = state.reconcile_cart();
    if pruned > 0 {
        println!(
            "{}",
            format!(t!("startup.warn.cart_pruned"), count = pruned).yellow()
        );
        handlers::commons::persist_cart(&mut state);
    }
    Ok(state)
}
