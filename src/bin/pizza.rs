// src/bin/pizza.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use pizza_prompter::{
    cli::{self, Cli, dispatcher, prompt::TerminalPrompt},
    core::settings,
    system::http::{HttpFetcher, MenuFetcher, OfflineFetcher},
};

/// The main entry point of the `pizza` application.
/// It sets up logging, parses arguments, runs the session and performs centralized
/// error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Resolves the settings, loads the menu and cart, then hands over to the main menu.
fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let settings = settings::resolve_settings(&cli.overrides())?;

    let fetcher: Box<dyn MenuFetcher> = if settings.offline {
        Box::new(OfflineFetcher)
    } else {
        Box::new(HttpFetcher::new(settings.endpoint.clone(), settings.timeout)?)
    };

    let mut state = cli::bootstrap(settings, fetcher.as_ref())?;
    dispatcher::run_command_loop(&mut state, &mut TerminalPrompt)
}
