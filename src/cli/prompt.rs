// src/cli/prompt.rs

use anyhow::Result;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

/// Every question the program asks the user goes through this trait, so the
/// command loop and the pizza editor can be driven by a script in tests.
pub trait Prompt {
    /// Shows a numbered menu and returns the index of the chosen item.
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize>;

    /// Like [`Prompt::select`], but the user may dismiss the menu (`Esc`/`q`),
    /// which returns `None`.
    fn select_opt(&mut self, prompt: &str, items: &[String], default: usize)
    -> Result<Option<usize>>;

    /// Asks a yes/no question. Destructive actions default to "no".
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Reads a line of text. An empty line is allowed and returned as is.
    fn input(&mut self, prompt: &str) -> Result<String>;
}

/// The interactive terminal, rendered with `dialoguer`.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?;
        Ok(selection)
    }

    fn select_opt(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>> {
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()?;
        Ok(selection)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(answer)
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }
}
