// src/cli/editor.rs

use anyhow::Result;
use colored::Colorize;

use crate::{
    cli::prompt::Prompt,
    core::{
        commons::{priced_line, title_case},
        pizza_editor::{EditorError, EditorState, MainChoice, PizzaEditor},
        pricing,
    },
    models::{Menu, Pizza},
};

/// Runs the interactive editor on a copy of `pizza`.
///
/// Returns the edited pizza when the user finishes, or `None` when they cancel, in
/// which case nothing they changed is kept.
pub fn edit_pizza(prompt: &mut dyn Prompt, menu: &Menu, pizza: &Pizza) -> Result<Option<Pizza>> {
    let mut editor = PizzaEditor::new(menu, pizza);

    loop {
        match editor.state().clone() {
            EditorState::SelectingCategory => main_screen(prompt, &mut editor)?,
            EditorState::EditingCategory(category) => category_screen(prompt, &mut editor, &category)?,
            EditorState::EditingToppings => toppings_screen(prompt, &mut editor)?,
            EditorState::NamingRecipient => recipient_screen(prompt, &mut editor)?,
            EditorState::Done | EditorState::Cancelled => break,
        }
    }

    let result = editor.into_result();
    log::debug!("Pizza editor closed, finished: {}", result.is_some());
    Ok(result)
}

/// Builds the label of one entry of the main pizza screen.
fn main_choice_label(editor: &PizzaEditor<'_>, choice: &MainChoice) -> String {
    let menu = editor.menu();
    let draft = editor.draft();
    match choice {
        MainChoice::Category(name) => match draft.selection(name) {
            Some(option) => {
                let price = menu.option_price(name, option).unwrap_or_default();
                let label = format!(
                    t!("editor.category_selected"),
                    category = title_case(name),
                    option = title_case(option)
                );
                priced_line(&label, price)
            }
            None => format!(t!("editor.category_unselected"), category = title_case(name)),
        },
        MainChoice::Toppings => {
            let label = format!(t!("editor.toppings"), count = draft.toppings.len());
            priced_line(&label, pricing::toppings_price(draft, menu))
        }
        MainChoice::Finish => {
            if editor.can_finish() {
                priced_line(t!("editor.finish"), editor.price())
            } else {
                t!("editor.finish_blocked").to_string()
            }
        }
        MainChoice::Cancel => t!("editor.cancel").to_string(),
    }
}

fn main_screen(prompt: &mut dyn Prompt, editor: &mut PizzaEditor<'_>) -> Result<()> {
    let choices = editor.main_choices();
    let labels: Vec<String> = choices
        .iter()
        .map(|choice| main_choice_label(editor, choice))
        .collect();

    let selection = prompt.select(t!("editor.prompt.modify"), &labels, 0)?;
    let Some(choice) = choices.get(selection) else {
        return Ok(());
    };

    match choice {
        MainChoice::Category(name) => editor.open_category(name)?,
        MainChoice::Toppings => editor.open_toppings()?,
        MainChoice::Finish => match editor.finish() {
            Ok(()) => {}
            Err(EditorError::Incomplete { .. }) => {
                println!("{}", t!("editor.error.required_missing").yellow());
            }
            Err(e) => return Err(e.into()),
        },
        MainChoice::Cancel => {
            if prompt.confirm(t!("editor.prompt.cancel"))? {
                editor.cancel()?;
            }
        }
    }
    Ok(())
}

fn category_screen(
    prompt: &mut dyn Prompt,
    editor: &mut PizzaEditor<'_>,
    category: &str,
) -> Result<()> {
    let menu = editor.menu();
    let Some(entry) = menu.category(category) else {
        return Err(EditorError::UnknownCategory(category.to_string()).into());
    };
    let current = editor.draft().selection(category);

    let options: Vec<&String> = entry.options.keys().collect();
    let mut labels: Vec<String> = entry
        .options
        .iter()
        .map(|(name, price)| {
            let mark = if current == Some(name.as_str()) { "[✓] " } else { "[ ] " };
            priced_line(&format!("{}{}", mark, title_case(name)), *price)
        })
        .collect();
    labels.push(t!("editor.keep_current").to_string());

    let default = current
        .and_then(|c| options.iter().position(|o| o.as_str() == c))
        .unwrap_or(0);
    let prompt_text = format!(t!("editor.prompt.select_option"), category = title_case(category));

    // Dismissing the menu or picking "keep" leaves the selection as it is.
    let choice = prompt
        .select_opt(&prompt_text, &labels, default)?
        .and_then(|i| options.get(i).map(|o| o.as_str()));
    editor.select_option(choice)?;
    Ok(())
}

fn toppings_screen(prompt: &mut dyn Prompt, editor: &mut PizzaEditor<'_>) -> Result<()> {
    let menu = editor.menu();
    let toppings: Vec<&String> = menu.toppings().keys().collect();
    let mut labels: Vec<String> = menu
        .toppings()
        .iter()
        .map(|(name, price)| {
            let mark = if editor.draft().has_topping(name) { "[✓] " } else { "[ ] " };
            priced_line(&format!("{}{}", mark, title_case(name)), *price)
        })
        .collect();
    labels.push(t!("editor.save_toppings").to_string());

    let selection = prompt.select(t!("editor.prompt.toppings"), &labels, 0)?;
    match toppings.get(selection) {
        Some(topping) => {
            editor.toggle_topping(topping)?;
        }
        None => editor.close_toppings()?,
    }
    Ok(())
}

fn recipient_screen(prompt: &mut dyn Prompt, editor: &mut PizzaEditor<'_>) -> Result<()> {
    let existing = editor.draft().recipient.clone();
    let prompt_text = if existing.trim().is_empty() {
        t!("editor.prompt.recipient").to_string()
    } else {
        format!(t!("editor.prompt.recipient_default"), recipient = existing)
    };

    let input = prompt.input(&prompt_text)?;
    match editor.name_recipient(&input) {
        Ok(()) => Ok(()),
        Err(EditorError::RecipientRequired) => {
            println!("{}", t!("editor.error.recipient_required").yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
