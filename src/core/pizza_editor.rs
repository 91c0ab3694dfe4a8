//! # Pizza Editor
//!
//! The state machine behind the interactive pizza editor. It holds a *draft* copy of
//! the pizza: nothing the user does is visible to the caller until the editor reaches
//! [`EditorState::Done`], and a cancelled session leaves the original untouched.
//!
//! ```text
//! SelectingCategory ──open_category──▶ EditingCategory ──select_option──▶ SelectingCategory
//! SelectingCategory ──open_toppings──▶ EditingToppings ──close_toppings─▶ SelectingCategory
//! SelectingCategory ──finish (all categories chosen)──▶ NamingRecipient ──name_recipient──▶ Done
//! SelectingCategory ──cancel──▶ Cancelled
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    core::pricing,
    models::{Menu, Pizza},
};

/// Where the editor currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    /// The main pizza screen: pick a category, the toppings, finish or cancel.
    SelectingCategory,
    /// Choosing an option for the named category.
    EditingCategory(String),
    /// Toggling toppings.
    EditingToppings,
    /// Asking who the pizza is for.
    NamingRecipient,
    /// Finished; the draft is the result.
    Done,
    /// Abandoned; the draft is discarded.
    Cancelled,
}

/// Reasons an editor action was refused. The state is unchanged in every case.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditorError {
    /// The action is not available in the current state.
    #[error("'{action}' is not possible while in state {state:?}")]
    InvalidTransition {
        /// The attempted action.
        action: &'static str,
        /// The state the editor was in.
        state: EditorState,
    },
    /// The category is not on the menu.
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    /// The option is not offered in the category being edited.
    #[error("'{option}' is not an option for '{category}'")]
    UnknownOption {
        /// The category being edited.
        category: String,
        /// The rejected option.
        option: String,
    },
    /// The topping is not on the menu.
    #[error("Unknown topping '{0}'")]
    UnknownTopping(String),
    /// Finishing was attempted with required categories still unselected.
    #[error("Required options are not selected: {}", missing.join(", "))]
    Incomplete {
        /// The unselected categories, in menu order.
        missing: Vec<String>,
    },
    /// A new pizza needs a recipient and none was given.
    #[error("A recipient name is required")]
    RecipientRequired,
}

/// One entry of the main pizza screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainChoice {
    /// Edit the option of a category.
    Category(String),
    /// Edit the toppings.
    Toppings,
    /// Finish the pizza.
    Finish,
    /// Abandon the pizza.
    Cancel,
}

type EditorResult<T> = Result<T, EditorError>;

/// Edits a draft copy of one pizza against a menu.
#[derive(Debug)]
pub struct PizzaEditor<'m> {
    menu: &'m Menu,
    draft: Pizza,
    state: EditorState,
}

impl<'m> PizzaEditor<'m> {
    /// Starts editing a copy of `pizza`. Categories of the menu missing from the
    /// pizza are added as unselected.
    pub fn new(menu: &'m Menu, pizza: &Pizza) -> Self {
        let mut draft = pizza.clone();
        for category in menu.categories() {
            draft
                .base_options
                .entry(category.name.clone())
                .or_insert(None);
        }
        Self {
            menu,
            draft,
            state: EditorState::SelectingCategory,
        }
    }

    /// The current state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The pizza as edited so far.
    pub fn draft(&self) -> &Pizza {
        &self.draft
    }

    /// The menu being edited against.
    pub fn menu(&self) -> &'m Menu {
        self.menu
    }

    /// The live price of the draft.
    pub fn price(&self) -> Decimal {
        pricing::pizza_price(&self.draft, self.menu)
    }

    /// Whether the draft may be finished.
    pub fn can_finish(&self) -> bool {
        pricing::is_complete(&self.draft, self.menu)
    }

    /// The entries of the main pizza screen, in display order.
    pub fn main_choices(&self) -> Vec<MainChoice> {
        self.menu
            .categories()
            .iter()
            .map(|c| MainChoice::Category(c.name.clone()))
            .chain([MainChoice::Toppings, MainChoice::Finish, MainChoice::Cancel])
            .collect()
    }

    fn expect_state(&self, expected: &EditorState, action: &'static str) -> EditorResult<()> {
        if &self.state == expected {
            Ok(())
        } else {
            Err(EditorError::InvalidTransition {
                action,
                state: self.state.clone(),
            })
        }
    }

    /// `SelectingCategory` -> `EditingCategory`.
    pub fn open_category(&mut self, category: &str) -> EditorResult<()> {
        self.expect_state(&EditorState::SelectingCategory, "open_category")?;
        if self.menu.category(category).is_none() {
            return Err(EditorError::UnknownCategory(category.to_string()));
        }
        self.state = EditorState::EditingCategory(category.to_string());
        Ok(())
    }

    /// `EditingCategory` -> `SelectingCategory`, selecting `option`, or keeping the
    /// current selection when `option` is `None`.
    pub fn select_option(&mut self, option: Option<&str>) -> EditorResult<()> {
        let EditorState::EditingCategory(category) = &self.state else {
            return Err(EditorError::InvalidTransition {
                action: "select_option",
                state: self.state.clone(),
            });
        };

        if let Some(option) = option {
            let offered = self
                .menu
                .category(category)
                .is_some_and(|c| c.options.contains_key(option));
            if !offered {
                return Err(EditorError::UnknownOption {
                    category: category.clone(),
                    option: option.to_string(),
                });
            }
            let category = category.clone();
            self.draft.select(&category, option);
        }

        self.state = EditorState::SelectingCategory;
        Ok(())
    }

    /// `SelectingCategory` -> `EditingToppings`.
    pub fn open_toppings(&mut self) -> EditorResult<()> {
        self.expect_state(&EditorState::SelectingCategory, "open_toppings")?;
        self.state = EditorState::EditingToppings;
        Ok(())
    }

    /// Adds or removes a topping while in `EditingToppings`.
    /// Returns whether the topping is on the pizza afterwards.
    pub fn toggle_topping(&mut self, topping: &str) -> EditorResult<bool> {
        self.expect_state(&EditorState::EditingToppings, "toggle_topping")?;
        if self.menu.topping_price(topping).is_none() {
            return Err(EditorError::UnknownTopping(topping.to_string()));
        }
        Ok(self.draft.toggle_topping(topping))
    }

    /// `EditingToppings` -> `SelectingCategory`.
    pub fn close_toppings(&mut self) -> EditorResult<()> {
        self.expect_state(&EditorState::EditingToppings, "close_toppings")?;
        self.state = EditorState::SelectingCategory;
        Ok(())
    }

    /// `SelectingCategory` -> `NamingRecipient`, if every category has a selection.
    pub fn finish(&mut self) -> EditorResult<()> {
        self.expect_state(&EditorState::SelectingCategory, "finish")?;
        let missing = pricing::missing_categories(&self.draft, self.menu);
        if !missing.is_empty() {
            return Err(EditorError::Incomplete {
                missing: missing.into_iter().map(str::to_string).collect(),
            });
        }
        self.state = EditorState::NamingRecipient;
        Ok(())
    }

    /// `NamingRecipient` -> `Done`.
    ///
    /// Blank input keeps an existing recipient; a pizza without one must be given a name.
    pub fn name_recipient(&mut self, input: &str) -> EditorResult<()> {
        self.expect_state(&EditorState::NamingRecipient, "name_recipient")?;
        let name = input.trim();
        if name.is_empty() {
            if self.draft.recipient.trim().is_empty() {
                return Err(EditorError::RecipientRequired);
            }
        } else {
            self.draft.recipient = name.to_string();
        }
        self.state = EditorState::Done;
        Ok(())
    }

    /// `SelectingCategory` -> `Cancelled`. Confirmation is the caller's job.
    pub fn cancel(&mut self) -> EditorResult<()> {
        self.expect_state(&EditorState::SelectingCategory, "cancel")?;
        self.state = EditorState::Cancelled;
        Ok(())
    }

    /// Ends the session: the finished pizza, or `None` unless the editor is `Done`.
    pub fn into_result(self) -> Option<Pizza> {
        match self.state {
            EditorState::Done => Some(self.draft),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuDocument;

    fn menu() -> Menu {
        let document: MenuDocument = serde_json::from_str(
            r#"{
                "base_options": [
                    {"category": "size", "options": {"small": 8.00, "large": 12.00}},
                    {"category": "crust", "options": {"thin": 0, "thick": 1}}
                ],
                "toppings": {"cheese": 1.50, "ham": 2}
            }"#,
        )
        .unwrap();
        Menu::try_from(document).unwrap()
    }

    fn pick(editor: &mut PizzaEditor<'_>, category: &str, option: &str) {
        editor.open_category(category).unwrap();
        editor.select_option(Some(option)).unwrap();
    }

    #[test]
    fn test_new_pizza_full_walk() {
        let menu = menu();
        let start = Pizza::new_for_menu(&menu);
        let mut editor = PizzaEditor::new(&menu, &start);

        pick(&mut editor, "size", "large");
        pick(&mut editor, "crust", "thin");
        editor.open_toppings().unwrap();
        assert!(editor.toggle_topping("cheese").unwrap());
        editor.close_toppings().unwrap();
        assert_eq!(editor.price(), Decimal::new(1350, 2));

        editor.finish().unwrap();
        assert_eq!(editor.state(), &EditorState::NamingRecipient);
        editor.name_recipient("  lee ").unwrap();

        let pizza = editor.into_result().unwrap();
        assert_eq!(pizza.recipient, "lee");
        assert_eq!(pizza.selection("size"), Some("large"));
        assert_eq!(pizza.toppings, ["cheese"]);
    }

    #[test]
    fn test_finish_refused_until_all_categories_selected() {
        let menu = menu();
        let mut editor = PizzaEditor::new(&menu, &Pizza::new_for_menu(&menu));

        assert!(!editor.can_finish());
        assert_eq!(
            editor.finish(),
            Err(EditorError::Incomplete {
                missing: vec!["size".to_string(), "crust".to_string()]
            })
        );
        assert_eq!(editor.state(), &EditorState::SelectingCategory);

        pick(&mut editor, "size", "small");
        assert!(matches!(editor.finish(), Err(EditorError::Incomplete { missing }) if missing == ["crust"]));

        pick(&mut editor, "crust", "thick");
        assert!(editor.can_finish());
        editor.finish().unwrap();
    }

    #[test]
    fn test_blank_selection_keeps_current_option() {
        let menu = menu();
        let mut editor = PizzaEditor::new(&menu, &Pizza::new_for_menu(&menu));
        pick(&mut editor, "size", "small");

        editor.open_category("size").unwrap();
        editor.select_option(None).unwrap();

        assert_eq!(editor.draft().selection("size"), Some("small"));
        assert_eq!(editor.state(), &EditorState::SelectingCategory);
    }

    #[test]
    fn test_toggling_twice_restores_toppings() {
        let menu = menu();
        let mut editor = PizzaEditor::new(&menu, &Pizza::new_for_menu(&menu));
        editor.open_toppings().unwrap();
        editor.toggle_topping("ham").unwrap();
        let before = editor.draft().toppings.clone();

        assert!(editor.toggle_topping("cheese").unwrap());
        assert!(!editor.toggle_topping("cheese").unwrap());
        assert_eq!(editor.draft().toppings, before);
    }

    #[test]
    fn test_cancel_discards_all_edits() {
        let menu = menu();
        let mut original = Pizza::new_for_menu(&menu);
        original.select("size", "small");
        original.select("crust", "thin");
        original.recipient = "max".to_string();

        let mut editor = PizzaEditor::new(&menu, &original);
        pick(&mut editor, "size", "large");
        editor.open_toppings().unwrap();
        editor.toggle_topping("ham").unwrap();
        editor.close_toppings().unwrap();
        editor.cancel().unwrap();

        assert_eq!(editor.state(), &EditorState::Cancelled);
        assert_eq!(editor.into_result(), None);
        assert_eq!(original.selection("size"), Some("small"));
        assert!(original.toppings.is_empty());
    }

    #[test]
    fn test_recipient_rules() {
        let menu = menu();
        let mut pizza = Pizza::new_for_menu(&menu);
        pizza.select("size", "small");
        pizza.select("crust", "thin");

        // A new pizza needs a name.
        let mut editor = PizzaEditor::new(&menu, &pizza);
        editor.finish().unwrap();
        assert_eq!(editor.name_recipient("   "), Err(EditorError::RecipientRequired));
        assert_eq!(editor.state(), &EditorState::NamingRecipient);
        editor.name_recipient("ada").unwrap();

        // An existing name is kept on blank input, and replaced otherwise.
        pizza.recipient = "ada".to_string();
        let mut editor = PizzaEditor::new(&menu, &pizza);
        editor.finish().unwrap();
        editor.name_recipient("").unwrap();
        assert_eq!(editor.into_result().unwrap().recipient, "ada");

        let mut editor = PizzaEditor::new(&menu, &pizza);
        editor.finish().unwrap();
        editor.name_recipient("grace").unwrap();
        assert_eq!(editor.into_result().unwrap().recipient, "grace");
    }

    #[test]
    fn test_invalid_transitions_and_unknown_names() {
        let menu = menu();
        let mut editor = PizzaEditor::new(&menu, &Pizza::new_for_menu(&menu));

        assert!(matches!(
            editor.toggle_topping("cheese"),
            Err(EditorError::InvalidTransition { .. })
        ));
        assert!(matches!(
            editor.select_option(Some("large")),
            Err(EditorError::InvalidTransition { .. })
        ));
        assert_eq!(
            editor.open_category("sauce"),
            Err(EditorError::UnknownCategory("sauce".to_string()))
        );

        editor.open_category("size").unwrap();
        assert!(matches!(
            editor.select_option(Some("gigantic")),
            Err(EditorError::UnknownOption { .. })
        ));
        assert!(matches!(editor.cancel(), Err(EditorError::InvalidTransition { .. })));
        editor.select_option(None).unwrap();

        editor.open_toppings().unwrap();
        assert_eq!(
            editor.toggle_topping("anchovies"),
            Err(EditorError::UnknownTopping("anchovies".to_string()))
        );
    }

    #[test]
    fn test_main_choices_order() {
        let menu = menu();
        let editor = PizzaEditor::new(&menu, &Pizza::default());

        assert_eq!(
            editor.main_choices(),
            vec![
                MainChoice::Category("size".to_string()),
                MainChoice::Category("crust".to_string()),
                MainChoice::Toppings,
                MainChoice::Finish,
                MainChoice::Cancel,
            ]
        );
        // Missing categories are filled in on the draft.
        assert_eq!(editor.draft().base_options.len(), 2);
    }
}
