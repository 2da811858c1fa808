//! On-screen keypad
//!
//! Every button declares what it does the way the page markup does: token
//! buttons carry a `data-value`, command buttons a `data-action` of `clear`,
//! `back` or `equals`. Clicks are resolved by reading those attributes back,
//! so the mock DOM and the browser shell share one dispatch path.

use crate::keyboard::KeyCommand;

use super::dom::DomElement;

/// What a keypad button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Insert one of `+ - * /`
    Operator(char),
    /// Open parenthesis
    OpenParen,
    /// Close parenthesis
    CloseParen,
    /// Percent suffix
    Percent,
    /// Evaluate the expression
    Equals,
    /// Clear the input
    Clear,
    /// Delete the last character
    Backspace,
}

impl KeypadAction {
    /// Returns the character this button types, if any
    #[must_use]
    pub fn to_char(&self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10),
            Self::Decimal => Some('.'),
            Self::Operator(op) => Some(*op),
            Self::OpenParen => Some('('),
            Self::CloseParen => Some(')'),
            Self::Percent => Some('%'),
            Self::Equals | Self::Clear | Self::Backspace => None,
        }
    }

    /// Returns the button label
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Operator('*') => "×".to_string(),
            Self::Operator('/') => "÷".to_string(),
            Self::Operator('-') => "−".to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::Backspace => "⌫".to_string(),
            other => other.to_char().map(String::from).unwrap_or_default(),
        }
    }

    /// Returns the `data-action` attribute for command buttons
    #[must_use]
    pub const fn data_action(&self) -> Option<&'static str> {
        match self {
            Self::Clear => Some("clear"),
            Self::Backspace => Some("back"),
            Self::Equals => Some("equals"),
            _ => None,
        }
    }

    /// Returns the engine command this button issues
    #[must_use]
    pub fn command(&self) -> Option<KeyCommand> {
        match self {
            Self::Equals => Some(KeyCommand::Evaluate),
            Self::Clear => Some(KeyCommand::Clear),
            Self::Backspace => Some(KeyCommand::Backspace),
            other => other.to_char().map(KeyCommand::Press),
        }
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Number of columns the button covers
    pub span: usize,
}

impl KeypadButtonDef {
    /// Creates a single-column button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        let id = match action {
            KeypadAction::Digit(d) => format!("btn-{d}"),
            KeypadAction::Decimal => "btn-decimal".to_string(),
            KeypadAction::Operator(op) => format!("btn-{}", op_name(op)),
            KeypadAction::OpenParen => "btn-open-paren".to_string(),
            KeypadAction::CloseParen => "btn-close-paren".to_string(),
            KeypadAction::Percent => "btn-percent".to_string(),
            KeypadAction::Equals => "btn-equals".to_string(),
            KeypadAction::Clear => "btn-clear".to_string(),
            KeypadAction::Backspace => "btn-back".to_string(),
        };
        Self {
            action,
            id,
            row,
            col,
            span: 1,
        }
    }

    /// Widens the button over `span` columns
    #[must_use]
    pub const fn with_span(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    /// Returns true if the button covers the given cell
    #[must_use]
    pub const fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && col >= self.col && col < self.col + self.span
    }

    /// Builds the `<button>` element
    #[must_use]
    pub fn to_element(&self) -> DomElement {
        let mut elem = DomElement::new("button")
            .with_id(&self.id)
            .with_text(&self.action.label());
        if let Some(action) = self.action.data_action() {
            elem = elem.with_attr("data-action", action);
        } else if let Some(ch) = self.action.to_char() {
            elem = elem.with_attr("data-value", &ch.to_string());
        }
        if self.span > 1 {
            elem = elem.with_attr("data-span", &self.span.to_string());
        }
        elem
    }
}

/// Returns a name for an operator (for element IDs)
fn op_name(op: char) -> &'static str {
    match op {
        '+' => "plus",
        '-' => "minus",
        '*' => "times",
        '/' => "divide",
        _ => "op",
    }
}

/// Resolves a clicked element to an engine command
///
/// `data-action` wins over `data-value`. Elements with neither, or with an
/// unknown action, do nothing.
#[must_use]
pub fn button_command(element: &DomElement) -> Option<KeyCommand> {
    match element.get_attr("data-action") {
        Some("clear") => return Some(KeyCommand::Clear),
        Some("back") => return Some(KeyCommand::Backspace),
        Some("equals") => return Some(KeyCommand::Evaluate),
        Some(_) => return None,
        None => {}
    }
    let mut chars = element.get_attr("data-value")?.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(KeyCommand::Press(ch)),
        _ => None,
    }
}

/// Keypad layout
///
/// ```text
/// [ C ] [ ⌫ ] [ % ] [ ÷ ]
/// [ 7 ] [ 8 ] [ 9 ] [ × ]
/// [ 4 ] [ 5 ] [ 6 ] [ − ]
/// [ 1 ] [ 2 ] [ 3 ] [ + ]
/// [ ( ] [ 0 ] [ ) ] [ . ]
/// [          =          ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard calculator keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{
            Backspace, Clear, CloseParen, Decimal, Digit, Equals, OpenParen, Operator, Percent,
        };
        let buttons = vec![
            KeypadButtonDef::new(Clear, 0, 0),
            KeypadButtonDef::new(Backspace, 0, 1),
            KeypadButtonDef::new(Percent, 0, 2),
            KeypadButtonDef::new(Operator('/'), 0, 3),
            KeypadButtonDef::new(Digit(7), 1, 0),
            KeypadButtonDef::new(Digit(8), 1, 1),
            KeypadButtonDef::new(Digit(9), 1, 2),
            KeypadButtonDef::new(Operator('*'), 1, 3),
            KeypadButtonDef::new(Digit(4), 2, 0),
            KeypadButtonDef::new(Digit(5), 2, 1),
            KeypadButtonDef::new(Digit(6), 2, 2),
            KeypadButtonDef::new(Operator('-'), 2, 3),
            KeypadButtonDef::new(Digit(1), 3, 0),
            KeypadButtonDef::new(Digit(2), 3, 1),
            KeypadButtonDef::new(Digit(3), 3, 2),
            KeypadButtonDef::new(Operator('+'), 3, 3),
            KeypadButtonDef::new(OpenParen, 4, 0),
            KeypadButtonDef::new(Digit(0), 4, 1),
            KeypadButtonDef::new(CloseParen, 4, 2),
            KeypadButtonDef::new(Decimal, 4, 3),
            KeypadButtonDef::new(Equals, 5, 0).with_span(4),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 6,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button that types `ch`
    #[must_use]
    pub fn find_button_by_char(&self, ch: char) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action.to_char() == Some(ch))
    }

    /// Finds the button that issues `command`
    #[must_use]
    pub fn find_button_for(&self, command: KeyCommand) -> Option<&KeypadButtonDef> {
        self.buttons
            .iter()
            .find(|b| b.action.command() == Some(command))
    }

    /// Creates DOM elements for all keypad buttons
    #[must_use]
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons.iter().map(KeypadButtonDef::to_element).collect()
    }

    /// Processes a button click and returns the action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== KeypadAction tests =====

    #[test]
    fn test_digit_to_char() {
        for d in 0..=9 {
            assert_eq!(
                KeypadAction::Digit(d).to_char(),
                char::from_digit(u32::from(d), 10)
            );
        }
    }

    #[test]
    fn test_token_actions_to_char() {
        assert_eq!(KeypadAction::Decimal.to_char(), Some('.'));
        assert_eq!(KeypadAction::OpenParen.to_char(), Some('('));
        assert_eq!(KeypadAction::CloseParen.to_char(), Some(')'));
        assert_eq!(KeypadAction::Percent.to_char(), Some('%'));
        for op in ['+', '-', '*', '/'] {
            assert_eq!(KeypadAction::Operator(op).to_char(), Some(op));
        }
    }

    #[test]
    fn test_command_actions_have_no_char() {
        assert_eq!(KeypadAction::Equals.to_char(), None);
        assert_eq!(KeypadAction::Clear.to_char(), None);
        assert_eq!(KeypadAction::Backspace.to_char(), None);
    }

    #[test]
    fn test_labels_use_display_symbols() {
        assert_eq!(KeypadAction::Digit(5).label(), "5");
        assert_eq!(KeypadAction::Operator('+').label(), "+");
        assert_eq!(KeypadAction::Operator('*').label(), "×");
        assert_eq!(KeypadAction::Operator('/').label(), "÷");
        assert_eq!(KeypadAction::Operator('-').label(), "−");
        assert_eq!(KeypadAction::Percent.label(), "%");
        assert_eq!(KeypadAction::Backspace.label(), "⌫");
        assert_eq!(KeypadAction::Clear.label(), "C");
    }

    #[test]
    fn test_action_commands() {
        assert_eq!(KeypadAction::Digit(3).command(), Some(KeyCommand::Press('3')));
        assert_eq!(KeypadAction::Equals.command(), Some(KeyCommand::Evaluate));
        assert_eq!(KeypadAction::Clear.command(), Some(KeyCommand::Clear));
        assert_eq!(KeypadAction::Backspace.command(), Some(KeyCommand::Backspace));
    }

    // ===== KeypadButtonDef tests =====

    #[test]
    fn test_button_ids() {
        assert_eq!(KeypadButtonDef::new(KeypadAction::Digit(5), 2, 1).id, "btn-5");
        assert_eq!(KeypadButtonDef::new(KeypadAction::Operator('+'), 3, 3).id, "btn-plus");
        assert_eq!(KeypadButtonDef::new(KeypadAction::Operator('-'), 2, 3).id, "btn-minus");
        assert_eq!(KeypadButtonDef::new(KeypadAction::Operator('*'), 1, 3).id, "btn-times");
        assert_eq!(KeypadButtonDef::new(KeypadAction::Operator('/'), 0, 3).id, "btn-divide");
        assert_eq!(KeypadButtonDef::new(KeypadAction::Percent, 0, 2).id, "btn-percent");
        assert_eq!(KeypadButtonDef::new(KeypadAction::Backspace, 0, 1).id, "btn-back");
    }

    #[test]
    fn test_token_button_element_has_data_value() {
        let elem = KeypadButtonDef::new(KeypadAction::Operator('*'), 1, 3).to_element();
        assert_eq!(elem.tag, "button");
        assert_eq!(elem.text_content, "×");
        assert_eq!(elem.get_attr("data-value"), Some("*"));
        assert_eq!(elem.get_attr("data-action"), None);
    }

    #[test]
    fn test_command_button_element_has_data_action() {
        let elem = KeypadButtonDef::new(KeypadAction::Backspace, 0, 1).to_element();
        assert_eq!(elem.get_attr("data-action"), Some("back"));
        assert_eq!(elem.get_attr("data-value"), None);
    }

    #[test]
    fn test_span_covers_cells() {
        let btn = KeypadButtonDef::new(KeypadAction::Equals, 5, 0).with_span(4);
        assert!(btn.covers(5, 0));
        assert!(btn.covers(5, 3));
        assert!(!btn.covers(5, 4));
        assert!(!btn.covers(4, 0));
        assert_eq!(btn.to_element().get_attr("data-span"), Some("4"));
    }

    // ===== button_command tests =====

    #[test]
    fn test_button_command_reads_attributes() {
        let clear = DomElement::new("button").with_attr("data-action", "clear");
        let back = DomElement::new("button").with_attr("data-action", "back");
        let equals = DomElement::new("button").with_attr("data-action", "equals");
        let seven = DomElement::new("button").with_attr("data-value", "7");
        assert_eq!(button_command(&clear), Some(KeyCommand::Clear));
        assert_eq!(button_command(&back), Some(KeyCommand::Backspace));
        assert_eq!(button_command(&equals), Some(KeyCommand::Evaluate));
        assert_eq!(button_command(&seven), Some(KeyCommand::Press('7')));
    }

    #[test]
    fn test_button_command_action_wins_over_value() {
        let elem = DomElement::new("button")
            .with_attr("data-action", "clear")
            .with_attr("data-value", "7");
        assert_eq!(button_command(&elem), Some(KeyCommand::Clear));
    }

    #[test]
    fn test_button_command_ignores_unknown() {
        assert_eq!(button_command(&DomElement::new("button")), None);
        let unknown = DomElement::new("button").with_attr("data-action", "sqrt");
        assert_eq!(button_command(&unknown), None);
        let empty = DomElement::new("button").with_attr("data-value", "");
        assert_eq!(button_command(&empty), None);
    }

    // ===== Keypad tests =====

    #[test]
    fn test_keypad_dimensions() {
        let keypad = Keypad::default();
        assert_eq!(keypad.dimensions(), (6, 4));
        assert_eq!(keypad.button_count(), 21);
    }

    #[test]
    fn test_keypad_get_button_at() {
        let keypad = Keypad::new();
        assert_eq!(keypad.get_button_at(0, 0).map(|b| b.action), Some(KeypadAction::Clear));
        assert_eq!(keypad.get_button_at(1, 0).map(|b| b.action), Some(KeypadAction::Digit(7)));
        assert_eq!(keypad.get_button_at(4, 1).map(|b| b.action), Some(KeypadAction::Digit(0)));
        assert_eq!(keypad.get_button_at(4, 3).map(|b| b.action), Some(KeypadAction::Decimal));
        for col in 0..4 {
            assert_eq!(
                keypad.get_button_at(5, col).map(|b| b.action),
                Some(KeypadAction::Equals)
            );
        }
    }

    #[test]
    fn test_keypad_get_button_at_out_of_bounds() {
        let keypad = Keypad::new();
        assert!(keypad.get_button_at(6, 0).is_none());
        assert!(keypad.get_button_at(0, 4).is_none());
    }

    #[test]
    fn test_every_token_key_has_a_button() {
        let keypad = Keypad::new();
        for ch in crate::keyboard::TOKEN_KEYS.chars() {
            assert!(keypad.find_button_by_char(ch).is_some(), "no button for {ch}");
        }
        assert!(keypad.find_button_by_char('^').is_none());
    }

    #[test]
    fn test_find_button_for_commands() {
        let keypad = Keypad::new();
        assert_eq!(
            keypad.find_button_for(KeyCommand::Evaluate).map(|b| b.id.as_str()),
            Some("btn-equals")
        );
        assert_eq!(
            keypad.find_button_for(KeyCommand::Backspace).map(|b| b.id.as_str()),
            Some("btn-back")
        );
        assert_eq!(
            keypad.find_button_for(KeyCommand::Press('%')).map(|b| b.id.as_str()),
            Some("btn-percent")
        );
    }

    #[test]
    fn test_dom_elements_resolve_to_their_commands() {
        let keypad = Keypad::new();
        for (def, elem) in keypad.buttons().iter().zip(keypad.create_dom_elements()) {
            assert_eq!(button_command(&elem), def.action.command(), "button {}", def.id);
        }
    }

    #[test]
    fn test_handle_click() {
        let keypad = Keypad::new();
        assert_eq!(keypad.handle_click("btn-7"), Some(KeypadAction::Digit(7)));
        assert_eq!(keypad.handle_click("btn-equals"), Some(KeypadAction::Equals));
        assert_eq!(keypad.handle_click("btn-nope"), None);
    }
}
