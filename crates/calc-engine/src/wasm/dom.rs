//! Mock DOM for testing the browser shell without a browser
//!
//! [`MockDom`] doubles as the engine's display sink: every render writes the
//! screen element and bumps a counter tests can assert on.

use std::collections::HashMap;

use crate::engine::DisplaySink;

use super::keypad::Keypad;

/// Element id of the calculator screen
pub const SCREEN_ID: &str = "screen";

/// An element of the calculator page
///
/// Only what the click path reads is modeled: the id it is looked up by, the
/// text it shows and its `data-*` attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
        }
    }

    /// Sets the element ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events the calculator listens to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Keydown event on the window
    KeyDown {
        /// `KeyboardEvent.key`
        key: String,
        /// Whether the handler called `preventDefault`
        default_prevented: bool,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a keydown event
    #[must_use]
    pub fn key_down(key: &str, default_prevented: bool) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            default_prevented,
        }
    }
}

/// Mock DOM for testing the calculator without a browser
#[derive(Debug, Default)]
pub struct MockDom {
    /// Elements by ID
    elements: HashMap<String, DomElement>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
    /// Number of renders received from the engine
    render_count: usize,
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the calculator page: a screen and the keypad
    #[must_use]
    pub fn calculator() -> Self {
        Self::with_keypad(&Keypad::new())
    }

    /// Creates the calculator page with a custom keypad
    #[must_use]
    pub fn with_keypad(keypad: &Keypad) -> Self {
        let mut dom = Self::new();
        dom.register_element(
            DomElement::new("div")
                .with_id(SCREEN_ID)
                .with_attr("aria-live", "polite"),
        );
        for button in keypad.create_dom_elements() {
            dom.register_element(button);
        }
        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Records an event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Counts keydown events whose default was suppressed
    #[must_use]
    pub fn prevented_default_count(&self) -> usize {
        self.event_history
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    DomEvent::KeyDown {
                        default_prevented: true,
                        ..
                    }
                )
            })
            .count()
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.text_content = text.to_string();
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Returns the screen text
    #[must_use]
    pub fn screen_text(&self) -> &str {
        self.get_element_text(SCREEN_ID).unwrap_or("")
    }

    /// Returns how many times the engine rendered
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }
}

impl DisplaySink for MockDom {
    fn render(&mut self, text: &str) {
        self.render_count += 1;
        self.set_element_text(SCREEN_ID, text);
    }
}
