//! Browser bindings
//!
//! Exposes the engine to JavaScript through wasm-bindgen. The page owns the
//! event listeners and the `setTimeout` loop; it forwards key and button
//! events here and calls [`BrowserCalculator::poll`] whenever
//! [`BrowserCalculator::next_timer_delay_ms`] says a timer is due.
//!
//! ```js
//! const calc = new BrowserCalculator("screen");
//! window.addEventListener("keydown", (e) => {
//!   if (calc.handle_key(e.key)) e.preventDefault();
//!   schedule();
//! });
//! function schedule() {
//!   const ms = calc.next_timer_delay_ms();
//!   if (ms !== undefined) setTimeout(() => { calc.poll(); schedule(); }, ms);
//! }
//! ```

use std::sync::Arc;

use wasm_bindgen::prelude::*;
use web_sys::console;

use super::dom::{DomElement, SCREEN_ID};
use super::keypad::{button_command, Keypad};
use crate::clock::TimeSource;
use crate::config::EngineConfig;
use crate::engine::{DisplaySink, ExpressionEngine};
use crate::keyboard;

/// Milliseconds from `Date.now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl TimeSource for BrowserClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

/// Writes the display text into a page element
#[derive(Debug)]
pub struct ElementDisplay {
    element: Option<web_sys::Element>,
}

impl ElementDisplay {
    /// Looks up the element by id; a missing element renders nowhere
    #[must_use]
    pub fn by_id(id: &str) -> Self {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if element.is_none() {
            console::warn_1(&format!("calculator screen #{id} not found").into());
        }
        Self { element }
    }
}

impl DisplaySink for ElementDisplay {
    fn render(&mut self, text: &str) {
        if let Some(element) = &self.element {
            element.set_text_content(Some(text));
        }
    }
}

/// The calculator as seen from JavaScript
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    engine: ExpressionEngine<ElementDisplay>,
    keypad: Keypad,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Mounts on the element with id `screen_id` (default `"screen"`)
    #[wasm_bindgen(constructor)]
    pub fn new(screen_id: Option<String>) -> Self {
        Self::mount(screen_id.as_deref(), EngineConfig::default())
    }

    /// Mounts with a JSON engine configuration
    ///
    /// # Errors
    ///
    /// Returns the configuration error message if the JSON is invalid.
    pub fn with_config_json(screen_id: Option<String>, json: &str) -> Result<BrowserCalculator, JsValue> {
        let config = EngineConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::mount(screen_id.as_deref(), config))
    }

    /// Appends a token
    pub fn press(&mut self, token: &str) {
        self.engine.press(token);
    }

    /// Empties the buffer
    pub fn clear(&mut self) {
        self.engine.clear();
    }

    /// Deletes the last character
    pub fn backspace(&mut self) {
        self.engine.backspace();
    }

    /// Evaluates and returns the new display text
    pub fn evaluate(&mut self) -> String {
        self.engine.evaluate();
        self.display()
    }

    /// Handles a `keydown`; returns true if the page should call `preventDefault`
    pub fn handle_key(&mut self, key: &str) -> bool {
        keyboard::handle_key(&mut self.engine, key).prevent_default()
    }

    /// Handles a click on a keypad button by id
    pub fn handle_button(&mut self, button_id: &str) -> bool {
        match self.keypad.handle_click(button_id).and_then(|a| a.command()) {
            Some(command) => {
                command.apply(&mut self.engine);
                true
            }
            None => false,
        }
    }

    /// Handles a click given the clicked element's `data-action` and
    /// `data-value` attributes
    pub fn handle_click(&mut self, data_action: Option<String>, data_value: Option<String>) -> bool {
        let mut element = DomElement::new("button");
        if let Some(action) = data_action {
            element = element.with_attr("data-action", &action);
        }
        if let Some(value) = data_value {
            element = element.with_attr("data-value", &value);
        }
        match button_command(&element) {
            Some(command) => {
                command.apply(&mut self.engine);
                true
            }
            None => false,
        }
    }

    /// Fires due timers; returns how many fired
    pub fn poll(&mut self) -> usize {
        self.engine.poll()
    }

    /// Milliseconds until the next timer is due, if any is pending
    pub fn next_timer_delay_ms(&self) -> Option<u32> {
        self.engine
            .ms_until_next_timer()
            .map(|ms| u32::try_from(ms).unwrap_or(u32::MAX))
    }

    /// Current display text
    pub fn display(&self) -> String {
        self.engine.display_text().to_string()
    }

    /// Raw expression buffer
    #[wasm_bindgen(getter)]
    pub fn buffer(&self) -> String {
        self.engine.buffer().to_string()
    }

    /// True if the last action was an evaluation
    #[wasm_bindgen(getter)]
    pub fn evaluated(&self) -> bool {
        self.engine.is_evaluated()
    }
}

impl BrowserCalculator {
    fn mount(screen_id: Option<&str>, config: EngineConfig) -> Self {
        console_error_panic_hook::set_once();
        let display = ElementDisplay::by_id(screen_id.unwrap_or(SCREEN_ID));
        let mut engine = ExpressionEngine::with_clock(display, config, Arc::new(BrowserClock));
        engine.refresh();
        Self {
            engine,
            keypad: Keypad::new(),
        }
    }
}

/// Module start hook
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"calc-engine initialized".into());
}
