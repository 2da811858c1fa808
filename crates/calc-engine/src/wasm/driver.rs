//! Mock-DOM drivers
//!
//! [`WasmDriver`] plays the click path: every input goes through a keypad
//! button and the attributes on its element. [`KeyboardDriver`] plays the
//! keydown path through the key map. Both run the engine on a [`FakeClock`]
//! and render into a [`MockDom`].

use std::sync::Arc;

use tracing::trace;

use super::dom::{DomEvent, MockDom};
use super::keypad::{button_command, Keypad};
use crate::clock::FakeClock;
use crate::config::EngineConfig;
use crate::driver::CalculatorDriver;
use crate::engine::{EvaluationOutcome, ExpressionEngine};
use crate::keyboard::{self, KeyCommand, KeyDisposition};

fn mount(dom: MockDom, config: EngineConfig) -> (ExpressionEngine<MockDom>, Arc<FakeClock>) {
    let clock = FakeClock::shared();
    let mut engine = ExpressionEngine::with_clock(dom, config, clock.clone());
    engine.refresh();
    (engine, clock)
}

/// Drives the calculator by clicking keypad buttons
#[derive(Debug)]
pub struct WasmDriver {
    engine: ExpressionEngine<MockDom>,
    keypad: Keypad,
    clock: Arc<FakeClock>,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a driver with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a driver with a custom engine configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let keypad = Keypad::new();
        let (engine, clock) = mount(MockDom::with_keypad(&keypad), config);
        Self {
            engine,
            keypad,
            clock,
        }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &ExpressionEngine<MockDom> {
        &self.engine
    }

    /// Returns the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        self.engine.sink()
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the clock driving the engine
    #[must_use]
    pub fn clock(&self) -> &Arc<FakeClock> {
        &self.clock
    }

    /// Clicks the element with the given id
    ///
    /// Returns the evaluation outcome if the button was `equals`, and `None`
    /// for other buttons or elements that are not buttons.
    pub fn click(&mut self, element_id: &str) -> Option<EvaluationOutcome> {
        self.engine
            .sink_mut()
            .dispatch_event(DomEvent::click(element_id));
        let command = self.engine.sink().get_element(element_id).and_then(button_command);
        trace!(element_id, ?command, "click");
        command.and_then(|command| command.apply(&mut self.engine))
    }

    fn click_for(&mut self, command: KeyCommand) -> bool {
        let Some(id) = self.keypad.find_button_for(command).map(|b| b.id.clone()) else {
            return false;
        };
        self.click(&id);
        true
    }
}

impl CalculatorDriver for WasmDriver {
    fn press_char(&mut self, ch: char) -> bool {
        self.click_for(KeyCommand::Press(ch))
    }

    fn equals(&mut self) {
        self.click_for(KeyCommand::Evaluate);
    }

    fn clear(&mut self) {
        self.click_for(KeyCommand::Clear);
    }

    fn backspace(&mut self) {
        self.click_for(KeyCommand::Backspace);
    }

    fn display(&self) -> String {
        self.dom().screen_text().to_string()
    }

    fn advance_time(&mut self, ms: u64) {
        self.clock.advance_ms(ms);
        self.engine.poll();
    }

    fn render_count(&self) -> usize {
        self.dom().render_count()
    }
}

/// Drives the calculator with keydown events
#[derive(Debug)]
pub struct KeyboardDriver {
    engine: ExpressionEngine<MockDom>,
    clock: Arc<FakeClock>,
}

impl Default for KeyboardDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardDriver {
    /// Creates a driver with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a driver with a custom engine configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let (engine, clock) = mount(MockDom::calculator(), config);
        Self { engine, clock }
    }

    /// Returns the engine
    #[must_use]
    pub fn engine(&self) -> &ExpressionEngine<MockDom> {
        &self.engine
    }

    /// Returns the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        self.engine.sink()
    }

    /// Returns the clock driving the engine
    #[must_use]
    pub fn clock(&self) -> &Arc<FakeClock> {
        &self.clock
    }

    /// Sends a keydown event and records whether its default was prevented
    pub fn key_down(&mut self, key: &str) -> KeyDisposition {
        let disposition = keyboard::handle_key(&mut self.engine, key);
        self.engine
            .sink_mut()
            .dispatch_event(DomEvent::key_down(key, disposition.prevent_default()));
        disposition
    }
}

impl CalculatorDriver for KeyboardDriver {
    fn press_char(&mut self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.key_down(ch.encode_utf8(&mut buf)).prevent_default()
    }

    fn equals(&mut self) {
        self.key_down("Enter");
    }

    fn clear(&mut self) {
        self.key_down("Escape");
    }

    fn backspace(&mut self) {
        self.key_down("Backspace");
    }

    fn display(&self) -> String {
        self.dom().screen_text().to_string()
    }

    fn advance_time(&mut self, ms: u64) {
        self.clock.advance_ms(ms);
        self.engine.poll();
    }

    fn render_count(&self) -> usize {
        self.dom().render_count()
    }
}
