//! Browser shell
//!
//! The mock DOM, keypad and drivers are plain Rust and always compiled, so
//! the click and keyboard paths are tested natively. The wasm-bindgen
//! bindings live behind the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;
mod keypad;

#[cfg(feature = "wasm")]
pub use browser::{BrowserCalculator, BrowserClock, ElementDisplay};
pub use dom::{DomElement, DomEvent, MockDom, SCREEN_ID};
pub use driver::{KeyboardDriver, WasmDriver};
pub use keypad::{button_command, Keypad, KeypadAction, KeypadButtonDef};
