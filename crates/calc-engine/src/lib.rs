//! Calculator expression engine
//!
//! A calculator core built from discrete key presses: an expression buffer,
//! a flag recording whether the last action was an evaluation, and a display
//! refreshed after every change. Expressions are restricted to digits,
//! `+ - * /`, parentheses, the decimal point and a `%` suffix meaning
//! "divide by 100". Results are rounded to 12 significant digits; failures
//! show `Error`, which clears itself after 900 ms.
//!
//! # Layout
//!
//! - [`core`]: sanitizer, percent rewrite, parser, evaluator, result formatting
//! - [`engine`]: the buffer state machine and its auto-clear timer
//! - [`keyboard`]: `KeyboardEvent.key` mapping
//! - [`wasm`]: mock DOM, keypad, drivers and (feature `wasm`) browser bindings
//! - [`driver`]: one interaction script, run through every input path
//!
//! # Example
//!
//! ```rust
//! use calc_engine::prelude::*;
//!
//! let clock = FakeClock::shared();
//! let mut engine = ExpressionEngine::with_clock(Vec::new(), EngineConfig::default(), clock.clone());
//!
//! for key in ["5", "0", "%", "+", "1", "0", "%", "Enter"] {
//!     handle_key(&mut engine, key);
//! }
//! assert_eq!(engine.display_text(), "0.6");
//!
//! engine.press("*");
//! engine.evaluate();
//! assert_eq!(engine.display_text(), "Error");
//!
//! clock.advance_ms(900);
//! engine.poll();
//! assert_eq!(engine.display_text(), "0");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod clock;
pub mod config;
pub mod core;
pub mod driver;
pub mod engine;
pub mod keyboard;
#[cfg(feature = "logging")]
pub mod logging;

/// Always compiled; the mock DOM needs no browser
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::clock::{Clock, FakeClock, SystemClock, TimeSource};
    pub use crate::config::{AutoClearPolicy, EngineConfig};
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::format::format_result;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, ErrorKind, Operation};
    pub use crate::driver::CalculatorDriver;
    pub use crate::engine::{
        DisplaySink, EngineState, EvaluationOutcome, ExpressionEngine, NullDisplay,
    };
    pub use crate::keyboard::{handle_key, map_key, KeyCommand, KeyDisposition};
    #[cfg(feature = "logging")]
    pub use crate::logging::LogConfig;
    pub use crate::wasm::{DomElement, DomEvent, KeyboardDriver, Keypad, MockDom, WasmDriver};
}
