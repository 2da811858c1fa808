//! Arithmetic core: sanitizing, parsing, evaluating and formatting
//!
//! Everything in here is pure. The stateful buffer lives in [`crate::engine`].

pub mod evaluator;
pub mod format;
mod operations;
pub mod parser;
pub mod sanitize;

pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A character outside the allowed set was found in the expression
    #[error("Illegal character '{ch}' at position {position}")]
    IllegalCharacter {
        /// The offending character
        ch: char,
        /// Byte offset in the expression
        position: usize,
    },
    /// Invalid expression syntax
    #[error("Invalid expression: {0}")]
    ParseError(String),
    /// Empty expression provided
    #[error("Empty expression")]
    EmptyExpression,
    /// Infinite or NaN result while non-finite results are rejected
    #[error("Non-finite result: {0}")]
    NonFiniteResult(String),
    /// Configuration could not be loaded or is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse error classes shown to nobody but logs and tests
///
/// The display collapses all of these into a single marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Expression contains characters outside the allowed set
    IllegalCharacter,
    /// Expression is not well formed
    Syntax,
    /// Expression is well formed but could not be evaluated
    Evaluation,
    /// Engine configuration problem
    Config,
}

impl CalcError {
    /// Returns the error class for this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IllegalCharacter { .. } => ErrorKind::IllegalCharacter,
            Self::ParseError(_) | Self::EmptyExpression => ErrorKind::Syntax,
            Self::NonFiniteResult(_) => ErrorKind::Evaluation,
            Self::InvalidConfig(_) => ErrorKind::Config,
        }
    }
}
