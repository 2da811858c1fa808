//! Keyboard mapping
//!
//! Maps `KeyboardEvent.key` values onto engine commands. Every recognized key
//! asks the shell to suppress the browser default; everything else is left
//! alone.

use crate::engine::{DisplaySink, EvaluationOutcome, ExpressionEngine};

/// An engine command produced by a key or button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Append a token character
    Press(char),
    /// Evaluate the buffer
    Evaluate,
    /// Delete the last character
    Backspace,
    /// Clear the buffer
    Clear,
}

impl KeyCommand {
    /// Runs the command against an engine
    ///
    /// Returns the evaluation outcome for [`KeyCommand::Evaluate`].
    pub fn apply<S: DisplaySink>(self, engine: &mut ExpressionEngine<S>) -> Option<EvaluationOutcome> {
        match self {
            Self::Press(ch) => {
                let mut buf = [0u8; 4];
                engine.press(ch.encode_utf8(&mut buf));
                None
            }
            Self::Evaluate => Some(engine.evaluate()),
            Self::Backspace => {
                engine.backspace();
                None
            }
            Self::Clear => {
                engine.clear();
                None
            }
        }
    }
}

/// What the shell should do with a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The key was consumed; call `preventDefault`
    Handled(KeyCommand),
    /// The key is not ours; let the browser handle it
    Ignored,
}

impl KeyDisposition {
    /// Returns true if the browser default should be suppressed
    #[must_use]
    pub const fn prevent_default(&self) -> bool {
        matches!(self, Self::Handled(_))
    }
}

/// Characters a key may type directly into the buffer
pub const TOKEN_KEYS: &str = "0123456789.+-*/()%";

/// Maps a `KeyboardEvent.key` value to a command
#[must_use]
pub fn map_key(key: &str) -> Option<KeyCommand> {
    match key {
        "Enter" | "=" => Some(KeyCommand::Evaluate),
        "Backspace" => Some(KeyCommand::Backspace),
        "Escape" => Some(KeyCommand::Clear),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if TOKEN_KEYS.contains(ch) => Some(KeyCommand::Press(ch)),
                _ => None,
            }
        }
    }
}

/// Maps a key and wraps the result for the shell
#[must_use]
pub fn dispose(key: &str) -> KeyDisposition {
    map_key(key).map_or(KeyDisposition::Ignored, KeyDisposition::Handled)
}

/// Handles a key event end to end
pub fn handle_key<S: DisplaySink>(engine: &mut ExpressionEngine<S>, key: &str) -> KeyDisposition {
    let disposition = dispose(key);
    if let KeyDisposition::Handled(command) = disposition {
        command.apply(engine);
    }
    disposition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FakeClock;
    use crate::config::EngineConfig;

    #[test]
    fn test_map_token_keys() {
        for ch in TOKEN_KEYS.chars() {
            assert_eq!(map_key(&ch.to_string()), Some(KeyCommand::Press(ch)));
        }
    }

    #[test]
    fn test_map_command_keys() {
        assert_eq!(map_key("Enter"), Some(KeyCommand::Evaluate));
        assert_eq!(map_key("="), Some(KeyCommand::Evaluate));
        assert_eq!(map_key("Backspace"), Some(KeyCommand::Backspace));
        assert_eq!(map_key("Escape"), Some(KeyCommand::Clear));
    }

    #[test]
    fn test_map_ignored_keys() {
        for key in ["a", "c", "C", "^", " ", "Tab", "Shift", "ArrowLeft", "Delete", "", "12"] {
            assert_eq!(map_key(key), None, "key {key:?} should be ignored");
        }
    }

    #[test]
    fn test_dispose_prevent_default() {
        assert!(dispose("7").prevent_default());
        assert!(dispose("Escape").prevent_default());
        assert!(!dispose("F5").prevent_default());
        assert_eq!(dispose("F5"), KeyDisposition::Ignored);
    }

    #[test]
    fn test_handle_key_drives_engine() {
        let mut engine =
            ExpressionEngine::with_clock(Vec::new(), EngineConfig::default(), FakeClock::shared());
        for key in ["2", "+", "3", "*", "4", "Enter"] {
            assert!(handle_key(&mut engine, key).prevent_default());
        }
        assert_eq!(engine.display_text(), "14");

        assert_eq!(handle_key(&mut engine, "q"), KeyDisposition::Ignored);
        assert_eq!(engine.display_text(), "14");

        handle_key(&mut engine, "Backspace");
        assert_eq!(engine.display_text(), "0");
    }

    #[test]
    fn test_apply_returns_outcome_only_for_evaluate() {
        let mut engine =
            ExpressionEngine::with_clock(Vec::new(), EngineConfig::default(), FakeClock::shared());
        assert_eq!(KeyCommand::Press('9').apply(&mut engine), None);
        assert!(matches!(
            KeyCommand::Evaluate.apply(&mut engine),
            Some(EvaluationOutcome::Value { .. })
        ));
        assert_eq!(KeyCommand::Clear.apply(&mut engine), None);
        assert_eq!(engine.buffer(), "");
    }
}
