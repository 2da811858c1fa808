//! Character-set validation and percent rewriting
//!
//! The buffer may only contain `0-9 . + - * / ( ) %`, spaces and tabs.
//! Percent is postfix: every number directly followed by `%` becomes a
//! parenthesized division by 100 (`50%` → `(50/100)`).

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

use crate::core::{CalcError, CalcResult};

/// Characters accepted in an expression, as a regex character class body
pub const ALLOWED_CLASS: &str = r"0-9+\-*/().% \t";

fn allowed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!("^[{ALLOWED_CLASS}]+$")).unwrap())
}

fn illegal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!("[^{ALLOWED_CLASS}]")).unwrap())
}

fn percent_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)%").unwrap())
}

/// Returns true if `ch` may appear in an expression
#[must_use]
pub fn is_allowed_char(ch: char) -> bool {
    let mut buf = [0u8; 4];
    !illegal_re().is_match(ch.encode_utf8(&mut buf))
}

/// Checks that the whole expression consists of allowed characters
///
/// # Errors
///
/// Returns [`CalcError::IllegalCharacter`] naming the first offending
/// character, or [`CalcError::EmptyExpression`] for an empty string.
pub fn validate(expr: &str) -> CalcResult<()> {
    if allowed_re().is_match(expr) {
        return Ok(());
    }
    let illegal = illegal_re()
        .find(expr)
        .and_then(|m| Some((m.start(), m.as_str().chars().next()?)));
    match illegal {
        Some((position, ch)) => Err(CalcError::IllegalCharacter { ch, position }),
        None => Err(CalcError::EmptyExpression),
    }
}

/// Rewrites every `N%` into `(N/100)` in a single global pass
#[must_use]
pub fn transform_percent(expr: &str) -> Cow<'_, str> {
    percent_re().replace_all(expr, "(${1}/100)")
}

/// Validates and transforms an expression, ready for the parser
pub fn prepare(expr: &str) -> CalcResult<Cow<'_, str>> {
    validate(expr)?;
    Ok(transform_percent(expr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_allowed_set() {
        assert!(validate("0123456789").is_ok());
        assert!(validate("(1.5 + 2) * 3 / 4 - 5%").is_ok());
        assert!(validate("1\t+\t2").is_ok());
    }

    #[test]
    fn test_validate_rejects_letters() {
        assert_eq!(
            validate("2+a"),
            Err(CalcError::IllegalCharacter {
                ch: 'a',
                position: 2
            })
        );
    }

    #[test]
    fn test_validate_rejects_injection_attempts() {
        for input in ["alert(1)", "1;2", "2**3^2", "Infinity+1", "1e5", "1,5", "2\n+3"] {
            assert!(
                matches!(validate(input), Err(CalcError::IllegalCharacter { .. })),
                "expected rejection of {input:?}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_error_marker() {
        assert!(matches!(
            validate("Error"),
            Err(CalcError::IllegalCharacter { ch: 'E', position: 0 })
        ));
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate(""), Err(CalcError::EmptyExpression));
    }

    #[test]
    fn test_validate_reports_byte_offset_of_multibyte_char() {
        assert_eq!(
            validate("2×3é"),
            Err(CalcError::IllegalCharacter {
                ch: '×',
                position: 1
            })
        );
        assert_eq!(
            validate("1+2\n"),
            Err(CalcError::IllegalCharacter {
                ch: '\n',
                position: 3
            })
        );
    }

    #[test]
    fn test_is_allowed_char() {
        assert!(is_allowed_char('7'));
        assert!(is_allowed_char('%'));
        assert!(is_allowed_char('\t'));
        assert!(!is_allowed_char('\n'));
        assert!(!is_allowed_char('^'));
        assert!(!is_allowed_char('x'));
    }

    #[test]
    fn test_transform_single_percent() {
        assert_eq!(transform_percent("50%"), "(50/100)");
        assert_eq!(transform_percent("3.5%"), "(3.5/100)");
    }

    #[test]
    fn test_transform_is_global() {
        assert_eq!(transform_percent("50%+10%"), "(50/100)+(10/100)");
        assert_eq!(transform_percent("200*15%-1%"), "200*(15/100)-(1/100)");
    }

    #[test]
    fn test_transform_without_percent_borrows() {
        assert!(matches!(transform_percent("1+2"), Cow::Borrowed("1+2")));
    }

    #[test]
    fn test_transform_only_digit_prefixed_percent() {
        // Only a number may carry the percent sign
        assert_eq!(transform_percent("(5)%"), "(5)%");
        assert_eq!(transform_percent("%"), "%");
        // Leading-dot decimals keep the dot outside the rewrite
        assert_eq!(transform_percent(".5%"), ".(5/100)");
        // Trailing dot is not part of the numeric token
        assert_eq!(transform_percent("5.%"), "5.%");
    }

    #[test]
    fn test_prepare() {
        assert_eq!(prepare("50%").unwrap(), "(50/100)");
        assert!(matches!(
            prepare("5x%"),
            Err(CalcError::IllegalCharacter { ch: 'x', .. })
        ));
    }
}
