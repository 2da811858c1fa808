//! Unified calculator driver
//!
//! Write the interaction script once, run it through every input path. The
//! click path and the keyboard path both implement [`CalculatorDriver`], and
//! the `verify_*` functions below are run against each of them.

use crate::core::{CalcError, CalcResult};

/// Abstract driver for calculator interactions
///
/// Implementations own an engine on a paused clock, so timing is driven
/// explicitly through [`CalculatorDriver::advance_time`].
///
/// # Example
///
/// ```rust
/// use calc_engine::driver::{verify_percent, CalculatorDriver};
/// use calc_engine::wasm::KeyboardDriver;
///
/// let mut driver = KeyboardDriver::new();
/// driver.enter("6*7").unwrap();
/// driver.equals();
/// assert_eq!(driver.display(), "42");
///
/// verify_percent(&mut driver);
/// ```
pub trait CalculatorDriver {
    /// Types one character through this input path
    ///
    /// Returns false if the path has no way to type `ch`.
    fn press_char(&mut self, ch: char) -> bool;

    /// Triggers evaluation
    fn equals(&mut self);

    /// Clears the calculator
    fn clear(&mut self);

    /// Deletes one character
    fn backspace(&mut self);

    /// Returns the text currently on screen
    fn display(&self) -> String;

    /// Moves the clock forward and lets due timers fire
    fn advance_time(&mut self, ms: u64);

    /// Returns how many times the screen has been rendered
    fn render_count(&self) -> usize;

    /// Types every character of `input` in order
    ///
    /// # Errors
    ///
    /// Returns [`CalcError::IllegalCharacter`] for the first character this
    /// path cannot type. Characters before it have already been typed.
    fn enter(&mut self, input: &str) -> CalcResult<()> {
        for (position, ch) in input.char_indices() {
            if !self.press_char(ch) {
                return Err(CalcError::IllegalCharacter { ch, position });
            }
        }
        Ok(())
    }
}

fn calculate<D: CalculatorDriver>(driver: &mut D, input: &str) -> String {
    driver.clear();
    driver.enter(input).unwrap();
    driver.equals();
    driver.display()
}

// ===== Unified Specifications =====
// These work with ANY CalculatorDriver implementation

/// Verifies the four operators
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(calculate(driver, "2+3"), "5");
    assert_eq!(calculate(driver, "10-4"), "6");
    assert_eq!(calculate(driver, "6*7"), "42");
    assert_eq!(calculate(driver, "20/4"), "5");
    assert_eq!(calculate(driver, "7/2"), "3.5");
}

/// Verifies precedence, associativity, parentheses and unary minus
pub fn verify_precedence<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(calculate(driver, "2+3*4"), "14");
    assert_eq!(calculate(driver, "(2+3)*4"), "20");
    assert_eq!(calculate(driver, "10-2-3"), "5");
    assert_eq!(calculate(driver, "100/10/5"), "2");
    assert_eq!(calculate(driver, "2*-3"), "-6");
    assert_eq!(calculate(driver, "((2+3)*(4+5))"), "45");
}

/// Verifies the percent suffix
pub fn verify_percent<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(calculate(driver, "50%"), "0.5");
    assert_eq!(calculate(driver, "50%+10%"), "0.6");
    assert_eq!(calculate(driver, "200*15%"), "30");
    assert_eq!(calculate(driver, "12.5%"), "0.125");
}

/// Verifies 12-significant-digit rounding of results
pub fn verify_precision<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(calculate(driver, "0.1+0.2"), "0.3");
    assert_eq!(calculate(driver, "1/3"), "0.333333333333");
    assert_eq!(calculate(driver, "2/3"), "0.666666666667");
    assert_eq!(calculate(driver, "1000000*1000000"), "1000000000000");
}

/// Verifies continuing from a result and starting fresh after one
pub fn verify_result_chaining<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(calculate(driver, "2+2"), "4");
    driver.enter("*3").unwrap();
    assert_eq!(driver.display(), "4*3");
    driver.equals();
    assert_eq!(driver.display(), "12");

    driver.enter("7").unwrap();
    assert_eq!(driver.display(), "7");

    // Evaluating a result again is a fixed point
    driver.equals();
    driver.equals();
    assert_eq!(driver.display(), "7");
}

/// Verifies backspace while editing and after a result
pub fn verify_backspace<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.enter("123").unwrap();
    driver.backspace();
    assert_eq!(driver.display(), "12");
    driver.backspace();
    driver.backspace();
    assert_eq!(driver.display(), "0");
    driver.backspace();
    assert_eq!(driver.display(), "0");

    assert_eq!(calculate(driver, "6*7"), "42");
    driver.backspace();
    assert_eq!(driver.display(), "0");
}

/// Verifies the error marker and its auto-clear after 900 ms
pub fn verify_error_recovery<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(calculate(driver, "5*"), "Error");
    driver.advance_time(899);
    assert_eq!(driver.display(), "Error");
    driver.advance_time(1);
    assert_eq!(driver.display(), "0");

    assert_eq!(calculate(driver, "(1+2"), "Error");
    driver.advance_time(900);
    assert_eq!(calculate(driver, "1+1"), "2");
}

/// Verifies that evaluating an empty buffer changes nothing
pub fn verify_empty_evaluate<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    let renders = driver.render_count();
    driver.equals();
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.render_count(), renders);
}

/// Verifies IEEE results for division by zero
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(calculate(driver, "5/0"), "Infinity");
    assert_eq!(calculate(driver, "0-5/0"), "-Infinity");
    assert_eq!(calculate(driver, "0/0"), "NaN");
}

/// Complete verification suite
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_precedence(driver);
    verify_percent(driver);
    verify_precision(driver);
    verify_result_chaining(driver);
    verify_backspace(driver);
    verify_error_recovery(driver);
    verify_empty_evaluate(driver);
    verify_division_by_zero(driver);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Driver that only accepts digits, for exercising the default `enter`
    #[derive(Default)]
    struct DigitsOnly {
        typed: String,
    }

    impl CalculatorDriver for DigitsOnly {
        fn press_char(&mut self, ch: char) -> bool {
            if ch.is_ascii_digit() {
                self.typed.push(ch);
                true
            } else {
                false
            }
        }
        fn equals(&mut self) {}
        fn clear(&mut self) {
            self.typed.clear();
        }
        fn backspace(&mut self) {
            self.typed.pop();
        }
        fn display(&self) -> String {
            self.typed.clone()
        }
        fn advance_time(&mut self, _ms: u64) {}
        fn render_count(&self) -> usize {
            0
        }
    }

    #[test]
    fn test_enter_types_every_char() {
        let mut driver = DigitsOnly::default();
        driver.enter("123").unwrap();
        assert_eq!(driver.display(), "123");
    }

    #[test]
    fn test_enter_reports_untypeable_char() {
        let mut driver = DigitsOnly::default();
        let err = driver.enter("12+3").unwrap_err();
        assert_eq!(err, CalcError::IllegalCharacter { ch: '+', position: 2 });
        assert_eq!(driver.display(), "12");
    }
}
