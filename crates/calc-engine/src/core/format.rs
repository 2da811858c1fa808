//! Result normalization and display formatting
//!
//! Finite results are rounded to a fixed number of significant digits, then
//! printed as the shortest decimal string for the rounded value. Plain
//! notation is used for decimal exponents in `-7..21`, scientific notation
//! (`1.5e+21`, `1e-7`) outside that range.

/// Default number of significant digits kept in a displayed result
pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 12;

/// Largest useful precision for an `f64`
pub const MAX_SIGNIFICANT_DIGITS: u32 = 17;

/// Display text for a non-finite value
#[must_use]
pub fn non_finite_repr(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value.is_sign_negative() {
        "-Infinity"
    } else {
        "Infinity"
    }
}

/// Fractional digits that hold the exact decimal expansion of any `f64`
const EXACT_FRACTION_DIGITS: usize = 780;

/// Rounds `value` to `digits` significant decimal digits
///
/// Rounding looks at the exact decimal value of the double and breaks ties
/// away from zero. Non-finite values are returned unchanged. `digits` is
/// clamped to `1..=MAX_SIGNIFICANT_DIGITS`.
#[must_use]
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let digits = digits.clamp(1, MAX_SIGNIFICANT_DIGITS) as usize;

    let exact = format!("{:.*e}", EXACT_FRACTION_DIGITS, value.abs());
    let Some((mantissa, exponent)) = exact.split_once('e') else {
        return value;
    };
    let Ok(mut exponent) = exponent.parse::<i32>() else {
        return value;
    };
    let all: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    let (kept, dropped) = all.split_at(digits.min(all.len()));
    let mut kept = kept.to_vec();

    if dropped.first().is_some_and(|d| *d >= b'5') && increment_digits(&mut kept) {
        exponent += 1;
    }

    // kept = d1 d2 ... dn, value = d1.d2...dn * 10^exponent
    let scale = exponent - (kept.len() as i32 - 1);
    let text = format!("{}e{scale}", String::from_utf8_lossy(&kept));
    let rounded: f64 = text.parse().unwrap_or(value);
    if value < 0.0 {
        -rounded
    } else {
        rounded
    }
}

/// Adds one to a decimal digit string in place
///
/// Returns true if the carry ran off the front (`999` becomes `100` with one
/// more power of ten).
fn increment_digits(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return false;
        }
    }
    if let Some(first) = digits.first_mut() {
        *first = b'1';
    }
    true
}

/// Formats a number using the shortest round-trip representation
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return non_finite_repr(value).to_string();
    }
    // Covers -0 as well
    if value == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{:e}", value.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", layout_digits(&digits, exponent))
}

/// Rounds and formats a finite result; non-finite values get their textual form
#[must_use]
pub fn format_result(value: f64, significant_digits: u32) -> String {
    format_number(round_significant(value, significant_digits))
}

/// Places the decimal point in a digit string with exponent `exponent`
/// (value = d.ddd * 10^exponent)
fn layout_digits(digits: &str, exponent: i32) -> String {
    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let exp_sign = if e >= 0 { '+' } else { '-' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{exp_sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{exp_sign}{}", e.abs())
        }
    }
}
