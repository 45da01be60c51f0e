//! MGJSON `numberString` encoding.
//!
//! Dynamic samples carry their values as fixed-width signed decimal strings
//! (`+001.000000000000000`). The outline describes that shape through a number
//! pattern (`digitsInteger`, `digitsDecimal`, `isSigned`) which must agree with
//! the strings actually written.

use crate::error::{MgJsonError, Result};

/// Decimal places written for dynamic sample values.
pub const DIGITS_DECIMAL: u32 = 15;

/// Integer digits always reserved for dynamic sample values.
pub const MIN_DIGITS_INTEGER: u32 = 3;

/// Legal range advertised for every numeric property.
pub const LEGAL_MIN: i64 = -2_147_483_648;
pub const LEGAL_MAX: i64 = 2_147_483_648;

/// Number of decimal digits in `n` (`0` has one digit).
pub fn digit_count(n: u64) -> u32 {
    n.checked_ilog10().map_or(1, |d| d + 1)
}

/// Digits in the integer part of `|value|`.
pub fn integer_digits(value: f64) -> u32 {
    let whole = value.abs().trunc();
    format!("{whole:.0}").len() as u32
}

/// Integer digits needed to render every value in `[min, max]`.
pub fn stream_digits_integer(min: f64, max: f64) -> u32 {
    integer_digits(min.abs().max(max.abs())).max(MIN_DIGITS_INTEGER)
}

/// Render `value` as a signed, zero-padded number string with
/// [`DIGITS_DECIMAL`] decimals and `digits_integer` integer digits.
/// Negative zero renders as positive zero.
pub fn encode_number(value: f64, digits_integer: u32) -> String {
    let value = value + 0.0;
    let width = (1 + digits_integer + 1 + DIGITS_DECIMAL) as usize;
    format!(
        "{value:+0width$.prec$}",
        width = width,
        prec = DIGITS_DECIMAL as usize
    )
}

/// Parse a number string produced by [`encode_number`].
pub fn parse_number_string(s: &str) -> Result<f64> {
    let invalid = || MgJsonError::InvalidNumberString {
        value: s.to_string(),
    };
    if !s.starts_with(['+', '-']) {
        return Err(invalid());
    }
    let value: f64 = s.parse().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}
