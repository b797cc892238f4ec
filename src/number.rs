//! Text formatting of real numbers, shared by the text-producing compilers.

use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// Formats a real the way formulas write it:
///   - NaN is `NaN`, and infinities are `INF` and `-INF`.
///   - Values with no fractional part which fit in an `i32` are written as integers.
///   - Values smaller than 1E-4 or larger than 1E4 in magnitude use scientific notation,
///     e.g. `1.5E-5`.
///   - Anything else is written as a plain decimal, e.g. `0.25`.
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-INF" } else { "INF" }.to_string();
    }

    if let Some(integer) = value.to_i32() {
        if integer as f64 == value {
            return integer.to_string();
        }
    }

    let magnitude = value.abs();
    if magnitude < 1e-4 || magnitude > 1e4 {
        format_scientific(value)
    } else {
        format_decimal(value)
    }
}

/// Formats a real as a plain decimal, without trailing zeroes.
pub fn format_decimal(value: f64) -> String {
    match Decimal::from_f64(value) {
        Some(d) => d.normalize().to_string(),
        None => value.to_string(),
    }
}

/// Formats a real as a mantissa and a power of ten, e.g. `1.234E5`.
pub fn format_scientific(value: f64) -> String {
    format!("{:e}", value).replace('e', "E")
}

/// Splits the output of [format_real] into mantissa and exponent, if it used scientific
/// notation.
pub fn split_scientific(formatted: &str) -> Option<(&str, &str)> {
    let mut parts = formatted.splitn(2, 'E');
    match (parts.next(), parts.next()) {
        (Some(mantissa), Some(exponent)) => Some((mantissa, exponent)),
        _ => None,
    }
}
