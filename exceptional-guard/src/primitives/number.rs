//! Unchecked numeric parsing primitives.
//!
//! Both parsers read the longest numeric prefix after leading whitespace and
//! answer `NaN` when there is none.

use once_cell::sync::Lazy;
use regex::Regex;

static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    // This regex is compile-time constant and known to be valid
    #[allow(clippy::expect_used)]
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("Hard-coded regex pattern should be valid")
});

/// Parses the leading decimal literal of `input`.
///
/// ```rust
/// use exceptional_guard::primitives::parse_float;
///
/// assert_eq!(parse_float("  12.34px"), 12.34);
/// assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
/// assert!(parse_float("exceptional").is_nan());
/// ```
pub fn parse_float(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let Some(prefix) = FLOAT_PREFIX.find(trimmed) else {
        return f64::NAN;
    };

    match prefix.as_str() {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        literal => literal.parse().unwrap_or(f64::NAN),
    }
}

/// Parses the leading integer of `input` in `radix`.
///
/// A missing or zero radix means 10, or 16 when the digits start with `0x`.
/// A radix outside `[2, 36]` yields `NaN`.
pub fn parse_int(input: &str, radix: Option<u32>) -> f64 {
    let trimmed = input.trim_start();
    let (negative, mut digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut radix = radix.unwrap_or(0);
    let mut strip_prefix = true;
    if radix != 0 {
        if !(2..=36).contains(&radix) {
            return f64::NAN;
        }
        strip_prefix = radix == 16;
    } else {
        radix = 10;
    }

    if strip_prefix && (digits.starts_with("0x") || digits.starts_with("0X")) {
        digits = &digits[2..];
        radix = 16;
    }

    let mut value = 0.0_f64;
    let mut any = false;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        value = value * f64::from(radix) + f64::from(digit);
        any = true;
    }

    if !any {
        return f64::NAN;
    }
    if negative {
        -value
    } else {
        value
    }
}
