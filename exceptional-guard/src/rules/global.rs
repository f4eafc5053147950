//! Checked numeric parsing and number classification.

use super::{nth, number_at, optional_number_at, string_at, Arg, Bounds, RangeValidation};
use crate::core::{RuleFn, RuleGroup, TargetKind};
use crate::error::Result;
use crate::primitives;
use crate::value::Value;

/// Checked versions of the global parsing and classification functions.
///
/// # Examples
///
/// ```rust
/// use exceptional_guard::rules::GlobalOps;
///
/// assert_eq!(GlobalOps::parse_float("12.34").unwrap(), 12.34);
/// assert_eq!(GlobalOps::parse_int("ff", Some(16)).unwrap(), 255.0);
///
/// let err = GlobalOps::parse_float("exceptional").unwrap_err();
/// assert!(err.is_invalid_argument());
/// ```
pub struct GlobalOps;

impl GlobalOps {
    /// Parses a decimal literal, rejecting text with no numeric prefix and
    /// literals that overflow to infinity.
    pub fn parse_float(input: &str) -> Result<f64> {
        let arg = Arg::new("parseFloatEx", "string");
        let parsed = primitives::parse_float(input);
        if parsed.is_nan() {
            return Err(arg.invalid_argument(
                &Value::from(input),
                "must be a string representing a floating point number",
            ));
        }
        if parsed.is_infinite() {
            return Err(arg.out_of_range(&Value::from(input), "must be a finite number"));
        }
        Ok(parsed)
    }

    /// Parses an integer in `radix`, which must lie in `[2, 36]` when given.
    pub fn parse_int(input: &str, radix: Option<u32>) -> Result<f64> {
        if let Some(radix) = radix {
            RangeValidation::require_in_range(
                radix,
                Bounds::Between(2.0, 36.0),
                Arg::new("parseIntEx", "radix"),
            )?;
        }

        let parsed = primitives::parse_int(input, radix);
        if parsed.is_nan() {
            return Err(Arg::new("parseIntEx", "string").invalid_argument(
                &Value::from(input),
                "must be a string representing an integer",
            ));
        }
        Ok(parsed)
    }

    /// Returns `value` unless it is NaN. Infinities pass.
    pub fn is_nan(value: f64) -> Result<f64> {
        if value.is_nan() {
            return Err(Arg::new("isNaNEx", "value").out_of_range(&Value::from(value), "must not be NaN"));
        }
        Ok(value)
    }

    /// Returns `value` when it is finite.
    pub fn is_finite(value: f64) -> Result<f64> {
        RangeValidation::require_valid(value, Arg::new("isFiniteEx", "value"))
    }
}

fn parse_float_rule(args: &[Value]) -> Result<Value> {
    let input = string_at(args, 0, Arg::new("parseFloatEx", "string"))?;
    GlobalOps::parse_float(input).map(Value::from)
}

fn parse_int_rule(args: &[Value]) -> Result<Value> {
    let input = string_at(args, 0, Arg::new("parseIntEx", "string"))?;
    let arg = Arg::new("parseIntEx", "radix");
    let radix = match optional_number_at(args, 1, arg)? {
        None => None,
        Some(radix) => {
            let radix = RangeValidation::require_in_range(radix, Bounds::Between(2.0, 36.0), arg)?;
            Some(radix.trunc() as u32)
        }
    };
    GlobalOps::parse_int(input, radix).map(Value::from)
}

fn is_nan_rule(args: &[Value]) -> Result<Value> {
    let value = number_at(args, 0, Arg::new("isNaNEx", "value"))?;
    GlobalOps::is_nan(value).map(Value::from)
}

fn is_finite_rule(args: &[Value]) -> Result<Value> {
    RangeValidation::require_valid(nth(args, 0), Arg::new("isFiniteEx", "value")).map(Value::from)
}

/// Global rules, grafted onto the global namespace.
pub static GLOBAL_RULES: RuleGroup = RuleGroup {
    domain: "global",
    target: TargetKind::Global,
    rules: &[
        ("isFinite", is_finite_rule as RuleFn),
        ("isNaN", is_nan_rule as RuleFn),
        ("parseFloat", parse_float_rule as RuleFn),
        ("parseInt", parse_int_rule as RuleFn),
    ],
};
