//! Checked math functions.
//!
//! Each function computes the unchecked result first and only re-validates
//! the input when the result is unusable, so the common path costs one
//! comparison.

use super::{nth, Arg, Bounds, RangeValidation};
use crate::core::{RuleFn, RuleGroup, TargetKind};
use crate::error::Result;
use crate::value::Value;

/// Checked math functions.
///
/// # Examples
///
/// ```rust
/// use exceptional_guard::rules::MathOps;
///
/// assert_eq!(MathOps::sqrt(9.0).unwrap(), 3.0);
///
/// let err = MathOps::pow(1000.0, 1000.0).unwrap_err();
/// assert_eq!(err.to_string(), "powEx() argument <Infinity> is not a finite number");
/// ```
pub struct MathOps;

impl MathOps {
    /// Arc cosine; the input must lie in `[-1, 1]`.
    pub fn acos(x: f64) -> Result<f64> {
        let result = x.acos();
        if result.is_nan() {
            RangeValidation::require_in_range(x, Bounds::Between(-1.0, 1.0), Arg::new("acosEx", "x"))?;
        }
        Ok(result)
    }

    /// Arc sine; the input must lie in `[-1, 1]`.
    pub fn asin(x: f64) -> Result<f64> {
        let result = x.asin();
        if result.is_nan() {
            RangeValidation::require_in_range(x, Bounds::Between(-1.0, 1.0), Arg::new("asinEx", "x"))?;
        }
        Ok(result)
    }

    /// Square root; the input must be at least 0.
    pub fn sqrt(x: f64) -> Result<f64> {
        let result = x.sqrt();
        if result.is_nan() {
            RangeValidation::require_in_range(x, Bounds::AtLeast(0.0), Arg::new("sqrtEx", "x"))?;
        }
        Ok(result)
    }

    /// Natural logarithm; the input must be greater than 0.
    pub fn log(x: f64) -> Result<f64> {
        let result = x.ln();
        if !result.is_finite() {
            RangeValidation::require_greater_than(x, 0.0, Arg::new("logEx", "x"))?;
            RangeValidation::require_finite_result(result, Arg::method("logEx"))?;
        }
        Ok(result)
    }

    /// `base` raised to `exponent`; both inputs and the result must be finite.
    pub fn pow(base: f64, exponent: f64) -> Result<f64> {
        RangeValidation::require_valid(base, Arg::new("powEx", "base"))?;
        RangeValidation::require_valid(exponent, Arg::new("powEx", "exponent"))?;
        RangeValidation::require_finite_result(base.powf(exponent), Arg::method("powEx"))
    }
}

fn unary(args: &[Value], method: &str, op: fn(f64) -> Result<f64>) -> Result<Value> {
    let x = RangeValidation::require_valid(nth(args, 0), Arg::new(method, "x"))?;
    op(x).map(Value::from)
}

fn acos_rule(args: &[Value]) -> Result<Value> {
    unary(args, "acosEx", MathOps::acos)
}

fn asin_rule(args: &[Value]) -> Result<Value> {
    unary(args, "asinEx", MathOps::asin)
}

fn log_rule(args: &[Value]) -> Result<Value> {
    unary(args, "logEx", MathOps::log)
}

fn sqrt_rule(args: &[Value]) -> Result<Value> {
    unary(args, "sqrtEx", MathOps::sqrt)
}

fn pow_rule(args: &[Value]) -> Result<Value> {
    let base = RangeValidation::require_valid(nth(args, 0), Arg::new("powEx", "base"))?;
    let exponent = RangeValidation::require_valid(nth(args, 1), Arg::new("powEx", "exponent"))?;
    MathOps::pow(base, exponent).map(Value::from)
}

/// Math rules, grafted onto the `Math` namespace.
pub static MATH_RULES: RuleGroup = RuleGroup {
    domain: "Math",
    target: TargetKind::Static("Math"),
    rules: &[
        ("acos", acos_rule as RuleFn),
        ("asin", asin_rule as RuleFn),
        ("log", log_rule as RuleFn),
        ("pow", pow_rule as RuleFn),
        ("sqrt", sqrt_rule as RuleFn),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_trig_domain() {
        assert_eq!(MathOps::acos(1.0).unwrap(), 0.0);
        assert_eq!(MathOps::asin(0.0).unwrap(), 0.0);

        let err = MathOps::acos(1.5).unwrap_err();
        assert_eq!(err.to_string(), "acosEx() x argument <1.5> must be between -1 and 1");
        let err = MathOps::asin(-2.0).unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_sqrt_domain() {
        assert_eq!(MathOps::sqrt(0.0).unwrap(), 0.0);
        let err = MathOps::sqrt(-1.0).unwrap_err();
        assert_eq!(err.to_string(), "sqrtEx() x argument <-1> must be at least 0");
    }

    #[test]
    fn test_sqrt_nan_input() {
        let err = MathOps::sqrt(f64::NAN).unwrap_err();
        assert_eq!(err.to_string(), "sqrtEx() x argument <NaN> must be a finite number");
    }

    #[test]
    fn test_log_domain() {
        assert_eq!(MathOps::log(1.0).unwrap(), 0.0);
        let err = MathOps::log(0.0).unwrap_err();
        assert_eq!(err.to_string(), "logEx() x argument <0> must be greater than 0");
        let err = MathOps::log(-1.0).unwrap_err();
        assert!(err.is_out_of_range());
        let err = MathOps::log(f64::INFINITY).unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_pow() {
        assert_eq!(MathOps::pow(2.0, 10.0).unwrap(), 1024.0);
        let err = MathOps::pow(f64::NAN, 1.0).unwrap_err();
        assert_eq!(err.to_string(), "powEx() base argument <NaN> must be a finite number");
        let err = MathOps::pow(-8.0, 1.0 / 3.0).unwrap_err();
        assert_eq!(err.to_string(), "powEx() argument <NaN> is not a finite number");
    }

    #[test]
    fn test_rules_reject_non_numbers() {
        let err = sqrt_rule(&[Value::from("9")]).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(pow_rule(&[Value::from(2), Value::from(3)]).unwrap(), Value::Number(8.0));
        assert!(pow_rule(&[Value::from(2)]).unwrap_err().is_invalid_argument());
    }
}
