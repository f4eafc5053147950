//! Numeric validity rules shared by every other domain.

use super::{nth, optional_number_at, optional_str_at, reject};
use crate::core::{RuleFn, RuleGroup, TargetKind};
use crate::error::{Failure, GuardError, Result};
use crate::value::{format_number, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names the call site of a checked argument for failure messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Arg<'a> {
    /// The operation name, rendered as `method()`
    pub method: Option<&'a str>,
    /// The parameter name
    pub param: Option<&'a str>,
}

impl<'a> Arg<'a> {
    /// Names both the operation and the parameter.
    pub const fn new(method: &'a str, param: &'a str) -> Self {
        Self {
            method: Some(method),
            param: Some(param),
        }
    }

    /// An argument with no call-site information.
    pub const fn anonymous() -> Self {
        Self {
            method: None,
            param: None,
        }
    }

    /// Names only the operation.
    pub const fn method(method: &'a str) -> Self {
        Self {
            method: Some(method),
            param: None,
        }
    }

    /// Replaces the parameter name.
    pub const fn with_param(mut self, param: &'a str) -> Self {
        self.param = Some(param);
        self
    }

    /// Builds a failure for this call site without an offending value.
    pub fn failure(&self, reason: impl Into<String>) -> Failure {
        Failure {
            value: None,
            param: self.param.map(str::to_string),
            method: self.method.map(str::to_string),
            reason: reason.into(),
        }
    }

    fn failure_for(&self, value: &Value, reason: impl Into<String>) -> Failure {
        self.failure(reason).with_value(value.to_string())
    }

    pub(crate) fn invalid_argument(&self, value: &Value, reason: impl Into<String>) -> GuardError {
        reject(GuardError::invalid_argument(self.failure_for(value, reason)))
    }

    pub(crate) fn out_of_range(&self, value: &Value, reason: impl Into<String>) -> GuardError {
        reject(GuardError::out_of_range(self.failure_for(value, reason)))
    }

    pub(crate) fn not_found(&self, value: Option<&Value>, reason: impl Into<String>) -> GuardError {
        let failure = match value {
            Some(value) => self.failure_for(value, reason),
            None => self.failure(reason),
        };
        reject(GuardError::not_found(failure))
    }
}

/// An inclusive numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bounds {
    /// Any finite number
    Unbounded,
    /// At least the given value
    AtLeast(f64),
    /// At most the given value
    AtMost(f64),
    /// Between the given values (inclusive)
    Between(f64, f64),
}

impl Bounds {
    /// Builds bounds from an optional minimum and maximum.
    pub fn from_options(min: Option<f64>, max: Option<f64>) -> Self {
        match (min, max) {
            (None, None) => Bounds::Unbounded,
            (Some(min), None) => Bounds::AtLeast(min),
            (None, Some(max)) => Bounds::AtMost(max),
            (Some(min), Some(max)) => Bounds::Between(min, max),
        }
    }

    /// Returns true if `value` lies within these bounds.
    pub fn contains(&self, value: f64) -> bool {
        match self {
            Bounds::Unbounded => true,
            Bounds::AtLeast(min) => value >= *min,
            Bounds::AtMost(max) => value <= *max,
            Bounds::Between(min, max) => value >= *min && value <= *max,
        }
    }

    /// Returns the reason clause used when a value falls outside.
    pub fn description(&self) -> String {
        match self {
            Bounds::Unbounded => "must be a finite number".to_string(),
            Bounds::AtLeast(min) => format!("must be at least {}", format_number(*min)),
            Bounds::AtMost(max) => format!("must be at most {}", format_number(*max)),
            Bounds::Between(min, max) => format!(
                "must be between {} and {}",
                format_number(*min),
                format_number(*max)
            ),
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Finite-number and interval checks.
///
/// # Examples
///
/// ```rust
/// use exceptional_guard::rules::{Arg, Bounds, RangeValidation};
///
/// assert_eq!(RangeValidation::require_in_range(3, Bounds::Between(2.0, 4.0), Arg::anonymous()).unwrap(), 3.0);
///
/// let err = RangeValidation::require_in_range(0, Bounds::Between(2.0, 4.0), Arg::new("method", "digits"))
///     .unwrap_err();
/// assert_eq!(err.to_string(), "method() digits argument <0> must be between 2 and 4");
/// ```
pub struct RangeValidation;

impl RangeValidation {
    /// Requires a finite number.
    ///
    /// Non-numbers are [`GuardError::InvalidArgument`]; NaN and infinities are
    /// [`GuardError::OutOfRange`].
    pub fn require_valid(value: impl Into<Value>, arg: Arg<'_>) -> Result<f64> {
        match value.into() {
            Value::Number(n) if n.is_finite() => Ok(n),
            number @ Value::Number(_) => Err(arg.out_of_range(&number, "must be a finite number")),
            other => Err(arg.invalid_argument(&other, "must be a finite number")),
        }
    }

    /// Requires a finite number within `bounds`.
    pub fn require_in_range(value: impl Into<Value>, bounds: Bounds, arg: Arg<'_>) -> Result<f64> {
        let value = value.into();
        let n = Self::require_valid(&value, arg)?;
        if bounds.contains(n) {
            Ok(n)
        } else {
            Err(arg.out_of_range(&value, bounds.description()))
        }
    }

    /// Requires a finite number strictly greater than `floor`.
    pub fn require_greater_than(value: impl Into<Value>, floor: f64, arg: Arg<'_>) -> Result<f64> {
        let value = value.into();
        let n = Self::require_valid(&value, arg)?;
        if n > floor {
            Ok(n)
        } else {
            Err(arg.out_of_range(
                &value,
                format!("must be greater than {}", format_number(floor)),
            ))
        }
    }

    /// Requires a computed result to be finite.
    pub fn require_finite_result(result: f64, arg: Arg<'_>) -> Result<f64> {
        if result.is_finite() {
            Ok(result)
        } else {
            Err(arg.out_of_range(&Value::Number(result), "is not a finite number"))
        }
    }

    /// Builds the failure for an argument that is not of the `expected` type.
    pub fn invalid_type(value: impl Into<Value>, expected: &str, arg: Arg<'_>) -> GuardError {
        arg.invalid_argument(&value.into(), format!("must be {expected}"))
    }
}

fn call_site<'a>(args: &'a [Value], from: usize, method: &'static str) -> Result<Arg<'a>> {
    let site = Arg::new(method, "param");
    let param = optional_str_at(args, from, site)?;
    let name = optional_str_at(args, from + 1, site.with_param("method"))?;
    Ok(Arg {
        method: name,
        param,
    })
}

fn require_valid_rule(args: &[Value]) -> Result<Value> {
    let arg = call_site(args, 1, "requireValidEx")?;
    RangeValidation::require_valid(nth(args, 0), arg).map(Value::from)
}

fn require_in_range_rule(args: &[Value]) -> Result<Value> {
    let site = Arg::new("requireInRangeEx", "min");
    let min = optional_number_at(args, 1, site)?;
    let max = optional_number_at(args, 2, site.with_param("max"))?;
    let arg = call_site(args, 3, "requireInRangeEx")?;
    RangeValidation::require_in_range(nth(args, 0), Bounds::from_options(min, max), arg)
        .map(Value::from)
}

fn require_greater_than_rule(args: &[Value]) -> Result<Value> {
    let floor = RangeValidation::require_valid(
        nth(args, 1),
        Arg::new("requireGreaterThanEx", "floor"),
    )?;
    let arg = call_site(args, 2, "requireGreaterThanEx")?;
    RangeValidation::require_greater_than(nth(args, 0), floor, arg).map(Value::from)
}

fn throw_rule(args: &[Value]) -> Result<Value> {
    let expected = optional_str_at(args, 1, Arg::new("throwEx", "type"))?.unwrap_or("valid");
    let arg = call_site(args, 2, "throwEx")?;
    Err(RangeValidation::invalid_type(nth(args, 0), expected, arg))
}

/// The range helpers as a graftable rule group.
pub static RANGE_RULES: RuleGroup = RuleGroup {
    domain: "RangeError",
    target: TargetKind::Static("RangeError"),
    rules: &[
        ("requireGreaterThan", require_greater_than_rule as RuleFn),
        ("requireInRange", require_in_range_rule as RuleFn),
        ("requireValid", require_valid_rule as RuleFn),
    ],
};

/// Raising a type failure on demand, for callers that validate their own
/// argument types.
pub static TYPE_RULES: RuleGroup = RuleGroup {
    domain: "TypeError",
    target: TargetKind::Static("TypeError"),
    rules: &[("throw", throw_rule as RuleFn)],
};
