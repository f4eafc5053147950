//! Checked operations, grouped by domain.
//!
//! Each domain exposes a typed API that can be called directly and a
//! [`RuleGroup`](crate::core::RuleGroup) of dynamic rules that the graft
//! manager installs on host namespaces.
//!
//! | Domain | Typed API | Rule group |
//! |---|---|---|
//! | `RangeError` | [`RangeValidation`] | [`RANGE_RULES`] |
//! | `TypeError` | [`RangeValidation::invalid_type`] | [`TYPE_RULES`] |
//! | `String` | [`StringOps`] | [`STRING_RULES`] |
//! | `global` | [`GlobalOps`] | [`GLOBAL_RULES`] |
//! | `Math` | [`MathOps`] | [`MATH_RULES`] |
//!
//! Validation happens twice: input shape is checked before delegating to the
//! primitive, and the primitive's result is inspected afterwards, because
//! conditions such as "not found" only show up in the output.

mod global;
mod math;
mod range;
mod string;

pub use global::{GlobalOps, GLOBAL_RULES};
pub use math::{MathOps, MATH_RULES};
pub use range::{Arg, Bounds, RangeValidation, RANGE_RULES, TYPE_RULES};
pub use string::{StringOps, STRING_RULES};

use crate::error::{GuardError, Result};
use crate::logging::{truncate_field, DEFAULT_MAX_FIELD_LENGTH};
use crate::value::{Pattern, Value};
use std::borrow::Cow;

static UNDEFINED: Value = Value::Undefined;

/// Records a rejection before handing the error back to the caller.
pub(crate) fn reject(err: GuardError) -> GuardError {
    if let Some(failure) = err.failure() {
        tracing::debug!(
            kind = %err.kind(),
            method = failure.method.as_deref().unwrap_or_default(),
            param = failure.param.as_deref().unwrap_or_default(),
            value = %truncate_field(failure.value.as_deref().unwrap_or_default(), DEFAULT_MAX_FIELD_LENGTH),
            "checked operation rejected"
        );
    }
    err
}

/// The `i`th argument, or `Undefined` when it was not supplied.
pub(crate) fn nth(args: &[Value], i: usize) -> &Value {
    args.get(i).unwrap_or(&UNDEFINED)
}

/// Truncates toward zero the way the host converts numbers to positions.
pub(crate) fn to_integer(n: f64) -> i64 {
    n.trunc() as i64
}

pub(crate) fn string_at<'v>(args: &'v [Value], i: usize, arg: Arg<'_>) -> Result<&'v str> {
    match nth(args, i) {
        Value::Str(s) => Ok(s.as_str()),
        other => Err(RangeValidation::invalid_type(other, "a string", arg)),
    }
}

pub(crate) fn optional_str_at<'v>(
    args: &'v [Value],
    i: usize,
    arg: Arg<'_>,
) -> Result<Option<&'v str>> {
    match nth(args, i) {
        value if value.is_nullish() => Ok(None),
        Value::Str(s) => Ok(Some(s.as_str())),
        other => Err(RangeValidation::invalid_type(other, "a string", arg)),
    }
}

/// Any number, including NaN and infinities.
pub(crate) fn number_at(args: &[Value], i: usize, arg: Arg<'_>) -> Result<f64> {
    match nth(args, i) {
        Value::Number(n) => Ok(*n),
        other => Err(RangeValidation::invalid_type(other, "a number", arg)),
    }
}

pub(crate) fn optional_number_at(args: &[Value], i: usize, arg: Arg<'_>) -> Result<Option<f64>> {
    match nth(args, i) {
        value if value.is_nullish() => Ok(None),
        Value::Number(n) => Ok(Some(*n)),
        other => Err(RangeValidation::invalid_type(other, "a number", arg)),
    }
}

/// A position within `bounds`.
///
/// The untruncated number is checked, so `10.5` falls outside `[0, 10]` and
/// the failure shows the value as given.
pub(crate) fn position_at(args: &[Value], i: usize, bounds: Bounds, arg: Arg<'_>) -> Result<i64> {
    RangeValidation::require_in_range(nth(args, i), bounds, arg).map(to_integer)
}

pub(crate) fn optional_position_at(
    args: &[Value],
    i: usize,
    bounds: Bounds,
    arg: Arg<'_>,
) -> Result<Option<i64>> {
    match nth(args, i) {
        value if value.is_nullish() => Ok(None),
        _ => position_at(args, i, bounds, arg).map(Some),
    }
}

/// A finite number converted to an integer, with no bounds.
pub(crate) fn optional_integer_at(args: &[Value], i: usize, arg: Arg<'_>) -> Result<Option<i64>> {
    optional_position_at(args, i, Bounds::Unbounded, arg)
}

/// A pattern argument; a string is compiled as a pattern source.
pub(crate) fn pattern_at<'v>(args: &'v [Value], i: usize, arg: Arg<'_>) -> Result<Cow<'v, Pattern>> {
    match nth(args, i) {
        Value::Pattern(pattern) => Ok(Cow::Borrowed(pattern)),
        Value::Str(source) => Pattern::new(source, "").map(Cow::Owned),
        other => Err(RangeValidation::invalid_type(other, "a pattern or string", arg)),
    }
}
