//! The host's own unchecked builtins.
//!
//! [`Host::new`](crate::core::Host::new) pre-populates its namespaces from
//! these tables so that a freshly built host looks like the environment the
//! checked rules are grafted onto. Arguments are coerced loosely, the way the
//! host would, and misses come back as sentinels.

use super::{number, string, Separator};
use crate::core::{RuleFn, RuleGroup, TargetKind};
use crate::error::Result;
use crate::value::{Pattern, Value};
use std::borrow::Cow;

fn arg(args: &[Value], i: usize) -> &Value {
    crate::rules::nth(args, i)
}

/// Loose numeric coercion: booleans and numeric text convert, everything
/// else is `NaN`.
fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Str(s) if s.trim().is_empty() => 0.0,
        Value::Str(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn to_position(value: &Value) -> i64 {
    let n = to_number(value);
    if n.is_nan() {
        0
    } else {
        n.trunc() as i64
    }
}

fn to_optional_position(value: &Value) -> Option<i64> {
    if value.is_nullish() {
        None
    } else {
        Some(to_position(value))
    }
}

fn to_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Str(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

fn to_pattern(value: &Value) -> Result<Cow<'_, Pattern>> {
    match value {
        Value::Pattern(pattern) => Ok(Cow::Borrowed(pattern)),
        other => Pattern::new(&to_text(other), "").map(Cow::Owned),
    }
}

fn char_at(args: &[Value]) -> Result<Value> {
    Ok(string::char_at(&to_text(arg(args, 0)), to_position(arg(args, 1))).into())
}

fn char_code_at(args: &[Value]) -> Result<Value> {
    Ok(string::char_code_at(&to_text(arg(args, 0)), to_position(arg(args, 1))).into())
}

fn index_of(args: &[Value]) -> Result<Value> {
    Ok(string::index_of(&to_text(arg(args, 0)), &to_text(arg(args, 1))).into())
}

fn last_index_of(args: &[Value]) -> Result<Value> {
    Ok(string::last_index_of(&to_text(arg(args, 0)), &to_text(arg(args, 1))).into())
}

fn match_pattern(args: &[Value]) -> Result<Value> {
    let pattern = to_pattern(arg(args, 1))?;
    Ok(string::match_pattern(&to_text(arg(args, 0)), &pattern).map_or(Value::Null, Value::from))
}

fn replace(args: &[Value]) -> Result<Value> {
    let pattern = match arg(args, 1) {
        Value::Pattern(pattern) => Cow::Borrowed(pattern),
        other => Cow::Owned(Pattern::literal(&to_text(other))?),
    };
    let replacement = to_text(arg(args, 2));
    let replaced = string::replace(&to_text(arg(args, 0)), &pattern, |caps| {
        let mut expanded = String::new();
        caps.expand(&replacement, &mut expanded);
        expanded
    });
    Ok(replaced.into())
}

fn search(args: &[Value]) -> Result<Value> {
    let pattern = to_pattern(arg(args, 1))?;
    Ok(string::search(&to_text(arg(args, 0)), &pattern).into())
}

fn slice(args: &[Value]) -> Result<Value> {
    let s = to_text(arg(args, 0));
    Ok(string::slice(&s, to_position(arg(args, 1)), to_optional_position(arg(args, 2))).into())
}

fn split(args: &[Value]) -> Result<Value> {
    let s = to_text(arg(args, 0));
    let limit = to_optional_position(arg(args, 2)).map(string::split_limit);
    let pieces = match arg(args, 1) {
        value if value.is_nullish() => string::split(&s, None, limit),
        Value::Pattern(pattern) => string::split(&s, Some(Separator::Pattern(pattern)), limit),
        other => string::split(&s, Some(Separator::Text(&to_text(other))), limit),
    };
    Ok(pieces.into())
}

fn substr(args: &[Value]) -> Result<Value> {
    let s = to_text(arg(args, 0));
    Ok(string::substr(&s, to_position(arg(args, 1)), to_optional_position(arg(args, 2))).into())
}

fn substring(args: &[Value]) -> Result<Value> {
    let s = to_text(arg(args, 0));
    Ok(string::substring(&s, to_position(arg(args, 1)), to_optional_position(arg(args, 2))).into())
}

fn parse_float(args: &[Value]) -> Result<Value> {
    Ok(number::parse_float(&to_text(arg(args, 0))).into())
}

fn parse_int(args: &[Value]) -> Result<Value> {
    let radix = match to_number(arg(args, 1)) {
        n if n.is_nan() => None,
        n => Some(n.trunc().clamp(0.0, f64::from(u32::MAX)) as u32),
    };
    Ok(number::parse_int(&to_text(arg(args, 0)), radix).into())
}

fn is_nan(args: &[Value]) -> Result<Value> {
    Ok(to_number(arg(args, 0)).is_nan().into())
}

fn is_finite(args: &[Value]) -> Result<Value> {
    Ok(to_number(arg(args, 0)).is_finite().into())
}

fn acos(args: &[Value]) -> Result<Value> {
    Ok(to_number(arg(args, 0)).acos().into())
}

fn asin(args: &[Value]) -> Result<Value> {
    Ok(to_number(arg(args, 0)).asin().into())
}

fn log(args: &[Value]) -> Result<Value> {
    Ok(to_number(arg(args, 0)).ln().into())
}

fn pow(args: &[Value]) -> Result<Value> {
    Ok(to_number(arg(args, 0)).powf(to_number(arg(args, 1))).into())
}

fn sqrt(args: &[Value]) -> Result<Value> {
    Ok(to_number(arg(args, 0)).sqrt().into())
}

/// Builtin members of every standard target, keyed like the rule catalog.
pub(crate) static BUILTINS: [RuleGroup; 5] = [
    RuleGroup {
        domain: "Math",
        target: TargetKind::Static("Math"),
        rules: &[
            ("acos", acos as RuleFn),
            ("asin", asin as RuleFn),
            ("log", log as RuleFn),
            ("pow", pow as RuleFn),
            ("sqrt", sqrt as RuleFn),
        ],
    },
    RuleGroup {
        domain: "RangeError",
        target: TargetKind::Static("RangeError"),
        rules: &[],
    },
    RuleGroup {
        domain: "String",
        target: TargetKind::Instance("String"),
        rules: &[
            ("charAt", char_at as RuleFn),
            ("charCodeAt", char_code_at as RuleFn),
            ("indexOf", index_of as RuleFn),
            ("lastIndexOf", last_index_of as RuleFn),
            ("match", match_pattern as RuleFn),
            ("replace", replace as RuleFn),
            ("search", search as RuleFn),
            ("slice", slice as RuleFn),
            ("split", split as RuleFn),
            ("substr", substr as RuleFn),
            ("substring", substring as RuleFn),
        ],
    },
    RuleGroup {
        domain: "TypeError",
        target: TargetKind::Static("TypeError"),
        rules: &[],
    },
    RuleGroup {
        domain: "global",
        target: TargetKind::Global,
        rules: &[
            ("isFinite", is_finite as RuleFn),
            ("isNaN", is_nan as RuleFn),
            ("parseFloat", parse_float as RuleFn),
            ("parseInt", parse_int as RuleFn),
        ],
    },
];
