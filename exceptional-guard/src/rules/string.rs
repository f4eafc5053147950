//! Checked string operations.
//!
//! Positions are counted in chars. For a subject of length `N`:
//!
//! - `char_at`/`char_code_at` require `index ∈ [0, max(0, N-1)]`
//! - `slice` requires both endpoints in `[-N, max(0, N-1)]`
//! - `substr` requires `start ∈ [-N, max(0, N-1)]` and `length ∈ [1, max(1, N)]`
//! - `substring` requires `begin ∈ [0, max(0, N-1)]` and `end ∈ [0, N]`
//!
//! Searches and extractions that produce nothing fail with
//! [`GuardError::NotFound`](crate::error::GuardError::NotFound).

use super::{
    nth, optional_integer_at, optional_position_at, pattern_at, position_at, string_at, Arg,
    Bounds, RangeValidation,
};
use crate::core::{RuleFn, RuleGroup, TargetKind};
use crate::error::Result;
use crate::primitives::{self, Separator};
use crate::value::{format_number, Pattern, Value};
use regex::Captures;
use std::borrow::Cow;

const NOT_WITHIN: &str = "not found within target string";

/// Largest valid position, `max(0, N-1)`.
fn last_position(s: &str) -> f64 {
    primitives::length(s).saturating_sub(1) as f64
}

/// `[0, max(0, N-1)]`
fn index_bounds(s: &str) -> Bounds {
    Bounds::Between(0.0, last_position(s))
}

/// `[-N, max(0, N-1)]`
fn offset_bounds(s: &str) -> Bounds {
    Bounds::Between(-(primitives::length(s) as f64), last_position(s))
}

/// `[1, max(1, N)]`
fn length_bounds(s: &str) -> Bounds {
    Bounds::Between(1.0, primitives::length(s).max(1) as f64)
}

/// `[0, N]`
fn end_bounds(s: &str) -> Bounds {
    Bounds::Between(0.0, primitives::length(s) as f64)
}

fn describe(value: Option<i64>) -> String {
    value.map_or_else(|| "undefined".to_string(), |v| format_number(v as f64))
}

/// Checked string operations.
///
/// # Examples
///
/// ```rust
/// use exceptional_guard::rules::StringOps;
///
/// assert_eq!(StringOps::char_at("exceptional", 1).unwrap(), "x");
/// assert_eq!(StringOps::substr("exceptional", -3, Some(2)).unwrap(), "na");
///
/// let err = StringOps::char_at("exceptional", -1).unwrap_err();
/// assert_eq!(err.to_string(), "charAtEx() index argument <-1> must be between 0 and 10");
/// ```
pub struct StringOps;

impl StringOps {
    /// The char at `index`, as a string.
    ///
    /// An empty subject admits index 0 and yields `""`, as the host does.
    pub fn char_at(s: &str, index: i64) -> Result<String> {
        RangeValidation::require_in_range(index, index_bounds(s), Arg::new("charAtEx", "index"))?;
        Ok(primitives::char_at(s, index))
    }

    /// The code point of the char at `index`.
    pub fn char_code_at(s: &str, index: i64) -> Result<u32> {
        let arg = Arg::new("charCodeAtEx", "index");
        RangeValidation::require_in_range(index, index_bounds(s), arg)?;
        let code = primitives::char_code_at(s, index);
        if code.is_nan() {
            return Err(arg.not_found(Some(&Value::from(index)), "references nothing from the string"));
        }
        Ok(code as u32)
    }

    /// Position of the first occurrence of `needle`.
    pub fn index_of(s: &str, needle: &str) -> Result<usize> {
        let position = primitives::index_of(s, needle);
        if position == -1 {
            return Err(Arg::new("indexOfEx", "find").not_found(Some(&Value::from(needle)), NOT_WITHIN));
        }
        Ok(position as usize)
    }

    /// Position of the last occurrence of `needle`.
    pub fn last_index_of(s: &str, needle: &str) -> Result<usize> {
        let position = primitives::last_index_of(s, needle);
        if position == -1 {
            return Err(
                Arg::new("lastIndexOfEx", "find").not_found(Some(&Value::from(needle)), NOT_WITHIN)
            );
        }
        Ok(position as usize)
    }

    /// Every match of a global pattern, or the first match and its groups.
    pub fn match_pattern(s: &str, pattern: &Pattern) -> Result<Vec<String>> {
        primitives::match_pattern(s, pattern).ok_or_else(|| {
            Arg::new("matchEx", "regex").not_found(Some(&Value::from(pattern.clone())), NOT_WITHIN)
        })
    }

    /// Replaces matches of `pattern` with `replacement`, inserted literally:
    /// `$1` is not a group reference here. Use
    /// [`replace_with`](Self::replace_with) to build the text from groups.
    pub fn replace(s: &str, pattern: &Pattern, replacement: &str) -> Result<String> {
        Self::replace_with(s, pattern, |_| replacement.to_string())
    }

    /// Replaces matches of `pattern` with the output of `editor`.
    ///
    /// Fails when `editor` was never invoked, i.e. nothing matched.
    pub fn replace_with<F>(s: &str, pattern: &Pattern, mut editor: F) -> Result<String>
    where
        F: FnMut(&Captures<'_>) -> String,
    {
        let mut invoked = false;
        let replaced = primitives::replace(s, pattern, |caps| {
            invoked = true;
            editor(caps)
        });
        if !invoked {
            return Err(
                Arg::new("replaceEx", "regex").not_found(Some(&Value::from(pattern.clone())), NOT_WITHIN)
            );
        }
        Ok(replaced)
    }

    /// Position of the first match of `pattern`.
    pub fn search(s: &str, pattern: &Pattern) -> Result<usize> {
        let position = primitives::search(s, pattern);
        if position == -1 {
            return Err(
                Arg::new("searchEx", "regex").not_found(Some(&Value::from(pattern.clone())), NOT_WITHIN)
            );
        }
        Ok(position as usize)
    }

    /// A non-empty slice between `begin` and `end`.
    pub fn slice(s: &str, begin: i64, end: Option<i64>) -> Result<String> {
        let bounds = offset_bounds(s);
        RangeValidation::require_in_range(begin, bounds, Arg::new("sliceEx", "beginSlice"))?;
        if let Some(end) = end {
            RangeValidation::require_in_range(end, bounds, Arg::new("sliceEx", "endSlice"))?;
        }

        let slice = primitives::slice(s, begin, end);
        if slice.is_empty() {
            return Err(Arg::method("sliceEx").not_found(None, "endpoints return nothing from the string"));
        }
        Ok(slice)
    }

    /// Splits on `separator`.
    ///
    /// A single piece means the separator was not found, unless the caller
    /// asked for exactly one piece with `limit == Some(1)`.
    pub fn split(s: &str, separator: Option<Separator<'_>>, limit: Option<usize>) -> Result<Vec<String>> {
        let pieces = primitives::split(s, separator, limit);
        if pieces.is_empty() || (pieces.len() == 1 && limit != Some(1)) {
            let shown = separator.map_or(Value::Undefined, |sep| Value::from(sep.to_string()));
            return Err(Arg::new("splitEx", "separator").not_found(Some(&shown), "not found in string"));
        }
        Ok(pieces)
    }

    /// Exactly `length` chars from `start`, or everything from `start`.
    pub fn substr(s: &str, start: i64, length: Option<i64>) -> Result<String> {
        RangeValidation::require_in_range(start, offset_bounds(s), Arg::new("substrEx", "start"))?;
        if let Some(length) = length {
            RangeValidation::require_in_range(length, length_bounds(s), Arg::new("substrEx", "length"))?;
        }

        let substr = primitives::substr(s, start, length);
        if substr.is_empty() {
            return Err(Arg::new("substrEx", "length").not_found(
                None,
                format!("references nothing from the string: {}", describe(length)),
            ));
        }
        if let Some(length) = length {
            if primitives::length(&substr) as i64 != length {
                return Err(Arg::new("substrEx", "start and length").not_found(
                    None,
                    format!("combination lies outside the string: {start}, {length}"),
                ));
            }
        }
        Ok(substr)
    }

    /// A non-empty substring between `begin` and `end` (default: the end of
    /// the string); the endpoints may be given in either order.
    pub fn substring(s: &str, begin: i64, end: Option<i64>) -> Result<String> {
        let n = primitives::length(s) as i64;
        RangeValidation::require_in_range(begin, index_bounds(s), Arg::new("substringEx", "beginIndex"))?;
        let end = end.unwrap_or(n);
        RangeValidation::require_in_range(end, end_bounds(s), Arg::new("substringEx", "endIndex"))?;

        let substring = primitives::substring(s, begin, Some(end));
        if substring.is_empty() {
            return Err(Arg::new("substringEx", "endIndex").not_found(
                None,
                format!("references nothing from the string: {end}"),
            ));
        }
        Ok(substring)
    }
}

fn subject<'v>(args: &'v [Value], method: &str) -> Result<&'v str> {
    string_at(args, 0, Arg::new(method, "subject"))
}

fn char_at_rule(args: &[Value]) -> Result<Value> {
    let s = subject(args, "charAtEx")?;
    let index = position_at(args, 1, index_bounds(s), Arg::new("charAtEx", "index"))?;
    StringOps::char_at(s, index).map(Value::from)
}

fn char_code_at_rule(args: &[Value]) -> Result<Value> {
    let s = subject(args, "charCodeAtEx")?;
    let index = position_at(args, 1, index_bounds(s), Arg::new("charCodeAtEx", "index"))?;
    StringOps::char_code_at(s, index).map(Value::from)
}

fn index_of_rule(args: &[Value]) -> Result<Value> {
    let s = subject(args, "indexOfEx")?;
    let needle = string_at(args, 1, Arg::new("indexOfEx", "find"))?;
    StringOps::index_of(s, needle).map(Value::from)
}

fn last_index_of_rule(args: &[Value]) -> Result<Value> {
    let s = subject(args, "lastIndexOfEx")?;
    let needle = string_at(args, 1, Arg::new("lastIndexOfEx", "find"))?;
    StringOps::last_index_of(s, needle).map(Value::from)
}

fn match_rule(args: &[Value]) -> Result<Value> {
    let s = subject(args, "matchEx")?;
    let pattern = pattern_at(args, 1, Arg::new("matchEx", "regex"))?;
    StringOps::match_pattern(s, &pattern).map(Value::from)
}

fn replace_rule(args: &[Value]) -> Result<Value> {
    let s = subject(args, "replaceEx")?;
    let pattern = match nth(args, 1) {
        Value::Str(text) => Cow::Owned(Pattern::literal(text)?),
        _ => pattern_at(args, 1, Arg::new("replaceEx", "regex"))?,
    };
    let replacement = string_at(args, 2, Arg::new("replaceEx", "replacement"))?;
    StringOps::replace(s, &pattern, replacement).map(Value::from)
}

fn search_rule(args: &[Value]) -> Result<Value> {
    let s = subject(args, "searchEx")?;
    let pattern = pattern_at(args, 1, Arg::new("searchEx", "regex"))?;
    StringOps::search(s, &pattern).map(Value::from)
}

fn slice_rule(args: &[Value]) -> Result<Value> {
    let s = subject(args, "sliceEx")?;
    let begin = position_at(args, 1, offset_bounds(s), Arg::new("sliceEx", "beginSlice"))?;
    let end = optional_position_at(args, 2, offset_bounds(s), Arg::new("sliceEx", "endSlice"))?;
    StringOps::slice(s, begin, end).map(Value::from)
}

fn split_rule(args: &[Value]) -> Result<Value> {
    let s = subject(args, "splitEx")?;
    let limit = optional_integer_at(args, 2, Arg::new("splitEx", "limit"))?.map(primitives::split_limit);
    let pieces = match nth(args, 1) {
        value if value.is_nullish() => StringOps::split(s, None, limit),
        Value::Str(text) => StringOps::split(s, Some(Separator::Text(text.as_str())), limit),
        Value::Pattern(pattern) => StringOps::split(s, Some(Separator::Pattern(pattern)), limit),
        other => Err(RangeValidation::invalid_type(
            other,
            "a pattern or string",
            Arg::new("splitEx", "separator"),
        )),
    }?;
    Ok(Value::from(pieces))
}

fn substr_rule(args: &[Value]) -> Result<Value> {
    let s = subject(args, "substrEx")?;
    let start = position_at(args, 1, offset_bounds(s), Arg::new("substrEx", "start"))?;
    let length = optional_position_at(args, 2, length_bounds(s), Arg::new("substrEx", "length"))?;
    StringOps::substr(s, start, length).map(Value::from)
}

fn substring_rule(args: &[Value]) -> Result<Value> {
    let s = subject(args, "substringEx")?;
    let begin = position_at(args, 1, index_bounds(s), Arg::new("substringEx", "beginIndex"))?;
    let end = optional_position_at(args, 2, end_bounds(s), Arg::new("substringEx", "endIndex"))?;
    StringOps::substring(s, begin, end).map(Value::from)
}

/// String rules, grafted onto the `String` instance behaviour table.
pub static STRING_RULES: RuleGroup = RuleGroup {
    domain: "String",
    target: TargetKind::Instance("String"),
    rules: &[
        ("charAt", char_at_rule as RuleFn),
        ("charCodeAt", char_code_at_rule as RuleFn),
        ("indexOf", index_of_rule as RuleFn),
        ("lastIndexOf", last_index_of_rule as RuleFn),
        ("match", match_rule as RuleFn),
        ("replace", replace_rule as RuleFn),
        ("search", search_rule as RuleFn),
        ("slice", slice_rule as RuleFn),
        ("split", split_rule as RuleFn),
        ("substr", substr_rule as RuleFn),
        ("substring", substring_rule as RuleFn),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn test_char_at_empty_subject() {
        let err = StringOps::char_at("", 1).unwrap_err();
        assert_eq!(err.to_string(), "charAtEx() index argument <1> must be between 0 and 0");

        assert_eq!(StringOps::char_at("", 0).unwrap(), "");
    }

    #[test]
    fn test_char_code_at() {
        assert_eq!(StringOps::char_code_at("exceptional", 1).unwrap(), u32::from('x'));
        let err = StringOps::char_code_at("exceptional", -1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "charCodeAtEx() index argument <-1> must be between 0 and 10"
        );
    }

    #[test]
    fn test_replace_with_editor() {
        let pattern = Pattern::new("e", "g").unwrap();
        let replaced = StringOps::replace_with("exceptional", &pattern, |caps| {
            let m = &caps[0];
            format!("{}{}", m.to_uppercase(), m)
        })
        .unwrap();
        assert_eq!(replaced, "EexcEeptional");
    }

    #[test]
    fn test_replace_editor_never_invoked() {
        let pattern = Pattern::new("not", "g").unwrap();
        let mut calls = 0;
        let err = StringOps::replace_with("exceptional", &pattern, |_| {
            calls += 1;
            String::new()
        })
        .unwrap_err();
        assert_eq!(calls, 0);
        assert_eq!(
            err.to_string(),
            "replaceEx() regex argument </not/g> not found within target string"
        );
    }

    #[test]
    fn test_replace_inserts_text_literally() {
        let pattern = Pattern::new("price", "").unwrap();
        assert_eq!(StringOps::replace("price", &pattern, "$5").unwrap(), "$5");

        let pattern = Pattern::new("(c)", "").unwrap();
        assert_eq!(
            StringOps::replace("exceptional", &pattern, "$1a").unwrap(),
            "ex$1aeptional"
        );

        let swapped = StringOps::replace_with("exceptional", &Pattern::new("(c)(e)", "").unwrap(), |caps| {
            format!("{}{}", &caps[2], &caps[1])
        })
        .unwrap();
        assert_eq!(swapped, "execptional");
    }

    #[test]
    fn test_split_messages() {
        let err = StringOps::split("", None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "splitEx() separator argument <undefined> not found in string"
        );

        let pattern = Pattern::new(r"\s*,\s*", "").unwrap();
        let err = StringOps::split("only one entry", Some((&pattern).into()), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            r"splitEx() separator argument </\s*,\s*/> not found in string"
        );
    }

    #[test]
    fn test_split_explicit_limit_of_one() {
        assert_eq!(
            StringOps::split("exceptional", Some("".into()), Some(1)).unwrap(),
            vec!["e"]
        );
        assert!(StringOps::split("exceptional", Some("".into()), Some(0)).is_err());
    }

    #[test]
    fn test_substring_end_bound_is_length() {
        assert_eq!(StringOps::substring("exceptional", 0, Some(11)).unwrap(), "exceptional");
        let err = StringOps::substring("exceptional", 2, Some(12)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "substringEx() endIndex argument <12> must be between 0 and 11"
        );
    }

    #[test]
    fn test_substring_empty_subject() {
        let err = StringOps::substring("", 0, None).unwrap_err();
        assert!(err.is_not_found());
        assert!(err
            .to_string()
            .starts_with("substringEx() endIndex argument references nothing from the string"));
    }

    #[test]
    fn test_rules_check_positions_before_truncating() {
        let subject = Value::from("exceptional");
        for (rule, raw) in [
            (char_at_rule as RuleFn, 10.5),
            (char_at_rule as RuleFn, -0.5),
            (char_code_at_rule as RuleFn, 10.5),
            (slice_rule as RuleFn, -11.9),
            (substring_rule as RuleFn, -0.5),
        ] {
            let err = rule(&[subject.clone(), Value::from(raw)]).unwrap_err();
            assert_eq!(err.kind(), FailureKind::OutOfRange, "{raw}");
        }

        let err = char_at_rule(&[subject.clone(), Value::from(1e300)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "charAtEx() index argument <1e+300> must be between 0 and 10"
        );

        let err = substr_rule(&[subject.clone(), Value::from(0), Value::from(11.5)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "substrEx() length argument <11.5> must be between 1 and 11"
        );

        assert_eq!(
            char_at_rule(&[subject, Value::from(9.5)]).unwrap(),
            Value::from("a")
        );
    }

    #[test]
    fn test_split_rule_negative_limit_keeps_every_piece() {
        let args = [Value::from("a,b"), Value::from(","), Value::from(-1)];
        assert_eq!(split_rule(&args).unwrap(), Value::from(vec!["a", "b"]));
    }

    #[test]
    fn test_rules_reject_non_string_subject() {
        let err = char_at_rule(&[Value::from(5), Value::from(0)]).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidArgument);
        assert_eq!(err.to_string(), "charAtEx() subject argument <5> must be a string");
    }

    #[test]
    fn test_rules_round_trip_values() {
        let args = [Value::from("exceptional"), Value::from("cep")];
        assert_eq!(index_of_rule(&args).unwrap(), Value::Number(2.0));

        let args = [Value::from("exceptional"), Value::from(""), Value::from(3)];
        assert_eq!(
            split_rule(&args).unwrap(),
            Value::from(vec!["e", "x", "c"])
        );

        let args = [Value::from("a.b.c"), Value::from("."), Value::from("-")];
        assert_eq!(replace_rule(&args).unwrap(), Value::from("a-b.c"));
    }
}
