//! Dynamic values passed through grafted members.
//!
//! Grafted members are invoked with untyped argument lists, the same way the
//! host calls its builtins. [`Value`] is the closed set of shapes those
//! arguments can take, and [`Pattern`] is the compiled regular expression the
//! string rules accept wherever the host would take a regex literal.

use crate::error::{Failure, GuardError, Result};
use regex::{Regex, RegexBuilder};
use std::fmt;

/// A dynamically typed argument or result.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// An absent argument
    #[default]
    Undefined,
    /// An explicit null
    Null,
    /// A boolean
    Bool(bool),
    /// A number (IEEE 754 double)
    Number(f64),
    /// A string
    Str(String),
    /// A compiled pattern
    Pattern(Pattern),
    /// A list of values, e.g. the result of `split`
    List(Vec<Value>),
}

impl Value {
    /// Returns the name of this value's type as used in failure messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Pattern(_) => "pattern",
            Value::List(_) => "list",
        }
    }

    /// Returns true for `Undefined` and `Null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Value::Pattern(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Pattern(p) => write!(f, "{p}"),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Pattern> for Value {
    fn from(value: Pattern) -> Self {
        Value::Pattern(value)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

/// Renders a number the way the host prints it in messages.
///
/// Integral values print without a fractional part, non-finite values print
/// as `NaN`/`Infinity`, and very large or very small magnitudes switch to
/// exponent notation with an explicit sign (`1e+21`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{n}");
    }

    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exp,
    }
}

/// A compiled regular expression with host-style flags.
///
/// Supported flags: `g` (global), `i` (case-insensitive), `m` (multi-line),
/// `s` (dot matches newline) and `u` (accepted, always on).
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `source` with the given flag string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use exceptional_guard::value::Pattern;
    ///
    /// let pattern = Pattern::new("e", "g").unwrap();
    /// assert!(pattern.is_global());
    /// assert_eq!(pattern.to_string(), "/e/g");
    ///
    /// assert!(Pattern::new("e", "y").is_err());
    /// ```
    pub fn new(source: &str, flags: &str) -> Result<Self> {
        let mut seen = String::with_capacity(flags.len());
        for flag in flags.chars() {
            if !"gimsu".contains(flag) || seen.contains(flag) {
                return Err(GuardError::invalid_argument(
                    Failure::new("must only contain the distinct flags g, i, m, s, u")
                        .with_value(flags)
                        .with_param("flags")
                        .with_method("Pattern"),
                ));
            }
            seen.push(flag);
        }

        let regex = RegexBuilder::new(source)
            .case_insensitive(seen.contains('i'))
            .multi_line(seen.contains('m'))
            .dot_matches_new_line(seen.contains('s'))
            .build()
            .map_err(|_| {
                GuardError::invalid_argument(
                    Failure::new("must be a valid regular expression")
                        .with_value(source)
                        .with_param("source")
                        .with_method("Pattern"),
                )
            })?;

        Ok(Self {
            source: source.to_string(),
            flags: seen,
            regex,
        })
    }

    /// Builds a non-global pattern matching `text` literally.
    pub fn literal(text: &str) -> Result<Self> {
        Self::new(&regex::escape(text), "")
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Returns true when the `g` flag is set.
    pub fn is_global(&self) -> bool {
        self.flags.contains('g')
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-1.0), "-1");
        assert_eq!(format_number(12.34), "12.34");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(-1).to_string(), "-1");
        assert_eq!(Value::from("plugh").to_string(), "plugh");
        assert_eq!(Value::from(vec!["e", "x"]).to_string(), "e,x");
        assert_eq!(Value::from(None::<f64>), Value::Undefined);
    }

    #[test]
    fn test_pattern_display_and_flags() {
        let pattern = Pattern::new(r"\s*,\s*", "").unwrap();
        assert_eq!(pattern.to_string(), r"/\s*,\s*/");
        assert!(!pattern.is_global());

        let pattern = Pattern::new("CEP", "i").unwrap();
        assert!(pattern.regex().is_match("exceptional"));
    }

    #[test]
    fn test_pattern_rejects_bad_flags() {
        let err = Pattern::new("e", "gg").unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "Pattern() flags argument <gg> must only contain the distinct flags g, i, m, s, u"
        );
    }

    #[test]
    fn test_pattern_rejects_bad_source() {
        let err = Pattern::new("(", "").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("must be a valid regular expression"));
    }

    #[test]
    fn test_literal_pattern_escapes() {
        let pattern = Pattern::literal("a.c").unwrap();
        assert!(pattern.regex().is_match("xa.cx"));
        assert!(!pattern.regex().is_match("abc"));
    }
}
