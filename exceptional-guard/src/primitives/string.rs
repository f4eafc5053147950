//! Unchecked string primitives with sentinel results.
//!
//! Positions and lengths count Unicode scalar values (`char`s), never bytes.
//! Nothing here fails: a miss is reported as `-1`, `NaN`, `None` or an empty
//! string, exactly the signals the checked rules turn into errors.

use crate::value::Pattern;
use regex::Captures;
use std::fmt;

/// A `split` separator: literal text or a pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Separator<'a> {
    Text(&'a str),
    Pattern(&'a Pattern),
}

impl<'a> From<&'a str> for Separator<'a> {
    fn from(text: &'a str) -> Self {
        Separator::Text(text)
    }
}

impl<'a> From<&'a Pattern> for Separator<'a> {
    fn from(pattern: &'a Pattern) -> Self {
        Separator::Pattern(pattern)
    }
}

impl fmt::Display for Separator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Text(text) => f.write_str(text),
            Separator::Pattern(pattern) => write!(f, "{pattern}"),
        }
    }
}

/// Number of chars in `s`.
pub fn length(s: &str) -> usize {
    s.chars().count()
}

fn char_index(s: &str, byte_offset: usize) -> i64 {
    s[..byte_offset].chars().count() as i64
}

/// Resolves a possibly negative position against `len`, clamped to `[0, len]`.
fn relative(position: i64, len: i64) -> i64 {
    if position < 0 {
        (len + position).max(0)
    } else {
        position.min(len)
    }
}

fn collect(chars: &[char], from: i64, to: i64) -> String {
    if from >= to {
        return String::new();
    }
    chars[from as usize..to as usize].iter().collect()
}

/// The char at `index` as a string, or `""` when out of range.
pub fn char_at(s: &str, index: i64) -> String {
    usize::try_from(index)
        .ok()
        .and_then(|i| s.chars().nth(i))
        .map(String::from)
        .unwrap_or_default()
}

/// The code point at `index`, or `NaN` when out of range.
pub fn char_code_at(s: &str, index: i64) -> f64 {
    usize::try_from(index)
        .ok()
        .and_then(|i| s.chars().nth(i))
        .map_or(f64::NAN, |c| f64::from(u32::from(c)))
}

/// Position of the first occurrence of `needle`, or `-1`.
pub fn index_of(s: &str, needle: &str) -> i64 {
    s.find(needle).map_or(-1, |byte| char_index(s, byte))
}

/// Position of the last occurrence of `needle`, or `-1`.
pub fn last_index_of(s: &str, needle: &str) -> i64 {
    s.rfind(needle).map_or(-1, |byte| char_index(s, byte))
}

/// Matches of `pattern` in `s`, or `None`.
///
/// A global pattern yields every match. Otherwise the first match is returned
/// followed by its capture groups; a group that did not participate is `""`.
pub fn match_pattern(s: &str, pattern: &Pattern) -> Option<Vec<String>> {
    if pattern.is_global() {
        let matches: Vec<String> = pattern
            .regex()
            .find_iter(s)
            .map(|m| m.as_str().to_string())
            .collect();
        return if matches.is_empty() {
            None
        } else {
            Some(matches)
        };
    }

    pattern.regex().captures(s).map(|caps| {
        caps.iter()
            .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
            .collect()
    })
}

/// Replaces the first match (every match for a global pattern) with the
/// output of `replacer`.
pub fn replace<F>(s: &str, pattern: &Pattern, replacer: F) -> String
where
    F: FnMut(&Captures<'_>) -> String,
{
    let limit = if pattern.is_global() { 0 } else { 1 };
    pattern.regex().replacen(s, limit, replacer).into_owned()
}

/// Position of the first match of `pattern`, or `-1`.
pub fn search(s: &str, pattern: &Pattern) -> i64 {
    pattern
        .regex()
        .find(s)
        .map_or(-1, |m| char_index(s, m.start()))
}

/// Chars from `begin` up to `end` (exclusive); negative positions count from
/// the end.
pub fn slice(s: &str, begin: i64, end: Option<i64>) -> String {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len() as i64;
    let from = relative(begin, len);
    let to = end.map_or(len, |end| relative(end, len));
    collect(&chars, from, to)
}

/// Up to `length` chars starting at `start`; a negative start counts from the
/// end.
pub fn substr(s: &str, start: i64, length: Option<i64>) -> String {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len() as i64;
    let from = relative(start, len);
    let count = length.map_or(len - from, |length| length.max(0).min(len - from));
    collect(&chars, from, from + count)
}

/// Chars between `begin` and `end`, each clamped to `[0, len]`; the
/// endpoints are swapped when `begin > end`.
pub fn substring(s: &str, begin: i64, end: Option<i64>) -> String {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len() as i64;
    let a = begin.clamp(0, len);
    let b = end.map_or(len, |end| end.clamp(0, len));
    collect(&chars, a.min(b), a.max(b))
}

/// Converts a numeric split limit the way the host does, modulo 2^32, so a
/// negative limit such as `-1` keeps every piece.
pub fn split_limit(limit: i64) -> usize {
    limit as u32 as usize
}

/// Splits `s` on `separator`, keeping at most `limit` pieces.
///
/// Without a separator the whole string is the only piece. An empty text
/// separator splits into chars. Capture groups of a pattern separator are
/// spliced into the output.
pub fn split(s: &str, separator: Option<Separator<'_>>, limit: Option<usize>) -> Vec<String> {
    let limit = limit.unwrap_or(usize::MAX);
    if limit == 0 {
        return Vec::new();
    }

    let pieces = match separator {
        None => vec![s.to_string()],
        Some(Separator::Text(text)) => split_text(s, text),
        Some(Separator::Pattern(pattern)) => split_pattern(s, pattern),
    };

    pieces.into_iter().take(limit).collect()
}

fn split_text(s: &str, text: &str) -> Vec<String> {
    if text.is_empty() {
        return s.chars().map(String::from).collect();
    }
    s.split(text).map(String::from).collect()
}

fn split_pattern(s: &str, pattern: &Pattern) -> Vec<String> {
    let regex = pattern.regex();
    if s.is_empty() {
        return if regex.is_match(s) {
            Vec::new()
        } else {
            vec![String::new()]
        };
    }

    let mut pieces = Vec::new();
    let mut last = 0;
    for caps in regex.captures_iter(s) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.as_str().is_empty() && (whole.start() == last || whole.start() >= s.len()) {
            continue;
        }
        pieces.push(s[last..whole.start()].to_string());
        for group in caps.iter().skip(1) {
            pieces.push(group.map_or_else(String::new, |m| m.as_str().to_string()));
        }
        last = whole.end();
    }
    pieces.push(s[last..].to_string());
    pieces
}
