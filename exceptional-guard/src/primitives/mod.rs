//! Unchecked primitives.
//!
//! These behave like the host's own builtins: they never fail and report a
//! miss with a sentinel (`-1`, `NaN`, `None`, `""`). The checked rules in
//! [`crate::rules`] delegate here and turn sentinels into errors.

pub(crate) mod builtins;
mod number;
mod string;

pub use number::{parse_float, parse_int};
pub use string::{
    char_at, char_code_at, index_of, last_index_of, length, match_pattern, replace, search, slice,
    split, split_limit, substr, substring, Separator,
};
