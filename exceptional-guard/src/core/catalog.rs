//! The static catalog of rule groups.

use super::namespace::TargetKind;
use crate::error::{Failure, GuardError, Result};
use crate::rules::{GLOBAL_RULES, MATH_RULES, RANGE_RULES, STRING_RULES, TYPE_RULES};
use crate::value::Value;
use std::fmt;

/// A dynamic rule: takes the full argument list (receiver first for
/// instance targets) and returns a value or a typed failure.
pub type RuleFn = fn(&[Value]) -> Result<Value>;

/// A named table of rules and the namespace they are grafted onto.
pub struct RuleGroup {
    /// Domain name used by `augment`/`unaugment`
    pub domain: &'static str,
    /// The namespace the rules are installed on
    pub target: TargetKind,
    /// Rule names paired with their implementations, sorted by name
    pub rules: &'static [(&'static str, RuleFn)],
}

impl RuleGroup {
    /// Looks up a rule by its unsuffixed name.
    pub fn rule(&self, name: &str) -> Option<RuleFn> {
        self.rules
            .iter()
            .find(|(rule, _)| *rule == name)
            .map(|(_, f)| *f)
    }

    /// The rule names in this group.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|(name, _)| *name)
    }

    /// Calls the rule `name` with `args`.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value> {
        let rule = self.rule(name).ok_or_else(|| {
            GuardError::not_found(
                Failure::new(format!("is not a rule of {}", self.domain))
                    .with_value(name)
                    .with_param("name")
                    .with_method("invoke"),
            )
        })?;
        rule(args)
    }
}

impl fmt::Debug for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleGroup")
            .field("domain", &self.domain)
            .field("target", &self.target)
            .field("rules", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Every graftable domain, in alphabetical order.
pub static RULE_GROUPS: [&RuleGroup; 5] = [
    &MATH_RULES,
    &RANGE_RULES,
    &STRING_RULES,
    &TYPE_RULES,
    &GLOBAL_RULES,
];

/// Library operations that share the catalog's name space but are not rule
/// groups.
const RESERVED: [&str; 2] = ["augment", "unaugment"];

/// The names of every catalog domain.
pub fn domains() -> impl Iterator<Item = &'static str> {
    RULE_GROUPS.iter().map(|group| group.domain)
}

/// Resolves a domain name for `operation` (`augment` or `unaugment`).
///
/// `window` is accepted as an alias of `global`.
///
/// # Examples
///
/// ```rust
/// use exceptional_guard::core::resolve;
///
/// assert_eq!(resolve("window", "augment").unwrap().domain, "global");
///
/// let err = resolve("nopet", "augment").unwrap_err();
/// assert_eq!(err.to_string(), "augment() domain argument <nopet> is not a known domain");
/// ```
pub fn resolve(name: &str, operation: &str) -> Result<&'static RuleGroup> {
    let rejected = |reason: &str| {
        GuardError::invalid_argument(
            Failure::new(reason)
                .with_value(name)
                .with_param("domain")
                .with_method(operation),
        )
    };

    if RESERVED.contains(&name) {
        return Err(rejected("is not a rule group"));
    }

    let name = if name == "window" { "global" } else { name };
    RULE_GROUPS
        .iter()
        .copied()
        .find(|group| group.domain == name)
        .ok_or_else(|| rejected("is not a known domain"))
}
