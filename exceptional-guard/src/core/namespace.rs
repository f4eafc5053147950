//! Host namespaces that grafted members are installed on.

use super::catalog::{RuleFn, RuleGroup};
use crate::error::{Failure, GuardError, Result};
use crate::primitives::builtins::BUILTINS;
use crate::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Where a rule group is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TargetKind {
    /// The global namespace
    Global,
    /// A static namespace such as `Math`
    Static(&'static str),
    /// The shared behaviour table of a value type such as `String`; members
    /// receive the value they are called on as their first argument
    Instance(&'static str),
}

impl TargetKind {
    /// The namespace name.
    pub fn name(&self) -> &'static str {
        match self {
            TargetKind::Global => "global",
            TargetKind::Static(name) | TargetKind::Instance(name) => name,
        }
    }

    /// Returns true for instance behaviour tables.
    pub fn is_instance(&self) -> bool {
        matches!(self, TargetKind::Instance(_))
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A callable namespace member. The receiver is `Some` when the member is
/// called on a value.
pub type Member = Arc<dyn Fn(Option<&Value>, &[Value]) -> Result<Value> + Send + Sync>;

/// Wraps a rule as a member of a `kind` namespace.
///
/// Instance members prepend the receiver (or `Undefined`) to the arguments.
pub(crate) fn member_from_rule(kind: TargetKind, rule: RuleFn) -> Member {
    if kind.is_instance() {
        Arc::new(move |receiver: Option<&Value>, args: &[Value]| {
            let mut full = Vec::with_capacity(args.len() + 1);
            full.push(receiver.cloned().unwrap_or_default());
            full.extend_from_slice(args);
            rule(&full)
        })
    } else {
        Arc::new(move |_receiver: Option<&Value>, args: &[Value]| rule(args))
    }
}

/// A named set of members.
#[derive(Clone)]
pub struct Namespace {
    kind: TargetKind,
    members: BTreeMap<String, Member>,
}

impl Namespace {
    /// Creates an empty namespace.
    pub fn new(kind: TargetKind) -> Self {
        Self {
            kind,
            members: BTreeMap::new(),
        }
    }

    fn with_rules(group: &RuleGroup) -> Self {
        let mut namespace = Self::new(group.target);
        for (name, rule) in group.rules {
            namespace.define(*name, member_from_rule(group.target, *rule));
        }
        namespace
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Defines `name`, returning the member it replaced.
    pub fn define(&mut self, name: impl Into<String>, member: Member) -> Option<Member> {
        self.members.insert(name.into(), member)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Removes `name`, returning the member if it was defined.
    pub fn remove(&mut self, name: &str) -> Option<Member> {
        self.members.remove(name)
    }

    /// Member names in sorted order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Calls the member `name`.
    ///
    /// Fails with [`GuardError::NotFound`] when no such member is defined.
    pub fn invoke(&self, name: &str, receiver: Option<&Value>, args: &[Value]) -> Result<Value> {
        let member = self.member(name).ok_or_else(|| {
            GuardError::not_found(
                Failure::new(format!("is not a member of {}", self.kind))
                    .with_value(name)
                    .with_param("name")
                    .with_method("invoke"),
            )
        })?;
        member(receiver, args)
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("kind", &self.kind)
            .field("members", &self.members.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// The set of namespaces rules are grafted onto.
///
/// A host is an explicit value: every augment and unaugment takes it by
/// `&mut`, so there is no process-wide state.
#[derive(Debug, Clone, Default)]
pub struct Host {
    targets: BTreeMap<TargetKind, Namespace>,
}

impl Host {
    /// Creates a host whose standard namespaces hold the unchecked builtins
    /// (`charAt`, `indexOf`, `parseFloat`, `sqrt`, ...).
    pub fn new() -> Self {
        let targets = BUILTINS
            .iter()
            .map(|group| (group.target, Namespace::with_rules(group)))
            .collect();
        Self { targets }
    }

    /// Creates a host with no namespaces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The namespace for `kind`, if the host has one.
    pub fn target(&self, kind: TargetKind) -> Option<&Namespace> {
        self.targets.get(&kind)
    }

    /// The namespace for `kind`, created empty on first use.
    pub fn target_mut(&mut self, kind: TargetKind) -> &mut Namespace {
        self.targets
            .entry(kind)
            .or_insert_with(|| Namespace::new(kind))
    }

    /// Looks a namespace up by name, e.g. `"String"`.
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.targets.values().find(|namespace| namespace.name() == name)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.targets.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_host_has_builtins() {
        let host = Host::new();
        let string = host.namespace("String").unwrap();
        assert!(string.contains("charAt"));
        assert!(!string.contains("charAtEx"));
        assert!(host.namespace("RangeError").unwrap().is_empty());
        assert!(host.namespace("TypeError").unwrap().is_empty());
        assert_eq!(host.namespaces().count(), 5);
    }

    #[test]
    fn test_instance_members_receive_receiver() {
        let host = Host::new();
        let string = host.target(TargetKind::Instance("String")).unwrap();
        let result = string
            .invoke("indexOf", Some(&Value::from("exceptional")), &[Value::from("cep")])
            .unwrap();
        assert_eq!(result, Value::Number(2.0));
    }

    #[test]
    fn test_invoke_missing_member() {
        let host = Host::new();
        let err = host
            .namespace("Math")
            .unwrap()
            .invoke("sqrtEx", None, &[Value::from(4)])
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "invoke() name argument <sqrtEx> is not a member of Math");
    }

    #[test]
    fn test_define_and_remove() {
        let mut namespace = Namespace::new(TargetKind::Global);
        let member: Member = Arc::new(|_: Option<&Value>, _: &[Value]| Ok::<_, GuardError>(Value::Null));
        assert!(namespace.define("plugh", member.clone()).is_none());
        assert!(namespace.define("plugh", member).is_some());
        assert_eq!(namespace.member_names().collect::<Vec<_>>(), ["plugh"]);
        assert!(namespace.remove("plugh").is_some());
        assert!(namespace.remove("plugh").is_none());
    }

    #[test]
    fn test_target_mut_creates_namespace() {
        let mut host = Host::empty();
        assert!(host.target(TargetKind::Static("Math")).is_none());
        host.target_mut(TargetKind::Static("Math"));
        assert_eq!(host.namespace("Math").unwrap().kind(), TargetKind::Static("Math"));
    }
}
