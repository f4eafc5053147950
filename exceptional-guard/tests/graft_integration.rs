//! Integration tests for augmenting and unaugmenting host namespaces.

use exceptional_guard::core::{domains, GraftManager, Host, Member, TargetKind};
use exceptional_guard::error::{FailureKind, GuardError};
use exceptional_guard::value::{Pattern, Value};
use std::sync::Arc;

/// Member names of every namespace, for before/after comparisons.
fn snapshot(host: &Host) -> Vec<(String, Vec<String>)> {
    host.namespaces()
        .map(|namespace| {
            (
                namespace.name().to_string(),
                namespace.member_names().map(str::to_string).collect(),
            )
        })
        .collect()
}

fn placeholder() -> Member {
    Arc::new(|_: Option<&Value>, _: &[Value]| Ok::<_, GuardError>(Value::Null))
}

#[test]
fn test_augment_string_lifecycle() {
    let mut host = Host::new();
    let manager = GraftManager::new();
    let subject = Value::from("exceptional");

    let string = manager.augment(&mut host, "String").unwrap();
    assert_eq!(
        string.invoke("charAtEx", Some(&subject), &[Value::from(1)]).unwrap(),
        Value::from("x")
    );
    let err = string
        .invoke("charAtEx", Some(&subject), &[Value::from(-1)])
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::OutOfRange);
    assert_eq!(
        string.invoke("charAt", Some(&subject), &[Value::from(-1)]).unwrap(),
        Value::from(""),
        "the unchecked builtin keeps its sentinel"
    );

    let string = manager.unaugment(&mut host, "String").unwrap();
    assert!(!string.contains("charAtEx"));
    assert!(string.contains("charAt"));
}

#[test]
fn test_dynamic_string_members() {
    let mut host = Host::new();
    let string = GraftManager::new().augment(&mut host, "String").unwrap();
    let subject = Value::from("exceptional");

    let pieces = string
        .invoke("splitEx", Some(&subject), &[Value::from(""), Value::from(3)])
        .unwrap();
    assert_eq!(pieces, Value::from(vec!["e", "x", "c"]));

    let pattern = Value::from(Pattern::new("e", "g").unwrap());
    let matches = string.invoke("matchEx", Some(&subject), &[pattern]).unwrap();
    assert_eq!(matches.to_string(), "e,e");

    let err = string
        .invoke("indexOfEx", Some(&subject), &[Value::from("not")])
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::NotFound);

    let err = string
        .invoke("sliceEx", Some(&subject), &[Value::from("2")])
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidArgument);

    let err = string.invoke("charAtEx", None, &[Value::from(0)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "charAtEx() subject argument <undefined> must be a string"
    );
}

#[test]
fn test_grafted_positions_and_replacements() {
    let mut host = Host::new();
    let string = GraftManager::new().augment(&mut host, "String").unwrap();
    let subject = Value::from("exceptional");

    for (member, raw) in [("charAtEx", 10.5), ("charAtEx", -0.5), ("sliceEx", -11.9)] {
        let err = string
            .invoke(member, Some(&subject), &[Value::from(raw)])
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::OutOfRange, "{member}({raw})");
    }
    let err = string
        .invoke("charAtEx", Some(&subject), &[Value::from(1e300)])
        .unwrap_err();
    assert!(err.to_string().contains("<1e+300>"), "{err}");

    let pieces = string
        .invoke("splitEx", Some(&Value::from("a,b")), &[Value::from(","), Value::from(-1)])
        .unwrap();
    assert_eq!(pieces, Value::from(vec!["a", "b"]));

    let pattern = Value::from(Pattern::new("(c)", "").unwrap());
    let replaced = string
        .invoke("replaceEx", Some(&subject), &[pattern, Value::from("$1a")])
        .unwrap();
    assert_eq!(replaced, Value::from("ex$1aeptional"));

    assert_eq!(
        string.invoke("charAtEx", Some(&Value::from("")), &[Value::from(0)]).unwrap(),
        Value::from("")
    );
}

#[test]
fn test_range_error_members() {
    let mut host = Host::new();
    let range = GraftManager::new().augment(&mut host, "RangeError").unwrap();

    let args = [
        Value::from(0),
        Value::from(2),
        Value::from(4),
        Value::from("digits"),
        Value::from("method"),
    ];
    let err = range.invoke("requireInRangeEx", None, &args).unwrap_err();
    assert_eq!(err.to_string(), "method() digits argument <0> must be between 2 and 4");

    let result = range
        .invoke("requireGreaterThanEx", None, &[Value::from(1), Value::from(0)])
        .unwrap();
    assert_eq!(result, Value::Number(1.0));
}

#[test]
fn test_unknown_and_reserved_domains() {
    let mut host = Host::new();
    let manager = GraftManager::new();

    let err = manager.augment(&mut host, "nopet").unwrap_err();
    assert_eq!(err.kind(), FailureKind::InvalidArgument);
    assert_eq!(err.to_string(), "augment() domain argument <nopet> is not a known domain");

    let err = manager.unaugment(&mut host, "augment").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unaugment() domain argument <augment> is not a rule group"
    );
}

#[test]
fn test_window_alias() {
    let mut host = Host::new();
    let manager = GraftManager::new();
    manager.augment(&mut host, "window").unwrap();

    let err = manager.augment(&mut host, "global").unwrap_err();
    assert_eq!(err.kind(), FailureKind::ConfigurationConflict);
    assert_eq!(
        err.to_string(),
        "cannot augment global with method isFiniteEx as that would overwrite an existing method"
    );
}

#[test]
fn test_conflict_is_all_or_nothing() {
    let mut host = Host::new();
    host.target_mut(TargetKind::Instance("String"))
        .define("substringEx", placeholder());
    let before = snapshot(&host);

    let err = GraftManager::new().augment(&mut host, "String").unwrap_err();
    assert_eq!(err.kind(), FailureKind::ConfigurationConflict);
    assert_eq!(snapshot(&host), before);
}

#[test]
fn test_unaugment_is_idempotent() {
    let mut host = Host::new();
    let manager = GraftManager::new();
    let before = snapshot(&host);

    manager.unaugment(&mut host, "Math").unwrap();
    assert_eq!(snapshot(&host), before);

    manager.augment(&mut host, "Math").unwrap();
    manager.unaugment(&mut host, "Math").unwrap();
    manager.unaugment(&mut host, "Math").unwrap();
    assert_eq!(snapshot(&host), before);
}

#[test]
fn test_reaugment_after_unaugment() {
    let mut host = Host::new();
    let manager = GraftManager::new();

    let first: Vec<String> = manager
        .augment(&mut host, "Math")
        .unwrap()
        .member_names()
        .map(str::to_string)
        .collect();
    manager.unaugment(&mut host, "Math").unwrap();
    let second: Vec<String> = manager
        .augment(&mut host, "Math")
        .unwrap()
        .member_names()
        .map(str::to_string)
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_fan_out_restores_every_namespace() {
    let mut host = Host::new();
    let manager = GraftManager::new();
    let before = snapshot(&host);

    manager.augment_all(&mut host).unwrap();
    for namespace in host.namespaces() {
        let grafted = namespace.member_names().filter(|name| name.ends_with("Ex")).count();
        assert!(grafted > 0, "{} was not augmented", namespace.name());
    }
    assert_eq!(domains().count(), host.namespaces().count());

    manager.unaugment_all(&mut host).unwrap();
    assert_eq!(snapshot(&host), before);

    manager.augment_all(&mut host).unwrap();
    manager.unaugment_all(&mut host).unwrap();
    assert_eq!(snapshot(&host), before);
}

#[test]
fn test_fan_out_conflict_installs_nothing() {
    let mut host = Host::new();
    host.target_mut(TargetKind::Global).define("parseIntEx", placeholder());
    let before = snapshot(&host);

    let err = GraftManager::new().augment_all(&mut host).unwrap_err();
    assert_eq!(err.kind(), FailureKind::ConfigurationConflict);
    assert_eq!(snapshot(&host), before);
}

#[test]
fn test_hosts_are_independent() {
    let mut first = Host::new();
    let second = Host::new();
    GraftManager::new().augment_all(&mut first).unwrap();

    assert!(first.namespace("Math").unwrap().contains("sqrtEx"));
    assert!(!second.namespace("Math").unwrap().contains("sqrtEx"));
}
