use std::sync::Arc;

use sift_core::{Context, Value};

use crate::Error;
use crate::registry::{FunctionRegistry, is_valid_name};
use crate::test_utils::echo;

fn constant(value: i64) -> sift_core::FunctionRef {
    Arc::new(move |_: &Context, _: &[Value]| -> sift_core::Result<Value> { Ok(Value::Int(value)) })
}

fn call(registry: &FunctionRegistry, name: &str) -> Value {
    registry
        .get(name)
        .unwrap()
        .call(&Context::background(), &[])
        .unwrap()
}

#[test]
fn name_grammar() {
    for name in ["f", "Upper", "attr_get", "html::ATTR_GET", "a1::b_2::c3"] {
        assert!(is_valid_name(name), "{name} should be valid");
    }
    for name in ["", "1abc", "_f", "a::", "::a", "a:b", "a::1b", "a b", "a-b", "a::::b"] {
        assert!(!is_valid_name(name), "{name} should be invalid");
    }
}

#[test]
fn register_stores_upper_case() {
    let mut registry = FunctionRegistry::new();
    registry.register("html::attrGet", echo()).unwrap();

    assert_eq!(registry.names(), ["HTML::ATTRGET"]);
    assert!(registry.contains("HTML::attrget"));
    assert!(registry.get("html::AttrGet").is_some());
}

#[test]
fn malformed_names_leave_registry_unchanged() {
    let mut registry = FunctionRegistry::new();
    registry.register("KEEP", echo()).unwrap();

    for name in ["1abc", "a::", "a:b"] {
        let err = registry.register(name, echo()).unwrap_err();
        assert!(matches!(err, Error::InvalidFunctionName(ref n) if n == name));
    }

    assert_eq!(registry.names(), ["KEEP"]);
}

#[test]
fn duplicate_keeps_original() {
    let mut registry = FunctionRegistry::new();
    registry.register("answer", constant(42)).unwrap();

    let err = registry.register("ANSWER", constant(7)).unwrap_err();
    assert!(matches!(err, Error::DuplicateFunction(ref n) if n == "ANSWER"));
    insta::assert_snapshot!(err.to_string(), @"function already exists: ANSWER");

    assert_eq!(call(&registry, "answer"), Value::Int(42));
    assert_eq!(registry.len(), 1);
}

#[test]
fn duplicate_checked_before_grammar() {
    let mut registry = FunctionRegistry::new();
    registry.register("ss", echo()).unwrap();

    // `ß` upper-cases to the taken key `SS` but is not a valid name.
    assert!(matches!(
        registry.register("ß", echo()),
        Err(Error::DuplicateFunction(_))
    ));
    assert!(matches!(
        registry.register("ßx", echo()),
        Err(Error::InvalidFunctionName(_))
    ));
}

#[test]
fn remove_is_idempotent() {
    let mut registry = FunctionRegistry::new();
    registry.register("trim", echo()).unwrap();
    registry.register("other", echo()).unwrap();

    registry.remove("Trim");
    assert!(!registry.names().contains(&"TRIM".to_string()));

    registry.remove("Trim");
    assert_eq!(registry.names(), ["OTHER"]);
}

#[test]
fn remove_then_register_again() {
    let mut registry = FunctionRegistry::new();
    registry.register("f", constant(1)).unwrap();
    registry.remove("f");
    registry.register("f", constant(2)).unwrap();

    assert_eq!(call(&registry, "F"), Value::Int(2));
}

#[test]
fn namespace_listing_is_prefix_subset() {
    let mut registry = FunctionRegistry::new();
    for name in ["html::get", "html::set", "str::upper", "top"] {
        registry.register(name, echo()).unwrap();
    }

    insta::assert_debug_snapshot!(registry.names_in_namespace("HTML::"), @r#"
    [
        "HTML::GET",
        "HTML::SET",
    ]
    "#);

    assert_eq!(registry.names_in_namespace(""), registry.names());

    let all = registry.names();
    for prefix in ["H", "STR", "TOP", "X"] {
        let expected: Vec<_> = all.iter().filter(|n| n.starts_with(prefix)).cloned().collect();
        assert_eq!(registry.names_in_namespace(prefix), expected);
    }
}

#[test]
fn namespace_prefix_compared_verbatim() {
    let mut registry = FunctionRegistry::new();
    registry.register("html::get", echo()).unwrap();

    assert!(registry.names_in_namespace("html::").is_empty());
    assert_eq!(registry.names_in_namespace("HTML::"), ["HTML::GET"]);
}

#[test]
fn register_many_stops_at_first_failure() {
    let mut registry = FunctionRegistry::new();
    let result = registry.register_many([
        ("first", echo()),
        ("bad name", echo()),
        ("third", echo()),
    ]);

    assert!(matches!(result, Err(Error::InvalidFunctionName(ref n)) if n == "bad name"));
    // No rollback: pairs before the failure stay registered.
    assert_eq!(registry.names(), ["FIRST"]);
}

#[test]
fn register_many_all_ok() {
    let mut registry = FunctionRegistry::new();
    registry
        .register_many(vec![("a".to_string(), echo()), ("b".to_string(), echo())])
        .unwrap();

    assert_eq!(registry.names(), ["A", "B"]);
}

#[test]
fn stdlib_snapshot() {
    let registry = FunctionRegistry::with_stdlib();

    insta::assert_debug_snapshot!(registry.names(), @r#"
    [
        "ATTR_GET",
        "ATTR_REMOVE",
        "ATTR_SET",
        "CONCAT",
        "LENGTH",
        "LOWER",
        "TRIM",
        "UPPER",
        "IS_NONE",
        "TYPENAME",
    ]
    "#);
    assert!(registry.names().iter().all(|n| is_valid_name(n)));
}

#[test]
fn empty_registry() {
    let registry = FunctionRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert!(registry.get("UPPER").is_none());
}

#[test]
fn debug_lists_names_only() {
    let mut registry = FunctionRegistry::new();
    registry.register("f", echo()).unwrap();
    insta::assert_snapshot!(format!("{registry:?}"), @r#"FunctionRegistry { functions: ["F"] }"#);
}
