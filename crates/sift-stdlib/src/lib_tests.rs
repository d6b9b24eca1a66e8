use std::collections::HashSet;

use sift_core::{Context, Value};

use crate::functions;

#[test]
fn names_are_unique_and_upper_case() {
    let lib = functions();
    let names: HashSet<_> = lib.iter().map(|(name, _)| *name).collect();

    assert_eq!(names.len(), lib.len());
    for name in names {
        assert_eq!(name, name.to_uppercase());
    }
}

#[test]
fn every_function_declares_arity() {
    for (name, f) in functions() {
        assert!(f.arity().is_some(), "{name} has no declared arity");
    }
}

#[test]
fn no_function_panics_on_empty_call() {
    let ctx = Context::background();
    for (name, f) in functions() {
        let res = f.call(&ctx, &[]);
        assert!(res.is_err(), "{name} accepted an empty call");
    }
}

#[test]
fn typed_functions_reject_wrong_kinds() {
    let ctx = Context::background();
    let junk = vec![Value::Float(0.5); 4];
    let lenient = ["CONCAT", "IS_NONE", "TYPENAME"];

    for (name, f) in functions() {
        let arity = f.arity().unwrap();
        let n = arity.max().unwrap_or(arity.min());
        let res = f.call(&ctx, &junk[..n]);

        if lenient.contains(&name) {
            assert!(res.is_ok(), "{name} rejected a float");
        } else {
            assert!(res.unwrap_err().is_type(), "{name} did not report a type error");
        }
    }
}
