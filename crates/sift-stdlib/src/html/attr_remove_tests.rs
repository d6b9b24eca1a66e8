use std::sync::Arc;

use sift_core::{Bound, Context, Error, Function, Kind, Value};

use super::AttributeRemove;
use crate::test_utils::{DetachedElement, MemoryDocument, MemoryElement, element, strings};

fn call(args: &[Value]) -> sift_core::Result<Value> {
    AttributeRemove.call(&Context::background(), args)
}

#[test]
fn no_arguments_is_arity_error() {
    let err = call(&[]).unwrap_err();
    assert!(matches!(
        err,
        Error::Arity {
            bound: Bound::AtLeast(2),
            actual: 0
        }
    ));
}

#[test]
fn single_argument_is_arity_error() {
    let el = MemoryElement::with_attributes(&[("id", "x")]);
    let err = call(&[element(&el)]).unwrap_err();

    assert!(err.is_arity());
    assert!(el.removals().is_empty());
}

#[test]
fn non_element_target_is_type_error() {
    let err = call(&strings(&["div", "id"])).unwrap_err();

    let Error::Type { actual, expected } = &err else {
        panic!("expected a type error, got {err:?}");
    };
    assert_eq!(*actual, Kind::String);
    assert!(expected.contains(&Kind::Element));
}

#[test]
fn non_string_name_is_type_error_without_effect() {
    let el = MemoryElement::with_attributes(&[("id", "x"), ("class", "y")]);
    let args = vec![element(&el), Value::from("id"), Value::Int(42)];

    let err = call(&args).unwrap_err();

    let Error::Type { actual, expected } = &err else {
        panic!("expected a type error, got {err:?}");
    };
    assert_eq!(*actual, Kind::Int);
    assert_eq!(*expected, vec![Kind::String]);
    assert!(el.removals().is_empty());
    assert_eq!(el.attribute_names(), vec!["id", "class"]);
}

#[test]
fn removes_all_named_attributes() {
    let el = MemoryElement::with_attributes(&[("id", "x"), ("class", "y"), ("href", "/")]);
    let mut args = vec![element(&el)];
    args.extend(strings(&["id", "href"]));

    let res = call(&args).unwrap();

    assert_eq!(res, Value::None);
    assert_eq!(el.removals(), vec![vec!["id".to_string(), "href".to_string()]]);
    assert_eq!(el.attribute_names(), vec!["class"]);
}

#[test]
fn document_resolves_to_root_element() {
    let root = MemoryElement::with_attributes(&[("lang", "en")]);
    let doc = Value::Document(Arc::new(MemoryDocument { root: root.clone() }));

    call(&[doc, Value::from("lang")]).unwrap();

    assert!(root.attribute_names().is_empty());
}

#[test]
fn uses_callers_context() {
    let el = MemoryElement::with_attributes(&[("id", "x")]);
    let ctx = Context::background();
    ctx.cancel();

    let err = AttributeRemove
        .call(&ctx, &[element(&el), Value::from("id")])
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert_eq!(el.attribute_names(), vec!["id"]);
}

#[test]
fn element_failure_is_propagated_verbatim() {
    let args = vec![Value::Element(Arc::new(DetachedElement)), Value::from("id")];

    let err = call(&args).unwrap_err();

    assert!(matches!(err, Error::Effect(_)));
    insta::assert_snapshot!(err, @"element is detached from the document");
}

#[test]
fn declares_variadic_arity() {
    let arity = AttributeRemove.arity().unwrap();
    assert_eq!(arity.min(), 2);
    assert_eq!(arity.max(), None);
}
