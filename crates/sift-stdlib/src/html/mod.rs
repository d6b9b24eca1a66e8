//! Element attribute functions.
//!
//! Every function here accepts either an element or a document as its target;
//! a document stands for its root element.

mod attr_get;
mod attr_remove;
mod attr_set;

#[cfg(test)]
mod attr_remove_tests;

pub use attr_get::AttributeGet;
pub use attr_remove::AttributeRemove;
pub use attr_set::AttributeSet;

use sift_core::validate::type_error;
use sift_core::{ElementRef, Kind, Result, Value};

/// Resolves a value to the element it designates.
pub fn resolve_element(value: &Value) -> Result<ElementRef> {
    match value {
        Value::Element(el) => Ok(el.clone()),
        Value::Document(doc) => Ok(doc.element()),
        other => Err(type_error(other.kind(), &[Kind::Element, Kind::Document])),
    }
}
