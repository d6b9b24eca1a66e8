#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! The fixed standard-library snapshot seeded into every compiler that does
//! not opt out of it.
//!
//! Each function follows the shared calling convention: validate arity,
//! narrow arguments fail-fast, then perform the effect.

pub mod collections;
pub mod html;
pub mod strings;
pub mod types;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod lib_tests;

use std::sync::Arc;

use sift_core::FunctionRef;

/// All standard-library functions as `(name, function)` pairs, in a stable
/// order. Names are already upper-case.
pub fn functions() -> Vec<(&'static str, FunctionRef)> {
    vec![
        ("ATTR_GET", Arc::new(html::AttributeGet) as FunctionRef),
        ("ATTR_REMOVE", Arc::new(html::AttributeRemove)),
        ("ATTR_SET", Arc::new(html::AttributeSet)),
        ("CONCAT", Arc::new(strings::Concat)),
        ("LENGTH", Arc::new(collections::Length)),
        ("LOWER", Arc::new(strings::Lower)),
        ("TRIM", Arc::new(strings::Trim)),
        ("UPPER", Arc::new(strings::Upper)),
        ("IS_NONE", Arc::new(types::IsNone)),
        ("TYPENAME", Arc::new(types::TypeName)),
    ]
}
