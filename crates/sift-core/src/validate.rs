//! Stateless call validation shared by every function.
//!
//! Arity checks only look at the argument count. Type narrowing is done per
//! argument by each function, with the `expect_*` helpers producing a
//! [`Error::Type`] on the first mismatch.

use crate::{Bound, Error, Kind, Result, Value};

/// Upper bound meaning "no limit".
pub const MAX_ARGS: usize = usize::MAX;

/// Fails with [`Error::Arity`] naming the violated bound when
/// `args.len()` is outside `min..=max`.
pub fn validate_args(args: &[Value], min: usize, max: usize) -> Result<()> {
    let actual = args.len();
    if actual < min {
        return Err(Error::Arity {
            bound: Bound::AtLeast(min),
            actual,
        });
    }
    if actual > max {
        return Err(Error::Arity {
            bound: Bound::AtMost(max),
            actual,
        });
    }
    Ok(())
}

/// Builds a type error. The caller decides whether to return it.
pub fn type_error(actual: Kind, expected: &[Kind]) -> Error {
    Error::Type {
        actual,
        expected: expected.to_vec(),
    }
}

pub fn expect_string(value: &Value) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| type_error(value.kind(), &[Kind::String]))
}

pub fn expect_int(value: &Value) -> Result<i64> {
    value
        .as_int()
        .ok_or_else(|| type_error(value.kind(), &[Kind::Int]))
}

pub fn expect_bool(value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| type_error(value.kind(), &[Kind::Boolean]))
}

pub fn expect_array(value: &Value) -> Result<&[Value]> {
    value
        .as_array()
        .ok_or_else(|| type_error(value.kind(), &[Kind::Array]))
}

/// Narrows every value to a string, failing on the first non-string.
pub fn expect_strings(values: &[Value]) -> Result<Vec<String>> {
    values
        .iter()
        .map(|v| expect_string(v).map(str::to_owned))
        .collect()
}
