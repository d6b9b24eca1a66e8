//! Collection functions.

use sift_core::validate::type_error;
use sift_core::{Arity, Context, Function, Kind, Result, Value};

const ARITY: Arity = Arity::exact(1);

/// `LENGTH(value)` counts characters, array items or object fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Length;

impl Function for Length {
    fn call(&self, _ctx: &Context, args: &[Value]) -> Result<Value> {
        ARITY.validate(args)?;

        let len = match &args[0] {
            Value::String(s) => s.chars().count(),
            Value::Array(items) => items.len(),
            Value::Object(fields) => fields.len(),
            other => {
                return Err(type_error(
                    other.kind(),
                    &[Kind::String, Kind::Array, Kind::Object],
                ));
            }
        };

        Ok(Value::Int(len as i64))
    }

    fn arity(&self) -> Option<Arity> {
        Some(ARITY)
    }
}
