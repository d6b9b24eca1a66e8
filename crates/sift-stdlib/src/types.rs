//! Type inspection functions.

use sift_core::{Arity, Context, Function, Result, Value};

const ARITY: Arity = Arity::exact(1);

/// `TYPENAME(value)`
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeName;

impl Function for TypeName {
    fn call(&self, _ctx: &Context, args: &[Value]) -> Result<Value> {
        ARITY.validate(args)?;
        Ok(Value::from(args[0].kind().name()))
    }

    fn arity(&self) -> Option<Arity> {
        Some(ARITY)
    }
}

/// `IS_NONE(value)`
#[derive(Debug, Clone, Copy, Default)]
pub struct IsNone;

impl Function for IsNone {
    fn call(&self, _ctx: &Context, args: &[Value]) -> Result<Value> {
        ARITY.validate(args)?;
        Ok(Value::Boolean(args[0].is_none()))
    }

    fn arity(&self) -> Option<Arity> {
        Some(ARITY)
    }
}
