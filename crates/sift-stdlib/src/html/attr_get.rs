use sift_core::validate::expect_string;
use sift_core::{Arity, Context, Function, Result, Value};

use super::resolve_element;

const ARITY: Arity = Arity::exact(2);

/// `ATTR_GET(el, name)` returns the attribute value, or `NONE` when absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeGet;

impl Function for AttributeGet {
    fn call(&self, ctx: &Context, args: &[Value]) -> Result<Value> {
        ARITY.validate(args)?;

        let el = resolve_element(&args[0])?;
        let name = expect_string(&args[1])?;

        Ok(el
            .get_attribute(ctx, name)?
            .map_or(Value::None, Value::String))
    }

    fn arity(&self) -> Option<Arity> {
        Some(ARITY)
    }
}
