use sift_core::validate::expect_string;
use sift_core::{Arity, Context, Function, Result, Value};

use super::resolve_element;

const ARITY: Arity = Arity::exact(3);

/// `ATTR_SET(el, name, value)` sets a single attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeSet;

impl Function for AttributeSet {
    fn call(&self, ctx: &Context, args: &[Value]) -> Result<Value> {
        ARITY.validate(args)?;

        let el = resolve_element(&args[0])?;
        let name = expect_string(&args[1])?;
        let value = expect_string(&args[2])?;

        el.set_attribute(ctx, name, value)?;

        Ok(Value::None)
    }

    fn arity(&self) -> Option<Arity> {
        Some(ARITY)
    }
}
