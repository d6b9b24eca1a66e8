use sift_core::validate::{MAX_ARGS, expect_strings, validate_args};
use sift_core::{Arity, Context, Function, Result, Value};

use super::resolve_element;

/// `ATTR_REMOVE(el, ...names)` removes one or more attributes of an element.
///
/// All names are validated before the element is touched, so a bad argument
/// never leaves a partial removal behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeRemove;

impl Function for AttributeRemove {
    fn call(&self, ctx: &Context, args: &[Value]) -> Result<Value> {
        validate_args(args, 2, MAX_ARGS)?;

        let el = resolve_element(&args[0])?;
        let names = expect_strings(&args[1..])?;

        tracing::trace!(count = names.len(), "removing attributes");
        el.remove_attribute(ctx, &names)?;

        Ok(Value::None)
    }

    fn arity(&self) -> Option<Arity> {
        Some(Arity::at_least(2))
    }
}
