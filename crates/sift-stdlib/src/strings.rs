//! String functions.

use sift_core::validate::{MAX_ARGS, expect_string, validate_args};
use sift_core::{Arity, Context, Function, Result, Value};

const UNARY: Arity = Arity::exact(1);

fn unary_string(args: &[Value], f: impl FnOnce(&str) -> String) -> Result<Value> {
    UNARY.validate(args)?;
    let s = expect_string(&args[0])?;
    Ok(Value::String(f(s)))
}

/// `UPPER(s)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Upper;

impl Function for Upper {
    fn call(&self, _ctx: &Context, args: &[Value]) -> Result<Value> {
        unary_string(args, str::to_uppercase)
    }

    fn arity(&self) -> Option<Arity> {
        Some(UNARY)
    }
}

/// `LOWER(s)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Lower;

impl Function for Lower {
    fn call(&self, _ctx: &Context, args: &[Value]) -> Result<Value> {
        unary_string(args, str::to_lowercase)
    }

    fn arity(&self) -> Option<Arity> {
        Some(UNARY)
    }
}

/// `TRIM(s)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Trim;

impl Function for Trim {
    fn call(&self, _ctx: &Context, args: &[Value]) -> Result<Value> {
        unary_string(args, |s| s.trim().to_string())
    }

    fn arity(&self) -> Option<Arity> {
        Some(UNARY)
    }
}

/// `CONCAT(...values)` joins strings; other kinds use their literal form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Concat;

impl Function for Concat {
    fn call(&self, _ctx: &Context, args: &[Value]) -> Result<Value> {
        validate_args(args, 1, MAX_ARGS)?;

        let mut out = String::new();
        for arg in args {
            match arg {
                Value::String(s) => out.push_str(s),
                Value::None => {}
                other => out.push_str(&other.to_string()),
            }
        }

        Ok(Value::String(out))
    }

    fn arity(&self) -> Option<Arity> {
        Some(Arity::at_least(1))
    }
}
