//! Functions and helpers shared by the compiler tests.

use std::sync::Arc;

use sift_core::{Arity, Context, Function, FunctionRef, Result, Value};

use crate::{Compiler, CompilerOptions, Error};

/// Returns its first argument, or `NONE`.
pub fn echo() -> FunctionRef {
    Arc::new(|_: &Context, args: &[Value]| -> Result<Value> {
        Ok(args.first().cloned().unwrap_or(Value::None))
    })
}

/// Declares `arity` and returns `NONE`.
pub struct Fixed(pub Arity);

impl Function for Fixed {
    fn call(&self, _ctx: &Context, args: &[Value]) -> Result<Value> {
        self.0.validate(args)?;
        Ok(Value::None)
    }

    fn arity(&self) -> Option<Arity> {
        Some(self.0)
    }
}

pub fn fixed(arity: Arity) -> FunctionRef {
    Arc::new(Fixed(arity))
}

/// Misbehaving extension: panics when the compiler asks for its arity.
pub struct PanickingArity;

impl Function for PanickingArity {
    fn call(&self, _ctx: &Context, _args: &[Value]) -> Result<Value> {
        Ok(Value::None)
    }

    fn arity(&self) -> Option<Arity> {
        panic!("arity lookup exploded")
    }
}

/// Compiler without the standard library.
pub fn bare_compiler() -> Compiler {
    Compiler::with_options(CompilerOptions::default().with_no_stdlib(true))
}

/// Compiles against the standard library, expecting a `Semantic` error.
pub fn semantic_errors(input: &str) -> String {
    match Compiler::new().compile(input) {
        Err(Error::Semantic(diagnostics)) => diagnostics.to_string(),
        other => panic!("expected a semantic error for {input:?}, got {other:?}"),
    }
}
