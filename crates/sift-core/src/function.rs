//! The function contract.

use std::fmt;
use std::sync::Arc;

use crate::validate::{MAX_ARGS, validate_args};
use crate::{Context, Result, Value};

/// A unit of behavior invoked as `(ctx, args) -> Result<Value>`.
///
/// Identity is the name it is registered under; the function itself carries
/// no name. Implementations validate their own arguments (see
/// [`crate::validate`]) and must never panic on user input.
pub trait Function: Send + Sync {
    fn call(&self, ctx: &Context, args: &[Value]) -> Result<Value>;

    /// Accepted argument range, if declared.
    ///
    /// The compiler rejects calls outside this range before the program runs.
    /// `None` disables the compile-time check; the call-time check inside
    /// [`call`](Self::call) still applies.
    fn arity(&self) -> Option<Arity> {
        None
    }
}

impl<F> Function for F
where
    F: Fn(&Context, &[Value]) -> Result<Value> + Send + Sync,
{
    fn call(&self, ctx: &Context, args: &[Value]) -> Result<Value> {
        self(ctx, args)
    }
}

pub type FunctionRef = Arc<dyn Function>;

/// Inclusive argument-count range. `max == MAX_ARGS` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    min: usize,
    max: usize,
}

impl Arity {
    pub const fn exact(n: usize) -> Self {
        Self { min: n, max: n }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: MAX_ARGS }
    }

    pub const fn range(min: usize, max: usize) -> Self {
        assert!(min <= max, "arity range is inverted");
        Self { min, max }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        (self.max != MAX_ARGS).then_some(self.max)
    }

    pub fn accepts(&self, count: usize) -> bool {
        self.min <= count && count <= self.max
    }

    pub fn validate(&self, args: &[Value]) -> Result<()> {
        validate_args(args, self.min, self.max)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max() {
            Some(max) if max == self.min => write!(f, "{max}"),
            Some(max) => write!(f, "{}..{max}", self.min),
            None => write!(f, "{}..", self.min),
        }
    }
}
