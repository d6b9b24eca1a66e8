#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Runtime calling convention for Sift functions.
//!
//! Every built-in and user-supplied function speaks the same contract:
//! - [`Value`]: closed tagged set of runtime kinds
//! - [`Context`]: cancellable, deadline-bearing execution handle
//! - [`Function`]: `(ctx, args) -> Result<Value>`
//! - [`validate`]: stateless arity and type checks shared by all functions

mod context;
mod element;
mod error;
mod function;
mod value;

pub mod validate;


pub use context::Context;
pub use element::{DocumentRef, ElementRef, HtmlDocument, HtmlElement};
pub use error::{Bound, Error};
pub use function::{Arity, Function, FunctionRef};
pub use validate::{MAX_ARGS, type_error, validate_args};
pub use value::{Kind, Value};

/// Result type for function calls and element effects.
pub type Result<T> = std::result::Result<T, Error>;
