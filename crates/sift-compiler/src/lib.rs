//! Sift: compiler front-end for a declarative query language over structured data.
//!
//! # Example
//!
//! ```
//! use sift_compiler::Compiler;
//!
//! let compiler = Compiler::new();
//! let program = compiler
//!     .compile("FOR el IN @elements RETURN ATTR_REMOVE(el, 'style', 'class')")
//!     .expect("valid query");
//!
//! assert_eq!(program.calls().count(), 1);
//! assert_eq!(program.params(), ["elements"]);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod parser;
pub mod program;

mod compiler;
mod lower;
mod registry;

#[cfg(test)]
mod registry_tests;
#[cfg(test)]
mod test_utils;

pub use compiler::{Compiler, CompilerOptions};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use program::Program;
pub use registry::FunctionRegistry;

/// Errors that can occur while registering functions or compiling a query.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("query is empty")]
    EmptyQuery,

    #[error("query has {} syntax error(s)", .0.error_count())]
    Syntax(Diagnostics),

    #[error("query has {} semantic error(s)", .0.error_count())]
    Semantic(Diagnostics),

    #[error("function already exists: {0}")]
    DuplicateFunction(String),

    #[error("invalid function name: {0}")]
    InvalidFunctionName(String),

    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    /// A fault intercepted at the compile boundary.
    #[error("internal compiler error: {0}")]
    Internal(String),
}

impl Error {
    /// Diagnostics carried by `Syntax` and `Semantic` errors.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::Syntax(d) | Error::Semantic(d) => Some(d),
            _ => None,
        }
    }
}

/// Result type for registry and compile operations.
pub type Result<T> = std::result::Result<T, Error>;
