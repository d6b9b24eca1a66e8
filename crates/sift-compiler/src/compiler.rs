//! The compiler: owns the function registry and turns query text into a [`Program`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Deserialize;
use sift_core::FunctionRef;

use crate::diagnostics::Diagnostics;
use crate::lower::lower;
use crate::parser;
use crate::program::Program;
use crate::registry::FunctionRegistry;
use crate::{Error, Result};

const DEFAULT_PARSE_FUEL: u32 = 1_000_000;
const DEFAULT_MAX_DEPTH: u32 = 512;

/// Compiler configuration. Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Start with an empty registry instead of the standard library.
    pub no_stdlib: bool,
    /// Maximum number of tokens the parser may consume.
    pub parse_fuel: u32,
    /// Maximum expression nesting depth.
    pub max_depth: u32,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            no_stdlib: false,
            parse_fuel: DEFAULT_PARSE_FUEL,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompilerOptions {
    pub fn with_no_stdlib(mut self, value: bool) -> Self {
        self.no_stdlib = value;
        self
    }

    pub fn with_parse_fuel(mut self, fuel: u32) -> Self {
        self.parse_fuel = fuel;
        self
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Query compiler.
///
/// Registry mutation takes `&mut self` and compilation takes `&self`, so a
/// compile always sees a registry that cannot change under it. Calls are
/// resolved during the compile; a program never observes later registrations
/// or removals.
#[derive(Debug, Clone)]
pub struct Compiler {
    registry: FunctionRegistry,
    options: CompilerOptions,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Compiler with the standard library registered.
    pub fn new() -> Self {
        Self::with_options(CompilerOptions::default())
    }

    pub fn with_options(options: CompilerOptions) -> Self {
        let registry = if options.no_stdlib {
            FunctionRegistry::new()
        } else {
            FunctionRegistry::with_stdlib()
        };
        Self { registry, options }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// See [`FunctionRegistry::register`].
    pub fn register_function(&mut self, name: &str, function: FunctionRef) -> Result<()> {
        self.registry.register(name, function)
    }

    /// See [`FunctionRegistry::remove`].
    pub fn remove_function(&mut self, name: &str) {
        self.registry.remove(name)
    }

    /// See [`FunctionRegistry::register_many`]. Not transactional.
    pub fn register_functions<I, S>(&mut self, functions: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, FunctionRef)>,
        S: AsRef<str>,
    {
        self.registry.register_many(functions)
    }

    pub fn registered_functions(&self) -> Vec<String> {
        self.registry.names()
    }

    /// See [`FunctionRegistry::names_in_namespace`].
    pub fn registered_functions_ns(&self, prefix: &str) -> Vec<String> {
        self.registry.names_in_namespace(prefix)
    }

    /// Compiles `source` into a program.
    ///
    /// Any panic raised while parsing or lowering (including from registered
    /// functions queried during lowering) is returned as [`Error::Internal`].
    pub fn compile(&self, source: &str) -> Result<Program> {
        if source.is_empty() {
            return Err(Error::EmptyQuery);
        }

        tracing::debug!(len = source.len(), "compiling query");

        match panic::catch_unwind(AssertUnwindSafe(|| self.compile_unguarded(source))) {
            Ok(Ok(program)) => {
                tracing::debug!(calls = program.calls().count(), "compiled query");
                Ok(program)
            }
            Ok(Err(err)) => {
                tracing::debug!(error = %err, "query failed to compile");
                Err(err)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(%message, "intercepted internal fault during compilation");
                Err(Error::Internal(message))
            }
        }
    }

    /// Like [`compile`](Self::compile), but panics on failure.
    ///
    /// For queries known to be valid, such as literals in host code.
    pub fn must_compile(&self, source: &str) -> Program {
        match self.compile(source) {
            Ok(program) => program,
            Err(err) => panic!("failed to compile query: {err}"),
        }
    }

    fn compile_unguarded(&self, source: &str) -> Result<Program> {
        let mut diagnostics = Diagnostics::new();
        let parsed = parser::parse(
            source,
            &mut diagnostics,
            Some(self.options.parse_fuel),
            Some(self.options.max_depth),
        )?;

        if diagnostics.has_errors() {
            return Err(Error::Syntax(diagnostics));
        }

        lower(&parsed.root, source, &self.registry).map_err(Error::Semantic)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
