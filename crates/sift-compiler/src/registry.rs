//! Function registry: qualified name → function.
//!
//! Keys are stored upper-cased, so lookups are case-insensitive. Namespaces
//! are `::`-separated segments of the name itself; the registry keeps no
//! separate namespace index.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex_automata::Input;
use regex_automata::dfa::dense::DFA;
use regex_automata::dfa::{Automaton, StartKind};

use sift_core::FunctionRef;

use crate::{Error, Result};

/// `segment(::segment)*`, each segment starting with a letter.
const NAME_PATTERN: &str = r"^[a-zA-Z]+[a-zA-Z0-9_]*(::[a-zA-Z]+[a-zA-Z0-9_]*)*$";

static NAME_GRAMMAR: LazyLock<DFA<Vec<u32>>> = LazyLock::new(|| {
    DFA::builder()
        .configure(DFA::config().start_kind(StartKind::Anchored).minimize(true))
        .build(NAME_PATTERN)
        .expect("function name grammar is a valid DFA pattern")
});

/// Whether `name` is a well-formed qualified function name.
pub fn is_valid_name(name: &str) -> bool {
    let input = Input::new(name).anchored(regex_automata::Anchored::Yes);
    matches!(NAME_GRAMMAR.try_search_fwd(&input), Ok(Some(_)))
}

/// Registry key for `name`.
fn normalize(name: &str) -> String {
    name.to_uppercase()
}

#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: IndexMap<String, FunctionRef>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the standard library.
    pub fn with_stdlib() -> Self {
        let mut registry = Self::new();
        for (name, function) in sift_stdlib::functions() {
            registry.functions.insert(normalize(name), function);
        }
        registry
    }

    /// Binds `function` to `UPPER(name)`.
    ///
    /// The duplicate check runs before the grammar check, so re-registering a
    /// taken name always reports `DuplicateFunction`. On error the registry is unchanged.
    ///
    /// A single-segment name that spells a keyword (`IN`, `FILTER`) registers
    /// fine but cannot be called, since a query lexes it as the keyword.
    /// Keywords are ordinary segments inside a qualified name (`HTML::IN`).
    pub fn register(&mut self, name: &str, function: FunctionRef) -> Result<()> {
        let key = normalize(name);

        if self.functions.contains_key(&key) {
            return Err(Error::DuplicateFunction(name.to_string()));
        }
        if !is_valid_name(name) {
            return Err(Error::InvalidFunctionName(name.to_string()));
        }

        tracing::debug!(name = %key, "registered function");
        self.functions.insert(key, function);
        Ok(())
    }

    /// Registers each pair in order, stopping at the first failure.
    ///
    /// Pairs registered before the failing one stay registered.
    pub fn register_many<I, S>(&mut self, functions: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, FunctionRef)>,
        S: AsRef<str>,
    {
        for (name, function) in functions {
            self.register(name.as_ref(), function)?;
        }
        Ok(())
    }

    /// Unbinds `UPPER(name)`. Removing an absent name is a no-op.
    pub fn remove(&mut self, name: &str) {
        let key = normalize(name);
        if self.functions.shift_remove(&key).is_some() {
            tracing::debug!(name = %key, "removed function");
        }
    }

    pub fn get(&self, name: &str) -> Option<&FunctionRef> {
        self.functions.get(&normalize(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&normalize(name))
    }

    /// All registered keys, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.functions.keys().cloned().collect()
    }

    /// Registered keys starting with `prefix`.
    ///
    /// The prefix is compared verbatim against the upper-cased keys; a
    /// lower-case prefix matches nothing.
    pub fn names_in_namespace(&self, prefix: &str) -> Vec<String> {
        self.functions
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}
