//! Errors produced by function calls.

use std::fmt;
use std::sync::Arc;

use crate::value::Kind;

/// The argument-count bound a call violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    AtLeast(usize),
    AtMost(usize),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::AtLeast(n) => write!(f, "at least {n}"),
            Bound::AtMost(n) => write!(f, "at most {n}"),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Argument count outside the function's accepted range.
    #[error("wrong number of arguments: expected {bound}, got {actual}")]
    Arity { bound: Bound, actual: usize },

    /// Argument of the wrong kind.
    #[error("invalid type: expected {}, but got {actual}", join_kinds(.expected))]
    Type { actual: Kind, expected: Vec<Kind> },

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Failure reported by an external collaborator, returned verbatim.
    #[error(transparent)]
    Effect(Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn effect(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Effect(Arc::new(err))
    }

    pub fn is_arity(&self) -> bool {
        matches!(self, Self::Arity { .. })
    }

    pub fn is_type(&self) -> bool {
        matches!(self, Self::Type { .. })
    }
}

fn join_kinds(kinds: &[Kind]) -> String {
    match kinds {
        [] => "nothing".to_string(),
        [one] => one.to_string(),
        _ => kinds
            .iter()
            .map(Kind::to_string)
            .collect::<Vec<_>>()
            .join(" or "),
    }
}
