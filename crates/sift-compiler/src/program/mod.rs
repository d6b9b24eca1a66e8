//! The compiled program: an immutable, lowered expression tree.
//!
//! Every call site holds the function it resolved to at compile time, so a
//! program keeps working no matter what happens to the registry afterwards.

mod dump;


use std::fmt;

use rowan::TextRange;
use sift_core::{FunctionRef, Value};

use crate::diagnostics::Diagnostics;

#[derive(Debug, Clone)]
pub struct Program {
    pub(crate) source: String,
    pub(crate) params: Vec<String>,
    pub(crate) lets: Vec<Binding>,
    pub(crate) body: Expr,
    pub(crate) warnings: Diagnostics,
}

impl Program {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Query parameters (`@name`), deduplicated, in order of first use.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Top-level `LET` bindings.
    pub fn lets(&self) -> &[Binding] {
        &self.lets
    }

    /// The `FOR` loop or `RETURN` value producing the query result.
    pub fn body(&self) -> &Expr {
        &self.body
    }

    /// Non-fatal diagnostics (e.g. unused variables) found while compiling.
    pub fn warnings(&self) -> &Diagnostics {
        &self.warnings
    }

    /// Resolved call sites in source order.
    pub fn calls(&self) -> impl Iterator<Item = &Call> {
        let mut calls = Vec::new();
        for binding in &self.lets {
            binding.value.collect_calls(&mut calls);
        }
        self.body.collect_calls(&mut calls);
        calls.into_iter()
    }
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub name: String,
    pub value: Expr,
    pub span: TextRange,
}

#[derive(Debug, Clone)]
pub enum Expr {
    /// `NONE`, booleans, numbers and strings.
    Literal(Value),
    Param(String),
    Var(String),
    Call(Call),
    Array(Vec<Expr>),
    Object(Vec<(String, Expr)>),
    Member {
        object: Box<Expr>,
        property: String,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    For(Box<ForLoop>),
}

impl Expr {
    fn collect_calls<'a>(&'a self, out: &mut Vec<&'a Call>) {
        match self {
            Expr::Literal(_) | Expr::Param(_) | Expr::Var(_) => {}
            Expr::Call(call) => {
                out.push(call);
                for arg in &call.args {
                    arg.collect_calls(out);
                }
            }
            Expr::Array(items) => {
                for item in items {
                    item.collect_calls(out);
                }
            }
            Expr::Object(props) => {
                for (_, value) in props {
                    value.collect_calls(out);
                }
            }
            Expr::Member { object, .. } => object.collect_calls(out),
            Expr::Index { object, index } => {
                object.collect_calls(out);
                index.collect_calls(out);
            }
            Expr::Unary { operand, .. } => operand.collect_calls(out),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_calls(out);
                rhs.collect_calls(out);
            }
            Expr::For(for_loop) => {
                for_loop.source.collect_calls(out);
                for clause in &for_loop.clauses {
                    match clause {
                        Clause::Filter(cond) => cond.collect_calls(out),
                        Clause::Let(binding) => binding.value.collect_calls(out),
                    }
                }
                for_loop.body.collect_calls(out);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForLoop {
    pub var: String,
    pub source: Expr,
    pub clauses: Vec<Clause>,
    pub body: Expr,
}

#[derive(Debug, Clone)]
pub enum Clause {
    Filter(Expr),
    Let(Binding),
}

/// A call site bound to its function.
#[derive(Clone)]
pub struct Call {
    /// Upper-cased qualified name the call resolved under.
    pub name: String,
    pub function: FunctionRef,
    pub args: Vec<Expr>,
    pub span: TextRange,
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("name", &self.name)
            .field("args", &self.args)
            .field("span", &self.span)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "NOT",
            UnaryOp::Neg => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Or => "OR",
            BinaryOp::And => "AND",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}
