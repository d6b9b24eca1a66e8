//! Parser infrastructure for the query language.
//!
//! # Architecture
//!
//! This parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder.
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace/comments collected, then attached as leading trivia
//! - Checkpoint-based wrapping: retroactively wrap operands into binary, member and index nodes
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree. Recovery follows these rules:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. Closing delimiters, commas and clause keywords are never swallowed by a missing operand
//! 4. On recursion limit, remaining input goes into single Error node
//!
//! However, fuel exhaustion (exec_fuel, recursion_fuel) returns an actual error immediately.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;

#[cfg(test)]
mod tests;

use std::fmt::Write;

use rowan::NodeOrToken;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use core::{ParseResult, Parser};

use crate::Result;
use crate::diagnostics::Diagnostics;
use lexer::lex;

/// Parses `source`, reporting syntax diagnostics into `diagnostics`.
///
/// Returns `Err` only on fuel exhaustion; a tree is produced for any other input.
pub fn parse(
    source: &str,
    diagnostics: &mut Diagnostics,
    exec_fuel: Option<u32>,
    recursion_fuel: Option<u32>,
) -> Result<ParseResult> {
    Parser::new(source, lex(source), diagnostics)
        .with_exec_fuel(exec_fuel)
        .with_recursion_fuel(recursion_fuel)
        .parse()
}

/// Indented rendering of a CST, one node or token per line. Trivia is omitted.
pub fn dump_cst(node: &SyntaxNode) -> String {
    let mut out = String::new();
    format_cst(node, 0, &mut out).expect("String write never fails");
    out
}

fn format_cst(node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
    let prefix = "  ".repeat(indent);
    writeln!(w, "{}{:?}", prefix, node.kind())?;

    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(n) => format_cst(&n, indent + 1, w)?,
            NodeOrToken::Token(t) => {
                if !t.kind().is_trivia() {
                    let child_prefix = "  ".repeat(indent + 1);
                    writeln!(w, "{}{:?} {:?}", child_prefix, t.kind(), t.text())?;
                }
            }
        }
    }
    Ok(())
}
