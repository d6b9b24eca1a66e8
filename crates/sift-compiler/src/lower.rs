//! Lowering: typed AST → [`Program`].
//!
//! The walker resolves every call against the registry it is bound to and
//! tracks `LET`/`FOR` bindings in nested scopes. It never stops at the first
//! problem; all semantic diagnostics are collected, and the result carries
//! either a program or the diagnostics, never both.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rowan::TextRange;
use sift_core::{Arity, Value};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::{SyntaxKind, SyntaxToken};
use crate::parser::ast::{self, Clause as AstClause};
use crate::program::{BinaryOp, Binding, Call, Clause, Expr, ForLoop, Program, UnaryOp};
use crate::registry::FunctionRegistry;

pub(crate) fn lower(
    root: &ast::Root,
    source: &str,
    registry: &FunctionRegistry,
) -> Result<Program, Diagnostics> {
    let mut walker = Lowering::new(registry);

    walker.push_scope();
    let lets: Vec<Binding> = root.lets().map(|stmt| walker.lower_let(&stmt)).collect();
    let body = match root.body() {
        Some(expr) => walker.lower_expr(&expr),
        None => Expr::Literal(Value::None),
    };
    walker.pop_scope();

    if walker.diagnostics.has_errors() {
        return Err(walker.diagnostics);
    }

    Ok(Program {
        source: source.to_string(),
        params: walker.params.into_iter().collect(),
        lets,
        body,
        warnings: walker.diagnostics,
    })
}

#[derive(Debug)]
struct Local {
    range: TextRange,
    used: bool,
    /// Loop variables are exempt from the unused-variable warning.
    warn_unused: bool,
}

struct Lowering<'r> {
    registry: &'r FunctionRegistry,
    diagnostics: Diagnostics,
    scopes: Vec<IndexMap<String, Local>>,
    params: IndexSet<String>,
}

impl<'r> Lowering<'r> {
    fn new(registry: &'r FunctionRegistry) -> Self {
        Self {
            registry,
            diagnostics: Diagnostics::new(),
            scopes: Vec::new(),
            params: IndexSet::new(),
        }
    }

    fn push_scope(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    fn pop_scope(&mut self) {
        let Some(scope) = self.scopes.pop() else {
            return;
        };
        for (name, local) in scope {
            if local.warn_unused && !local.used {
                self.diagnostics
                    .report(DiagnosticKind::UnusedVariable, local.range)
                    .message(&name)
                    .emit();
            }
        }
    }

    fn bind(&mut self, name: &str, range: TextRange, warn_unused: bool) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };

        if let Some(previous) = scope.get(name) {
            let previous_range = previous.range;
            self.diagnostics
                .report(DiagnosticKind::DuplicateVariable, range)
                .message(name)
                .related_to("first defined here", previous_range)
                .emit();
            return;
        }

        scope.insert(
            name.to_string(),
            Local {
                range,
                used: false,
                warn_unused,
            },
        );
    }

    /// Marks the innermost binding of `name` as used.
    fn resolve_var(&mut self, name: &str) -> bool {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(local) = scope.get_mut(name) {
                local.used = true;
                return true;
            }
        }
        false
    }

    fn lower_let(&mut self, stmt: &ast::LetStmt) -> Binding {
        // The value sees the scope as it was before the binding.
        let value = self.lower_opt(stmt.value());

        let (name, span) = match stmt.name() {
            Some(token) => (token.text().to_string(), token.text_range()),
            None => (String::new(), stmt.text_range()),
        };
        if !name.is_empty() {
            self.bind(&name, span, true);
        }

        Binding { name, value, span }
    }

    fn lower_opt(&mut self, expr: Option<ast::Expr>) -> Expr {
        match expr {
            Some(expr) => self.lower_expr(&expr),
            None => Expr::Literal(Value::None),
        }
    }

    fn lower_expr(&mut self, expr: &ast::Expr) -> Expr {
        match expr {
            ast::Expr::Literal(lit) => self.lower_literal(lit),
            ast::Expr::Param(param) => {
                let name = param.name().map(|t| t.text().to_string()).unwrap_or_default();
                self.params.insert(name.clone());
                Expr::Param(name)
            }
            ast::Expr::NameRef(name_ref) => {
                let Some(token) = name_ref.name() else {
                    return Expr::Literal(Value::None);
                };
                let name = token.text();
                if !self.resolve_var(name) {
                    self.diagnostics
                        .report(DiagnosticKind::UndefinedVariable, token.text_range())
                        .message(name)
                        .emit();
                }
                Expr::Var(name.to_string())
            }
            ast::Expr::Call(call) => self.lower_call(call),
            ast::Expr::Array(array) => {
                Expr::Array(array.items().map(|item| self.lower_expr(&item)).collect())
            }
            ast::Expr::Object(object) => {
                let props = object
                    .properties()
                    .map(|prop| {
                        let key = prop.key().map(|t| self.property_key(&t)).unwrap_or_default();
                        let value = self.lower_opt(prop.value());
                        (key, value)
                    })
                    .collect();
                Expr::Object(props)
            }
            ast::Expr::Paren(paren) => self.lower_opt(paren.inner()),
            ast::Expr::Member(member) => Expr::Member {
                object: Box::new(self.lower_opt(member.object())),
                property: member
                    .property()
                    .map(|t| t.text().to_string())
                    .unwrap_or_default(),
            },
            ast::Expr::Index(index) => Expr::Index {
                object: Box::new(self.lower_opt(index.object())),
                index: Box::new(self.lower_opt(index.index())),
            },
            ast::Expr::Unary(unary) => {
                let op = match unary.op().map(|t| t.kind()) {
                    Some(SyntaxKind::Minus) => UnaryOp::Neg,
                    _ => UnaryOp::Not,
                };
                Expr::Unary {
                    op,
                    operand: Box::new(self.lower_opt(unary.operand())),
                }
            }
            ast::Expr::Binary(binary) => {
                let lhs = self.lower_opt(binary.lhs());
                let rhs = self.lower_opt(binary.rhs());
                let op = binary
                    .op()
                    .and_then(|t| binary_op(t.kind()))
                    .unwrap_or(BinaryOp::Eq);
                Expr::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                }
            }
            ast::Expr::For(for_expr) => self.lower_for(for_expr),
        }
    }

    fn lower_for(&mut self, for_expr: &ast::ForExpr) -> Expr {
        // The collection is evaluated outside the loop scope.
        let source = self.lower_opt(for_expr.source());

        self.push_scope();
        let var = match for_expr.var() {
            Some(token) => {
                self.bind(token.text(), token.text_range(), false);
                token.text().to_string()
            }
            None => String::new(),
        };

        let clauses = for_expr
            .clauses()
            .map(|clause| match clause {
                AstClause::Filter(filter) => Clause::Filter(self.lower_opt(filter.condition())),
                AstClause::Let(stmt) => Clause::Let(self.lower_let(&stmt)),
            })
            .collect();

        let body = self.lower_opt(for_expr.body());
        self.pop_scope();

        Expr::For(Box::new(ForLoop {
            var,
            source,
            clauses,
            body,
        }))
    }

    fn lower_call(&mut self, call: &ast::CallExpr) -> Expr {
        let args: Vec<Expr> = call.args().map(|arg| self.lower_expr(&arg)).collect();

        let Some(name_node) = call.name() else {
            return Expr::Literal(Value::None);
        };
        let qualified = name_node.qualified();
        let key = qualified.to_uppercase();

        let registry = self.registry;
        let Some(function) = registry.get(&key) else {
            self.diagnostics
                .report(DiagnosticKind::UnresolvedFunction, name_node.text_range())
                .message(&qualified)
                .emit();
            return Expr::Literal(Value::None);
        };

        if let Some(arity) = function.arity()
            && !arity.accepts(args.len())
        {
            self.diagnostics
                .report(DiagnosticKind::ArityMismatch, call.text_range())
                .message(format!(
                    "`{key}` takes {}, got {}",
                    describe_arity(arity),
                    args.len()
                ))
                .emit();
        }

        tracing::trace!(name = %key, args = args.len(), "resolved call");

        Expr::Call(Call {
            name: key,
            function: Arc::clone(function),
            args,
            span: call.text_range(),
        })
    }

    fn lower_literal(&mut self, lit: &ast::Literal) -> Expr {
        let Some(token) = lit.token() else {
            return Expr::Literal(Value::None);
        };
        let text = token.text();

        let value = match token.kind() {
            SyntaxKind::KwTrue => Value::Boolean(true),
            SyntaxKind::KwFalse => Value::Boolean(false),
            SyntaxKind::KwNone => Value::None,
            SyntaxKind::Int => match text.parse::<i64>() {
                Ok(n) => Value::Int(n),
                Err(_) => {
                    self.diagnostics
                        .report(DiagnosticKind::InvalidNumber, token.text_range())
                        .message(format!("`{text}` does not fit in a 64-bit integer"))
                        .emit();
                    Value::None
                }
            },
            SyntaxKind::Float => match text.parse::<f64>() {
                Ok(n) => Value::Float(n),
                Err(_) => {
                    self.diagnostics
                        .report(DiagnosticKind::InvalidNumber, token.text_range())
                        .message(format!("`{text}`"))
                        .emit();
                    Value::None
                }
            },
            _ => Value::String(self.string_literal(text, token.text_range())),
        };

        Expr::Literal(value)
    }

    fn property_key(&mut self, token: &SyntaxToken) -> String {
        match token.kind() {
            SyntaxKind::StringLit => self.string_literal(token.text(), token.text_range()),
            _ => token.text().to_string(),
        }
    }

    /// Strips the quotes and resolves escapes, reporting unknown ones.
    fn string_literal(&mut self, raw: &str, range: TextRange) -> String {
        let inner = &raw[1..raw.len() - 1];
        match unescape(inner) {
            Ok(s) => s,
            Err(c) => {
                self.diagnostics
                    .report(DiagnosticKind::InvalidEscape, range)
                    .message(format!("`\\{c}`"))
                    .emit();
                inner.to_string()
            }
        }
    }
}

/// Resolves `\n \t \r \\ \" \'`. Returns the offending character otherwise.
pub(crate) fn unescape(s: &str) -> Result<String, char> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some(other) => return Err(other),
            None => return Err('\\'),
        }
    }
    Ok(out)
}

fn binary_op(kind: SyntaxKind) -> Option<BinaryOp> {
    let op = match kind {
        SyntaxKind::KwOr => BinaryOp::Or,
        SyntaxKind::KwAnd => BinaryOp::And,
        SyntaxKind::EqEq => BinaryOp::Eq,
        SyntaxKind::NotEq => BinaryOp::NotEq,
        SyntaxKind::Lt => BinaryOp::Lt,
        SyntaxKind::LtEq => BinaryOp::LtEq,
        SyntaxKind::Gt => BinaryOp::Gt,
        SyntaxKind::GtEq => BinaryOp::GtEq,
        SyntaxKind::Plus => BinaryOp::Add,
        SyntaxKind::Minus => BinaryOp::Sub,
        SyntaxKind::Star => BinaryOp::Mul,
        SyntaxKind::Slash => BinaryOp::Div,
        SyntaxKind::Percent => BinaryOp::Mod,
        _ => return None,
    };
    Some(op)
}

fn describe_arity(arity: Arity) -> String {
    match arity.max() {
        Some(max) if max == arity.min() => format!("{max} argument(s)"),
        Some(max) => format!("{} to {max} arguments", arity.min()),
        None => format!("at least {} argument(s)", arity.min()),
    }
}
