//! Grammar productions for the query language.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Binary operators are parsed by precedence climbing; every operator node is
//! wrapped retroactively through a checkpoint taken before its left operand.

use super::core::Parser;

use super::cst::token_sets::{
    COMPARISON_OPS, EXPR_FIRST, EXPR_RECOVERY, LITERALS, PROPERTY_FIRST, UNARY_OPS,
};
use super::cst::{SyntaxKind, TokenSet};
use crate::diagnostics::DiagnosticKind;

/// Left and right binding power of an infix operator. Higher binds tighter.
fn infix_binding_power(kind: SyntaxKind) -> Option<(u8, u8)> {
    let bp = match kind {
        SyntaxKind::KwOr => (1, 2),
        SyntaxKind::KwAnd => (3, 4),
        k if COMPARISON_OPS.contains(k) => (5, 6),
        SyntaxKind::Plus | SyntaxKind::Minus => (7, 8),
        SyntaxKind::Star | SyntaxKind::Slash | SyntaxKind::Percent => (9, 10),
        _ => return None,
    };
    Some(bp)
}

impl Parser<'_, '_> {
    /// `query := let_stmt* (for_expr | return_stmt)`
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);

        while self.currently_is(SyntaxKind::KwLet) && !self.has_fatal_error() {
            self.parse_let();
        }

        match self.current() {
            SyntaxKind::KwFor => self.parse_for(),
            SyntaxKind::KwReturn => self.parse_return(),
            _ if self.eof() => {
                let at = self.last_non_trivia_end().unwrap_or_default();
                self.error_at(DiagnosticKind::ExpectedReturn, rowan::TextRange::empty(at));
            }
            _ => self.error(DiagnosticKind::ExpectedReturn),
        }

        if !self.should_stop() {
            self.error_recover(DiagnosticKind::TrailingInput, TokenSet::EMPTY);
        }

        self.flush_trivia();
        self.finish_node();
    }

    /// `LET ident '=' expr`, both at the top level and inside a `FOR` body.
    fn parse_let(&mut self) {
        self.assert_current(SyntaxKind::KwLet);
        self.start_node(SyntaxKind::LetStmt);
        self.bump();

        if !self.eat_token(SyntaxKind::Id) {
            self.error(DiagnosticKind::ExpectedIdentifier);
        }
        self.expect(SyntaxKind::Equals, "`=` after the variable name");
        self.parse_expr();

        self.finish_node();
    }

    /// `RETURN expr`
    fn parse_return(&mut self) {
        self.assert_current(SyntaxKind::KwReturn);
        self.start_node(SyntaxKind::ReturnStmt);
        self.bump();
        self.parse_expr();
        self.finish_node();
    }

    /// `FOR ident IN expr (FILTER expr | LET ident = expr)* RETURN expr`
    fn parse_for(&mut self) {
        if !self.enter_recursion() {
            self.bail();
            return;
        }

        self.assert_current(SyntaxKind::KwFor);
        self.start_node(SyntaxKind::ForExpr);
        self.bump();

        if !self.eat_token(SyntaxKind::Id) {
            self.error(DiagnosticKind::ExpectedIdentifier);
        }
        self.expect(SyntaxKind::KwIn, "`IN` after the loop variable");
        self.parse_expr();

        while !self.has_fatal_error() {
            match self.current() {
                SyntaxKind::KwFilter => {
                    self.start_node(SyntaxKind::FilterClause);
                    self.bump();
                    self.parse_expr();
                    self.finish_node();
                }
                SyntaxKind::KwLet => self.parse_let(),
                _ => break,
            }
        }

        if self.eat_token(SyntaxKind::KwReturn) {
            self.parse_expr();
        } else {
            self.error_msg(
                DiagnosticKind::UnexpectedToken,
                "expected `RETURN` to close the `FOR` loop",
            );
        }

        self.finish_node();
        self.exit_recursion();
    }

    /// Recursion limit hit: remaining input goes into a single `Error` node.
    fn bail(&mut self) {
        self.start_node(SyntaxKind::Error);
        while !self.eof() {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_expr(&mut self) {
        self.parse_binary(0);
    }

    fn parse_binary(&mut self, min_bp: u8) {
        if !self.enter_recursion() {
            self.bail();
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_unary();

        // Each wrap nests the chain one level deeper.
        let mut wraps = 0;
        let mut chained_comparison = false;
        while !self.has_fatal_error() {
            let op = self.current();
            let Some((l_bp, r_bp)) = infix_binding_power(op) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }

            let is_comparison = COMPARISON_OPS.contains(op);
            if is_comparison && chained_comparison {
                self.error_msg(
                    DiagnosticKind::UnexpectedToken,
                    "comparison operators cannot be chained; use parentheses",
                );
            }
            chained_comparison |= is_comparison;

            if !self.enter_recursion() {
                break;
            }
            wraps += 1;

            self.bump();
            self.parse_binary(r_bp);
            self.start_node_at(checkpoint, SyntaxKind::BinaryExpr);
            self.finish_node();
        }

        self.exit_recursion_n(wraps + 1);
    }

    /// `(NOT | '-') unary | postfix`
    fn parse_unary(&mut self) {
        if !self.currently_is_one_of(UNARY_OPS) {
            self.parse_postfix();
            return;
        }

        if !self.enter_recursion() {
            self.bail();
            return;
        }

        self.start_node(SyntaxKind::UnaryExpr);
        self.bump();
        self.parse_unary();
        self.finish_node();

        self.exit_recursion();
    }

    /// `primary ('.' ident | '[' expr ']')*`
    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        if !self.parse_primary() {
            return;
        }

        let mut wraps = 0;
        while !self.has_fatal_error() {
            let kind = match self.current() {
                SyntaxKind::Dot => SyntaxKind::MemberExpr,
                SyntaxKind::BracketOpen => SyntaxKind::IndexExpr,
                _ => break,
            };
            if !self.enter_recursion() {
                break;
            }
            wraps += 1;

            self.start_node_at(checkpoint, kind);
            if kind == SyntaxKind::MemberExpr {
                self.bump();
                if !self.eat_token(SyntaxKind::Id) {
                    self.error(DiagnosticKind::ExpectedPropertyName);
                }
            } else {
                self.push_delimiter(SyntaxKind::BracketOpen);
                self.bump();
                self.parse_expr();
                self.close_delimiter();
            }
            self.finish_node();
        }

        self.exit_recursion_n(wraps);
    }

    /// Returns `false` when no expression could start here.
    fn parse_primary(&mut self) -> bool {
        match self.current() {
            k if LITERALS.contains(k) => {
                self.start_node(SyntaxKind::Literal);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::At => self.parse_param(),
            SyntaxKind::Id
                if self.next_is(SyntaxKind::ParenOpen) || self.next_is(SyntaxKind::DoubleColon) =>
            {
                self.parse_call()
            }
            SyntaxKind::Id => {
                self.start_node(SyntaxKind::NameRef);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::BracketOpen => self.parse_array(),
            SyntaxKind::BraceOpen => self.parse_object(),
            SyntaxKind::ParenOpen => self.parse_paren(),
            _ => {
                self.error_expected_expression();
                return false;
            }
        }
        true
    }

    /// Missing operand. Tokens owned by an enclosing production stay put.
    fn error_expected_expression(&mut self) {
        let kind = self.current();
        if kind == SyntaxKind::Garbage {
            self.error(DiagnosticKind::UnrecognizedInput);
            self.bump_as_error();
            return;
        }
        if self.eof() || EXPR_RECOVERY.contains(kind) {
            self.error(DiagnosticKind::ExpectedExpression);
            return;
        }
        let text = self.current_text();
        self.error_msg(DiagnosticKind::ExpectedExpression, format!("found `{text}`"));
        self.bump_as_error();
    }

    /// `'@' ident`
    fn parse_param(&mut self) {
        self.start_node(SyntaxKind::Param);
        self.bump();
        if !self.eat_token(SyntaxKind::Id) {
            self.error(DiagnosticKind::ExpectedIdentifier);
        }
        self.finish_node();
    }

    /// `ident ('::' ident)* '(' args ')'`
    fn parse_call(&mut self) {
        self.start_node(SyntaxKind::CallExpr);

        self.start_node(SyntaxKind::FuncName);
        self.bump();
        while self.currently_is(SyntaxKind::DoubleColon) {
            self.bump();
            if !self.eat_token(SyntaxKind::Id) {
                self.error(DiagnosticKind::ExpectedFunctionName);
                break;
            }
        }
        self.finish_node();

        if self.currently_is(SyntaxKind::ParenOpen) {
            self.start_node(SyntaxKind::ArgList);
            self.parse_list(EXPR_FIRST, Self::parse_expr);
            self.finish_node();
        } else {
            self.expect(SyntaxKind::ParenOpen, "`(` after the function name");
        }

        self.finish_node();
    }

    fn parse_array(&mut self) {
        self.start_node(SyntaxKind::ArrayExpr);
        self.parse_list(EXPR_FIRST, Self::parse_expr);
        self.finish_node();
    }

    fn parse_object(&mut self) {
        self.start_node(SyntaxKind::ObjectExpr);
        self.parse_list(PROPERTY_FIRST, Self::parse_property);
        self.finish_node();
    }

    /// `(ident | string) ':' expr`
    fn parse_property(&mut self) {
        if !self.currently_is_one_of(PROPERTY_FIRST) {
            if self.eof() || EXPR_RECOVERY.contains(self.current()) {
                self.error(DiagnosticKind::ExpectedPropertyName);
            } else {
                self.error(DiagnosticKind::ExpectedPropertyName);
                self.bump_as_error();
            }
            return;
        }

        self.start_node(SyntaxKind::Property);
        self.bump();
        self.expect(SyntaxKind::Colon, "`:` after the property name");
        self.parse_expr();
        self.finish_node();
    }

    /// `'(' (for_expr | expr) ')'`
    fn parse_paren(&mut self) {
        self.start_node(SyntaxKind::ParenExpr);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump();

        if self.currently_is(SyntaxKind::KwFor) {
            self.parse_for();
        } else {
            self.parse_expr();
        }

        self.close_delimiter();
        self.finish_node();
    }

    /// Comma-separated items between an opening delimiter (current token) and
    /// its closing counterpart. A missing comma between two items is reported
    /// and parsing continues with the next item.
    fn parse_list(&mut self, item_first: TokenSet, item: fn(&mut Self)) {
        let open = self.current();
        let close = closing_delimiter(open);
        self.push_delimiter(open);
        self.bump();

        while !self.should_stop() && !self.currently_is(close) {
            item(self);

            if self.eat_token(SyntaxKind::Comma) {
                continue;
            }
            if self.currently_is_one_of(item_first) {
                self.error_msg(DiagnosticKind::UnexpectedToken, "expected `,` between items");
                continue;
            }
            break;
        }

        self.close_delimiter();
    }

    /// Pops the innermost open delimiter and expects its closing counterpart.
    fn close_delimiter(&mut self) {
        let open = self
            .pop_delimiter()
            .expect("close_delimiter called without an open delimiter");
        let close = closing_delimiter(open.kind);

        if self.eat_token(close) {
            return;
        }

        let (kind, text) = match close {
            SyntaxKind::ParenClose => (DiagnosticKind::UnclosedParen, "`)`"),
            SyntaxKind::BracketClose => (DiagnosticKind::UnclosedBracket, "`]`"),
            _ => (DiagnosticKind::UnclosedBrace, "`}`"),
        };

        if self.eof() {
            self.error_unclosed_delimiter(kind, format!("expected {text}"), open);
        } else {
            self.error_msg(DiagnosticKind::UnexpectedToken, format!("expected {text}"));
        }
    }
}

fn closing_delimiter(open: SyntaxKind) -> SyntaxKind {
    match open {
        SyntaxKind::ParenOpen => SyntaxKind::ParenClose,
        SyntaxKind::BracketOpen => SyntaxKind::BracketClose,
        SyntaxKind::BraceOpen => SyntaxKind::BraceClose,
        _ => panic!("closing_delimiter: {open:?} is not an opening delimiter"),
    }
}
