//! Parser state: token cursor, green tree builder, fuel and diagnostics.

use rowan::{Checkpoint, GreenNodeBuilder, TextRange, TextSize};

use super::ast::Root;
use super::cst::{SyntaxKind, SyntaxNode, TokenSet};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

#[derive(Debug)]
pub struct ParseResult {
    pub root: Root,
    /// Tokens consumed, counted against the parse fuel.
    pub exec_fuel_consumed: u32,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct OpenDelimiter {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

/// Recursive-descent parser building a green tree.
///
/// Syntax problems are reported to the `Diagnostics` sink and parsing goes on.
/// Only running out of fuel or nesting depth stops it, and that is returned
/// as an [`Error`] from [`parse`](Self::parse).
///
/// Whitespace and comments are held back while the grammar looks ahead and
/// flushed into the tree right before the next node or token, so they end up
/// as leading trivia of whatever follows.
pub struct Parser<'src, 'd> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    pending_trivia: usize,
    builder: GreenNodeBuilder<'static>,
    diagnostics: &'d mut Diagnostics,
    delimiters: Vec<OpenDelimiter>,
    last_diagnostic_pos: Option<TextSize>,
    depth: u32,
    max_depth: Option<u32>,
    fuel: Option<u32>,
    fuel_consumed: u32,
    fatal_error: Option<Error>,
}

impl<'src, 'd> Parser<'src, 'd> {
    pub fn new(source: &'src str, tokens: Vec<Token>, diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            pending_trivia: 0,
            builder: GreenNodeBuilder::new(),
            diagnostics,
            delimiters: Vec::new(),
            last_diagnostic_pos: None,
            depth: 0,
            max_depth: None,
            fuel: None,
            fuel_consumed: 0,
            fatal_error: None,
        }
    }

    /// Caps the number of tokens the parser may consume.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.fuel = limit;
        self
    }

    /// Caps expression nesting, operator chains included.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.max_depth = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        self.parse_root();
        if let Some(err) = self.fatal_error {
            return Err(err);
        }
        let root = Root::cast(SyntaxNode::new_root(self.builder.finish()))
            .expect("parser always produces Root");
        Ok(ParseResult {
            root,
            exec_fuel_consumed: self.fuel_consumed,
        })
    }

    pub(super) fn has_fatal_error(&self) -> bool {
        self.fatal_error.is_some()
    }

    fn fail(&mut self, err: Error) {
        self.fatal_error.get_or_insert(err);
    }

    /// Moves the cursor past trivia without adding it to the tree yet.
    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos)
            && token.kind.is_trivia()
        {
            self.pos += 1;
            self.pending_trivia += 1;
        }
    }

    pub(super) fn flush_trivia(&mut self) {
        self.skip_trivia();
        for token in &self.tokens[self.pos - self.pending_trivia..self.pos] {
            self.builder
                .token(token.kind.into(), token_text(self.source, token));
        }
        self.pending_trivia = 0;
    }

    pub(super) fn current(&mut self) -> SyntaxKind {
        self.skip_trivia();
        self.tokens.get(self.pos).map_or(SyntaxKind::Error, |t| t.kind)
    }

    pub(super) fn current_span(&mut self) -> TextRange {
        self.skip_trivia();
        match self.tokens.get(self.pos) {
            Some(token) => token.span,
            None => TextRange::empty(TextSize::of(self.source)),
        }
    }

    pub(super) fn current_text(&mut self) -> &'src str {
        self.skip_trivia();
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    /// Kind of the first non-trivia token after the current one.
    pub(super) fn next_is(&mut self, kind: SyntaxKind) -> bool {
        self.skip_trivia();
        self.tokens
            .iter()
            .skip(self.pos + 1)
            .find(|t| !t.kind.is_trivia())
            .is_some_and(|t| t.kind == kind)
    }

    /// Only trivia left.
    pub(super) fn eof(&mut self) -> bool {
        self.skip_trivia();
        self.pos >= self.tokens.len()
    }

    pub(super) fn should_stop(&mut self) -> bool {
        self.eof() || self.has_fatal_error()
    }

    pub(super) fn currently_is(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    pub(super) fn assert_current(&mut self, expected: SyntaxKind) {
        let found = self.current();
        debug_assert_eq!(found, expected, "grammar entered at the wrong token");
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.flush_trivia();
        self.builder.start_node(kind.into());
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    pub(super) fn bump(&mut self) {
        self.flush_trivia();
        let token = self.tokens[self.pos];

        match self.fuel {
            Some(limit) if self.fuel_consumed >= limit => self.fail(Error::ExecFuelExhausted),
            _ => self.fuel_consumed += 1,
        }

        self.builder
            .token(token.kind.into(), token_text(self.source, &token));
        self.pos += 1;
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        let matched = self.currently_is(kind);
        if matched {
            self.bump();
        }
        matched
    }

    /// Reports a missing token without consuming anything.
    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat_token(kind) {
            return true;
        }
        self.error_msg(DiagnosticKind::UnexpectedToken, format!("expected {what}"));
        false
    }

    /// Wraps the current token in an `Error` node.
    pub(super) fn bump_as_error(&mut self) {
        if self.should_stop() {
            return;
        }
        self.start_node(SyntaxKind::Error);
        self.bump();
        self.finish_node();
    }

    /// Wraps everything up to `recovery` (or EOF) in a single `Error` node.
    pub(super) fn error_recover(&mut self, kind: DiagnosticKind, recovery: TokenSet) {
        if self.currently_is_one_of(recovery) || self.should_stop() {
            self.error(kind);
            return;
        }

        self.start_node(SyntaxKind::Error);
        self.error(kind);
        while !self.currently_is_one_of(recovery) && !self.should_stop() {
            self.bump();
        }
        self.finish_node();
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let range = self.current_span();
        self.error_at(kind, range);
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let range = self.current_span();
        if self.is_new_diagnostic_pos(range.start()) {
            self.diagnostics.report(kind, range).message(message).emit();
        }
    }

    pub(super) fn error_at(&mut self, kind: DiagnosticKind, range: TextRange) {
        if self.is_new_diagnostic_pos(range.start()) {
            self.diagnostics.report(kind, range).emit();
        }
    }

    /// Consecutive diagnostics at one position collapse into the first.
    fn is_new_diagnostic_pos(&mut self, pos: TextSize) -> bool {
        if self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    /// Descends one nesting level; `false` (and a fatal error) past the limit.
    pub(super) fn enter_recursion(&mut self) -> bool {
        if self.max_depth.is_some_and(|limit| self.depth >= limit) {
            self.fail(Error::RecursionLimitExceeded);
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.exit_recursion_n(1);
    }

    pub(super) fn exit_recursion_n(&mut self, levels: u32) {
        self.depth = self.depth.saturating_sub(levels);
    }

    pub(super) fn push_delimiter(&mut self, kind: SyntaxKind) {
        let span = self.current_span();
        self.delimiters.push(OpenDelimiter { kind, span });
    }

    pub(super) fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiters.pop()
    }

    /// Reports a delimiter left open at EOF, spanning from the opener to EOF.
    pub(super) fn error_unclosed_delimiter(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        open: OpenDelimiter,
    ) {
        let current = self.current_span();
        if !self.is_new_diagnostic_pos(current.start()) {
            return;
        }
        self.diagnostics
            .report(kind, TextRange::new(open.span.start(), current.end()))
            .message(message)
            .related_to("opened here", open.span)
            .emit();
    }

    pub(super) fn last_non_trivia_end(&self) -> Option<TextSize> {
        self.tokens[..self.pos]
            .iter()
            .rev()
            .find(|t| !t.kind.is_trivia())
            .map(|t| t.span.end())
    }
}
