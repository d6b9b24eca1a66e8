//! Query tokenizer.
//!
//! Tokens carry only a kind and a span; their text is sliced out of the source
//! on demand. Runs of characters no rule accepts collapse into one `Garbage`
//! token, so a stray `$$$` costs the parser a single diagnostic.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use super::cst::SyntaxKind;

/// A lexed token. Text is recovered with [`token_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens.
///
/// Identifiers spelling a keyword (in any case) become keyword tokens, except
/// as segments of a qualified name such as `html::in` or `for::each`.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut garbage_start: Option<usize> = None;
    let mut last_significant: Option<usize> = None;
    let mut lexer = SyntaxKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let Ok(mut kind) = result else {
            garbage_start.get_or_insert(span.start);
            continue;
        };

        if let Some(start) = garbage_start.take() {
            last_significant = Some(tokens.len());
            tokens.push(Token::new(
                SyntaxKind::Garbage,
                range_to_text_range(start..span.start),
            ));
        }

        let prev = last_significant.map(|i| &mut tokens[i]);
        let after_path_sep = prev
            .as_deref()
            .is_some_and(|t| t.kind == SyntaxKind::DoubleColon);
        match kind {
            SyntaxKind::Id if !after_path_sep => {
                kind = SyntaxKind::keyword(lexer.slice()).unwrap_or(kind);
            }
            SyntaxKind::DoubleColon => {
                if let Some(prev) = prev
                    && prev.kind.is_keyword()
                {
                    prev.kind = SyntaxKind::Id;
                }
            }
            _ => {}
        }

        if !kind.is_trivia() {
            last_significant = Some(tokens.len());
        }
        tokens.push(Token::new(kind, range_to_text_range(span)));
    }

    if let Some(start) = garbage_start {
        tokens.push(Token::new(
            SyntaxKind::Garbage,
            range_to_text_range(start..source.len()),
        ));
    }

    tokens
}

#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
