//! Syntax kinds for the query language.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; node kinds lack token/regex attributes.
//! Keywords carry no logos attribute either: the lexer produces `Id` and
//! reclassifies keywords case-insensitively afterwards.
//! `SiftLang` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    /// Namespace separator in function names. Defined before `Colon` for correct precedence.
    #[token("::")]
    DoubleColon,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("@")]
    At,

    #[token("==")]
    EqEq,

    #[token("!=")]
    NotEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("=")]
    Equals,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    StringLit,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+(?:[eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Id,

    KwLet,
    KwFor,
    KwIn,
    KwFilter,
    KwReturn,
    KwAnd,
    KwOr,
    KwNot,
    KwTrue,
    KwFalse,
    KwNone,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/", allow_greedy = true)]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    LetStmt,
    ForExpr,
    FilterClause,
    ReturnStmt,
    BinaryExpr,
    UnaryExpr,
    MemberExpr,
    IndexExpr,
    CallExpr,
    FuncName,
    ArgList,
    ParenExpr,
    ArrayExpr,
    ObjectExpr,
    Property,
    Param,
    Literal,
    NameRef,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        (KwLet as u16..=KwNone as u16).contains(&(self as u16))
    }

    /// Keyword for an identifier, matched case-insensitively.
    pub fn keyword(text: &str) -> Option<SyntaxKind> {
        const KEYWORDS: &[(&str, SyntaxKind)] = &[
            ("LET", KwLet),
            ("FOR", KwFor),
            ("IN", KwIn),
            ("FILTER", KwFilter),
            ("RETURN", KwReturn),
            ("AND", KwAnd),
            ("OR", KwOr),
            ("NOT", KwNot),
            ("TRUE", KwTrue),
            ("FALSE", KwFalse),
            ("NONE", KwNone),
        ];

        KEYWORDS
            .iter()
            .find(|(kw, _)| kw.eq_ignore_ascii_case(text))
            .map(|&(_, kind)| kind)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SiftLang {}

impl Language for SiftLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<SiftLang>;
pub type SyntaxToken = rowan::SyntaxToken<SiftLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Creates an empty token set.
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..64u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// FIRST set of expr.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[
        ParenOpen,
        BracketOpen,
        BraceOpen,
        At,
        Minus,
        StringLit,
        Int,
        Float,
        Id,
        KwNot,
        KwTrue,
        KwFalse,
        KwNone,
    ]);

    pub const LITERALS: TokenSet =
        TokenSet::new(&[StringLit, Int, Float, KwTrue, KwFalse, KwNone]);

    pub const PROPERTY_FIRST: TokenSet = TokenSet::new(&[Id, StringLit]);

    pub const UNARY_OPS: TokenSet = TokenSet::new(&[KwNot, Minus]);

    pub const COMPARISON_OPS: TokenSet = TokenSet::new(&[EqEq, NotEq, Lt, LtEq, Gt, GtEq]);

    pub const TRIVIA: TokenSet = TokenSet::new(&[Whitespace, LineComment, BlockComment]);

    /// Tokens a missing expression never swallows: they belong to an enclosing production.
    pub const EXPR_RECOVERY: TokenSet = TokenSet::new(&[
        ParenClose,
        BracketClose,
        BraceClose,
        Comma,
        Colon,
        KwLet,
        KwFor,
        KwIn,
        KwFilter,
        KwReturn,
    ]);
}
