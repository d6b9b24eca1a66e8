//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.
//! Accessors return `None` for parts the parser had to skip during recovery.

use rowan::TextRange;

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};
use super::cst::token_sets::{COMPARISON_OPS, LITERALS};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            pub fn text_range(&self) -> TextRange {
                self.0.text_range()
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(LetStmt, LetStmt);
ast_node!(ForExpr, ForExpr);
ast_node!(FilterClause, FilterClause);
ast_node!(ReturnStmt, ReturnStmt);
ast_node!(BinaryExpr, BinaryExpr);
ast_node!(UnaryExpr, UnaryExpr);
ast_node!(MemberExpr, MemberExpr);
ast_node!(IndexExpr, IndexExpr);
ast_node!(CallExpr, CallExpr);
ast_node!(FuncName, FuncName);
ast_node!(ArgList, ArgList);
ast_node!(ParenExpr, ParenExpr);
ast_node!(ArrayExpr, ArrayExpr);
ast_node!(ObjectExpr, ObjectExpr);
ast_node!(Property, Property);
ast_node!(Param, Param);
ast_node!(Literal, Literal);
ast_node!(NameRef, NameRef);

/// Expression: anything that produces a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Literal(Literal),
    Param(Param),
    NameRef(NameRef),
    Call(CallExpr),
    Array(ArrayExpr),
    Object(ObjectExpr),
    Paren(ParenExpr),
    Member(MemberExpr),
    Index(IndexExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    For(ForExpr),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Literal => Literal::cast(node).map(Expr::Literal),
            SyntaxKind::Param => Param::cast(node).map(Expr::Param),
            SyntaxKind::NameRef => NameRef::cast(node).map(Expr::NameRef),
            SyntaxKind::CallExpr => CallExpr::cast(node).map(Expr::Call),
            SyntaxKind::ArrayExpr => ArrayExpr::cast(node).map(Expr::Array),
            SyntaxKind::ObjectExpr => ObjectExpr::cast(node).map(Expr::Object),
            SyntaxKind::ParenExpr => ParenExpr::cast(node).map(Expr::Paren),
            SyntaxKind::MemberExpr => MemberExpr::cast(node).map(Expr::Member),
            SyntaxKind::IndexExpr => IndexExpr::cast(node).map(Expr::Index),
            SyntaxKind::UnaryExpr => UnaryExpr::cast(node).map(Expr::Unary),
            SyntaxKind::BinaryExpr => BinaryExpr::cast(node).map(Expr::Binary),
            SyntaxKind::ForExpr => ForExpr::cast(node).map(Expr::For),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::Literal(n) => n.as_cst(),
            Expr::Param(n) => n.as_cst(),
            Expr::NameRef(n) => n.as_cst(),
            Expr::Call(n) => n.as_cst(),
            Expr::Array(n) => n.as_cst(),
            Expr::Object(n) => n.as_cst(),
            Expr::Paren(n) => n.as_cst(),
            Expr::Member(n) => n.as_cst(),
            Expr::Index(n) => n.as_cst(),
            Expr::Unary(n) => n.as_cst(),
            Expr::Binary(n) => n.as_cst(),
            Expr::For(n) => n.as_cst(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.as_cst().text_range()
    }
}

/// Statement inside a `FOR` body, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Clause {
    Filter(FilterClause),
    Let(LetStmt),
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

fn first_significant_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| !t.kind().is_trivia() && !t.kind().is_error())
}

impl Root {
    pub fn lets(&self) -> impl Iterator<Item = LetStmt> + '_ {
        self.0.children().filter_map(LetStmt::cast)
    }

    /// The final `FOR` loop or `RETURN` value.
    pub fn body(&self) -> Option<Expr> {
        self.0.children().find_map(|n| match n.kind() {
            SyntaxKind::ForExpr => ForExpr::cast(n).map(Expr::For),
            SyntaxKind::ReturnStmt => ReturnStmt::cast(n).and_then(|r| r.value()),
            _ => None,
        })
    }
}

impl LetStmt {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ReturnStmt {
    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ForExpr {
    pub fn var(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    /// The collection iterated over: the expression before the first clause.
    pub fn source(&self) -> Option<Expr> {
        self.0
            .children()
            .take_while(|n| n.kind() != SyntaxKind::FilterClause && n.kind() != SyntaxKind::LetStmt)
            .find_map(Expr::cast)
    }

    pub fn clauses(&self) -> impl Iterator<Item = Clause> + '_ {
        self.0.children().filter_map(|n| match n.kind() {
            SyntaxKind::FilterClause => FilterClause::cast(n).map(Clause::Filter),
            SyntaxKind::LetStmt => LetStmt::cast(n).map(Clause::Let),
            _ => None,
        })
    }

    /// The expression after `RETURN`.
    pub fn body(&self) -> Option<Expr> {
        let ret = token(&self.0, SyntaxKind::KwReturn)?;
        self.0
            .children()
            .filter(|n| n.text_range().start() >= ret.text_range().end())
            .find_map(Expr::cast)
    }
}

impl FilterClause {
    pub fn condition(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| is_binary_op(t.kind()))
    }
}

fn is_binary_op(kind: SyntaxKind) -> bool {
    COMPARISON_OPS.contains(kind)
        || matches!(
            kind,
            SyntaxKind::KwAnd
                | SyntaxKind::KwOr
                | SyntaxKind::Plus
                | SyntaxKind::Minus
                | SyntaxKind::Star
                | SyntaxKind::Slash
                | SyntaxKind::Percent
        )
}

impl UnaryExpr {
    pub fn op(&self) -> Option<SyntaxToken> {
        first_significant_token(&self.0)
    }

    pub fn operand(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl MemberExpr {
    pub fn object(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// The property after `.`; direct token children only, so the object's own identifiers never match.
    pub fn property(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }
}

impl IndexExpr {
    pub fn object(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn index(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }
}

impl CallExpr {
    pub fn name(&self) -> Option<FuncName> {
        self.0.children().find_map(FuncName::cast)
    }

    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .children()
            .find_map(ArgList::cast)
            .into_iter()
            .flat_map(|list| list.0.children().filter_map(Expr::cast).collect::<Vec<_>>())
    }
}

impl FuncName {
    pub fn segments(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::Id)
    }

    /// Qualified name as written, `::`-joined.
    pub fn qualified(&self) -> String {
        self.segments()
            .map(|t| t.text().to_string())
            .collect::<Vec<_>>()
            .join("::")
    }
}

impl ParenExpr {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl ArrayExpr {
    pub fn items(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl ObjectExpr {
    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        self.0.children().filter_map(Property::cast)
    }
}

impl Property {
    /// Either an `Id` or a `StringLit` token.
    pub fn key(&self) -> Option<SyntaxToken> {
        first_significant_token(&self.0)
            .filter(|t| matches!(t.kind(), SyntaxKind::Id | SyntaxKind::StringLit))
    }

    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl Param {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }
}

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| LITERALS.contains(t.kind()))
    }
}

impl NameRef {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }
}
