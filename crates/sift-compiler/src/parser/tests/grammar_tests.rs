use indoc::indoc;

use super::dump;

#[test]
fn return_literal() {
    insta::assert_snapshot!(dump("RETURN 42"), @r#"
    Root
      ReturnStmt
        KwReturn "RETURN"
        Literal
          Int "42"
    "#);
}

#[test]
fn precedence_climbing() {
    insta::assert_snapshot!(dump("RETURN 1 + 2 * 3"), @r#"
    Root
      ReturnStmt
        KwReturn "RETURN"
        BinaryExpr
          Literal
            Int "1"
          Plus "+"
          BinaryExpr
            Literal
              Int "2"
            Star "*"
            Literal
              Int "3"
    "#);
}

#[test]
fn left_associative() {
    insta::assert_snapshot!(dump("RETURN 1 - 2 - 3"), @r#"
    Root
      ReturnStmt
        KwReturn "RETURN"
        BinaryExpr
          BinaryExpr
            Literal
              Int "1"
            Minus "-"
            Literal
              Int "2"
          Minus "-"
          Literal
            Int "3"
    "#);
}

#[test]
fn unary_binds_tighter_than_and() {
    insta::assert_snapshot!(dump("RETURN NOT @a AND @b"), @r#"
    Root
      ReturnStmt
        KwReturn "RETURN"
        BinaryExpr
          UnaryExpr
            KwNot "NOT"
            Param
              At "@"
              Id "a"
          KwAnd "AND"
          Param
            At "@"
            Id "b"
    "#);
}

#[test]
fn postfix_chain() {
    insta::assert_snapshot!(dump("RETURN @doc.items[0].name"), @r#"
    Root
      ReturnStmt
        KwReturn "RETURN"
        MemberExpr
          IndexExpr
            MemberExpr
              Param
                At "@"
                Id "doc"
              Dot "."
              Id "items"
            BracketOpen "["
            Literal
              Int "0"
            BracketClose "]"
          Dot "."
          Id "name"
    "#);
}

#[test]
fn qualified_call() {
    insta::assert_snapshot!(dump("RETURN html::ATTR_GET(@el, 'id')"), @r#"
    Root
      ReturnStmt
        KwReturn "RETURN"
        CallExpr
          FuncName
            Id "html"
            DoubleColon "::"
            Id "ATTR_GET"
          ArgList
            ParenOpen "("
            Param
              At "@"
              Id "el"
            Comma ","
            Literal
              StringLit "'id'"
            ParenClose ")"
    "#);
}

#[test]
fn object_and_array() {
    insta::assert_snapshot!(dump("RETURN {id: 1, 'k': [TRUE, NONE]}"), @r#"
    Root
      ReturnStmt
        KwReturn "RETURN"
        ObjectExpr
          BraceOpen "{"
          Property
            Id "id"
            Colon ":"
            Literal
              Int "1"
          Comma ","
          Property
            StringLit "'k'"
            Colon ":"
            ArrayExpr
              BracketOpen "["
              Literal
                KwTrue "TRUE"
              Comma ","
              Literal
                KwNone "NONE"
              BracketClose "]"
          BraceClose "}"
    "#);
}

#[test]
fn trailing_comma_allowed() {
    insta::assert_snapshot!(dump("RETURN [1,]"), @r#"
    Root
      ReturnStmt
        KwReturn "RETURN"
        ArrayExpr
          BracketOpen "["
          Literal
            Int "1"
          Comma ","
          BracketClose "]"
    "#);
}

#[test]
fn let_then_for() {
    let input = indoc! {r#"
    LET limit = 10
    FOR el IN @items
      FILTER el.a > limit
      RETURN el
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    Root
      LetStmt
        KwLet "LET"
        Id "limit"
        Equals "="
        Literal
          Int "10"
      ForExpr
        KwFor "FOR"
        Id "el"
        KwIn "IN"
        Param
          At "@"
          Id "items"
        FilterClause
          KwFilter "FILTER"
          BinaryExpr
            MemberExpr
              NameRef
                Id "el"
              Dot "."
              Id "a"
            Gt ">"
            NameRef
              Id "limit"
        KwReturn "RETURN"
        NameRef
          Id "el"
    "#);
}

#[test]
fn for_with_let_clause() {
    insta::assert_snapshot!(dump("FOR x IN @xs LET y = x * 2 RETURN y"), @r#"
    Root
      ForExpr
        KwFor "FOR"
        Id "x"
        KwIn "IN"
        Param
          At "@"
          Id "xs"
        LetStmt
          KwLet "LET"
          Id "y"
          Equals "="
          BinaryExpr
            NameRef
              Id "x"
            Star "*"
            Literal
              Int "2"
        KwReturn "RETURN"
        NameRef
          Id "y"
    "#);
}

#[test]
fn subquery_in_parens() {
    insta::assert_snapshot!(dump("RETURN (FOR x IN @xs RETURN x)"), @r#"
    Root
      ReturnStmt
        KwReturn "RETURN"
        ParenExpr
          ParenOpen "("
          ForExpr
            KwFor "FOR"
            Id "x"
            KwIn "IN"
            Param
              At "@"
              Id "xs"
            KwReturn "RETURN"
            NameRef
              Id "x"
          ParenClose ")"
    "#);
}

#[test]
fn keywords_keep_source_spelling() {
    insta::assert_snapshot!(dump("for x in @xs filter x return x"), @r#"
    Root
      ForExpr
        KwFor "for"
        Id "x"
        KwIn "in"
        Param
          At "@"
          Id "xs"
        FilterClause
          KwFilter "filter"
          NameRef
            Id "x"
        KwReturn "return"
        NameRef
          Id "x"
    "#);
}

#[test]
fn comments_are_skipped() {
    let input = indoc! {r#"
    // leading comment
    RETURN /* inline */ 1 // trailing
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    Root
      ReturnStmt
        KwReturn "RETURN"
        Literal
          Int "1"
    "#);
}

#[test]
fn cst_is_lossless() {
    let input = "LET a = 1 // note\nRETURN  a";
    let mut diagnostics = crate::diagnostics::Diagnostics::new();
    let result = crate::parser::parse(input, &mut diagnostics, None, None).unwrap();
    assert_eq!(result.root.as_cst().text().to_string(), input);
}
