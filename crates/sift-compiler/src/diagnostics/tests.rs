use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, range(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert!(!diagnostics.has_warnings());
    assert_eq!(
        diagnostics.iter().next().map(|d| d.message()),
        Some("expected an expression")
    );
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedFunction, range(0, 3))
        .message("FOO")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(4, 5))
        .message("expected `=`")
        .emit();

    insta::assert_snapshot!(diagnostics.to_string(), @r"
    error at 0..3: function `FOO` is not registered
    error at 4..5: unexpected token: expected `=`
    ");
}

#[test]
fn unclosed_delimiter_message_uses_semicolon() {
    insta::assert_snapshot!(
        DiagnosticKind::UnclosedBracket.message(Some("expected `]`")),
        @"missing closing `]`; expected `]`"
    );
}

#[test]
fn related_info_in_plain_output() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedParen, range(0, 5))
        .message("primary")
        .related_to("opened here", range(6, 10))
        .emit();

    insta::assert_snapshot!(
        diagnostics.to_string(),
        @"error at 0..5: missing closing `)`; primary (related: opened here at 6..10)"
    );
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnusedVariable, range(4, 5))
        .message("x")
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(diagnostics.warning_count(), 1);
    insta::assert_snapshot!(diagnostics.to_string(), @"warning at 4..5: variable `x` is never used");
}

#[test]
fn kinds_in_emission_order() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedVariable, range(0, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnclosedBrace, range(2, 3))
        .emit();

    assert_eq!(
        diagnostics.kinds(),
        vec![DiagnosticKind::UndefinedVariable, DiagnosticKind::UnclosedBrace]
    );
    assert!(diagnostics.contains(DiagnosticKind::UnclosedBrace));
    assert!(!diagnostics.contains(DiagnosticKind::TrailingInput));
}

#[test]
fn extend_appends() {
    let mut first = Diagnostics::new();
    first.report(DiagnosticKind::InvalidNumber, range(0, 1)).emit();

    let mut second = Diagnostics::new();
    second.report(DiagnosticKind::InvalidEscape, range(1, 2)).emit();
    second.report(DiagnosticKind::UnusedVariable, range(2, 3)).emit();

    first.extend(second);

    assert_eq!(first.len(), 3);
    assert_eq!(first.error_count(), 2);
    assert_eq!(first.warning_count(), 1);
}

#[test]
fn syntax_kinds_precede_semantic_kinds() {
    assert!(DiagnosticKind::UnclosedParen.is_syntax());
    assert!(DiagnosticKind::ExpectedReturn.is_syntax());
    assert!(DiagnosticKind::TrailingInput.is_syntax());
    assert!(!DiagnosticKind::InvalidNumber.is_syntax());
    assert!(!DiagnosticKind::UnresolvedFunction.is_syntax());
    assert!(!DiagnosticKind::UnusedVariable.is_syntax());
}

#[test]
fn only_unused_variable_is_a_warning() {
    assert_eq!(
        DiagnosticKind::UnusedVariable.default_severity(),
        Severity::Warning
    );
    assert_eq!(
        DiagnosticKind::DuplicateVariable.default_severity(),
        Severity::Error
    );
}

#[test]
fn printer_without_source_is_plain() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::TrailingInput, range(10, 12))
        .emit();

    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"error at 10..12: unexpected input after the query"
    );
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.render("source").is_empty());
}

#[test]
fn printer_with_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UndefinedVariable, range(7, 8))
        .message("x")
        .emit();

    let result = diagnostics.render("RETURN x");
    assert!(result.starts_with("error: variable `x` is not defined"));
    assert!(result.contains("1 | RETURN x"));
    assert!(result.contains("       ^"));
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, range(0, 5))
        .message("test")
        .emit();

    let result = diagnostics
        .printer()
        .source("hello")
        .colored(true)
        .render();
    assert!(result.contains("test"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedReturn, range(0, 3))
        .emit();

    let result = diagnostics
        .printer()
        .source("LET")
        .path("query.sift")
        .render();
    assert!(result.contains("query.sift:1:1"));
}

#[test]
fn printer_zero_width_span() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, TextRange::empty(7.into()))
        .emit();

    let result = diagnostics.render("RETURN x");
    assert!(result.contains("expected an expression"));
    assert!(result.contains('^'));
}
