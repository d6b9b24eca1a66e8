mod grammar_tests;

use crate::diagnostics::Diagnostics;
use crate::parser::{dump_cst, parse};

/// CST dump of a query that must parse cleanly.
fn dump(input: &str) -> String {
    let mut diagnostics = Diagnostics::new();
    let result = parse(input, &mut diagnostics, None, None).unwrap();
    assert!(diagnostics.is_empty(), "unexpected diagnostics:\n{diagnostics}");
    dump_cst(result.root.as_cst())
}

/// Syntax diagnostics of a query that must parse with errors.
fn expect_invalid(input: &str) -> String {
    let mut diagnostics = Diagnostics::new();
    parse(input, &mut diagnostics, None, None).unwrap();
    assert!(diagnostics.has_errors(), "expected syntax errors for {input:?}");
    diagnostics.to_string()
}
