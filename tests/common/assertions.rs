use auto_lang::ast::{Expr, Program, Statement, StatementKind, ToAuto};
use auto_lang::parser::{parse, ParseError};

/// Assert that parsing succeeds and return the program
pub fn assert_parses(source: &str) -> Program {
    match parse(source) {
        Ok(program) => program,
        Err(err) => panic!(
            "Expected source to parse successfully, got {} at {:?}\n{}",
            err,
            err.span(),
            source
        ),
    }
}

/// Assert that parsing fails and return the error
pub fn assert_parse_fails(source: &str) -> ParseError {
    match parse(source) {
        Ok(program) => panic!("Expected source to fail parsing, got {:?}", program),
        Err(err) => err,
    }
}

/// Assert the source holds exactly one expression statement and return it
pub fn assert_single_expr(source: &str) -> Expr {
    let mut program = assert_parses(source);
    assert_eq!(program.statements.len(), 1, "expected one statement");
    match program.statements.remove(0) {
        Statement {
            kind: StatementKind::Expr(expr),
            ..
        } => expr,
        other => panic!("expected expression statement, got {:?}", other.kind),
    }
}

/// Printing a parsed program and parsing the output again is stable.
pub fn assert_print_is_stable(source: &str) {
    let first = assert_parses(source).to_auto(0);
    let second = assert_parses(&first).to_auto(0);
    pretty_assertions::assert_eq!(first, second);
}
