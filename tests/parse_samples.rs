mod common;

use auto_lang::lexer::{tokenize, TokenKind};
use auto_lang::parser::parse;
use common::assertions::assert_print_is_stable;
use common::fixtures::{discover_samples, load_sample};
use std::fs;

#[test]
fn test_all_samples_parse() {
    let samples = discover_samples();

    assert!(
        !samples.is_empty(),
        "No .at samples found! Check samples/ directory."
    );

    let mut failures = Vec::new();

    for sample_path in &samples {
        let source = fs::read_to_string(sample_path)
            .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", sample_path, e));

        match parse(&source) {
            Ok(_program) => {
                println!("✓ Parsed: {}", sample_path.display());
            }
            Err(err) => {
                eprintln!("✗ Failed to parse: {}", sample_path.display());
                eprintln!("  Error: {} at {:?}", err, err.span());
                failures.push((sample_path.clone(), err));
            }
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} out of {} samples failed to parse:\n{}",
            failures.len(),
            samples.len(),
            failures
                .iter()
                .map(|(path, err)| format!("  - {}: {:?}", path.display(), err))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

#[test]
fn test_samples_tokenize_losslessly() {
    for sample_path in discover_samples() {
        let source = fs::read_to_string(&sample_path).unwrap();
        let tokens = tokenize(&source).unwrap();
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));

        let mut rebuilt = String::new();
        let mut last = 0;
        for token in &tokens {
            assert!(token.span.start >= last, "overlapping tokens in {:?}", sample_path);
            let gap = &source[last..token.span.start];
            // Gaps hold only whitespace and comments.
            let stripped = gap.trim();
            assert!(
                stripped.is_empty() || stripped.starts_with("//") || stripped.starts_with("/*"),
                "unexpected skipped text {:?} in {:?}",
                stripped,
                sample_path
            );
            rebuilt.push_str(gap);
            rebuilt.push_str(token.text(&source));
            last = token.span.end;
        }
        rebuilt.push_str(&source[last..]);
        assert_eq!(rebuilt, source);
    }
}

#[test]
fn test_samples_print_stably() {
    for sample_path in discover_samples() {
        let source = fs::read_to_string(&sample_path).unwrap();
        assert_print_is_stable(&source);
    }
}

#[test]
fn test_sample_statement_counts() {
    let cases = [
        ("01-hello", 4),
        ("02-control-flow", 7),
        ("03-ui-nodes", 7),
        ("04-strings", 7),
        ("05-types", 6),
    ];
    for (name, expected) in cases {
        let program = parse(&load_sample(name)).unwrap();
        assert_eq!(program.statements.len(), expected, "statement count of {}", name);
    }
}
