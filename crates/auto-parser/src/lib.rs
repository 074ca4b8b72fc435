//! Auto Parser - Recursive descent parser
//!
//! Parses Auto source code into an AST.
//! Key parsing challenges:
//! - `{ ... }` is a block after construct heads and an object literal in
//!   value positions (see [`brace`])
//! - newlines separate statements and list entries, except inside `( )`
//! - keywords are plain identifiers to the lexer; most are only reserved
//!   where their statement can start
//! - string interpolation holes are parsed by re-entering the parser

pub mod brace;
mod error;
mod expr;
mod parser;
pub mod precedence;
mod stmt;

pub use error::*;
pub use parser::*;

use auto_ast::{Program, Span};
use auto_lexer::{LexError, Lexer, Token, TokenKind};

/// Parse a source string into a Program AST
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let (tokens, lex_error) = lex(source);
    let result = Parser::new(source, tokens).parse_program();

    // Tokens stop at a lexical error; whichever error comes first wins.
    match lex_error {
        None => result,
        Some(err) => match result {
            Err(syntax) if syntax.span().start < err.span.start => Err(syntax),
            _ => Err(ParseError::Lexical(err)),
        },
    }
}

/// Collect tokens up to the first lexical error, ending with `Eof`.
fn lex(source: &str) -> (Vec<Token>, Option<LexError>) {
    let mut tokens = Vec::new();
    for result in Lexer::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    span: Span::point(err.span.start),
                    newline_before: true,
                });
                return (tokens, Some(err));
            }
        }
    }
    (tokens, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use auto_ast::*;
    use auto_lexer::LexErrorKind;
    use pretty_assertions::assert_eq;

    fn parse_ok(source: &str) -> Program {
        match parse(source) {
            Ok(program) => program,
            Err(err) => panic!("failed to parse {source:?}: {err} at {:?}", err.span()),
        }
    }

    fn single(source: &str) -> Statement {
        let mut program = parse_ok(source);
        assert_eq!(program.statements.len(), 1, "expected one statement in {source:?}");
        program.statements.remove(0)
    }

    fn expr(source: &str) -> Expr {
        match single(source).kind {
            StatementKind::Expr(expr) => expr,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    fn name_of(expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Name(name) => name.path(),
            other => panic!("expected name, got {other:?}"),
        }
    }

    // === Expressions ===

    #[test]
    fn test_multiplication_binds_tighter() {
        let e = expr("a + b * c");
        let ExprKind::Binary { op, left, right, .. } = e.kind else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Add);
        assert_eq!(name_of(&left), "a");
        match right.kind {
            ExprKind::Binary { op, .. } => assert_eq!(op, BinaryOp::Mul),
            other => panic!("expected nested multiplication, got {other:?}"),
        }
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let e = expr("a - b - c");
        let ExprKind::Binary { op, assoc, left, right } = e.kind else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Sub);
        assert_eq!(assoc, Assoc::Left);
        assert_eq!(name_of(&right), "c");
        assert_eq!(left.to_auto(0), "a - b");
        assert!(matches!(left.kind, ExprKind::Binary { op: BinaryOp::Sub, .. }));
    }

    #[test]
    fn test_comparison_below_arithmetic() {
        let e = expr("a + 1 <= b * 2");
        let ExprKind::Comparison { op, left, right, .. } = e.kind else {
            panic!("expected comparison");
        };
        assert_eq!(op, CompareOp::Le);
        assert!(matches!(left.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));
        assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn test_group_round_trips() {
        for source in ["a + b * c", "f(x, -y) - 3", "!done == false"] {
            let plain = expr(source);
            let grouped = expr(&format!("({source})"));
            assert!(matches!(grouped.kind, ExprKind::Group(_)));
            assert_eq!(grouped.ungrouped().to_auto(0), plain.to_auto(0));
        }
    }

    #[test]
    fn test_group_overrides_precedence() {
        let e = expr("(a + b) * c");
        let ExprKind::Binary { op, left, .. } = e.kind else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Mul);
        assert!(matches!(left.kind, ExprKind::Group(_)));
    }

    #[test]
    fn test_unary_binds_tighter_than_binary() {
        let e = expr("-a * b");
        let ExprKind::Binary { left, .. } = e.kind else {
            panic!("expected binary");
        };
        assert!(matches!(left.kind, ExprKind::Unary { op: UnaryOp::Neg, .. }));
    }

    #[test]
    fn test_call_with_trailing_block() {
        let e = expr("button(\"ok\") { print(1) }");
        let ExprKind::Call { callee, args, body } = e.kind else {
            panic!("expected call");
        };
        assert_eq!(name_of(&callee), "button");
        assert_eq!(args.len(), 1);
        assert_eq!(body.map(|b| b.statements.len()), Some(1));
    }

    #[test]
    fn test_trailing_block_must_share_the_line() {
        let program = parse_ok("f(x)\n{a: 1}");
        assert_eq!(program.statements.len(), 2);
        match &program.statements[1].kind {
            StatementKind::Expr(Expr { kind: ExprKind::Object(entries), .. }) => {
                assert_eq!(entries.len(), 1)
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_dotted_and_relative_names() {
        assert_eq!(name_of(&expr("app.ui.button")), "app.ui.button");
        let e = expr(".theme.dark");
        let ExprKind::Name(name) = e.kind else {
            panic!("expected name");
        };
        assert!(name.relative);
        assert_eq!(name.segments.len(), 2);
    }

    #[test]
    fn test_pairs_and_transitions() {
        let e = expr("{name: \"x\", \"key\": 1, f\"k\": 2, state: idle -> busy}");
        let ExprKind::Object(entries) = e.kind else {
            panic!("expected object");
        };
        assert_eq!(entries.len(), 4);
        let StatementKind::Expr(last) = &entries[3].kind else {
            panic!("expected expression entry");
        };
        let ExprKind::Pair { key, value } = &last.kind else {
            panic!("expected pair");
        };
        assert!(matches!(key, PairKey::Name(_)));
        assert!(matches!(value.kind, ExprKind::Transition { .. }));
    }

    #[test]
    fn test_invalid_pair_key() {
        let err = parse("var x = {1: 2}").unwrap_err();
        assert!(matches!(err, ParseError::InvalidPairKey { .. }), "{err:?}");
        assert_eq!(err.span(), Span::new(9, 10));
    }

    #[test]
    fn test_transition_needs_names() {
        let err = parse("a -> 3").unwrap_err();
        assert!(matches!(err, ParseError::InvalidTransition { .. }), "{err:?}");
        let err = parse("f() -> b").unwrap_err();
        assert!(matches!(err, ParseError::InvalidTransition { .. }), "{err:?}");
    }

    #[test]
    fn test_array_and_literals() {
        let e = expr("[1, 0x1F, 0b10, 2.5, true, null, nil, 'c',\n]");
        let ExprKind::Array(items) = e.kind else {
            panic!("expected array");
        };
        assert_eq!(items.len(), 8);
        let kinds: Vec<_> = items[..4]
            .iter()
            .map(|item| match &item.kind {
                ExprKind::Literal(Literal::Number { kind, .. }) => *kind,
                other => panic!("expected number, got {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![NumberKind::Int, NumberKind::Hex, NumberKind::Bin, NumberKind::Float]
        );
        assert!(matches!(items[5].kind, ExprKind::Literal(Literal::Null)));
        assert!(matches!(items[6].kind, ExprKind::Literal(Literal::Nil)));
    }

    #[test]
    fn test_newline_ends_expression() {
        let program = parse_ok("a\n-b\nc");
        assert_eq!(program.statements.len(), 3);
        let program = parse_ok("x = (a\n- b)");
        assert_eq!(program.statements.len(), 1);
    }

    // === Strings ===

    #[test]
    fn test_formatted_string_parts() {
        let e = expr("f\"count: ${n+1}\"");
        let ExprKind::Literal(Literal::Str(lit)) = e.kind else {
            panic!("expected string");
        };
        assert_eq!(lit.form, StrForm::Formatted);
        assert_eq!(lit.parts.len(), 2);
        assert!(matches!(&lit.parts[0], StrPart::Text(text) if text == "count: "));
        let StrPart::Hole(Hole::Expr(hole)) = &lit.parts[1] else {
            panic!("expected expression hole");
        };
        assert!(matches!(hole.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));
        assert_eq!(hole.span, Span::new(11, 14));
    }

    #[test]
    fn test_name_hole_and_nested_string() {
        let e = expr("f`hi $user.name, ${ f\"${a}\" }`");
        let ExprKind::Literal(Literal::Str(lit)) = e.kind else {
            panic!("expected string");
        };
        assert!(matches!(&lit.parts[1], StrPart::Hole(Hole::Name(name)) if name.path() == "user.name"));
        let StrPart::Hole(Hole::Expr(inner)) = &lit.parts[3] else {
            panic!("expected expression hole");
        };
        assert!(matches!(inner.kind, ExprKind::Literal(Literal::Str(_))));
    }

    #[test]
    fn test_unterminated_formatted_string() {
        let err = parse("f\"unterminated").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Lexical);
        assert!(matches!(
            &err,
            ParseError::Lexical(LexError { kind: LexErrorKind::UnterminatedString, .. })
        ));
        assert_eq!(err.span().start, 0);
    }

    #[test]
    fn test_malformed_interpolation_is_syntax_error() {
        let err = parse("var s = f\"price $ 5\"").unwrap_err();
        assert!(matches!(err, ParseError::MalformedInterpolation { .. }), "{err:?}");
        assert_eq!(err.category(), ErrorCategory::Syntax);
        assert_eq!(err.span(), Span::new(16, 17));
    }

    #[test]
    fn test_earlier_syntax_error_wins_over_later_lexical_error() {
        let err = parse("var = 1\nvar y = \"open").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }), "{err:?}");

        let err = parse("var x = 1\nvar y = \"open").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Lexical);
    }

    // === Statements ===

    #[test]
    fn test_else_if_chain_is_one_node() {
        let stmt = single("if a { x } else if b { y } else { z }");
        let StatementKind::If(if_stmt) = stmt.kind else {
            panic!("expected if");
        };
        assert_eq!(name_of(&if_stmt.cond), "a");
        assert_eq!(if_stmt.then.statements.len(), 1);
        assert_eq!(if_stmt.else_ifs.len(), 1);
        assert_eq!(name_of(&if_stmt.else_ifs[0].cond), "b");
        assert_eq!(if_stmt.else_.map(|b| b.statements.len()), Some(1));
    }

    #[test]
    fn test_fn_body_is_block_var_value_is_object() {
        let stmt = single("fn f(a int, b) { a: 1 }");
        let StatementKind::Fn(func) = stmt.kind else {
            panic!("expected fn");
        };
        assert_eq!(func.params.len(), 2);
        assert!(func.params[0].ty.is_some());
        assert!(func.params[1].ty.is_none());
        assert!(matches!(func.body, FnBody::Block(ref b) if b.statements.len() == 1));

        let stmt = single("var x = { a: 1 }");
        let StatementKind::Var(var) = stmt.kind else {
            panic!("expected var");
        };
        assert!(matches!(var.value.kind, ExprKind::Object(ref entries) if entries.len() == 1));
    }

    #[test]
    fn test_fn_expression_body_and_return_type() {
        let stmt = single("fn double(x int) int = x * 2");
        let StatementKind::Fn(func) = stmt.kind else {
            panic!("expected fn");
        };
        assert!(matches!(
            func.ret,
            Some(TypeRef { kind: TypeRefKind::Primitive(PrimitiveType::Int), .. })
        ));
        assert!(matches!(func.body, FnBody::Expr(_)));
    }

    #[test]
    fn test_node_declaration() {
        let stmt = single("node Button(label str, onClick) { }");
        let StatementKind::Node(node) = stmt.kind else {
            panic!("expected node");
        };
        assert_eq!(node.name.path(), "Button");
        assert_eq!(node.props.len(), 2);
        assert!(matches!(
            node.props[0].ty,
            Some(TypeRef { kind: TypeRefKind::Primitive(PrimitiveType::Str), .. })
        ));
        assert!(node.props[1].ty.is_none());
        assert_eq!(node.body.map(|b| b.len()), Some(0));
    }

    #[test]
    fn test_node_body_entries() {
        let stmt = single("node Card(title) {\n  color: \"red\"\n  if wide { width: 3 }\n}");
        let StatementKind::Node(node) = stmt.kind else {
            panic!("expected node");
        };
        let body = node.body.unwrap();
        assert_eq!(body.len(), 2);
        assert!(matches!(body[1].kind, StatementKind::If(_)));

        let err = parse("node Card(title) { print(1) }").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNodeEntry { .. }), "{err:?}");
    }

    #[test]
    fn test_var_with_type_and_value_if() {
        let stmt = single("let size int = if big { 10 } else { 1 }");
        let StatementKind::Var(var) = stmt.kind else {
            panic!("expected var");
        };
        assert_eq!(var.binding, BindingKind::Let);
        assert_eq!(var.name.text, "size");
        assert!(var.ty.is_some());
        assert!(matches!(var.value.kind, ExprKind::If(_)));
    }

    #[test]
    fn test_assignment_targets() {
        let stmt = single("a.b = when x { is 1 -> 2\n else -> 3 }");
        let StatementKind::Assign { target, value } = stmt.kind else {
            panic!("expected assignment");
        };
        assert_eq!(target.path(), "a.b");
        assert!(matches!(value.kind, ExprKind::When(_)));

        let err = parse("f(x) = 1").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAssignTarget { .. }), "{err:?}");
    }

    #[test]
    fn test_for_forms() {
        let stmt = single("for var i = 0; i < 10 { print(i) }");
        let StatementKind::For(ForStmt { kind: ForKind::Counted { init, cond }, .. }) = stmt.kind
        else {
            panic!("expected counted for");
        };
        assert_eq!(init.len(), 1);
        assert!(matches!(cond, Some(Expr { kind: ExprKind::Comparison { .. }, .. })));

        let stmt = single("for i, item in items { print(item) }");
        let StatementKind::For(ForStmt { kind: ForKind::Iter { index, name, iterable }, .. }) =
            stmt.kind
        else {
            panic!("expected iterator for");
        };
        assert_eq!(index.map(|i| i.text), Some("i".to_string()));
        assert_eq!(name.text, "item");
        assert_eq!(name_of(&iterable), "items");

        let stmt = single("for { break }");
        assert!(matches!(
            stmt.kind,
            StatementKind::For(ForStmt { kind: ForKind::Counted { cond: None, .. }, .. })
        ));
    }

    #[test]
    fn test_when_cases() {
        let source = "when var y = f(); y {\n  is 1 -> print(\"one\")\n  is 2 { print(\"two\") }; is z -> break\n  else -> print(\"other\")\n}";
        let StatementKind::When(when) = single(source).kind else {
            panic!("expected when");
        };
        assert_eq!(when.init.len(), 1);
        assert_eq!(name_of(&when.check), "y");
        assert_eq!(when.cases.len(), 3);
        assert!(matches!(when.cases[0].body, CaseBody::Arrow(_)));
        assert!(matches!(when.cases[1].body, CaseBody::Block(_)));
        assert!(matches!(when.else_, Some(CaseBody::Arrow(_))));
    }

    #[test]
    fn test_when_pattern_stops_before_arrow() {
        let StatementKind::When(when) = single("when s { is idle -> go() }").kind else {
            panic!("expected when");
        };
        assert_eq!(name_of(&when.cases[0].pattern), "idle");
    }

    #[test]
    fn test_when_else_needs_separator() {
        let StatementKind::When(when) = single("when x { is 1 -> a; is 2 { b }; else -> c }").kind else {
            panic!("expected when");
        };
        assert_eq!(when.cases.len(), 2);
        assert!(matches!(when.else_, Some(CaseBody::Arrow(_))));

        let err = parse("when x { is 1 -> a; is 2 { b } else -> c }").unwrap_err();
        let ParseError::UnexpectedToken { found, span, .. } = err else {
            panic!("expected unexpected-token error, got {err:?}");
        };
        assert_eq!(found, "'else'");
        assert_eq!(span, Span::new(31, 35));
    }

    #[test]
    fn test_module_forms() {
        let program = parse_ok(
            "use std.io: print, println\nimport ui.theme(\"dark\")\nimport log\nmod app { ui { text(\"hi\") } }\nstyle { color: 1 }",
        );
        let kinds: Vec<_> = program.statements.iter().map(|s| &s.kind).collect();
        let StatementKind::Use(use_decl) = kinds[0] else {
            panic!("expected use");
        };
        assert_eq!(use_decl.path.path(), "std.io");
        assert_eq!(use_decl.subs.len(), 2);
        assert!(matches!(kinds[1], StatementKind::Import(ImportDecl { args: Some(a), .. }) if a.len() == 1));
        assert!(matches!(kinds[2], StatementKind::Import(ImportDecl { args: None, .. })));
        assert!(matches!(kinds[3], StatementKind::Mod { .. }));
        assert!(matches!(kinds[4], StatementKind::Style(_)));
    }

    #[test]
    fn test_type_and_enum() {
        let err = parse("type Point { x int }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));

        let StatementKind::Type(ty) = single("type Point { x: int, y: float }").kind else {
            panic!("expected type");
        };
        assert_eq!(ty.fields.len(), 2);

        let StatementKind::Enum(en) = single("enum Color {\n  Red\n  Green = 2; Blue\n}").kind else {
            panic!("expected enum");
        };
        assert_eq!(en.members.len(), 3);
        assert!(en.members[1].value.is_some());
    }

    #[test]
    fn test_soft_keywords_are_names_elsewhere() {
        let stmt = single("type = 3");
        assert!(matches!(stmt.kind, StatementKind::Assign { ref target, .. } if target.path() == "type"));

        let e = expr("node.style + mod");
        assert!(matches!(e.kind, ExprKind::Binary { .. }));

        let err = parse("x = if").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_primitive_types_only_in_type_positions() {
        let e = expr("int + str");
        assert!(matches!(e.kind, ExprKind::Binary { .. }));

        let StatementKind::Var(var) = single("var n u8 = 1").kind else {
            panic!("expected var");
        };
        assert!(matches!(
            var.ty,
            Some(TypeRef { kind: TypeRefKind::Primitive(PrimitiveType::U8), .. })
        ));
    }

    // === Ambiguity ===

    #[test]
    fn test_object_in_condition_is_ambiguous() {
        let err = parse("if x == {a: 1} { }").unwrap_err();
        assert!(matches!(err, ParseError::AmbiguousBrace { .. }), "{err:?}");
        assert_eq!(err.category(), ErrorCategory::Ambiguity);
        assert_eq!(err.span(), Span::new(8, 9));

        // Parentheses reset the context.
        parse_ok("if x == ({a: 1}) { }");
    }

    #[test]
    fn test_call_in_condition_leaves_brace_to_if() {
        let StatementKind::If(if_stmt) = single("if ready(x) { go() }").kind else {
            panic!("expected if");
        };
        assert!(matches!(if_stmt.cond.kind, ExprKind::Call { body: None, .. }));
        assert_eq!(if_stmt.then.statements.len(), 1);
    }

    #[test]
    fn test_statement_level_brace_is_object() {
        let e = expr("{a: 1, b: 2}");
        assert!(matches!(e.kind, ExprKind::Object(ref entries) if entries.len() == 2));
    }

    // === Separators and spans ===

    #[test]
    fn test_separators() {
        let program = parse_ok("a; b\nc;\n\n");
        assert_eq!(program.statements.len(), 3);
        let err = parse("a b").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert_eq!(err.span(), Span::new(2, 3));
    }

    #[test]
    fn test_statement_spans() {
        let source = "var x = 1\nfn f() { x }";
        let program = parse_ok(source);
        assert_eq!(program.statements[0].span.text(source), "var x = 1");
        assert_eq!(program.statements[1].span.text(source), "fn f() { x }");
    }

    #[test]
    fn test_missing_delimiter() {
        for (source, closer) in [("f(a, b", "')'"), ("[1, 2", "']'"), ("{a: 1", "'}'")] {
            let err = parse(source).unwrap_err();
            let ParseError::UnexpectedToken { expected, found, span } = err else {
                panic!("expected unexpected-token error for {source:?}, got {err:?}");
            };
            assert!(expected.contains(closer), "{source:?}: {expected}");
            assert_eq!(found, "end of file");
            assert_eq!(span, Span::point(source.len()));
        }
    }

    #[test]
    fn test_block_comments_are_trivia() {
        let StatementKind::Assign { target, value } = single("x = /* a **/ 1").kind else {
            panic!("expected assignment");
        };
        assert_eq!(target.segments[0].text, "x");
        assert!(matches!(value.kind, ExprKind::Literal(Literal::Number { .. })));
        assert!(parse_ok("// only\n/* c */").statements.is_empty());

        let program = parse_ok("a /* one\ntwo */ b");
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn test_unterminated_comment() {
        let err = parse("var x = 1 /* open").unwrap_err();
        assert!(matches!(
            &err,
            ParseError::Lexical(LexError { kind: LexErrorKind::UnterminatedComment, .. })
        ));
        assert_eq!(err.span(), Span::new(10, 12));
    }

    #[test]
    fn test_unterminated_hole_brace() {
        let err = parse("f\"${ {a\"").unwrap_err();
        assert!(matches!(
            &err,
            ParseError::Lexical(LexError { kind: LexErrorKind::UnterminatedString, .. })
        ));
        assert_eq!(err.span(), Span::new(0, 2));
    }
}
