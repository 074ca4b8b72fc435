//! Token definitions for Auto

use logos::{FilterResult, Logos};
use auto_ast::NumberKind;

use crate::{literal, number, LexErrorKind};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]                    // Skip whitespace
#[logos(skip r"//[^\n]*")]                         // Skip line comments
pub enum TokenKind {
    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // === Punctuation ===
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // === Operators ===
    #[token("=")]
    Assign,
    #[token("==")]
    EqEq,
    #[token("!=")]
    Ne,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("!")]
    Bang,
    #[token("->")]
    Arrow,

    // === Literals ===
    /// Any numeric literal. The broad pattern is narrowed by
    /// [`number::classify`], which rejects malformed runs.
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9_]*)?[a-zA-Z0-9_$]*", |lex| number::classify(lex.slice()))]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9_]*)?[a-zA-Z0-9_$]*", |lex| number::classify(lex.slice()))]
    Number(NumberKind),

    /// `"..."` or `'...'`
    #[token("\"", |lex| literal::scan_quoted(lex, "\"", false))]
    #[token("'", |lex| literal::scan_quoted(lex, "'", false))]
    Str,

    /// ```` ```...``` ````
    #[token("```", literal::scan_multiline)]
    MStr,

    /// `f"..."`, `f"""..."""` or `` f`...` ``
    #[token("f\"", |lex| literal::scan_quoted(lex, "\"", true))]
    #[token("f\"\"\"", |lex| literal::scan_quoted(lex, "\"\"\"", true))]
    #[token("f`", |lex| literal::scan_quoted(lex, "`", true))]
    FStr,

    // === Identifiers ===
    /// Identifiers and every keyword; see [`crate::Keyword`].
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    /// Never produced: block comments are skipped by [`block_comment`].
    #[token("/*", block_comment)]
    BlockComment,

    // === Special ===
    Eof,
}

impl TokenKind {
    pub fn is_string(&self) -> bool {
        matches!(self, TokenKind::Str | TokenKind::MStr | TokenKind::FStr)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Dot => "'.'",
            TokenKind::Assign => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::Ne => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Bang => "'!'",
            TokenKind::Arrow => "'->'",
            TokenKind::Number(NumberKind::Int) => "integer",
            TokenKind::Number(NumberKind::Bin) => "binary integer",
            TokenKind::Number(NumberKind::Hex) => "hex integer",
            TokenKind::Number(NumberKind::Float) => "float",
            TokenKind::Str => "string",
            TokenKind::MStr => "multi-line string",
            TokenKind::FStr => "formatted string",
            TokenKind::Ident => "identifier",
            TokenKind::BlockComment => "'/*'",
            TokenKind::Eof => "end of file",
        }
    }
}

/// Skip a `/* ... */` comment up to the first `*/`.
///
/// Leaves the lexer on the opener when there is no closer.
fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> FilterResult<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(at) => {
            lex.bump(at + 2);
            FilterResult::Skip
        }
        None => FilterResult::Error(LexErrorKind::UnterminatedComment),
    }
}
