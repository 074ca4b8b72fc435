//! Lexical errors

use auto_ast::Span;
use thiserror::Error;

/// What went wrong while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
pub enum LexErrorKind {
    #[default]
    #[error("unrecognized character")]
    UnrecognizedCharacter,

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated block comment")]
    UnterminatedComment,

    #[error("malformed number literal")]
    MalformedNumber,

    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),

    #[error("malformed interpolation: expected a name or '{{' after '$'")]
    MalformedInterpolation,
}

/// A lexical error and the source range it covers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}
