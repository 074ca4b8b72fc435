//! Parser error types

use auto_ast::Span;
use auto_lexer::{LexError, LexErrorKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexError),

    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("invalid expression: {reason}")]
    InvalidExpression { reason: String, span: Span },

    #[error("malformed interpolation: expected a name or '{{' after '$'")]
    MalformedInterpolation { span: Span },

    #[error("invalid pair key: expected a name or a string")]
    InvalidPairKey { span: Span },

    #[error("invalid transition: both sides of '->' must be names")]
    InvalidTransition { span: Span },

    #[error("invalid assignment target: only a name can be assigned")]
    InvalidAssignTarget { span: Span },

    #[error("invalid node entry: expected a 'key: value' pair or an 'if'")]
    InvalidNodeEntry { span: Span },

    #[error("ambiguous '{{': a block is expected here; wrap an object literal in parentheses")]
    AmbiguousBrace { span: Span },
}

/// Coarse error classes, one per way a parse can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Ambiguity,
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lexical(err) => err.span,
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::InvalidExpression { span, .. } => *span,
            ParseError::MalformedInterpolation { span } => *span,
            ParseError::InvalidPairKey { span } => *span,
            ParseError::InvalidTransition { span } => *span,
            ParseError::InvalidAssignTarget { span } => *span,
            ParseError::InvalidNodeEntry { span } => *span,
            ParseError::AmbiguousBrace { span } => *span,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ParseError::Lexical(_) => ErrorCategory::Lexical,
            ParseError::AmbiguousBrace { .. } => ErrorCategory::Ambiguity,
            _ => ErrorCategory::Syntax,
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    /// A lexical error from inside a string literal. A bad `$` is a syntax
    /// error rather than a lexical one.
    pub(crate) fn from_literal(err: LexError) -> Self {
        match err.kind {
            LexErrorKind::MalformedInterpolation => {
                ParseError::MalformedInterpolation { span: err.span }
            }
            _ => ParseError::Lexical(err),
        }
    }
}
