//! Auto Lexer - Tokenization using logos
//!
//! Turns source text into tokens with byte spans. A few things beyond what
//! the token patterns do:
//! - every token records whether a line break precedes it, since newlines
//!   separate statements and list entries
//! - string tokens cover the whole literal; [`decode`] splits them into parts
//! - keywords are lexed as identifiers and classified with [`Keyword`]

mod error;
mod keyword;
mod literal;
mod number;
mod token;

pub use error::*;
pub use keyword::*;
pub use literal::{decode, DecodedStr, HoleKind, HoleSpan, RawPart};
pub use token::*;

use auto_ast::Span;
use logos::Logos;

/// A token with its span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A line break occurs between the previous token and this one.
    pub newline_before: bool,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }
}

/// Lazy token stream over a source string or a range of it.
///
/// Yields tokens in order, then a single `Eof`, then nothing. Stops after
/// the first error.
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, TokenKind>,
    offset: usize,
    end: usize,
    prev_end: usize,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_range(source, 0, source.len())
    }

    /// Start scanning at `offset`; spans stay relative to the whole source.
    pub fn at_offset(source: &'src str, offset: usize) -> Self {
        Self::with_range(source, offset, source.len())
    }

    /// Scan only `source[start..end]`, reporting absolute spans.
    pub fn with_range(source: &'src str, start: usize, end: usize) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(&source[start..end]),
            offset: start,
            end,
            prev_end: start,
            done: false,
        }
    }

    fn newline_since_prev(&self, start: usize) -> bool {
        self.source[self.prev_end..start].contains('\n')
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next() {
            Some(result) => {
                let range = self.inner.span();
                let span = Span::new(range.start + self.offset, range.end + self.offset);
                match result {
                    Ok(kind) => {
                        let token = Token {
                            kind,
                            span,
                            newline_before: self.newline_since_prev(span.start),
                        };
                        self.prev_end = span.end;
                        Some(Ok(token))
                    }
                    Err(kind) => {
                        self.done = true;
                        Some(Err(LexError::new(kind, span)))
                    }
                }
            }
            None => {
                self.done = true;
                Some(Ok(Token {
                    kind: TokenKind::Eof,
                    span: Span::point(self.end),
                    newline_before: self.newline_since_prev(self.end),
                }))
            }
        }
    }
}

/// Tokenize a whole source string, ending with `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}

/// Tokenize `source[start..end]` with absolute spans, ending with `Eof`.
pub fn tokenize_range(source: &str, start: usize, end: usize) -> Result<Vec<Token>, LexError> {
    Lexer::with_range(source, start, end).collect()
}
