//! Recursive descent parser: token cursor and shared helpers
//!
//! Expressions live in `expr.rs`, statements in `stmt.rs`; both extend
//! [`Parser`] with further `impl` blocks.

use auto_ast::*;
use auto_lexer::{Keyword, Token, TokenKind};

use crate::brace::BraceContext;
use crate::ParseError;

pub struct Parser<'a> {
    pub(crate) source: &'a str,
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    /// What a `{` in operand position means right now
    pub(crate) context: BraceContext,
    /// Whether a line break ends the current list element
    pub(crate) newline_sep: bool,
}

impl<'a> Parser<'a> {
    /// `tokens` must end with an `Eof` token.
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            context: BraceContext::ExpectValue,
            newline_sep: true,
        }
    }

    // === Utilities ===

    pub(crate) fn current(&self) -> Token {
        match self.tokens.get(self.pos).or(self.tokens.last()) {
            Some(token) => *token,
            None => Token {
                kind: TokenKind::Eof,
                span: Span::point(self.source.len()),
                newline_before: false,
            },
        }
    }

    pub(crate) fn peek(&self) -> TokenKind {
        self.current().kind
    }

    pub(crate) fn peek_token(&self, n: usize) -> Option<Token> {
        self.tokens.get(self.pos + n).copied()
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek())
    }

    /// The current token sits on a new line.
    pub(crate) fn at_line_start(&self) -> bool {
        self.current().newline_before
    }

    pub(crate) fn consume(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    pub(crate) fn text(&self, token: &Token) -> &'a str {
        token.text(self.source)
    }

    pub(crate) fn span(&self) -> Span {
        self.current().span
    }

    /// End of the most recently consumed token
    pub(crate) fn prev_end(&self) -> usize {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span.end,
            None => self.span().start,
        }
    }

    /// From `start` to the end of the last consumed token
    pub(crate) fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.prev_end().max(start.start))
    }

    pub(crate) fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let token = self.current();
        let found = match token.kind {
            TokenKind::Ident => format!("'{}'", self.text(&token)),
            kind => kind.describe().to_string(),
        };
        ParseError::unexpected(expected, found, token.span)
    }

    // === Keywords ===

    pub(crate) fn keyword(&self) -> Option<Keyword> {
        self.keyword_of(&self.current())
    }

    pub(crate) fn keyword_of(&self, token: &Token) -> Option<Keyword> {
        match token.kind {
            TokenKind::Ident => Keyword::classify(self.text(token)),
            _ => None,
        }
    }

    pub(crate) fn at_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }

    pub(crate) fn consume_keyword(&mut self, keyword: Keyword) -> Result<Token, ParseError> {
        if self.at_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(format!("'{}'", keyword.as_str())))
        }
    }

    /// Run `f` with a different brace context and newline policy, restoring
    /// both afterwards.
    pub(crate) fn scoped<T>(
        &mut self,
        context: BraceContext,
        newline_sep: bool,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = (self.context, self.newline_sep);
        self.context = context;
        self.newline_sep = newline_sep;
        let result = f(self);
        (self.context, self.newline_sep) = saved;
        result
    }

    /// Parse `item`s separated by any of `seps` or by line breaks, with an
    /// optional trailing separator, stopping before `close`.
    pub(crate) fn parse_separated<T>(
        &mut self,
        seps: &[TokenKind],
        close: TokenKind,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        while !self.at(close) {
            items.push(item(self)?);
            if self.at_any(seps) {
                self.advance();
            } else if !self.at(close) && !self.at_line_start() {
                let expected = seps
                    .iter()
                    .chain(std::iter::once(&close))
                    .map(|kind| kind.describe())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(self.unexpected(format!("{expected} or a line break")));
            }
        }
        Ok(items)
    }

    // === Program ===

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let start = self.span();
        let statements = self.scoped(BraceContext::ExpectValue, true, |p| {
            p.parse_separated(&[TokenKind::Semicolon], TokenKind::Eof, Self::parse_statement)
        })?;
        let end = self.span();
        Ok(Program {
            statements,
            span: Span::new(0, end.end.max(start.start)),
        })
    }

    // === Names and types ===

    pub(crate) fn parse_ident(&mut self) -> Result<Ident, ParseError> {
        let token = self.consume(TokenKind::Ident)?;
        Ok(Ident::new(self.text(&token), token.span))
    }

    /// `a`, `a.b.c` or `.a.b`. Dots continue a name only on the same line.
    pub(crate) fn parse_name(&mut self) -> Result<Name, ParseError> {
        let start = self.span();
        let relative = if self.at(TokenKind::Dot) {
            self.advance();
            true
        } else {
            false
        };

        let mut segments = vec![self.parse_ident()?];
        while self.at(TokenKind::Dot)
            && !self.at_line_start()
            && self
                .peek_token(1)
                .is_some_and(|t| t.kind == TokenKind::Ident && !t.newline_before)
        {
            self.advance();
            segments.push(self.parse_ident()?);
        }

        Ok(Name {
            relative,
            segments,
            span: self.span_from(start),
        })
    }

    pub(crate) fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        let token = self.current();
        if token.kind == TokenKind::Ident {
            if let Some(primitive) = PrimitiveType::from_keyword(self.text(&token)) {
                self.advance();
                return Ok(TypeRef {
                    kind: TypeRefKind::Primitive(primitive),
                    span: token.span,
                });
            }
        }
        if !self.at_any(&[TokenKind::Ident, TokenKind::Dot]) {
            return Err(self.unexpected("type"));
        }
        let name = self.parse_name()?;
        Ok(TypeRef {
            span: name.span,
            kind: TypeRefKind::Named(name),
        })
    }

    /// An optional type annotation: a name on the same line.
    pub(crate) fn parse_type_annotation(&mut self) -> Result<Option<TypeRef>, ParseError> {
        if self.at(TokenKind::Ident) && !self.at_line_start() {
            Ok(Some(self.parse_type()?))
        } else {
            Ok(None)
        }
    }
}
