//! Expression parsing: precedence climbing over [`crate::precedence::INFIX`]

use auto_ast::*;
use auto_lexer::{decode, tokenize_range, HoleKind, HoleSpan, Keyword, RawPart, TokenKind};
use tracing::{debug, trace};

use crate::brace::{self, BraceContext, BracePosition, BraceRole};
use crate::precedence::{self, InfixOp, OpInfo, Prec};
use crate::{ParseError, Parser};

impl<'a> Parser<'a> {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_bp(Prec::Group)
    }

    /// A value position, which also admits `if` and `when`.
    pub(crate) fn parse_value(&mut self) -> Result<Expr, ParseError> {
        self.parse_value_bp(Prec::Group)
    }

    fn parse_value_bp(&mut self, min: Prec) -> Result<Expr, ParseError> {
        let start = self.span();
        match self.keyword() {
            Some(Keyword::If) => {
                let stmt = self.parse_if()?;
                Ok(Expr::new(ExprKind::If(Box::new(stmt)), self.span_from(start)))
            }
            Some(Keyword::When) => {
                let stmt = self.parse_when()?;
                Ok(Expr::new(ExprKind::When(Box::new(stmt)), self.span_from(start)))
            }
            _ => self.parse_expr_bp(min),
        }
    }

    /// Condition of `if`, `for` or `when`: its `{` opens the body.
    pub(crate) fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        let newline_sep = self.newline_sep;
        self.scoped(BraceContext::ExpectBlock, newline_sep, Self::parse_expr)
    }

    /// Parse operators binding at least as tightly as `min`.
    pub(crate) fn parse_expr_bp(&mut self, min: Prec) -> Result<Expr, ParseError> {
        let mut left = self.parse_prefix()?;

        loop {
            let token = self.current();
            if token.newline_before && self.newline_sep {
                break;
            }
            let Some(info) = precedence::infix(token.kind) else {
                break;
            };
            if info.prec < min {
                break;
            }
            trace!(pos = self.pos, op = ?info.op, prec = ?info.prec, "infix");
            left = self.parse_infix(left, info)?;
        }

        Ok(left)
    }

    fn parse_infix(&mut self, left: Expr, info: OpInfo) -> Result<Expr, ParseError> {
        let right_min = precedence::right_operand_min(info);
        match info.op {
            InfixOp::Binary(op) => {
                self.advance();
                let right = self.parse_expr_bp(right_min)?;
                let span = left.span.merge(right.span);
                Ok(Expr::new(
                    ExprKind::Binary {
                        op,
                        assoc: info.assoc,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                ))
            }
            InfixOp::Compare(op) => {
                self.advance();
                let right = self.parse_expr_bp(right_min)?;
                let span = left.span.merge(right.span);
                Ok(Expr::new(
                    ExprKind::Comparison {
                        op,
                        assoc: info.assoc,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                ))
            }
            InfixOp::Pair => {
                let span = left.span;
                let key = pair_key(left)?;
                self.advance();
                // A pair's value may itself be a transition: `state: idle -> busy`.
                let value = self.parse_value_bp(Prec::Transition)?;
                let span = span.merge(value.span);
                Ok(Expr::new(
                    ExprKind::Pair {
                        key,
                        value: Box::new(value),
                    },
                    span,
                ))
            }
            InfixOp::Transition => {
                let ExprKind::Name(src) = left.kind else {
                    return Err(ParseError::InvalidTransition { span: left.span });
                };
                self.advance();
                if !self.at_any(&[TokenKind::Ident, TokenKind::Dot]) {
                    return Err(ParseError::InvalidTransition { span: self.span() });
                }
                let dst = self.parse_name()?;
                let span = left.span.merge(dst.span);
                Ok(Expr::new(ExprKind::Transition { src, dst }, span))
            }
            InfixOp::Call => self.parse_call(left),
        }
    }

    fn parse_call(&mut self, callee: Expr) -> Result<Expr, ParseError> {
        let args = self.parse_args()?;

        let mut body = None;
        if self.at(TokenKind::LBrace) {
            let position = BracePosition::AfterCall {
                same_line: !self.at_line_start(),
            };
            if brace::resolve(self.context, position) == BraceRole::TrailingBlock {
                body = Some(self.parse_block()?);
            }
        }

        let span = self.span_from(callee.span);
        Ok(Expr::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
                body,
            },
            span,
        ))
    }

    /// `( expr, ... )`
    pub(crate) fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.consume(TokenKind::LParen)?;
        let args = self.scoped(BraceContext::ExpectValue, true, |p| {
            p.parse_separated(&[TokenKind::Comma], TokenKind::RParen, Self::parse_expr)
        })?;
        self.consume(TokenKind::RParen)?;
        Ok(args)
    }

    // === Operands ===

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let token = self.current();
        let start = token.span;
        trace!(pos = self.pos, kind = token.kind.describe(), "prefix");

        if let Some(op) = precedence::prefix(token.kind) {
            self.advance();
            let operand = self.parse_expr_bp(Prec::Unary)?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span,
            ));
        }

        match token.kind {
            TokenKind::Ident => {
                let literal = match self.keyword() {
                    Some(Keyword::True) => Literal::True,
                    Some(Keyword::False) => Literal::False,
                    Some(Keyword::Null) => Literal::Null,
                    Some(Keyword::Nil) => Literal::Nil,
                    Some(keyword) if !keyword.is_soft() => {
                        return Err(self.unexpected("expression"));
                    }
                    _ => {
                        let name = self.parse_name()?;
                        let span = name.span;
                        return Ok(Expr::new(ExprKind::Name(name), span));
                    }
                };
                self.advance();
                Ok(Expr::new(ExprKind::Literal(literal), start))
            }
            TokenKind::Dot => {
                let name = self.parse_name()?;
                let span = name.span;
                Ok(Expr::new(ExprKind::Name(name), span))
            }
            TokenKind::Number(kind) => {
                self.advance();
                let raw = self.text(&token).to_string();
                Ok(Expr::new(ExprKind::Literal(Literal::Number { kind, raw }), start))
            }
            TokenKind::Str | TokenKind::MStr | TokenKind::FStr => {
                let lit = self.parse_string_literal()?;
                Ok(Expr::new(ExprKind::Literal(Literal::Str(lit)), start))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.scoped(BraceContext::ExpectValue, false, Self::parse_expr)?;
                self.consume(TokenKind::RParen)?;
                Ok(Expr::new(ExprKind::Group(Box::new(inner)), self.span_from(start)))
            }
            TokenKind::LBracket => {
                self.advance();
                let elements = self.scoped(BraceContext::ExpectValue, true, |p| {
                    p.parse_separated(&[TokenKind::Comma], TokenKind::RBracket, Self::parse_value)
                })?;
                self.consume(TokenKind::RBracket)?;
                Ok(Expr::new(ExprKind::Array(elements), self.span_from(start)))
            }
            TokenKind::LBrace => match brace::resolve(self.context, BracePosition::Operand) {
                BraceRole::Object => self.parse_object(),
                _ => Err(ParseError::AmbiguousBrace { span: start }),
            },
            _ => Err(self.unexpected("expression")),
        }
    }

    /// `{ entry, entry }`, where entries are statements
    fn parse_object(&mut self) -> Result<Expr, ParseError> {
        let start = self.span();
        self.consume(TokenKind::LBrace)?;
        let entries = self.scoped(BraceContext::ExpectValue, true, |p| {
            p.parse_separated(&[TokenKind::Comma], TokenKind::RBrace, Self::parse_statement)
        })?;
        self.consume(TokenKind::RBrace)?;
        Ok(Expr::new(ExprKind::Object(entries), self.span_from(start)))
    }

    // === Strings ===

    pub(crate) fn parse_string_literal(&mut self) -> Result<StrLit, ParseError> {
        let token = self.advance();
        if !token.kind.is_string() {
            return Err(ParseError::unexpected("string", token.kind.describe(), token.span));
        }
        let decoded = decode(self.text(&token), token.span.start).map_err(ParseError::from_literal)?;

        let mut parts = Vec::with_capacity(decoded.parts.len());
        for part in decoded.parts {
            match part {
                RawPart::Text(text) => parts.push(StrPart::Text(text)),
                RawPart::Hole(hole) => parts.push(StrPart::Hole(self.parse_hole(hole)?)),
            }
        }

        Ok(StrLit {
            form: decoded.form,
            parts,
            span: token.span,
        })
    }

    /// Re-enter the parser on a hole's source range.
    fn parse_hole(&self, hole: HoleSpan) -> Result<Hole, ParseError> {
        debug!(start = hole.inner.start, end = hole.inner.end, kind = ?hole.kind, "interpolation hole");
        let tokens = tokenize_range(self.source, hole.inner.start, hole.inner.end)?;
        let mut inner = Parser::new(self.source, tokens);

        let result = match hole.kind {
            HoleKind::Name => Hole::Name(inner.parse_name()?),
            HoleKind::Expr => {
                let expr = inner.scoped(BraceContext::ExpectValue, false, Self::parse_value)?;
                Hole::Expr(Box::new(expr))
            }
        };
        inner.consume(TokenKind::Eof)?;
        Ok(result)
    }
}

fn pair_key(left: Expr) -> Result<PairKey, ParseError> {
    match left.kind {
        ExprKind::Name(name) => Ok(PairKey::Name(name)),
        ExprKind::Literal(Literal::Str(lit)) if lit.form != StrForm::Multiline => {
            Ok(PairKey::Str(lit))
        }
        _ => Err(ParseError::InvalidPairKey { span: left.span }),
    }
}
