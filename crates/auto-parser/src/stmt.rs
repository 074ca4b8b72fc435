//! Statement parsing

use auto_ast::*;
use auto_lexer::{Keyword, TokenKind};
use tracing::debug;

use crate::brace::BraceContext;
use crate::precedence::Prec;
use crate::{ParseError, Parser};

impl<'a> Parser<'a> {
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let start = self.span();
        let keyword = self.statement_keyword();
        debug!(pos = self.pos, kind = self.peek().describe(), keyword = ?keyword, "parse_statement");

        let kind = match keyword {
            Some(Keyword::Mod) => {
                self.advance();
                let name = self.parse_name()?;
                let body = self.parse_block()?;
                StatementKind::Mod { name, body }
            }
            Some(Keyword::Use) => StatementKind::Use(self.parse_use()?),
            Some(Keyword::Import) => StatementKind::Import(self.parse_import()?),
            Some(Keyword::Var | Keyword::Let) => StatementKind::Var(self.parse_var_decl()?),
            Some(Keyword::Fn) => StatementKind::Fn(self.parse_fn()?),
            Some(Keyword::Node) => StatementKind::Node(self.parse_node()?),
            Some(Keyword::If) => StatementKind::If(self.parse_if()?),
            Some(Keyword::For) => StatementKind::For(self.parse_for()?),
            Some(Keyword::When) => StatementKind::When(self.parse_when()?),
            Some(Keyword::Ui) => {
                self.advance();
                StatementKind::Ui(self.parse_block()?)
            }
            Some(Keyword::Style) => {
                self.advance();
                StatementKind::Style(self.parse_block()?)
            }
            Some(Keyword::Type) => StatementKind::Type(self.parse_type_decl()?),
            Some(Keyword::Enum) => StatementKind::Enum(self.parse_enum_decl()?),
            Some(Keyword::Break) => {
                self.advance();
                StatementKind::Break
            }
            _ => self.parse_expr_statement()?,
        };

        Ok(Statement {
            kind,
            span: self.span_from(start),
        })
    }

    /// The keyword introducing the statement at the cursor, if any.
    ///
    /// Soft keywords only count when the next token on the same line has the
    /// shape their statement needs.
    fn statement_keyword(&self) -> Option<Keyword> {
        let keyword = self.keyword()?;
        let next_is = |kind: TokenKind| {
            self.peek_token(1)
                .is_some_and(|t| t.kind == kind && !t.newline_before)
        };
        match keyword {
            Keyword::Var
            | Keyword::Let
            | Keyword::Fn
            | Keyword::If
            | Keyword::For
            | Keyword::When
            | Keyword::Break => Some(keyword),
            Keyword::Mod
            | Keyword::Use
            | Keyword::Import
            | Keyword::Node
            | Keyword::Type
            | Keyword::Enum => next_is(TokenKind::Ident).then_some(keyword),
            Keyword::Ui | Keyword::Style => next_is(TokenKind::LBrace).then_some(keyword),
            _ => None,
        }
    }

    /// An expression statement, or an assignment when `=` follows a name.
    fn parse_expr_statement(&mut self) -> Result<StatementKind, ParseError> {
        let expr = self.parse_expr()?;
        if !self.at(TokenKind::Assign) {
            return Ok(StatementKind::Expr(expr));
        }

        let ExprKind::Name(target) = expr.kind else {
            return Err(ParseError::InvalidAssignTarget { span: expr.span });
        };
        self.advance();
        let value = self.parse_value()?;
        Ok(StatementKind::Assign { target, value })
    }

    /// `{ stmt; stmt }`
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let start = self.span();
        self.consume(TokenKind::LBrace)?;
        let statements = self.scoped(BraceContext::ExpectValue, true, |p| {
            p.parse_separated(&[TokenKind::Semicolon], TokenKind::RBrace, Self::parse_statement)
        })?;
        self.consume(TokenKind::RBrace)?;

        Ok(Block {
            statements,
            span: self.span_from(start),
        })
    }

    // === Declarations ===

    fn parse_use(&mut self) -> Result<UseDecl, ParseError> {
        let start = self.span();
        self.consume_keyword(Keyword::Use)?;
        let path = self.parse_name()?;

        let mut subs = Vec::new();
        if self.at(TokenKind::Colon) && !self.at_line_start() {
            self.advance();
            subs.push(self.parse_name()?);
            while self.at(TokenKind::Comma) {
                self.advance();
                subs.push(self.parse_name()?);
            }
        }

        Ok(UseDecl {
            path,
            subs,
            span: self.span_from(start),
        })
    }

    fn parse_import(&mut self) -> Result<ImportDecl, ParseError> {
        let start = self.span();
        self.consume_keyword(Keyword::Import)?;
        let path = self.parse_name()?;

        let args = if self.at(TokenKind::LParen) && !self.at_line_start() {
            Some(self.parse_args()?)
        } else {
            None
        };

        Ok(ImportDecl {
            path,
            args,
            span: self.span_from(start),
        })
    }

    /// `var x = 1`, `let name str = "a"`
    pub(crate) fn parse_var_decl(&mut self) -> Result<VarDecl, ParseError> {
        let start = self.span();
        let binding = match self.keyword() {
            Some(Keyword::Var) => BindingKind::Var,
            Some(Keyword::Let) => BindingKind::Let,
            _ => return Err(self.unexpected("'var' or 'let'")),
        };
        self.advance();

        let name = self.parse_ident()?;
        let ty = self.parse_type_annotation()?;
        self.consume(TokenKind::Assign)?;
        let value = self.parse_value()?;

        Ok(VarDecl {
            binding,
            name,
            ty,
            value,
            span: self.span_from(start),
        })
    }

    fn parse_fn(&mut self) -> Result<FnDecl, ParseError> {
        let start = self.span();
        self.consume_keyword(Keyword::Fn)?;
        let name = self.parse_name()?;

        self.consume(TokenKind::LParen)?;
        let params = self.scoped(BraceContext::ExpectValue, true, |p| {
            p.parse_separated(&[TokenKind::Comma], TokenKind::RParen, Self::parse_param)
        })?;
        self.consume(TokenKind::RParen)?;

        let ret = self.parse_type_annotation()?;

        let body = if self.at(TokenKind::Assign) {
            self.advance();
            FnBody::Expr(self.parse_expr()?)
        } else {
            FnBody::Block(self.parse_block()?)
        };

        Ok(FnDecl {
            name,
            params,
            ret,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let start = self.span();
        let name = self.parse_ident()?;
        let ty = self.parse_type_annotation()?;
        Ok(Param {
            name,
            ty,
            span: self.span_from(start),
        })
    }

    /// `node Name(prop type, prop) { key: value, if c { ... } }`
    fn parse_node(&mut self) -> Result<NodeDecl, ParseError> {
        let start = self.span();
        self.consume_keyword(Keyword::Node)?;
        let name = self.parse_name()?;

        self.consume(TokenKind::LParen)?;
        let props = self.scoped(BraceContext::ExpectValue, true, |p| {
            p.parse_separated(&[TokenKind::Comma], TokenKind::RParen, Self::parse_prop)
        })?;
        self.consume(TokenKind::RParen)?;

        let body = if self.at(TokenKind::LBrace) && !self.at_line_start() {
            self.advance();
            let entries = self.scoped(BraceContext::ExpectValue, true, |p| {
                p.parse_separated(&[TokenKind::Comma], TokenKind::RBrace, Self::parse_node_entry)
            })?;
            self.consume(TokenKind::RBrace)?;
            Some(entries)
        } else {
            None
        };

        Ok(NodeDecl {
            name,
            props,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_prop(&mut self) -> Result<Prop, ParseError> {
        let start = self.span();
        let name = self.parse_name()?;
        let ty = self.parse_type_annotation()?;
        Ok(Prop {
            name,
            ty,
            span: self.span_from(start),
        })
    }

    fn parse_node_entry(&mut self) -> Result<Statement, ParseError> {
        let start = self.span();
        if self.at_keyword(Keyword::If) {
            let stmt = self.parse_if()?;
            return Ok(Statement {
                kind: StatementKind::If(stmt),
                span: self.span_from(start),
            });
        }

        let expr = self.parse_expr()?;
        if !matches!(expr.kind, ExprKind::Pair { .. }) {
            return Err(ParseError::InvalidNodeEntry { span: expr.span });
        }
        Ok(Statement {
            span: expr.span,
            kind: StatementKind::Expr(expr),
        })
    }

    /// `type Point { x: int, y: int }`
    fn parse_type_decl(&mut self) -> Result<TypeDecl, ParseError> {
        let start = self.span();
        self.consume_keyword(Keyword::Type)?;
        let name = self.parse_ident()?;

        self.consume(TokenKind::LBrace)?;
        let fields = self.scoped(BraceContext::ExpectValue, true, |p| {
            p.parse_separated(
                &[TokenKind::Comma, TokenKind::Semicolon],
                TokenKind::RBrace,
                |p| {
                    let start = p.span();
                    let name = p.parse_ident()?;
                    p.consume(TokenKind::Colon)?;
                    let ty = p.parse_type()?;
                    Ok(FieldDecl {
                        name,
                        ty,
                        span: p.span_from(start),
                    })
                },
            )
        })?;
        self.consume(TokenKind::RBrace)?;

        Ok(TypeDecl {
            name,
            fields,
            span: self.span_from(start),
        })
    }

    /// `enum Color { Red, Green = 2 }`
    fn parse_enum_decl(&mut self) -> Result<EnumDecl, ParseError> {
        let start = self.span();
        self.consume_keyword(Keyword::Enum)?;
        let name = self.parse_ident()?;

        self.consume(TokenKind::LBrace)?;
        let members = self.scoped(BraceContext::ExpectValue, true, |p| {
            p.parse_separated(
                &[TokenKind::Comma, TokenKind::Semicolon],
                TokenKind::RBrace,
                |p| {
                    let start = p.span();
                    let name = p.parse_ident()?;
                    let value = if p.at(TokenKind::Assign) {
                        p.advance();
                        Some(p.parse_expr()?)
                    } else {
                        None
                    };
                    Ok(EnumMember {
                        name,
                        value,
                        span: p.span_from(start),
                    })
                },
            )
        })?;
        self.consume(TokenKind::RBrace)?;

        Ok(EnumDecl {
            name,
            members,
            span: self.span_from(start),
        })
    }

    // === Control flow ===

    /// `if c { } else if d { } else { }`, flattened into one node.
    pub(crate) fn parse_if(&mut self) -> Result<IfStmt, ParseError> {
        let start = self.span();
        self.consume_keyword(Keyword::If)?;
        let cond = self.parse_condition()?;
        let then = self.parse_block()?;

        let mut else_ifs = Vec::new();
        let mut else_ = None;
        // An `else` followed by `->` closes a `when`, not this chain.
        while self.at_keyword(Keyword::Else)
            && self.peek_token(1).is_some_and(|t| t.kind != TokenKind::Arrow)
        {
            let else_start = self.span();
            self.advance();
            if self.at_keyword(Keyword::If) {
                self.advance();
                let cond = self.parse_condition()?;
                let then = self.parse_block()?;
                else_ifs.push(ElseIf {
                    cond,
                    then,
                    span: self.span_from(else_start),
                });
            } else {
                else_ = Some(self.parse_block()?);
                break;
            }
        }

        Ok(IfStmt {
            cond,
            then,
            else_ifs,
            else_,
            span: self.span_from(start),
        })
    }

    fn parse_for(&mut self) -> Result<ForStmt, ParseError> {
        let start = self.span();
        self.consume_keyword(Keyword::For)?;

        let kind = if self.at_iter_head() {
            let first = self.parse_ident()?;
            let (index, name) = if self.at(TokenKind::Comma) {
                self.advance();
                (Some(first), self.parse_ident()?)
            } else {
                (None, first)
            };
            self.consume_keyword(Keyword::In)?;
            let newline_sep = self.newline_sep;
            let iterable = self.scoped(BraceContext::ExpectBlock, newline_sep, Self::parse_value)?;
            ForKind::Iter {
                index,
                name,
                iterable,
            }
        } else {
            let init = self.parse_init_decls()?;
            let cond = if self.at(TokenKind::LBrace) {
                None
            } else {
                Some(self.parse_condition()?)
            };
            ForKind::Counted { init, cond }
        };

        let body = self.parse_block()?;
        Ok(ForStmt {
            kind,
            body,
            span: self.span_from(start),
        })
    }

    /// `i in` or `i, x in`
    fn at_iter_head(&self) -> bool {
        if !self.at(TokenKind::Ident) || matches!(self.keyword(), Some(Keyword::Var | Keyword::Let)) {
            return false;
        }
        match self.peek_token(1) {
            Some(next) if next.kind == TokenKind::Comma => true,
            Some(next) => self.keyword_of(&next) == Some(Keyword::In),
            None => false,
        }
    }

    /// `(var x = v;)*` heading a counted `for` or a `when`
    fn parse_init_decls(&mut self) -> Result<Vec<VarDecl>, ParseError> {
        let mut init = Vec::new();
        while matches!(self.keyword(), Some(Keyword::Var | Keyword::Let)) {
            let newline_sep = self.newline_sep;
            init.push(self.scoped(BraceContext::ExpectBlock, newline_sep, Self::parse_var_decl)?);
            self.consume(TokenKind::Semicolon)?;
        }
        Ok(init)
    }

    /// `when x { is 1 -> a; is 2 { b }; else -> c }`
    pub(crate) fn parse_when(&mut self) -> Result<WhenStmt, ParseError> {
        let start = self.span();
        self.consume_keyword(Keyword::When)?;
        let init = self.parse_init_decls()?;
        let check = self.parse_condition()?;

        self.consume(TokenKind::LBrace)?;
        let (cases, else_) = self.scoped(BraceContext::ExpectValue, true, Self::parse_when_cases)?;
        self.consume(TokenKind::RBrace)?;

        Ok(WhenStmt {
            init,
            check,
            cases,
            else_,
            span: self.span_from(start),
        })
    }

    fn parse_when_cases(&mut self) -> Result<(Vec<WhenCase>, Option<CaseBody>), ParseError> {
        let mut cases = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.at_keyword(Keyword::Else) {
                self.advance();
                let body = self.parse_case_body()?;
                if self.at(TokenKind::Semicolon) {
                    self.advance();
                }
                if !self.at(TokenKind::RBrace) {
                    return Err(self.unexpected(TokenKind::RBrace.describe()));
                }
                return Ok((cases, Some(body)));
            }

            cases.push(self.parse_when_case()?);
            if self.at(TokenKind::Semicolon) {
                self.advance();
            } else if !self.at(TokenKind::RBrace) && !self.at_line_start() {
                return Err(self.unexpected("';', '}' or a line break"));
            }
        }
        Ok((cases, None))
    }

    fn parse_when_case(&mut self) -> Result<WhenCase, ParseError> {
        let start = self.span();
        self.consume_keyword(Keyword::Is)?;
        // Patterns stop below transitions so `->` stays the case arrow.
        let pattern = self.scoped(BraceContext::ExpectBlock, true, |p| p.parse_expr_bp(Prec::Pair))?;
        let body = self.parse_case_body()?;
        Ok(WhenCase {
            pattern,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_case_body(&mut self) -> Result<CaseBody, ParseError> {
        match self.peek() {
            TokenKind::Arrow => {
                self.advance();
                let stmt = self.parse_statement()?;
                Ok(CaseBody::Arrow(Box::new(stmt)))
            }
            TokenKind::LBrace => Ok(CaseBody::Block(self.parse_block()?)),
            _ => Err(self.unexpected("'->' or '{'")),
        }
    }
}
