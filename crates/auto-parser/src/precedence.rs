//! Operator precedence table
//!
//! Infix and postfix operators are data: [`INFIX`] maps each operator token to
//! its binding strength, associativity, and the node it builds. The expression
//! parser runs one generic loop over this table.

use auto_ast::{Assoc, BinaryOp, CompareOp, UnaryOp};
use auto_lexer::TokenKind;

/// Binding strength, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Prec {
    /// Inside parentheses
    Group,
    /// `name = value`. Reserved for statement-level assignment; no table entry uses it.
    Assign,
    /// `src -> dst`
    Transition,
    /// `key: value`
    Pair,
    /// `== != < <= > >=`
    Comparison,
    /// `+ -`
    Additive,
    /// `* /`
    Multiplicative,
    /// prefix `! - +`
    Unary,
    /// postfix `( ... )`
    Call,
}

impl Prec {
    /// The next tighter level; used as the right operand's minimum for
    /// left-associative operators.
    pub fn tighter(self) -> Prec {
        match self {
            Prec::Group => Prec::Assign,
            Prec::Assign => Prec::Transition,
            Prec::Transition => Prec::Pair,
            Prec::Pair => Prec::Comparison,
            Prec::Comparison => Prec::Additive,
            Prec::Additive => Prec::Multiplicative,
            Prec::Multiplicative => Prec::Unary,
            Prec::Unary | Prec::Call => Prec::Call,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Binary(BinaryOp),
    Compare(CompareOp),
    Pair,
    Transition,
    Call,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    pub prec: Prec,
    pub assoc: Assoc,
    pub op: InfixOp,
}

const fn op(prec: Prec, assoc: Assoc, op: InfixOp) -> OpInfo {
    OpInfo { prec, assoc, op }
}

pub const INFIX: &[(TokenKind, OpInfo)] = &[
    (TokenKind::Arrow, op(Prec::Transition, Assoc::Left, InfixOp::Transition)),
    (TokenKind::Colon, op(Prec::Pair, Assoc::Left, InfixOp::Pair)),
    (TokenKind::EqEq, op(Prec::Comparison, Assoc::Left, InfixOp::Compare(CompareOp::Eq))),
    (TokenKind::Ne, op(Prec::Comparison, Assoc::Left, InfixOp::Compare(CompareOp::Ne))),
    (TokenKind::Lt, op(Prec::Comparison, Assoc::Left, InfixOp::Compare(CompareOp::Lt))),
    (TokenKind::Le, op(Prec::Comparison, Assoc::Left, InfixOp::Compare(CompareOp::Le))),
    (TokenKind::Gt, op(Prec::Comparison, Assoc::Left, InfixOp::Compare(CompareOp::Gt))),
    (TokenKind::Ge, op(Prec::Comparison, Assoc::Left, InfixOp::Compare(CompareOp::Ge))),
    (TokenKind::Plus, op(Prec::Additive, Assoc::Left, InfixOp::Binary(BinaryOp::Add))),
    (TokenKind::Minus, op(Prec::Additive, Assoc::Left, InfixOp::Binary(BinaryOp::Sub))),
    (TokenKind::Star, op(Prec::Multiplicative, Assoc::Left, InfixOp::Binary(BinaryOp::Mul))),
    (TokenKind::Slash, op(Prec::Multiplicative, Assoc::Left, InfixOp::Binary(BinaryOp::Div))),
    (TokenKind::LParen, op(Prec::Call, Assoc::Right, InfixOp::Call)),
];

pub const PREFIX: &[(TokenKind, UnaryOp)] = &[
    (TokenKind::Bang, UnaryOp::Not),
    (TokenKind::Minus, UnaryOp::Neg),
    (TokenKind::Plus, UnaryOp::Plus),
];

pub fn infix(kind: TokenKind) -> Option<OpInfo> {
    INFIX
        .iter()
        .find(|(token, _)| *token == kind)
        .map(|(_, info)| *info)
}

pub fn prefix(kind: TokenKind) -> Option<UnaryOp> {
    PREFIX
        .iter()
        .find(|(token, _)| *token == kind)
        .map(|(_, op)| *op)
}

/// Minimum level for the right operand of an operator at `info`.
pub fn right_operand_min(info: OpInfo) -> Prec {
    match info.assoc {
        Assoc::Left => info.prec.tighter(),
        Assoc::Right => info.prec,
    }
}
