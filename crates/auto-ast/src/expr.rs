//! Expression AST nodes

use serde::{Deserialize, Serialize};
use crate::{Block, IfStmt, Name, Span, Statement, WhenStmt};

/// An expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Strip any number of enclosing `( )` groups.
    pub fn ungrouped(&self) -> &Expr {
        match &self.kind {
            ExprKind::Group(inner) => inner.ungrouped(),
            _ => self,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExprKind {
    /// Name: `x`, `a.b.c`, `.theme.dark`
    Name(Name),

    /// Literal: `42`, `0xff`, `"hi"`, `f"n=$n"`, `true`, `null`, `nil`
    Literal(Literal),

    /// Prefix operator: `!done`, `-x`, `+y`
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// Arithmetic: `a + b`, `a * b`
    Binary {
        op: BinaryOp,
        assoc: Assoc,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Comparison: `a == b`, `a <= b`
    Comparison {
        op: CompareOp,
        assoc: Assoc,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Call with optional trailing block: `f(x)`, `col(1) { text("a") }`
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        body: Option<Block>,
    },

    /// Parenthesized expression: `(a + b)`
    Group(Box<Expr>),

    /// Key/value pair: `width: 100`, `"id": 1`
    Pair {
        key: PairKey,
        value: Box<Expr>,
    },

    /// Object literal: `{ a: 1, b: 2 }`
    Object(Vec<Statement>),

    /// Array literal: `[1, 2, 3]`
    Array(Vec<Expr>),

    /// Transition: `idle -> running`
    Transition {
        src: Name,
        dst: Name,
    },

    /// `if` in a value position: `var x = if c { 1 } else { 2 }`
    If(Box<IfStmt>),

    /// `when` in a value position
    When(Box<WhenStmt>),
}

/// Key of a pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PairKey {
    Name(Name),
    Str(StrLit),
}

/// A literal value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Literal {
    /// Numeric literal; `raw` keeps underscores and prefixes verbatim
    Number { kind: NumberKind, raw: String },
    Str(StrLit),
    True,
    False,
    Null,
    Nil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberKind {
    Int,
    Bin,
    Hex,
    Float,
}

/// A string literal of any surface form, reduced to parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrLit {
    pub form: StrForm,
    pub parts: Vec<StrPart>,
    pub span: Span,
}

/// Surface syntax a string literal was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrForm {
    /// `"..."`
    Double,
    /// `'...'`
    Single,
    /// ```` ```...``` ````
    Multiline,
    /// `f"..."`
    Formatted,
    /// `f"""..."""`
    FormattedTriple,
    /// `` f`...` ``
    FormattedTick,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StrPart {
    /// Literal text with escapes already resolved
    Text(String),
    /// `$name` or `${expr}`
    Hole(Hole),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Hole {
    /// `$user.name`
    Name(Name),
    /// `${n + 1}`
    Expr(Box<Expr>),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
}

/// Operator associativity as resolved from the precedence table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assoc {
    Left,
    Right,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
        }
    }
}
