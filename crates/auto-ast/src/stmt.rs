//! Statement AST nodes

use serde::{Deserialize, Serialize};
use crate::{
    EnumDecl, Expr, FnDecl, Ident, ImportDecl, Name, NodeDecl, Span, TypeDecl, TypeRef, UseDecl,
};

/// A block of statements: `{ stmt; stmt }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// A statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StatementKind {
    /// Module: `mod app { ... }`
    Mod { name: Name, body: Block },

    /// `use std.io: print, println`
    Use(UseDecl),

    /// `import ui.widgets("dark")`
    Import(ImportDecl),

    /// Binding: `var x = 5`, `let y int = 1`
    Var(VarDecl),

    /// Function: `fn add(a, b) { a + b }` or `fn double(x) = x * 2`
    Fn(FnDecl),

    /// Node: `node Button(label str, onClick) { ... }`
    Node(NodeDecl),

    /// Assignment: `x = x + 1`
    Assign { target: Name, value: Expr },

    /// Conditional chain
    If(IfStmt),

    /// Counted or iterator loop
    For(ForStmt),

    /// Multi-way branch
    When(WhenStmt),

    /// `ui { ... }`
    Ui(Block),

    /// `style { ... }`
    Style(Block),

    /// `type Point { x: int, y: int }`
    Type(TypeDecl),

    /// `enum Color { Red, Green = 2 }`
    Enum(EnumDecl),

    /// `break`
    Break,

    /// Any expression used as a statement
    Expr(Expr),
}

/// Which keyword introduced a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingKind {
    Var,
    Let,
}

/// `var name [type] = value`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarDecl {
    pub binding: BindingKind,
    pub name: Ident,
    pub ty: Option<TypeRef>,
    pub value: Expr,
    pub span: Span,
}

/// `if cond { } else if cond { } else { }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IfStmt {
    pub cond: Expr,
    pub then: Block,
    pub else_ifs: Vec<ElseIf>,
    #[serde(rename = "else")]
    pub else_: Option<Block>,
    pub span: Span,
}

/// One `else if cond { }` clause
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElseIf {
    pub cond: Expr,
    pub then: Block,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForStmt {
    pub kind: ForKind,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ForKind {
    /// `for var i = 0; i < n { }`; both parts optional
    Counted {
        init: Vec<VarDecl>,
        cond: Option<Expr>,
    },

    /// `for i, item in items { }`
    Iter {
        index: Option<Ident>,
        name: Ident,
        iterable: Expr,
    },
}

/// `when x { is 1 -> a(); is 2 { b() }; else -> c() }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhenStmt {
    pub init: Vec<VarDecl>,
    pub check: Expr,
    pub cases: Vec<WhenCase>,
    #[serde(rename = "else")]
    pub else_: Option<CaseBody>,
    pub span: Span,
}

/// `is pattern -> stmt` or `is pattern { ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhenCase {
    pub pattern: Expr,
    pub body: CaseBody,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CaseBody {
    Block(Block),
    Arrow(Box<Statement>),
}
