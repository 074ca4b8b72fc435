//! Declaration AST nodes

use serde::{Deserialize, Serialize};
use crate::{Block, Expr, Ident, Name, Span, Statement, TypeRef};

/// `use a.b: c, d`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseDecl {
    pub path: Name,
    pub subs: Vec<Name>,
    pub span: Span,
}

/// `import a.b(args)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportDecl {
    pub path: Name,
    pub args: Option<Vec<Expr>>,
    pub span: Span,
}

/// Function declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FnDecl {
    pub name: Name,
    pub params: Vec<Param>,
    pub ret: Option<TypeRef>,
    pub body: FnBody,
    pub span: Span,
}

/// Function parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: Ident,
    pub ty: Option<TypeRef>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FnBody {
    /// `{ ... }`
    Block(Block),
    /// `= expr`
    Expr(Expr),
}

/// Node declaration: `node Button(label str, onClick) { ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDecl {
    pub name: Name,
    pub props: Vec<Prop>,
    /// Entries are restricted to pair expressions and `if` statements.
    pub body: Option<Vec<Statement>>,
    pub span: Span,
}

/// Node property: `label str` or `onClick`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prop {
    pub name: Name,
    pub ty: Option<TypeRef>,
    pub span: Span,
}

/// `type Point { x: int, y: int }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: Ident,
    pub fields: Vec<FieldDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: Ident,
    pub ty: TypeRef,
    pub span: Span,
}

/// `enum Color { Red, Green = 2 }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: Ident,
    pub members: Vec<EnumMember>,
    pub span: Span,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: Ident,
    pub value: Option<Expr>,
    pub span: Span,
}
