//! Auto AST - Syntax tree types for the Auto language
//!
//! This crate defines the node types produced by `auto-parser`, source
//! spans, and a canonical printer that turns a tree back into source text.
//! Trees are built once and never mutated; no node is shared between parents.

mod span;
mod types;
mod expr;
mod stmt;
mod decl;
mod printer;

pub use span::*;
pub use types::*;
pub use expr::*;
pub use stmt::*;
pub use decl::*;
pub use printer::*;

use serde::{Deserialize, Serialize};

/// A complete source file: the top-level statement sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub span: Span,
}
