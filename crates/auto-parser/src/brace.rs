//! Block-versus-object resolution
//!
//! `{ ... }` is a statement block after construct heads and an object literal
//! in value positions. The parser carries a [`BraceContext`] describing the
//! innermost enclosing construct and asks [`resolve`] what a `{` means.

use tracing::trace;

/// What the innermost enclosing construct expects a `{` to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceContext {
    /// A condition or loop head: the next `{` at this level opens its body.
    ExpectBlock,
    /// Any other position: a `{` is an object literal.
    ExpectValue,
}

/// Where a `{` was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracePosition {
    /// Where an operand should start
    Operand,
    /// Right after a call's closing `)`
    AfterCall { same_line: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceRole {
    /// Parse an object literal
    Object,
    /// Parse a trailing block for the call
    TrailingBlock,
    /// Leave it for the enclosing construct
    Enclosing,
    /// No reading applies; report an error
    Ambiguous,
}

pub fn resolve(context: BraceContext, position: BracePosition) -> BraceRole {
    let role = match (position, context) {
        (BracePosition::Operand, BraceContext::ExpectValue) => BraceRole::Object,
        (BracePosition::Operand, BraceContext::ExpectBlock) => BraceRole::Ambiguous,
        (BracePosition::AfterCall { same_line: true }, BraceContext::ExpectValue) => {
            BraceRole::TrailingBlock
        }
        (BracePosition::AfterCall { .. }, _) => BraceRole::Enclosing,
    };
    trace!(?context, ?position, ?role, "resolve brace");
    role
}
