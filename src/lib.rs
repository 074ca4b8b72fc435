//! Auto - parser front-end for the Auto language
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

// Re-export main crates for convenience
pub use auto_ast as ast;
pub use auto_lexer as lexer;
pub use auto_parser as parser;

pub use auto_parser::{parse, ParseError};
