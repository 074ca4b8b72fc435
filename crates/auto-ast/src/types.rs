//! Names and type references

use serde::{Deserialize, Serialize};
use crate::Span;

/// A single identifier token: `count`, `$el`, `_tmp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    pub text: String,
    pub span: Span,
}

impl Ident {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self { text: text.into(), span }
    }
}

/// A name: `a`, a dotted path `a.b.c`, or a relative path `.a.b`.
///
/// Invariant: `segments` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    /// Leading `.` present
    pub relative: bool,
    pub segments: Vec<Ident>,
    pub span: Span,
}

impl Name {
    /// Dotted rendering, e.g. `.a.b`
    pub fn path(&self) -> String {
        let joined = self
            .segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(".");
        if self.relative {
            format!(".{}", joined)
        } else {
            joined
        }
    }
}

/// A type in a type position: `int`, `str`, `ui.Button`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub kind: TypeRefKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRefKind {
    /// Built-in primitive: `int`, `u8`, `str`, `bool`
    Primitive(PrimitiveType),

    /// User type by name: `Point`, `ui.Button`
    Named(Name),
}

/// Primitive type keywords.
///
/// These are only recognized in type positions. Elsewhere `int` or `str`
/// is an ordinary identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Int,
    Uint,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    Float,
    Double,
    F32,
    F64,
    Bool,
    Str,
    Char,
    Byte,
    Void,
}

impl PrimitiveType {
    pub fn from_keyword(text: &str) -> Option<Self> {
        let ty = match text {
            "int" => PrimitiveType::Int,
            "uint" => PrimitiveType::Uint,
            "i8" => PrimitiveType::I8,
            "i16" => PrimitiveType::I16,
            "i32" => PrimitiveType::I32,
            "i64" => PrimitiveType::I64,
            "u8" => PrimitiveType::U8,
            "u16" => PrimitiveType::U16,
            "u32" => PrimitiveType::U32,
            "u64" => PrimitiveType::U64,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            "f32" => PrimitiveType::F32,
            "f64" => PrimitiveType::F64,
            "bool" => PrimitiveType::Bool,
            "str" => PrimitiveType::Str,
            "char" => PrimitiveType::Char,
            "byte" => PrimitiveType::Byte,
            "void" => PrimitiveType::Void,
            _ => return None,
        };
        Some(ty)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveType::Int => "int",
            PrimitiveType::Uint => "uint",
            PrimitiveType::I8 => "i8",
            PrimitiveType::I16 => "i16",
            PrimitiveType::I32 => "i32",
            PrimitiveType::I64 => "i64",
            PrimitiveType::U8 => "u8",
            PrimitiveType::U16 => "u16",
            PrimitiveType::U32 => "u32",
            PrimitiveType::U64 => "u64",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::F32 => "f32",
            PrimitiveType::F64 => "f64",
            PrimitiveType::Bool => "bool",
            PrimitiveType::Str => "str",
            PrimitiveType::Char => "char",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Void => "void",
        }
    }
}
