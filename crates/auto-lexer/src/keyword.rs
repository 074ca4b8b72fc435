//! Reserved words
//!
//! Keywords lex as plain identifiers. The parser classifies identifier text
//! at the places where a keyword may appear, which lets the softer ones
//! (`mod`, `node`, `type`, ...) stay usable as ordinary names elsewhere.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Mod,
    Use,
    Import,
    Var,
    Let,
    Fn,
    Node,
    If,
    Else,
    For,
    In,
    When,
    Is,
    Ui,
    Style,
    Type,
    Enum,
    Break,
    True,
    False,
    Null,
    Nil,
}

impl Keyword {
    pub fn classify(text: &str) -> Option<Keyword> {
        let keyword = match text {
            "mod" => Keyword::Mod,
            "use" => Keyword::Use,
            "import" => Keyword::Import,
            "var" => Keyword::Var,
            "let" => Keyword::Let,
            "fn" => Keyword::Fn,
            "node" => Keyword::Node,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "for" => Keyword::For,
            "in" => Keyword::In,
            "when" => Keyword::When,
            "is" => Keyword::Is,
            "ui" => Keyword::Ui,
            "style" => Keyword::Style,
            "type" => Keyword::Type,
            "enum" => Keyword::Enum,
            "break" => Keyword::Break,
            "true" => Keyword::True,
            "false" => Keyword::False,
            "null" => Keyword::Null,
            "nil" => Keyword::Nil,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Mod => "mod",
            Keyword::Use => "use",
            Keyword::Import => "import",
            Keyword::Var => "var",
            Keyword::Let => "let",
            Keyword::Fn => "fn",
            Keyword::Node => "node",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::For => "for",
            Keyword::In => "in",
            Keyword::When => "when",
            Keyword::Is => "is",
            Keyword::Ui => "ui",
            Keyword::Style => "style",
            Keyword::Type => "type",
            Keyword::Enum => "enum",
            Keyword::Break => "break",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::Nil => "nil",
        }
    }

    /// Keywords that only act as such when followed by the shape they
    /// introduce; anywhere else they are ordinary names.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            Keyword::Mod
                | Keyword::Use
                | Keyword::Import
                | Keyword::Node
                | Keyword::Ui
                | Keyword::Style
                | Keyword::Type
                | Keyword::Enum
        )
    }
}
