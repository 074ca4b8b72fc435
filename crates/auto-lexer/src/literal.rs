//! String literal sub-lexers
//!
//! Scanning happens in two steps. While tokenizing, the `scan_*` callbacks find
//! where a literal ends, stepping over escapes and over `${...}` holes by
//! re-entering the token lexer so that braces inside nested strings are not
//! miscounted. Later, [`decode`] splits the literal's text into parts:
//! text runs with escapes resolved, and hole ranges the parser re-enters.

use logos::Logos;
use auto_ast::{Span, StrForm};

use crate::{LexError, LexErrorKind, TokenKind};

/// One piece of a decoded string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPart {
    /// Literal text, escapes resolved
    Text(String),
    /// An interpolation hole, still unparsed
    Hole(HoleSpan),
}

/// Source range of an interpolation hole, in absolute offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleSpan {
    pub kind: HoleKind,
    /// For `$name`, the name; for `${expr}`, the text between the braces.
    pub inner: Span,
    /// The whole hole including `$` and braces
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleKind {
    Name,
    Expr,
}

/// A decoded literal: which surface form, and its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedStr {
    pub form: StrForm,
    pub parts: Vec<RawPart>,
}

// ===== Scanning (token callbacks) =====

/// Scan the rest of a quoted literal whose opener has already matched.
///
/// Leaves the lexer untouched on error so the reported span is the opener.
pub(crate) fn scan_quoted(
    lex: &mut logos::Lexer<TokenKind>,
    terminator: &str,
    holes: bool,
) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(terminator.as_bytes()) {
            lex.bump(i + terminator.len());
            return Ok(());
        }
        match bytes[i] {
            b'\\' => i += 2,
            b'$' if holes && bytes.get(i + 1) == Some(&b'{') => {
                i += 2 + hole_len(&rest[i + 2..])?;
            }
            _ => i += 1,
        }
    }
    Err(LexErrorKind::UnterminatedString)
}

/// Scan the rest of a ```` ``` ```` literal. Content is raw; only holes are special.
pub(crate) fn scan_multiline(lex: &mut logos::Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    let rest = lex.remainder();
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"```") {
            lex.bump(i + 3);
            return Ok(());
        }
        if bytes[i] == b'$' && bytes.get(i + 1) == Some(&b'{') {
            i += 2 + hole_len(&rest[i + 2..])?;
        } else {
            i += 1;
        }
    }
    Err(LexErrorKind::UnterminatedString)
}

/// Length of a hole body including its closing `}`, given the text right
/// after `${`.
fn hole_len(src: &str) -> Result<usize, LexErrorKind> {
    let mut inner = TokenKind::lexer(src);
    let mut depth = 1usize;
    while let Some(token) = inner.next() {
        match token? {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => {
                depth -= 1;
                if depth == 0 {
                    return Ok(inner.span().end);
                }
            }
            _ => {}
        }
    }
    Err(LexErrorKind::UnterminatedString)
}

// ===== Decoding =====

/// Split the full text of a string token into parts.
///
/// `start` is the token's absolute offset, used to make hole spans absolute.
pub fn decode(text: &str, start: usize) -> Result<DecodedStr, LexError> {
    let (form, open, close) = delimiters(text);
    let body_start = start + open.len();
    let body = &text[open.len()..text.len() - close.len()];

    let mut decoder = Decoder {
        form,
        body,
        base: body_start,
        parts: Vec::new(),
        text: String::new(),
    };
    decoder.run()?;
    Ok(DecodedStr {
        form,
        parts: decoder.parts,
    })
}

fn delimiters(text: &str) -> (StrForm, &'static str, &'static str) {
    if text.starts_with("```") {
        (StrForm::Multiline, "```", "```")
    } else if text.starts_with("f\"\"\"") {
        (StrForm::FormattedTriple, "f\"\"\"", "\"\"\"")
    } else if text.starts_with("f\"") {
        (StrForm::Formatted, "f\"", "\"")
    } else if text.starts_with("f`") {
        (StrForm::FormattedTick, "f`", "`")
    } else if text.starts_with('\'') {
        (StrForm::Single, "'", "'")
    } else {
        (StrForm::Double, "\"", "\"")
    }
}

struct Decoder<'a> {
    form: StrForm,
    body: &'a str,
    base: usize,
    parts: Vec<RawPart>,
    /// Pending text run
    text: String,
}

impl Decoder<'_> {
    fn has_holes(&self) -> bool {
        !matches!(self.form, StrForm::Double | StrForm::Single)
    }

    fn has_escapes(&self) -> bool {
        self.form != StrForm::Multiline
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.parts.push(RawPart::Text(std::mem::take(&mut self.text)));
        }
    }

    fn run(&mut self) -> Result<(), LexError> {
        let mut chars = self.body.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' if self.has_escapes() => {
                    let Some((_, next)) = chars.next() else {
                        return Err(self.error(LexErrorKind::UnterminatedString, i, i + 1));
                    };
                    match self.escape(next) {
                        Some(resolved) => self.text.push(resolved),
                        None => {
                            return Err(self.error(
                                LexErrorKind::InvalidEscape(next),
                                i,
                                i + 1 + next.len_utf8(),
                            ))
                        }
                    }
                }
                '$' if self.has_holes() => {
                    let hole = self.hole(i)?;
                    let consumed_to = hole.span.end - self.base;
                    while chars.peek().is_some_and(|&(j, _)| j < consumed_to) {
                        chars.next();
                    }
                    self.flush();
                    self.parts.push(RawPart::Hole(hole));
                }
                _ => self.text.push(c),
            }
        }
        self.flush();
        Ok(())
    }

    fn escape(&self, c: char) -> Option<char> {
        let resolved = match c {
            '"' => '"',
            '\\' => '\\',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{b}',
            '\'' => '\'',
            '`' if self.form == StrForm::FormattedTick => '`',
            '$' if self.has_holes() => '$',
            _ => return None,
        };
        Some(resolved)
    }

    /// Recognize the hole starting at `dollar` (relative to the body).
    fn hole(&self, dollar: usize) -> Result<HoleSpan, LexError> {
        let rest = &self.body[dollar + 1..];
        if rest.starts_with('{') {
            let len = hole_len(&rest[1..])
                .map_err(|kind| self.error(kind, dollar, dollar + 1))?;
            let inner_start = dollar + 2;
            let inner_end = inner_start + len - 1;
            return Ok(HoleSpan {
                kind: HoleKind::Expr,
                inner: self.span(inner_start, inner_end),
                span: self.span(dollar, inner_end + 1),
            });
        }

        let len = name_len(rest);
        if len == 0 {
            return Err(self.error(LexErrorKind::MalformedInterpolation, dollar, dollar + 1));
        }
        Ok(HoleSpan {
            kind: HoleKind::Name,
            inner: self.span(dollar + 1, dollar + 1 + len),
            span: self.span(dollar, dollar + 1 + len),
        })
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.base + start, self.base + end)
    }

    fn error(&self, kind: LexErrorKind, start: usize, end: usize) -> LexError {
        LexError {
            kind,
            span: self.span(start, end),
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_part(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// Byte length of a (possibly relative, possibly dotted) name at the start
/// of `text`, or 0 if there is none.
fn name_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'.') {
        i = 1;
    }
    if !bytes.get(i).copied().is_some_and(is_ident_start) {
        return 0;
    }
    loop {
        while bytes.get(i).copied().is_some_and(is_ident_part) {
            i += 1;
        }
        let dotted = bytes.get(i) == Some(&b'.')
            && bytes.get(i + 1).copied().is_some_and(is_ident_start);
        if !dotted {
            return i;
        }
        i += 1;
    }
}
