//! Numeric literal classification
//!
//! The token pattern grabs a maximal numeric-looking run; this module decides
//! which of the four forms it is, trying binary, hex, float, then integer.

use auto_ast::NumberKind;

use crate::LexErrorKind;

pub fn classify(text: &str) -> Result<NumberKind, LexErrorKind> {
    if let Some(digits) = text.strip_prefix("0b") {
        return all_of(digits, |c| matches!(c, '0' | '1' | '_'))
            .then_some(NumberKind::Bin)
            .ok_or(LexErrorKind::MalformedNumber);
    }
    if let Some(digits) = text.strip_prefix("0x") {
        return all_of(digits, |c| c.is_ascii_hexdigit() || c == '_')
            .then_some(NumberKind::Hex)
            .ok_or(LexErrorKind::MalformedNumber);
    }
    if text.contains(['.', 'e', 'E']) {
        return is_float(text)
            .then_some(NumberKind::Float)
            .ok_or(LexErrorKind::MalformedNumber);
    }
    all_of(text, |c| c.is_ascii_digit() || c == '_')
        .then_some(NumberKind::Int)
        .ok_or(LexErrorKind::MalformedNumber)
}

fn all_of(text: &str, pred: impl Fn(char) -> bool) -> bool {
    !text.is_empty() && text.chars().all(pred)
}

/// `(0|[1-9][0-9]*) '.' [0-9]* exp?`, `'.' [0-9]+ exp?` or `(0|[1-9][0-9]*) exp`
fn is_float(text: &str) -> bool {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(at) => (&text[..at], Some(&text[at + 1..])),
        None => (text, None),
    };

    if let Some(exp) = exponent {
        let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if !all_of(digits, |c| c.is_ascii_digit()) {
            return false;
        }
    }

    match mantissa.split_once('.') {
        Some((int, frac)) => {
            if !frac.chars().all(|c| c.is_ascii_digit()) {
                return false;
            }
            if int.is_empty() {
                !frac.is_empty()
            } else {
                is_int_literal(int)
            }
        }
        None => exponent.is_some() && is_int_literal(mantissa),
    }
}

/// `0` or a digit run without a leading zero
fn is_int_literal(text: &str) -> bool {
    text == "0" || (!text.starts_with('0') && all_of(text, |c| c.is_ascii_digit()))
}
