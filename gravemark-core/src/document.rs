//! Parsing of the raw save document.
//!
//! The save file is an untyped tree; it is held as a [`serde_json::Value`]
//! and navigated with the total `get`/`as_*` accessors so that a shape
//! mismatch reads as absence rather than a failed cast. Required-field
//! failures are raised deliberately at the policy layer.

use serde_json::Value;
use thiserror::Error;

/// Rejections at the input boundary, before the pipeline proper runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("save file is not well-formed JSON: {0}")]
    Syntax(String),
    #[error("numeric literal in scientific notation at byte {offset}")]
    ScientificNotation { offset: usize },
}

/// Parse save text into a document tree.
///
/// Numeric literals written in scientific notation (`1e5`, `2.5E-3`) are
/// rejected up front; some game versions emit them for large totals and the
/// precision loss downstream is not worth guessing about.
///
/// # Errors
///
/// [`ParseError::ScientificNotation`] for the prescan rejection, otherwise
/// [`ParseError::Syntax`] when the text is not valid JSON.
pub fn parse_document(text: &str) -> Result<Value, ParseError> {
    if let Some(offset) = find_scientific_notation(text) {
        return Err(ParseError::ScientificNotation { offset });
    }
    serde_json::from_str(text).map_err(|err| ParseError::Syntax(err.to_string()))
}

/// Locate an exponent marker outside of string literals.
///
/// Outside strings the only place a digit can precede `e`/`E` in valid JSON
/// is a numeric literal, so digit-then-exponent is the whole check. `true`
/// and `false` carry an `e` but never follow a digit.
fn find_scientific_notation(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'e' | b'E' if i > 0 && bytes[i - 1].is_ascii_digit() => return Some(i),
            _ => {}
        }
    }
    None
}
