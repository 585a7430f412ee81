//! Scalar values and their SQL literal form.
//!
//! All escaping for generated statements lives in [`encode`]; nothing else in
//! the workspace builds a literal by hand.

use std::fmt;

/// Literal text used for SQL NULL.
pub const NULL_LITERAL: &str = "null";

/// A typed scalar cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// True for `Null` and for empty text, both of which encode as `null`.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => !f.is_finite(),
            Value::Text(s) => s.is_empty(),
            Value::Integer(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Encode a value as a SQL literal.
///
/// - integers and finite floats are emitted unquoted
/// - text that parses cleanly as a finite float is emitted unquoted (trimmed)
/// - `Null`, empty text and non-finite floats become `null`
/// - any other text is single-quoted with embedded quotes doubled
pub fn encode(value: &Value) -> String {
    match value {
        Value::Null => NULL_LITERAL.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) if f.is_finite() => f.to_string(),
        Value::Float(_) => NULL_LITERAL.to_string(),
        Value::Text(s) => encode_text(s),
    }
}

/// Encode a value without sniffing text for numbers.
///
/// For values read back from a typed column, where `'007'` must stay text.
/// Empty text still becomes `null`.
pub fn encode_typed(value: &Value) -> String {
    match value {
        Value::Text(s) if s.is_empty() => NULL_LITERAL.to_string(),
        Value::Text(s) => quote(s),
        other => encode(other),
    }
}

fn encode_text(s: &str) -> String {
    if s.is_empty() {
        return NULL_LITERAL.to_string();
    }
    match numeric_text(s) {
        Some(number) => number.to_string(),
        None => quote(s),
    }
}

/// Returns the trimmed text if it is a finite decimal number.
///
/// `inf`, `NaN` and out-of-range exponents are not numbers here: they have
/// no portable unquoted SQL spelling.
fn numeric_text(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(trimmed),
        _ => None,
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
#[path = "tests/value_tests.rs"]
mod tests;
