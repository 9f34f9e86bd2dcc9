//! Client-defined record attributes.
//!
//! Records carry no schema: whatever fields the client posts are stored. The
//! payload is held as an ordered map from field name to a small closed set
//! of value kinds so the update path never has to look at arbitrary JSON.

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::error::{HandlerError, Result};

/// Largest float that still holds every integer below it exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A single attribute value taken from a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// The stored form of a value. Every attribute is persisted as a string.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Number(n) => match n.as_f64() {
                // Whole floats print without a fraction, as `2.0` -> `2`.
                Some(x) if n.is_f64() && x.fract() == 0.0 && x.abs() <= MAX_SAFE_INTEGER => {
                    write!(f, "{}", x as i64)
                }
                _ => write!(f, "{n}"),
            },
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Null => f.write_str("null"),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => FieldValue::String(s),
            Value::Number(n) => FieldValue::Number(n),
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Null => FieldValue::Null,
            // Nested documents are kept as their compact JSON text.
            nested @ (Value::Array(_) | Value::Object(_)) => FieldValue::String(nested.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

/// Field name to value, in the order the client sent them.
pub type Attributes = IndexMap<String, FieldValue>;

/// Parses a write request body.
///
/// A literal `null` body yields `Ok(None)`. Anything that is valid JSON but
/// not an object is rejected with [`HandlerError::NotAnObject`].
pub fn parse_attributes(body: &[u8]) -> Result<Option<Attributes>> {
    let parsed: Option<IndexMap<String, Value>> = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(e) if e.is_data() => return Err(HandlerError::NotAnObject),
        Err(e) => return Err(HandlerError::InvalidJson(e)),
    };

    Ok(parsed.map(|fields| {
        fields
            .into_iter()
            .map(|(name, value)| (name, FieldValue::from(value)))
            .collect()
    }))
}
