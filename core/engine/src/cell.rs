//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the raw value a column extracts from a record.
//! CONTEXT: This file contains the `CellValue` enum and the `CellError` codes.
//! Every engine in the grid pipeline (filter, sort, grouping) works on these
//! values, so stringification, numeric coercion, truthiness and ordering all
//! live here in one place.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Represents the possible errors a derived value can hold (e.g., #DIV/0!)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellError {
    Div0,  // Division by zero
    Ref,   // Invalid reference
    Name,  // Unknown name
    Value, // Wrong type of argument
    NA,    // Value not available
}

impl CellError {
    /// The spreadsheet-style error code, e.g. `#DIV/0!`.
    pub fn code(&self) -> &'static str {
        match self {
            CellError::Div0 => "#DIV/0!",
            CellError::Ref => "#REF!",
            CellError::Name => "#NAME?",
            CellError::Value => "#VALUE!",
            CellError::NA => "#N/A",
        }
    }
}

/// A raw value pulled out of a record by a column accessor.
///
/// `Empty` stands in for an absent field. Serialized untagged so that
/// `null`, numbers, strings and booleans round-trip as plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Error(CellError),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Returns the value as a String.
    /// Used for group keys, text filtering and default cell formatting.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Error(e) => e.code().to_string(),
        }
    }

    /// Coerces the value to a finite number.
    ///
    /// Blank text coerces to 0, booleans to 1/0. Empty values, errors,
    /// unparseable text and non-finite results yield `None`.
    pub fn to_number(&self) -> Option<f64> {
        let n = match self {
            CellValue::Number(n) => *n,
            CellValue::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().ok()?
                }
            }
            CellValue::Empty | CellValue::Error(_) => return None,
        };

        if n.is_finite() {
            Some(n)
        } else {
            None
        }
    }

    /// True for values that mean "nothing set": empty, "", 0, NaN and false.
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(n) => *n == 0.0 || n.is_nan(),
            CellValue::Boolean(b) => !*b,
            CellValue::Error(_) => false,
        }
    }

    /// Three-way comparison on raw values.
    ///
    /// Values of the same kind compare naturally (no string coercion).
    /// Mixed kinds order as Empty < Number < Text < Boolean < Error, and NaN
    /// sorts after every other number, so this is a total order.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a
                .partial_cmp(b)
                .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan())),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Boolean(a), CellValue::Boolean(b)) => a.cmp(b),
            (CellValue::Error(a), CellValue::Error(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Number(_) => 1,
            CellValue::Text(_) => 2,
            CellValue::Boolean(_) => 3,
            CellValue::Error(_) => 4,
        }
    }
}

/// Shortest round-trip digits; exponent form (`1e+21`, `1.5e-7`) outside
/// 1e-6 <= |n| < 1e21.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        format!("{}", n)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<CellError> for CellValue {
    fn from(value: CellError) -> Self {
        CellValue::Error(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

impl From<&serde_json::Value> for CellValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Empty,
            serde_json::Value::Bool(b) => CellValue::Boolean(*b),
            serde_json::Value::Number(n) => {
                n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Empty)
            }
            serde_json::Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Text(other.to_string()),
        }
    }
}
