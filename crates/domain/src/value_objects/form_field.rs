//! Lenient form field values.
//!
//! Create/edit forms submit numbers either as JSON numbers or as whatever text
//! the user typed, and list fields either as arrays or as one comma-delimited
//! string. These types accept both shapes and expose the normalized value.

use serde::{Deserialize, Serialize};

use crate::common::{leading_integer, split_delimited};

/// A numeric form value that normalizes to a non-negative integer.
///
/// Text is read up to the first non-digit (`"12cm"` is `12`); anything that
/// does not start with a number, `null`, and every negative value normalize
/// to `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl NumericField {
    pub fn value(&self) -> u32 {
        let raw = match self {
            Self::Integer(n) => *n,
            Self::Float(f) if f.is_finite() => f.trunc() as i64,
            Self::Float(_) => 0,
            Self::Text(text) => leading_integer(text).unwrap_or(0),
            Self::Null => 0,
        };
        u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
    }
}

impl Default for NumericField {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<u32> for NumericField {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i32> for NumericField {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for NumericField {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A list form value: either discrete items or one comma-delimited string.
/// `null` is an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListField {
    Items(Vec<String>),
    Delimited(String),
    Null,
}

impl ListField {
    /// Trimmed, non-empty elements in submission order.
    pub fn items(&self) -> Vec<String> {
        match self {
            Self::Items(items) => items
                .iter()
                .flat_map(|item| split_delimited(item))
                .collect(),
            Self::Delimited(text) => split_delimited(text),
            Self::Null => Vec::new(),
        }
    }
}

impl Default for ListField {
    fn default() -> Self {
        Self::Delimited(String::new())
    }
}

impl From<&str> for ListField {
    fn from(value: &str) -> Self {
        Self::Delimited(value.to_string())
    }
}

impl From<Vec<String>> for ListField {
    fn from(items: Vec<String>) -> Self {
        Self::Items(items)
    }
}

impl From<Vec<&str>> for ListField {
    fn from(items: Vec<&str>) -> Self {
        Self::Items(items.into_iter().map(str::to_string).collect())
    }
}
