//! Common utilities for formatters.

use serde_json::{Map, Value};

/// Column names in the row's key order.
pub fn columns_of(row: &Map<String, Value>) -> Vec<String> {
    row.keys().cloned().collect()
}

/// Cell text for CSV and Table: strings verbatim, null or absent empty,
/// anything else as compact JSON.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
