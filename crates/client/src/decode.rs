//! Row materialization.
//!
//! Responsibilities:
//! - Define the `RowDecoder` seam used by the cursor to turn a result entry's
//!   `map` object into a caller-facing row.
//! - Provide typed decoding (`TypedRecords<T>`) and field projection (`FieldProjection`).
//!
//! Does NOT handle:
//! - Fetching pages or tracking offsets (see `cursor`).
//!
//! Invariants:
//! - Decode failures are reported as `ClientError::Unhandled` with the serde cause attached.
//! - Field projection looks up field names exactly as requested.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};
use crate::models::FieldRow;
use crate::serde_helpers::LenientValue;

/// Field holding the message time as epoch milliseconds.
pub const MESSAGE_TIME_FIELD: &str = "_messagetime";

/// Turns one result entry into a row.
pub trait RowDecoder {
    type Row;

    fn decode(&self, map: Map<String, Value>) -> Result<Self::Row>;
}

/// Deserializes each row into `T`.
///
/// Field names match case-insensitively, extra fields are ignored and numeric
/// or boolean strings are coerced into numeric or boolean fields.
pub struct TypedRecords<T> {
    _row: PhantomData<fn() -> T>,
}

impl<T> TypedRecords<T> {
    pub fn new() -> Self {
        Self { _row: PhantomData }
    }
}

impl<T> Default for TypedRecords<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for TypedRecords<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedRecords")
            .field("row", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> RowDecoder for TypedRecords<T> {
    type Row = T;

    fn decode(&self, map: Map<String, Value>) -> Result<T> {
        <T as serde::Deserialize>::deserialize(LenientValue(Value::Object(map))).map_err(|e| {
            ClientError::unhandled_with(format!("failed to decode result row: {}", e), e)
        })
    }
}

/// Projects each row onto a fixed list of field names.
#[derive(Debug, Clone)]
pub struct FieldProjection {
    fields: Vec<String>,
}

impl FieldProjection {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl RowDecoder for FieldProjection {
    type Row = FieldRow;

    fn decode(&self, map: Map<String, Value>) -> Result<FieldRow> {
        let timestamp = map
            .get(MESSAGE_TIME_FIELD)
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or_else(Utc::now);

        let values = self
            .fields
            .iter()
            .map(|field| map.get(field).and_then(field_text))
            .collect();

        Ok(FieldRow { timestamp, values })
    }
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
