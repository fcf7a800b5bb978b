//! Result page models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::job::DataType;
use crate::serde_helpers::vec_or_null;

/// One element of a result page.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultEntry {
    #[serde(default)]
    pub map: Map<String, Value>,
}

/// Body of `GET {location}/{messages|records}`; only one of the arrays is populated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultPage {
    #[serde(default, deserialize_with = "vec_or_null")]
    pub messages: Vec<ResultEntry>,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub records: Vec<ResultEntry>,
}

impl ResultPage {
    /// Entries stored under the key matching `data_type`.
    pub fn into_entries(self, data_type: DataType) -> Vec<ResultEntry> {
        match data_type {
            DataType::Messages => self.messages,
            DataType::Records => self.records,
        }
    }
}

/// Field-projected row: message time plus the requested field values in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow {
    pub timestamp: DateTime<Utc>,
    pub values: Vec<Option<String>>,
}

impl FieldRow {
    /// Value of the requested field at `index`, `None` when absent or null.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }
}
