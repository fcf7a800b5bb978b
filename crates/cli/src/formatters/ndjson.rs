//! NDJSON formatter implementation.
//!
//! Invariants:
//! - Each line is a valid JSON object.
//! - Suitable for streaming and log processing pipelines.

use anyhow::Result;
use serde_json::{Map, Value};
use sumo_client::QueryStats;

use super::Formatter;

/// NDJSON formatter.
#[derive(Debug)]
pub struct NdjsonFormatter;

impl Formatter for NdjsonFormatter {
    fn begin(&mut self, _columns: &[String]) -> Result<String> {
        Ok(String::new())
    }

    fn row(&mut self, _columns: &[String], row: &Map<String, Value>) -> Result<String> {
        Ok(serde_json::to_string(row)? + "\n")
    }

    fn end(&mut self, _columns: &[String], _rows: usize) -> Result<String> {
        Ok(String::new())
    }

    fn format_stats(&self, stats: &QueryStats) -> Result<String> {
        Ok(serde_json::to_string(stats)? + "\n")
    }
}
