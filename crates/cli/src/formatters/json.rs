//! JSON formatter: one array, each row compact on its own line.
//!
//! Invariants:
//! - The output is valid JSON once `end` has been written, including for zero rows.

use anyhow::Result;
use serde_json::{Map, Value};
use sumo_client::QueryStats;

use super::Formatter;

#[derive(Debug, Default)]
pub struct JsonFormatter {
    written: usize,
}

impl Formatter for JsonFormatter {
    fn begin(&mut self, _columns: &[String]) -> Result<String> {
        Ok("[".to_string())
    }

    fn row(&mut self, _columns: &[String], row: &Map<String, Value>) -> Result<String> {
        let separator = if self.written == 0 { "\n  " } else { ",\n  " };
        self.written += 1;
        Ok(format!("{}{}", separator, serde_json::to_string(row)?))
    }

    fn end(&mut self, _columns: &[String], rows: usize) -> Result<String> {
        Ok(if rows == 0 { "]\n" } else { "\n]\n" }.to_string())
    }

    fn format_stats(&self, stats: &QueryStats) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(stats)?))
    }
}
