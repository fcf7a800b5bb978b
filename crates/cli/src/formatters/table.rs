//! Tab-separated table formatter.

use anyhow::Result;
use serde_json::{Map, Value};
use sumo_client::QueryStats;

use super::Formatter;
use super::common::cell_text;

/// Table formatter.
#[derive(Debug)]
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn begin(&mut self, columns: &[String]) -> Result<String> {
        if columns.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{}\n", columns.join("\t")))
    }

    fn row(&mut self, columns: &[String], row: &Map<String, Value>) -> Result<String> {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| cell_text(row.get(column)).replace(['\t', '\n'], " "))
            .collect();
        Ok(format!("{}\n", cells.join("\t")))
    }

    fn end(&mut self, _columns: &[String], rows: usize) -> Result<String> {
        if rows == 0 {
            return Ok("No results found.\n".to_string());
        }
        Ok(String::new())
    }

    fn format_stats(&self, stats: &QueryStats) -> Result<String> {
        Ok(format!(
            "Data type: {}\nMessages: {}\nRecords: {}\n",
            stats.data_type(),
            stats.message_count,
            stats.record_count
        ))
    }
}
