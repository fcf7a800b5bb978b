//! CSV formatter implementation.
//!
//! Quoting and escaping are delegated to the `csv` crate.

use anyhow::Result;
use serde_json::{Map, Value};
use sumo_client::QueryStats;

use super::Formatter;
use super::common::cell_text;

/// CSV formatter.
#[derive(Debug)]
pub struct CsvFormatter;

/// Encode one record as a CSV line.
fn record<I, S>(fields: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(fields)?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

impl Formatter for CsvFormatter {
    fn begin(&mut self, columns: &[String]) -> Result<String> {
        if columns.is_empty() {
            return Ok(String::new());
        }
        record(columns)
    }

    fn row(&mut self, columns: &[String], row: &Map<String, Value>) -> Result<String> {
        record(columns.iter().map(|column| cell_text(row.get(column))))
    }

    fn end(&mut self, _columns: &[String], _rows: usize) -> Result<String> {
        Ok(String::new())
    }

    fn format_stats(&self, stats: &QueryStats) -> Result<String> {
        let mut output = record(["messageCount", "recordCount"])?;
        output.push_str(&record([
            stats.message_count.to_string(),
            stats.record_count.to_string(),
        ])?);
        Ok(output)
    }
}
