//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide multiple output formats: JSON, NDJSON, CSV and Table.
//! - Render search rows one at a time so output streams while pages arrive.
//! - Render job stats.
//!
//! Does NOT handle:
//! - Fetching rows (see `commands::search`).
//!
//! Invariants:
//! - Tables use tab-separation for consistent alignment in standard terminals.
//! - Columns are fixed by the first row (or by `--fields`); later keys outside
//!   that set are not printed by CSV and Table.
//!
//! ## Empty-State Handling
//!
//! | Format | Empty State Behavior | Example |
//! |--------|---------------------|---------|
//! | JSON | Valid empty structure | `[]` |
//! | NDJSON | Nothing | `` |
//! | CSV | Headers only when columns are known | `timestamp,_raw\n` |
//! | Table | Human message | `No results found.` |
//!
//! ## Missing/Null Value Handling
//!
//! JSON and NDJSON keep `null`; CSV and Table print an empty cell.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde_json::{Map, Value};
use sumo_client::QueryStats;

mod common;
mod csv;
mod json;
mod ndjson;
mod table;


pub use csv::CsvFormatter;
pub use json::JsonFormatter;
pub use ndjson::NdjsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    #[value(alias = "jsonl")]
    Ndjson,
    Csv,
    Table,
}

/// Incremental row renderer.
///
/// Each method returns the text to write; the caller owns the output stream.
pub trait Formatter {
    /// Text written once, before the first row.
    fn begin(&mut self, columns: &[String]) -> Result<String>;

    /// Text for one row.
    fn row(&mut self, columns: &[String], row: &Map<String, Value>) -> Result<String>;

    /// Text written once after the last row; `rows` is how many were written.
    fn end(&mut self, columns: &[String], rows: usize) -> Result<String>;

    /// Render the counts of a finished job.
    fn format_stats(&self, stats: &QueryStats) -> Result<String>;
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter::default()),
        OutputFormat::Ndjson => Box::new(NdjsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}

/// Streams rows through a formatter into a writer.
pub struct RowPrinter<W: Write> {
    formatter: Box<dyn Formatter>,
    out: W,
    columns: Option<Vec<String>>,
    rows: usize,
}

impl<W: Write> RowPrinter<W> {
    /// `columns` fixes the column order up front; `None` takes it from the first row.
    pub fn new(formatter: Box<dyn Formatter>, out: W, columns: Option<Vec<String>>) -> Self {
        Self {
            formatter,
            out,
            columns,
            rows: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn print(&mut self, row: &Map<String, Value>) -> Result<()> {
        if self.rows == 0 {
            let columns = self
                .columns
                .get_or_insert_with(|| common::columns_of(row));
            let text = self.formatter.begin(columns)?;
            self.out.write_all(text.as_bytes())?;
        }
        let columns = self.columns.as_deref().unwrap_or_default();
        let text = self.formatter.row(columns, row)?;
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Close the output; an empty result still gets its empty-state text.
    pub fn finish(mut self) -> Result<W> {
        let columns = self.columns.take().unwrap_or_default();
        if self.rows == 0 {
            let text = self.formatter.begin(&columns)?;
            self.out.write_all(text.as_bytes())?;
        }
        let text = self.formatter.end(&columns, self.rows)?;
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(self.out)
    }
}
