//! Search command implementation.
//!
//! Rows are printed as they are pulled, so large results stream instead of
//! being collected first. Ctrl+C is honored while waiting for the job and
//! between rows.

use std::io::Stdout;

use anyhow::{Result, bail};
use serde_json::{Map, Value};
use sumo_client::{CancellationToken, FieldRow, ResultSet, RowDecoder};
use sumo_config::Config;
use tracing::info;

use super::{apply_window, build_client};
use crate::args::WindowArgs;
use crate::cancellation::Cancelled;
use crate::formatters::{OutputFormat, RowPrinter, get_formatter};

/// Column holding the message time in field mode.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

pub async fn run(
    config: Config,
    query: String,
    window: WindowArgs,
    fields: Option<Vec<String>>,
    max_rows: Option<usize>,
    output: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let columns = fields.as_deref().map(field_columns).transpose()?;
    info!(query_len = query.len(), "Executing search");

    let client = build_client(&config)?;
    let search = apply_window(client.query(query), &window)?.with_cancellation(cancel.clone());

    match (fields, columns) {
        (Some(fields), Some(columns)) => {
            let results = tokio::select! {
                res = search.run_fields(fields.iter().cloned()) => res?,
                _ = cancel.cancelled() => return Err(Cancelled.into()),
            };
            let printer = RowPrinter::new(get_formatter(output), std::io::stdout(), Some(columns));
            stream_rows(results, printer, max_rows, cancel, |row| {
                field_row_to_map(&fields, row)
            })
            .await
        }
        _ => {
            let results = tokio::select! {
                res = search.run::<Map<String, Value>>() => res?,
                _ = cancel.cancelled() => return Err(Cancelled.into()),
            };
            let printer = RowPrinter::new(get_formatter(output), std::io::stdout(), None);
            stream_rows(results, printer, max_rows, cancel, |row| row).await
        }
    }
}

async fn stream_rows<D, F>(
    mut results: ResultSet<D>,
    mut printer: RowPrinter<Stdout>,
    max_rows: Option<usize>,
    cancel: &CancellationToken,
    to_map: F,
) -> Result<()>
where
    D: RowDecoder,
    F: Fn(D::Row) -> Map<String, Value>,
{
    let stats = results.stats();
    info!(
        data_type = %results.data_type(),
        total = stats.total_rows(),
        "Search job finished"
    );

    let limit = max_rows.unwrap_or(usize::MAX);
    while printer.rows() < limit {
        let next = tokio::select! {
            res = results.next_row() => res?,
            _ = cancel.cancelled() => return Err(Cancelled.into()),
        };
        let Some(row) = next else {
            break;
        };
        printer.print(&to_map(row))?;
    }

    let printed = printer.rows();
    printer.finish()?;
    info!(rows = printed, "Search output complete");
    Ok(())
}

/// Output columns in field mode: the message time, then each requested field.
///
/// A requested field named like the message-time column is rejected, since it
/// would overwrite that column.
pub fn field_columns(fields: &[String]) -> Result<Vec<String>> {
    if fields.iter().any(|field| field == TIMESTAMP_COLUMN) {
        bail!(
            "--fields cannot include '{}': that column always holds the message time",
            TIMESTAMP_COLUMN
        );
    }
    let mut columns = Vec::with_capacity(fields.len() + 1);
    columns.push(TIMESTAMP_COLUMN.to_string());
    columns.extend(fields.iter().cloned());
    Ok(columns)
}

/// Field-mode row as a JSON object: message time first, then each field.
pub fn field_row_to_map(fields: &[String], row: FieldRow) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(
        TIMESTAMP_COLUMN.to_string(),
        Value::String(row.timestamp.to_rfc3339()),
    );
    for (field, value) in fields.iter().zip(row.values) {
        map.insert(field.clone(), value.map_or(Value::Null, Value::String));
    }
    map
}
