//! Stats command implementation: run the job, print its counts, fetch no rows.

use anyhow::Result;
use sumo_client::CancellationToken;
use sumo_config::Config;
use tracing::info;

use super::{apply_window, build_client};
use crate::args::WindowArgs;
use crate::cancellation::Cancelled;
use crate::formatters::{OutputFormat, get_formatter};

pub async fn run(
    config: Config,
    query: String,
    window: WindowArgs,
    output: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    info!(query_len = query.len(), "Executing stats search");

    let client = build_client(&config)?;
    let search = apply_window(client.query(query), &window)?.with_cancellation(cancel.clone());

    let stats = tokio::select! {
        res = search.stats() => res?,
        _ = cancel.cancelled() => return Err(Cancelled.into()),
    };

    print!("{}", get_formatter(output).format_stats(&stats)?);
    Ok(())
}
