//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI commands to their implementations.
//!
//! Invariants:
//! - All commands receive the same cancellation token, wired to Ctrl+C.

use anyhow::Result;
use sumo_client::CancellationToken;
use sumo_config::Config;

use crate::args::{Cli, Commands};
use crate::commands;

/// Run the parsed command against the loaded configuration.
pub async fn run_command(cli: Cli, config: Config, cancel: &CancellationToken) -> Result<()> {
    match cli.command {
        Commands::Search {
            query,
            window,
            fields,
            max_rows,
        } => {
            commands::search::run(config, query, window, fields, max_rows, cli.output, cancel)
                .await
        }
        Commands::Stats { query, window } => {
            commands::stats::run(config, query, window, cli.output, cancel).await
        }
    }
}
