//! Command implementations.
//!
//! Responsibilities:
//! - Build the client from loaded configuration.
//! - Apply the shared search window to a query.

pub mod search;
pub mod stats;

use anyhow::{Context, Result};
use sumo_client::{SumoClient, SumoQuery};
use sumo_config::Config;

use crate::args::{TimeArg, WindowArgs};

/// Build a client from loaded configuration.
pub(crate) fn build_client(config: &Config) -> Result<SumoClient> {
    SumoClient::builder()
        .from_config(config)
        .build()
        .context("Failed to create search client")
}

/// Narrow `query` to the window given on the command line.
pub(crate) fn apply_window<'a>(query: SumoQuery<'a>, window: &WindowArgs) -> Result<SumoQuery<'a>> {
    if let Some(span) = window.last {
        return Ok(query.for_last(span));
    }
    match (window.from, window.to) {
        (Some(TimeArg::Zoned(from)), Some(TimeArg::Zoned(to))) => Ok(query.within(from, to)),
        (Some(TimeArg::Local(from)), Some(TimeArg::Local(to))) => {
            Ok(query.within_local(from, to)?)
        }
        (Some(_), Some(_)) => anyhow::bail!(
            "--from and --to must both carry a UTC offset or both omit it"
        ),
        _ => Ok(query),
    }
}
