//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//! - Parse search windows (`--last 15m`, `--from`/`--to`).
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not validate configuration bounds (see `sumo_config::ConfigLoader`).

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::formatters::OutputFormat;

#[derive(Parser)]
#[command(name = "sumo-cli")]
#[command(about = "Sumo CLI - Run log searches from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  sumo-cli search '_sourceCategory=prod error' --last 1h\n  sumo-cli search 'error | count by _sourcehost' --output csv\n  sumo-cli search '_index=main' --fields _sourcehost,_raw --max-rows 20\n  sumo-cli stats 'error' --from 2024-05-01T00:00:00Z --to 2024-05-02T00:00:00Z\n"
)]
pub struct Cli {
    /// API endpoint of the deployment (e.g., https://api.us2.sumologic.com/api/)
    #[arg(long, global = true, env = "SUMO_API_URL")]
    pub api_url: Option<String>,

    /// Access id
    #[arg(long, global = true, env = "SUMO_ACCESS_ID")]
    pub access_id: Option<String>,

    /// Access key
    #[arg(long, global = true, env = "SUMO_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "SUMO_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification
    #[arg(long, global = true, env = "SUMO_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Delay between job status polls, in milliseconds
    #[arg(long, global = true, env = "SUMO_POLL_INTERVAL_MS")]
    pub poll_interval_ms: Option<u64>,

    /// Rows requested per page (1-100)
    #[arg(long, global = true, env = "SUMO_PAGE_SIZE")]
    pub page_size: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Log line format on stderr (filtered by RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a search query and print its rows
    Search {
        /// The search query to execute (e.g., '_sourceCategory=prod error')
        query: String,

        #[command(flatten)]
        window: WindowArgs,

        /// Print only these fields, in order, after the message time
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<String>>,

        /// Stop after printing this many rows
        #[arg(long)]
        max_rows: Option<usize>,
    },

    /// Run a search and print only its message and record counts
    Stats {
        /// The search query to execute
        query: String,

        #[command(flatten)]
        window: WindowArgs,
    },
}

/// Time window shared by every search command.
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// Search the most recent span (e.g., 30s, 15m, 2h, 7d)
    #[arg(long, value_parser = parse_span, conflicts_with_all = ["from", "to"])]
    pub last: Option<Duration>,

    /// Window start: RFC 3339, or local time without an offset
    #[arg(long, value_parser = parse_time, requires = "to")]
    pub from: Option<TimeArg>,

    /// Window end: RFC 3339, or local time without an offset
    #[arg(long, value_parser = parse_time, requires = "from")]
    pub to: Option<TimeArg>,
}

/// A window bound as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeArg {
    Zoned(DateTime<FixedOffset>),
    Local(NaiveDateTime),
}

/// Parse `<number><unit>` with unit `s`, `m`, `h` or `d`.
pub fn parse_span(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("missing unit in '{raw}' (use s, m, h or d)"))?;
    let (digits, unit) = raw.split_at(split);
    let amount: u64 = digits
        .parse()
        .map_err(|_| format!("invalid span '{raw}'"))?;
    let seconds_per_unit = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86_400,
        other => return Err(format!("unknown unit '{other}' (use s, m, h or d)")),
    };
    if amount == 0 {
        return Err("span must be greater than zero".to_string());
    }
    amount
        .checked_mul(seconds_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("span '{raw}' is too large"))
}

/// Parse an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS` local time.
pub fn parse_time(raw: &str) -> Result<TimeArg, String> {
    let raw = raw.trim();
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Ok(TimeArg::Zoned(zoned));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .map(TimeArg::Local)
        .map_err(|_| format!("invalid time '{raw}' (expected RFC 3339 or YYYY-MM-DDTHH:MM:SS)"))
}
