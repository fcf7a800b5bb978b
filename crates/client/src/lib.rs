//! Sumo Logic search job client.
//!
//! This crate runs a log search as an asynchronous job: it submits the query,
//! polls the job until it finishes, then pages through the resulting messages
//! or aggregate records and decodes each row into a caller-chosen shape.
//!
//! ```rust,ignore
//! use serde::Deserialize;
//! use sumo_client::SumoClient;
//!
//! #[derive(Deserialize)]
//! struct Hit {
//!     host: String,
//!     count: u64,
//! }
//!
//! let client = SumoClient::builder()
//!     .api_url("https://api.sumologic.com/api/".to_string())
//!     .access_id(id)
//!     .access_key(key)
//!     .build()?;
//!
//! let text = client.query_builder().filter("error").and("count by host").build();
//! let rows = client
//!     .query(text)
//!     .for_last(Duration::from_secs(3600))
//!     .run::<Hit>()
//!     .await?
//!     .collect_rows()
//!     .await?;
//! ```

mod auth;
pub mod cancellation;
pub mod client;
pub mod cursor;
pub mod decode;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod query;
pub mod results;
mod serde_helpers;
pub mod transport;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use cancellation::CancellationToken;
pub use client::{SumoClient, SumoClientBuilder};
pub use cursor::ResultCursor;
pub use decode::{FieldProjection, MESSAGE_TIME_FIELD, RowDecoder, TypedRecords};
pub use error::{ClientError, ErrorKind, Result};
pub use models::{DataType, FieldRow, JobHandle, JobState, JobStatus, QuerySpec, QueryStats};
pub use query::{PipeBuilder, QueryBuilder, SumoQuery, WhereBuilder};
pub use results::ResultSet;
pub use transport::{ConnectionFactory, DefaultConnectionFactory, JobConnection};
