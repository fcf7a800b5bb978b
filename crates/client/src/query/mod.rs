//! Query text construction and search execution.
//!
//! # Submodules
//! - [`builder`]: fluent construction of query text
//! - [`search`]: a query bound to a client, a time window and an optional cancellation token

pub mod builder;
pub mod search;

pub use builder::{PipeBuilder, QueryBuilder, WhereBuilder};
pub use search::SumoQuery;
