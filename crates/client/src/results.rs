//! Result container returned by a finished search run.
//!
//! Responsibilities:
//! - Pair the job's final `QueryStats` with the cursor over its rows.
//! - Offer pull (`next_row`), stream (`into_stream`) and drain (`collect_rows`) access.
//!
//! Invariants:
//! - `stats()` returns the same value before, during and after iteration.
//! - The job connection is owned here and released once: on exhaustion, on
//!   the first failure, or when the set is dropped.

use futures::Stream;

use crate::cursor::ResultCursor;
use crate::decode::RowDecoder;
use crate::error::{ClientError, Result};
use crate::models::{DataType, QueryStats};

/// Stats plus a single-pass sequence of rows.
#[derive(Debug)]
pub struct ResultSet<D: RowDecoder> {
    stats: QueryStats,
    cursor: ResultCursor<D>,
}

impl<D: RowDecoder> ResultSet<D> {
    pub fn new(stats: QueryStats, cursor: ResultCursor<D>) -> Self {
        Self { stats, cursor }
    }

    /// Counts reported by the job when it finished.
    pub fn stats(&self) -> QueryStats {
        self.stats
    }

    /// Whether rows come from the `records` or the `messages` endpoint.
    pub fn data_type(&self) -> DataType {
        self.cursor.data_type()
    }

    /// Pull the next row; `Ok(None)` once the set is exhausted or failed.
    pub async fn next_row(&mut self) -> Result<Option<D::Row>> {
        self.cursor.next_row().await
    }

    /// True while the set still holds the job connection.
    pub fn is_open(&self) -> bool {
        self.cursor.is_open()
    }

    pub fn decoder(&self) -> &D {
        self.cursor.decoder()
    }

    /// Drain every remaining row into memory.
    pub async fn collect_rows(mut self) -> Result<Vec<D::Row>> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Convert into a stream of rows; the stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<D::Row>> {
        futures::stream::try_unfold(self, |mut set| async move {
            let row = set.next_row().await?;
            Ok::<_, ClientError>(row.map(|row| (row, set)))
        })
    }
}
