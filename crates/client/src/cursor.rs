//! Paginated, forward-only cursor over a finished job's rows.
//!
//! Responsibilities:
//! - Fetch pages of at most `MAX_PAGE_SIZE` rows by offset/limit on demand.
//! - Buffer the current page and hand out one decoded row per pull.
//! - Release the job connection on exhaustion or on the first failure.
//!
//! Does NOT handle:
//! - Waiting for the job (see `endpoints::wait_for_completion`).
//! - Restarting iteration; there is no rewind.
//!
//! Invariants:
//! - `fetched` only grows and never exceeds `total`.
//! - `fetched` advances by the requested limit, even when a page comes back short.
//! - Once the connection is released every later pull returns `Ok(None)`.

use std::collections::VecDeque;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::decode::RowDecoder;
use crate::endpoints::fetch_page;
use crate::error::Result;
use crate::models::{DataType, JobHandle, QueryStats};
use crate::transport::JobConnection;
use sumo_config::constants::MAX_PAGE_SIZE;

/// Offset and limit of the next page, or `None` once every row was requested.
pub fn next_page(total: u64, fetched: u64, page_size: u64) -> Option<(u64, u64)> {
    let pending = total.saturating_sub(fetched);
    if pending == 0 {
        None
    } else {
        Some((fetched, pending.min(page_size.clamp(1, MAX_PAGE_SIZE))))
    }
}

/// Lazy cursor yielding rows decoded by `D`.
#[derive(Debug)]
pub struct ResultCursor<D: RowDecoder> {
    conn: Option<JobConnection>,
    handle: JobHandle,
    data_type: DataType,
    total: u64,
    fetched: u64,
    page_size: u64,
    buffer: VecDeque<Map<String, Value>>,
    decoder: D,
}

impl<D: RowDecoder> ResultCursor<D> {
    pub fn new(
        conn: JobConnection,
        handle: JobHandle,
        stats: &QueryStats,
        page_size: u64,
        decoder: D,
    ) -> Self {
        Self {
            conn: Some(conn),
            handle,
            data_type: stats.data_type(),
            total: stats.total_rows(),
            fetched: 0,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            buffer: VecDeque::new(),
            decoder,
        }
    }

    /// Pull the next row, fetching a page when the buffer is empty.
    pub async fn next_row(&mut self) -> Result<Option<D::Row>> {
        loop {
            if let Some(map) = self.buffer.pop_front() {
                return match self.decoder.decode(map) {
                    Ok(row) => Ok(Some(row)),
                    Err(e) => {
                        self.release();
                        Err(e)
                    }
                };
            }

            let Some(conn) = self.conn.as_ref() else {
                return Ok(None);
            };

            let Some((offset, limit)) = next_page(self.total, self.fetched, self.page_size) else {
                debug!(total = self.total, "Result cursor exhausted");
                self.release();
                return Ok(None);
            };

            match fetch_page(conn, &self.handle, self.data_type, offset, limit).await {
                Ok(rows) => {
                    if (rows.len() as u64) < limit {
                        warn!(
                            offset,
                            limit,
                            received = rows.len(),
                            "Result page shorter than requested"
                        );
                    }
                    self.fetched += limit;
                    self.buffer.extend(rows);
                }
                Err(e) => {
                    self.release();
                    return Err(e);
                }
            }
        }
    }

    /// True while the cursor still holds the job connection.
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Rows requested from the service so far.
    pub fn fetched(&self) -> u64 {
        self.fetched
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    fn release(&mut self) {
        self.buffer.clear();
        self.conn.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_page_single() {
        assert_eq!(next_page(10, 0, 100), Some((0, 10)));
        assert_eq!(next_page(10, 10, 100), None);
    }

    #[test]
    fn test_next_page_sequence() {
        let mut fetched = 0;
        let mut pages = Vec::new();
        while let Some((offset, limit)) = next_page(250, fetched, 100) {
            pages.push((offset, limit));
            fetched += limit;
        }
        assert_eq!(pages, vec![(0, 100), (100, 100), (200, 50)]);
    }

    #[test]
    fn test_next_page_clamps_page_size() {
        assert_eq!(next_page(500, 0, 1000), Some((0, 100)));
        assert_eq!(next_page(500, 0, 0), Some((0, 1)));
    }

    #[test]
    fn test_next_page_empty_result() {
        assert_eq!(next_page(0, 0, 100), None);
    }
}
