//! Result page retrieval.

use serde_json::{Map, Value};
use tracing::debug;

use super::check_response;
use crate::error::{ClientError, Result};
use crate::models::{DataType, JobHandle, ResultPage};
use crate::transport::JobConnection;

/// Fetch one page of rows from `{location}/{data_type}?offset=..&limit=..`.
///
/// Returns the `map` object of every entry under the `data_type` key.
pub async fn fetch_page(
    conn: &JobConnection,
    handle: &JobHandle,
    data_type: DataType,
    offset: u64,
    limit: u64,
) -> Result<Vec<Map<String, Value>>> {
    debug!(%data_type, offset, limit, "Fetching result page");

    let mut url = handle.location.clone();
    url.path_segments_mut()
        .map_err(|_| {
            ClientError::InvalidUrl(format!(
                "job location cannot carry a path: {}",
                handle.location
            ))
        })?
        .pop_if_empty()
        .push(data_type.as_str());

    let response = conn
        .get(url, handle.cookie.as_deref())
        .query(&[("offset", offset), ("limit", limit)])
        .send()
        .await?;
    let response = check_response(response).await?;
    let body = response.text().await?;
    let page: ResultPage = serde_json::from_str(&body)?;

    Ok(page
        .into_entries(data_type)
        .into_iter()
        .map(|entry| entry.map)
        .collect())
}
