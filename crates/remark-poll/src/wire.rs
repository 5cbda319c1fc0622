//! Decoding for the list and count endpoint payloads.

use remark_core::record::CommentRecord;
use serde::Deserialize;

use crate::feed::FeedError;

#[derive(Debug, Deserialize)]
struct CountPayload {
    count: i64,
}

/// Decode the list endpoint body: a JSON array of comment records.
///
/// Elements that do not decode as records are skipped rather than failing
/// the batch; the reducer never validates, so tolerance lives here at the
/// boundary. A body that is not a JSON array at all is a decode error.
pub fn decode_list(raw: &str) -> Result<Vec<CommentRecord>, FeedError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(raw).map_err(|e| FeedError::Decode(format!("list payload: {e}")))?;

    let mut records = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<CommentRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => tracing::debug!("skipping undecodable comment record: {e}"),
        }
    }
    Ok(records)
}

/// Decode the count endpoint body: `{"count": n}`.
pub fn decode_count(raw: &str) -> Result<usize, FeedError> {
    let payload: CountPayload =
        serde_json::from_str(raw).map_err(|e| FeedError::Decode(format!("count payload: {e}")))?;
    usize::try_from(payload.count)
        .map_err(|_| FeedError::Decode(format!("negative count: {}", payload.count)))
}
