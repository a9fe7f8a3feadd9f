//! Persisted snapshot format: a JSON array of watchlist items.

use serde_json::Value;
use thiserror::Error;

use super::item::{ItemId, WatchlistItem, ID_FIELD};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Snapshot must be a JSON array")]
    NotAnArray,

    #[error("Snapshot entry {index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub fn encode(items: &[WatchlistItem]) -> Result<String, SnapshotError> {
    serde_json::to_string(items).map_err(SnapshotError::Serialize)
}

/// Parse and validate a persisted snapshot.
///
/// Structurally valid means: an array whose entries are all objects
/// carrying an integer or string `id`. A present `addedAt` must be a
/// valid RFC 3339 timestamp.
pub fn decode(raw: &str) -> Result<Vec<WatchlistItem>, SnapshotError> {
    let value: Value = serde_json::from_str(raw).map_err(SnapshotError::Malformed)?;
    let Value::Array(entries) = value else {
        return Err(SnapshotError::NotAnArray);
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| decode_entry(index, entry))
        .collect()
}

fn decode_entry(index: usize, entry: Value) -> Result<WatchlistItem, SnapshotError> {
    let invalid = |reason: String| SnapshotError::InvalidEntry { index, reason };

    let Some(object) = entry.as_object() else {
        return Err(invalid("not an object".to_string()));
    };
    match object.get(ID_FIELD) {
        None => return Err(invalid("missing id".to_string())),
        Some(id) if ItemId::from_value(id).is_none() => {
            return Err(invalid(format!("unsupported id {}", id)));
        }
        Some(_) => {}
    }

    serde_json::from_value(entry).map_err(|e| invalid(e.to_string()))
}
