use thiserror::Error;

/// Caller contract violations on the watchlist bindings.
#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("Watchlist item must be a JSON object")]
    NotAnObject,

    #[error("Watchlist item is missing required field 'id'")]
    MissingId,

    #[error("Watchlist item id must be an integer or a string, got {value}")]
    InvalidId { value: String },
}
