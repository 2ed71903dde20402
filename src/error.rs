//! Crate-wide error type.
//!
//! Storage, HTTP and decoding failures convert with `?`. The domain variants
//! carry a human-readable reason.

#[derive(Debug, thiserror::Error)]
pub enum MtgManagerError {
    #[error("database error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// Transport failure or non-success status from Scryfall or MyMemory.
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An upstream service answered, but with a failure in its payload.
    #[error("upstream service error: {0}")]
    Upstream(String),

    /// A user, card, deck or collection row that is absent or not owned by
    /// the caller.
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller input failed validation.
    #[error("invalid input: {0}")]
    InvalidArgument(String),

    /// No signed-in identity.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A network call was attempted with the manager in offline mode.
    #[error("offline: {0}")]
    Offline(String),
}

pub type Result<T> = std::result::Result<T, MtgManagerError>;
