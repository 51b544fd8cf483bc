//! Error types for the feed SDK

use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// SDK error types
#[derive(Error, Debug)]
pub enum FeedError {
    /// HTTP request failed before a response arrived
    #[cfg(feature = "client")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-success status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A remote mutation was refused or could not be completed
    #[error("Request failed: {0}")]
    Request(String),

    /// Local engagement data names no relation owned by the current user
    #[error("No relation owned by the current user on {entity_id}")]
    InconsistentRelation { entity_id: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FeedError {
    /// Whether the failure is a plain remote failure that a later refetch
    /// or retry can fix, as opposed to a local data inconsistency.
    pub fn is_transient(&self) -> bool {
        match self {
            #[cfg(feature = "client")]
            FeedError::Http(_) => true,
            FeedError::Server { status, .. } => *status >= 500 || *status == 429,
            FeedError::Request(_) => true,
            _ => false,
        }
    }
}

impl From<toml::de::Error> for FeedError {
    fn from(err: toml::de::Error) -> Self {
        FeedError::Config(err.to_string())
    }
}
