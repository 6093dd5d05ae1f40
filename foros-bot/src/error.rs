//! Error types for foros-bot

use thiserror::Error;

/// Result type for bot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the bot service
#[derive(Error, Debug)]
pub enum Error {
    /// Messaging gateway rejected or failed a request
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Wire serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Shared domain error (store, config, lookups)
    #[error("{0}")]
    Common(#[from] foros_common::Error),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
