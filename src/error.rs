//! Error types shared by the authenticator, the drive client and the walk.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The client secret file is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The cached token could not be read or written.
    #[error("Token store error: {0}")]
    TokenStore(String),

    /// The interactive code exchange failed.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The outline file is missing, malformed or contains blank names.
    #[error("Outline error: {0}")]
    Outline(String),

    /// The Drive API answered with a non-success status.
    #[error("Drive API error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
