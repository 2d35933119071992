//! Error handling for the Doctor Assistant client

use std::fmt;
use thiserror::Error;

/// Unified error type for the Doctor Assistant client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Filesystem errors from the session store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Non-success response from the backend, carrying the `detail` field
    /// the backend puts in error bodies
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// The backend rejected the bearer credential on an authenticated call
    /// (401 or 403); the session must be discarded
    #[error("Session expired")]
    SessionExpired,

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new API error
    pub fn api<T: fmt::Display>(status: u16, detail: T) -> Self {
        Error::Api {
            status,
            detail: detail.to_string(),
        }
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// Whether this error means the session is no longer valid
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::SessionExpired)
    }

    /// Whether this error came from a request that never reached the backend
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}
