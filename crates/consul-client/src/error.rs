//! Client error types.

use thiserror::Error;

/// Placeholder used when the body of a failed response cannot be read.
pub(crate) const UNKNOWN_ERROR_BODY: &str = "Unknown error";

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The agent answered with a non-success status code.
    #[error("HTTP {status} {status_text}: {body}")]
    HttpRequest {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
        /// Response body text, or a placeholder when it could not be read.
        body: String,
    },

    /// The network call itself failed (DNS, refused connection, timeout).
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A response could not be decoded into the requested shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request body serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A path segment cannot be sent as given (`.` or `..`).
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wrap any error raised by an [`HttpTransport`](crate::HttpTransport).
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Transport(err.into())
    }

    /// HTTP status code, if the agent answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpRequest { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::HttpRequest { status: 404, .. })
    }

    /// Check if this is an authentication or ACL error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::HttpRequest { status: 401 | 403, .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::HttpRequest { status, .. } if *status >= 500)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
