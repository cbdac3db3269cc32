//! Error types for the lictl crate

use reqwest::StatusCode;
use thiserror::Error;

/// Result type for lictl operations
pub type Result<T> = std::result::Result<T, Error>;

/// A non-2xx HTTP response observed while scraping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// HTTP status code
    pub status_code: u16,
    /// Detail message describing where the status was observed
    pub message: String,
}

impl HttpError {
    /// Create an error for the given status with a detail message
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
        }
    }

    /// Create an error from a response status
    pub fn from_status(status: StatusCode, url: &str) -> Self {
        Self::new(
            status.as_u16(),
            format!("received non-2xx response: {} from {}", status, url),
        )
    }

    /// Whether the server asked us to back off (HTTP 429)
    pub fn is_rate_limited(&self) -> bool {
        self.status_code == StatusCode::TOO_MANY_REQUESTS.as_u16()
    }

    /// Canonical reason phrase for the status code
    pub fn reason(&self) -> &'static str {
        StatusCode::from_u16(self.status_code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown Status")
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

impl std::error::Error for HttpError {}

/// Error type for lictl operations
#[derive(Debug, Error)]
pub enum Error {
    /// Server answered with a non-2xx status
    #[error(transparent)]
    Status(#[from] HttpError),

    /// Transport failure while performing an operation
    #[error("{context}: {source}")]
    Transport {
        /// What was being attempted
        context: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Every retry attempt failed
    #[error("failed after {attempts} retries: {source}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error from the last attempt
        #[source]
        source: Box<Error>,
    },

    /// Invalid client or command configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Document could not be read or parsed
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// External search lookup failed
    #[error("Search error: {0}")]
    Search(String),

    /// Aggregated per-URL failures from a batch
    #[error("{0}")]
    Batch(String),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap a transport error with the operation that failed
    pub fn transport(context: impl Into<String>, source: reqwest::Error) -> Self {
        Error::Transport {
            context: context.into(),
            source,
        }
    }

    /// The HTTP status error, if this is one
    pub fn http(&self) -> Option<&HttpError> {
        match self {
            Error::Status(err) => Some(err),
            _ => None,
        }
    }

    /// Whether this error means "stop and let the server cool down"
    pub fn is_rate_limited(&self) -> bool {
        self.http().is_some_and(HttpError::is_rate_limited)
    }
}
