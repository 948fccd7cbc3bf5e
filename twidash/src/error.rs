//! Error types.

use thiserror::Error;

/// Context line shown when an aggregation pass fails.
pub const FETCH_FAILED_INFO: &str = "The server failed to load data.";

/// Context line shown for an unknown page or command.
pub const NOT_FOUND_INFO: &str = "The page you required does not exist";

/// The main error type for twidash operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-related error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The platform API returned an error response.
    #[error("API error [{code}]: {message}")]
    Api { code: String, message: String },

    /// Failed to parse response data.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Operation requires credentials but none were provided.
    #[error("Authentication required")]
    AuthRequired,

    /// A required field was missing in the response.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Invalid argument passed to an API method.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// One of the aggregation reads failed.
    #[error("Failed to load {resource}: {source}")]
    Fetch {
        resource: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// Unknown page, command or resource.
    #[error("Page Not Found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create an API error.
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Api {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        Error::MissingField(field.into())
    }

    /// Wrap an error from one of the aggregation reads.
    pub fn fetch(resource: &'static str, source: Error) -> Self {
        Error::Fetch {
            resource,
            source: Box::new(source),
        }
    }

    /// User-facing context line for this error, if any.
    pub fn info(&self) -> Option<&'static str> {
        match self {
            Error::Fetch { .. } => Some(FETCH_FAILED_INFO),
            Error::NotFound(_) => Some(NOT_FOUND_INFO),
            _ => None,
        }
    }

    /// Check if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(_) => true,
            // 88: rate limit exceeded, 130: over capacity, 131: internal error
            Error::Api { code, .. } => matches!(code.as_str(), "88" | "130" | "131" | "429"),
            Error::Fetch { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::AuthRequired => true,
            // 32: could not authenticate, 89: invalid or expired token
            Error::Api { code, .. } => matches!(code.as_str(), "32" | "89" | "401"),
            Error::Fetch { source, .. } => source.is_auth_error(),
            _ => false,
        }
    }
}

/// Result type alias for twidash operations.
pub type Result<T> = std::result::Result<T, Error>;
