use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while asking the remote model for text.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The request never got a response (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Upstream API error {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// The provider refused to produce text for this prompt.
    #[error("Response blocked: {0}")]
    Blocked(String),

    /// The provider's response body could not be interpreted.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The generator is not able to serve requests.
    #[error("Generator unavailable: {0}")]
    Unavailable(String),
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;
