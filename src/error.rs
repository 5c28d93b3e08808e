//! Error types for sweepy-tui.

use thiserror::Error;

/// The main error type for sweepy-tui.
///
/// The first five variants form the closed taxonomy of the API boundary;
/// everything a backend call can fail with lands in exactly one of them.
#[derive(Error, Debug)]
pub enum Error {
    /// The backend answered 404 for the requested resource.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// The request was rejected as invalid, either by the backend (400/409/422)
    /// or by a client-side check before it was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backend failed or answered with a status we do not expect.
    #[error("server error {status}: {detail}")]
    ServerFault { status: u16, detail: String },

    /// The request never produced a response (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// A success response did not match the expected schema.
    #[error("could not decode response from {endpoint}: {detail}")]
    Decode { endpoint: String, detail: String },

    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Invalid input or state
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new not-found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new decode error for the given endpoint.
    pub fn decode(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Map a non-success HTTP status to the matching taxonomy variant.
    ///
    /// `resource` names what was asked for and ends up in `NotFound`;
    /// `detail` is the (possibly empty) response body.
    pub fn from_status(status: u16, resource: &str, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        match status {
            404 => Self::not_found(resource),
            400 | 409 | 422 => {
                if detail.is_empty() {
                    Self::Validation(format!("{resource} rejected with status {status}"))
                } else {
                    Self::Validation(detail)
                }
            }
            _ => Self::ServerFault { status, detail },
        }
    }

    /// Whether an idempotent request that failed with this error may be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::ServerFault { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<::config::ConfigError> for Error {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            Error::from_status(404, "sweepstake missing-id", ""),
            Error::NotFound { resource } if resource == "sweepstake missing-id"
        ));
        assert!(matches!(
            Error::from_status(400, "sweepstake", "Sweepstake is already closed"),
            Error::Validation(msg) if msg == "Sweepstake is already closed"
        ));
        assert!(matches!(
            Error::from_status(422, "create", ""),
            Error::Validation(msg) if msg.contains("422")
        ));
        assert!(matches!(
            Error::from_status(503, "sweepstakes", "unavailable"),
            Error::ServerFault { status: 503, .. }
        ));
        assert!(matches!(
            Error::from_status(418, "sweepstakes", ""),
            Error::ServerFault { status: 418, .. }
        ));
    }

    #[test]
    fn test_retryable() {
        assert!(Error::transport("timed out").is_retryable());
        assert!(Error::from_status(502, "x", "").is_retryable());
        assert!(!Error::from_status(418, "x", "").is_retryable());
        assert!(!Error::not_found("x").is_retryable());
        assert!(!Error::decode("GET /api/sweepstakes", "eof").is_retryable());
    }
}
