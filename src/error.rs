//! Error types for the mail relay.

use thiserror::Error;

/// Common error type for the mail relay.
///
/// Covers startup: loading configuration, initializing logging and
/// binding the server. Request-time failures are reported as
/// [`crate::web::ApiError`].
#[derive(Error, Debug)]
pub enum RelayError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for mail relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
