//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// The API renders every failure from one of these. Engine errors convert
/// via `From` in `ledgerly-core`; auth rejections build `Unauthorized`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error the client can correct.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The ledger store failed or timed out.
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Upstream(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::Upstream(_) => "upstream_failure",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Returns the detail message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthorized(m)
            | Self::NotFound(m)
            | Self::Validation(m)
            | Self::Upstream(m)
            | Self::Internal(m) => m,
        }
    }

    /// Returns true if the message is safe to show to API clients.
    ///
    /// Upstream and internal failures carry backend details and are replaced
    /// by a generic message at the HTTP boundary.
    #[must_use]
    pub const fn is_client_facing(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_) | Self::NotFound(_) | Self::Validation(_)
        )
    }
}
