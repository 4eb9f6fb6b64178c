//! Error types for `OAuth2` operations.

use std::io;

/// Result type alias for `OAuth2` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Terminal failures of a single agent invocation.
///
/// Token endpoint problems are reported under the grant that triggered them,
/// so a rejected refresh can never be mistaken for a failed code exchange.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The authorization code exchange was rejected or could not be sent.
    #[error("authorization failed")]
    AuthorizationFailed(#[source] TokenError),

    /// The refresh grant was rejected or could not be sent.
    #[error("token refresh failed")]
    RefreshFailed(#[source] TokenError),

    /// Console I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Returns the token endpoint cause, if this error came from a grant.
    #[must_use]
    pub const fn token_error(&self) -> Option<&TokenError> {
        match self {
            Self::AuthorizationFailed(err) | Self::RefreshFailed(err) => Some(err),
            _ => None,
        }
    }
}

/// Failures talking to the token endpoint.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// HTTP request error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `OAuth2` error from server.
    #[error("OAuth2 error: {error} - {description}")]
    OAuth {
        /// Error code (e.g., `invalid_grant`).
        error: String,
        /// Human-readable description.
        description: String,
    },

    /// Invalid token response.
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    /// No refresh token available.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// The user entered an empty verification code.
    #[error("No verification code entered")]
    MissingCode,
}

impl TokenError {
    /// Creates an OAuth error from error code and description.
    #[must_use]
    pub fn oauth_error(error: impl Into<String>, description: impl Into<String>) -> Self {
        Self::OAuth {
            error: error.into(),
            description: description.into(),
        }
    }
}
