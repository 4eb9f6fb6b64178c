//! `OAuth2` provider configurations.

use crate::error::{Error, Result};
use url::Url;

/// Full Gmail access, required for IMAP and SMTP.
pub const GOOGLE_MAIL_SCOPE: &str = "https://mail.google.com/";

/// Loopback redirect target for installed apps.
///
/// Nothing listens on it; the user copies the `code` parameter from the
/// browser's address bar.
pub const LOOPBACK_REDIRECT_URI: &str = "http://localhost";

/// `OAuth2` provider configuration.
#[derive(Debug, Clone)]
pub struct Provider {
    /// Provider name (e.g., "Google").
    pub name: String,
    /// Authorization endpoint URL.
    pub auth_url: Url,
    /// Token endpoint URL.
    pub token_url: Url,
    /// Default scopes.
    pub default_scopes: Vec<String>,
}

impl Provider {
    /// Creates a new provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if URLs are invalid.
    pub fn new(
        name: impl Into<String>,
        auth_url: impl AsRef<str>,
        token_url: impl AsRef<str>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            auth_url: Url::parse(auth_url.as_ref())?,
            token_url: Url::parse(token_url.as_ref())?,
            default_scopes: Vec::new(),
        })
    }

    /// Sets the default scopes.
    #[must_use]
    pub fn with_default_scopes(mut self, scopes: Vec<String>) -> Self {
        self.default_scopes = scopes;
        self
    }

    /// Google `OAuth2` provider configuration.
    ///
    /// Scopes:
    /// - `https://mail.google.com/` - Full Gmail access (IMAP/SMTP)
    ///
    /// # Errors
    ///
    /// Returns an error if URL parsing fails.
    pub fn google() -> Result<Self> {
        Ok(Self::new(
            "Google",
            "https://accounts.google.com/o/oauth2/auth",
            "https://oauth2.googleapis.com/token",
        )?
        .with_default_scopes(vec![GOOGLE_MAIL_SCOPE.to_string()]))
    }

    /// Returns the default scopes as a single space-separated value.
    #[must_use]
    pub fn scope(&self) -> String {
        self.default_scopes.join(" ")
    }

    /// Validates that the endpoints can carry `OAuth2` requests.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        for (field, url) in [("auth_url", &self.auth_url), ("token_url", &self.token_url)] {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::InvalidConfig(format!(
                    "{field} must be an http(s) URL, got {url}"
                )));
            }
        }
        Ok(())
    }
}
