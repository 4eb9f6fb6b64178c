//! Authorization Code Flow implementation.

use super::OAuthClient;
use crate::error::Result;
use crate::token::Token;
use url::Url;

/// Authorization Code Flow for `OAuth2`.
///
/// Suited to installed apps without a redirect listener: the user opens the
/// consent URL and pastes the returned code back in.
#[derive(Debug)]
pub struct AuthorizationCodeFlow<'a> {
    client: &'a OAuthClient,
}

impl<'a> AuthorizationCodeFlow<'a> {
    /// Creates a new authorization code flow.
    #[must_use]
    pub const fn new(client: &'a OAuthClient) -> Self {
        Self { client }
    }

    /// Builds the authorization URL for user consent.
    ///
    /// Always requests offline access so the provider issues a refresh token.
    ///
    /// # Arguments
    ///
    /// * `state` - State nonce correlating the consent with this request
    ///
    /// # Errors
    ///
    /// Returns an error if the provider configuration is invalid.
    pub fn authorization_url(&self, state: &str) -> Result<Url> {
        self.client.provider.validate()?;
        let mut url = self.client.provider.auth_url.clone();

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("access_type", "offline")
                .append_pair("client_id", &self.client.client_id);

            if let Some(redirect_uri) = &self.client.redirect_uri {
                pairs.append_pair("redirect_uri", redirect_uri);
            }

            pairs.append_pair("response_type", "code");

            let scope_str = self.client.provider.scope();
            if !scope_str.is_empty() {
                pairs.append_pair("scope", &scope_str);
            }

            pairs.append_pair("state", state);
        }

        Ok(url)
    }

    /// Exchanges the authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AuthorizationFailed`] if the token exchange fails.
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        self.client.exchange_code(code).await
    }
}
