//! `OAuth2` authorization flows.

mod code;
mod state;

pub use code::AuthorizationCodeFlow;
pub use state::{STATE_ALPHABET, STATE_LEN, random_string};

use crate::error::{Error, Result, TokenError};
use crate::provider::Provider;
use crate::token::{ErrorResponse, Token, TokenResponse};
use reqwest::Client;
use std::collections::HashMap;
use tracing::debug;

/// Common `OAuth2` client configuration.
///
/// Fields are fixed at construction; every grant borrows the client
/// immutably.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    /// Client ID from provider.
    pub client_id: String,
    /// Client secret (optional for public clients).
    pub client_secret: Option<String>,
    /// Redirect URI for authorization code flow.
    pub redirect_uri: Option<String>,
    /// Provider configuration.
    pub provider: Provider,
    /// HTTP client.
    http_client: Client,
}

impl OAuthClient {
    /// Creates a new OAuth client.
    #[must_use]
    pub fn new(client_id: impl Into<String>, provider: Provider) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            redirect_uri: None,
            provider,
            http_client: Client::new(),
        }
    }

    /// Sets the client secret. An empty secret leaves the client public.
    #[must_use]
    pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        self.client_secret = (!secret.is_empty()).then_some(secret);
        self
    }

    /// Sets the redirect URI.
    #[must_use]
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Refreshes an access token using a refresh token.
    ///
    /// The returned token keeps the old refresh token when the server does
    /// not issue a new one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RefreshFailed`] if the token has no refresh token or
    /// the server rejects the grant.
    pub async fn refresh_token(&self, token: &Token) -> Result<Token> {
        let refresh_token = token.refresh_token().map_err(Error::RefreshFailed)?;

        let mut params = HashMap::new();
        params.insert("grant_type", "refresh_token");
        params.insert("refresh_token", refresh_token);

        let mut new_token = self
            .request_token(params)
            .await
            .map_err(Error::RefreshFailed)?;

        // Preserve refresh token if not returned
        if new_token.refresh_token.is_none() {
            new_token.refresh_token.clone_from(&token.refresh_token);
        }

        Ok(new_token)
    }

    /// Exchanges an authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthorizationFailed`] if the exchange fails.
    pub(crate) async fn exchange_code(&self, code: &str) -> Result<Token> {
        if code.is_empty() {
            return Err(Error::AuthorizationFailed(TokenError::MissingCode));
        }

        let mut params = HashMap::new();
        params.insert("grant_type", "authorization_code");
        params.insert("code", code);

        if let Some(uri) = self.redirect_uri.as_deref() {
            params.insert("redirect_uri", uri);
        }

        self.request_token(params)
            .await
            .map_err(Error::AuthorizationFailed)
    }

    /// Posts a grant to the token endpoint and decodes the reply.
    async fn request_token<'a>(
        &'a self,
        mut params: HashMap<&'a str, &'a str>,
    ) -> std::result::Result<Token, TokenError> {
        params.insert("client_id", &self.client_id);

        if let Some(secret) = &self.client_secret {
            params.insert("client_secret", secret);
        }

        debug!(
            provider = %self.provider.name,
            grant_type = params.get("grant_type").copied().unwrap_or_default(),
            "Requesting token"
        );

        let response = self
            .http_client
            .post(self.provider.token_url.clone())
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(%status, "Token endpoint rejected grant");
            return Err(serde_json::from_str::<ErrorResponse>(&body).map_or_else(
                |_| TokenError::InvalidResponse(format!("HTTP {status}: {}", body.trim())),
                ErrorResponse::into_error,
            ));
        }

        let token_response: TokenResponse = serde_json::from_str(&body)?;
        Token::from_response(token_response)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mock_client(server: &MockServer) -> OAuthClient {
        let provider = Provider::new(
            "Mock",
            format!("{}/auth", server.uri()),
            format!("{}/token", server.uri()),
        )
        .unwrap();
        OAuthClient::new("test_client_id", provider)
            .with_client_secret("test_secret")
            .with_redirect_uri("http://localhost")
    }

    #[test]
    fn test_oauth_client_creation() {
        let provider = Provider::google().unwrap();
        let client = OAuthClient::new("test_client_id", provider);
        assert_eq!(client.client_id, "test_client_id");
        assert!(client.client_secret.is_none());
    }

    #[test]
    fn test_oauth_client_with_secret() {
        let provider = Provider::google().unwrap();
        let client = OAuthClient::new("test_client_id", provider)
            .with_client_secret("secret")
            .with_redirect_uri("http://localhost");

        assert_eq!(client.client_secret.as_deref(), Some("secret"));
        assert_eq!(client.redirect_uri.as_deref(), Some("http://localhost"));
    }

    #[test]
    fn test_empty_secret_is_public_client() {
        let provider = Provider::google().unwrap();
        let client = OAuthClient::new("id", provider).with_client_secret("");
        assert!(client.client_secret.is_none());
    }

    #[tokio::test]
    async fn test_exchange_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=4%2F0abc"))
            .and(body_string_contains("client_secret=test_secret"))
            .and(body_string_contains("redirect_uri=http%3A%2F%2Flocalhost"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.access",
                "expires_in": 3599,
                "refresh_token": "1//refresh",
                "scope": "https://mail.google.com/",
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = mock_client(&server).exchange_code("4/0abc").await.unwrap();
        assert_eq!(token.access_token, "ya29.access");
        assert_eq!(token.refresh_token.as_deref(), Some("1//refresh"));
        assert!(token.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_exchange_code_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Malformed auth code."
            })))
            .mount(&server)
            .await;

        let err = mock_client(&server).exchange_code("bogus").await.unwrap_err();
        assert!(matches!(
            err,
            Error::AuthorizationFailed(TokenError::OAuth { ref error, .. }) if error == "invalid_grant"
        ));
    }

    #[tokio::test]
    async fn test_exchange_empty_code_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = mock_client(&server).exchange_code("").await.unwrap_err();
        assert!(matches!(
            err,
            Error::AuthorizationFailed(TokenError::MissingCode)
        ));
    }

    #[tokio::test]
    async fn test_refresh_preserves_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=old_refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "new_access",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .mount(&server)
            .await;

        let old = Token::bearer("old_access").with_refresh_token("old_refresh");
        let token = mock_client(&server).refresh_token(&old).await.unwrap();

        assert_eq!(token.access_token, "new_access");
        assert_eq!(token.refresh_token.as_deref(), Some("old_refresh"));
        assert_eq!(old.access_token, "old_access");
    }

    #[tokio::test]
    async fn test_refresh_replaces_rotated_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "new_access",
                "refresh_token": "rotated",
                "token_type": "Bearer"
            })))
            .mount(&server)
            .await;

        let old = Token::bearer("old_access").with_refresh_token("old_refresh");
        let token = mock_client(&server).refresh_token(&old).await.unwrap();
        assert_eq!(token.refresh_token.as_deref(), Some("rotated"));
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = mock_client(&server)
            .refresh_token(&Token::bearer("access"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RefreshFailed(TokenError::NoRefreshToken)));
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let old = Token::bearer("a").with_refresh_token("r");
        let err = mock_client(&server).refresh_token(&old).await.unwrap_err();
        match err {
            Error::RefreshFailed(TokenError::InvalidResponse(msg)) => {
                assert!(msg.contains("502"));
                assert!(msg.contains("Bad Gateway"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let err = mock_client(&server).exchange_code("code").await.unwrap_err();
        assert!(matches!(err, Error::AuthorizationFailed(TokenError::Json(_))));
    }
}
