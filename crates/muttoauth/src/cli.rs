//! Command line flags and action selection.

use clap::Parser;
use muttoauth_oauth::provider::LOOPBACK_REDIRECT_URI;
use muttoauth_oauth::{OAuthClient, Provider, Token};

/// `OAuth2` helper producing XOAUTH2 strings for mutt and other mail clients.
///
/// Tokens are printed, never stored: keep the refresh token and pass it back
/// with `--refresh_token` on later runs.
#[derive(Parser, Debug, Clone)]
#[command(name = "muttoauth", version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // one switch per flag
pub struct Args {
    /// Run the authorization code flow and print the issued tokens
    #[arg(long = "generate_oauth2_token")]
    pub generate_oauth2_token: bool,

    /// Print the base64 XOAUTH2 string for --user and --access_token
    #[arg(long = "generate_oauth2_string")]
    pub generate_oauth2_string: bool,

    /// Client ID of the application that is authenticating. See OAuth2 documentation for details.
    #[arg(
        long = "client_id",
        env = "MUTTOAUTH_CLIENT_ID",
        default_value = "",
        hide_default_value = true
    )]
    pub client_id: String,

    /// Client secret of the application that is authenticating. See OAuth2 documentation for details.
    #[arg(long = "client_secret", env = "MUTTOAUTH_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// OAuth2 access token
    #[arg(long = "access_token")]
    pub access_token: Option<String>,

    /// OAuth2 refresh token
    #[arg(long = "refresh_token", env = "MUTTOAUTH_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Together with --test_smtp_authentication, print the plain XOAUTH2 string
    #[arg(long = "test_imap_authentication")]
    pub test_imap_authentication: bool,

    /// Together with --test_imap_authentication, print the plain XOAUTH2 string
    #[arg(long = "test_smtp_authentication")]
    pub test_smtp_authentication: bool,

    /// Email address of user whose account is being accessed
    #[arg(long, default_value = "None")]
    pub user: String,

    /// Omit verbose descriptions and only print machine-readable outputs.
    #[arg(long)]
    pub quiet: bool,
}

/// The single action a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Refresh the seeded refresh token.
    RefreshToken,
    /// Print the base64 authorization string.
    GenerateString,
    /// Run the authorization code flow.
    GenerateToken,
    /// Print the plain authorization string.
    TestAuthentication,
    /// No actionable flag was given.
    Nothing,
}

impl Args {
    /// Selects the action: refresh, then string, then token generation, then
    /// the combined IMAP and SMTP test.
    #[must_use]
    pub fn action(&self) -> Action {
        if non_empty(self.refresh_token.as_deref()).is_some() {
            Action::RefreshToken
        } else if self.generate_oauth2_string {
            Action::GenerateString
        } else if self.generate_oauth2_token {
            Action::GenerateToken
        } else if self.test_imap_authentication && self.test_smtp_authentication {
            Action::TestAuthentication
        } else {
            Action::Nothing
        }
    }

    /// Builds the client for `provider` from the identity flags.
    #[must_use]
    pub fn client(&self, provider: Provider) -> OAuthClient {
        let client = OAuthClient::new(&self.client_id, provider)
            .with_redirect_uri(LOOPBACK_REDIRECT_URI);
        match non_empty(self.client_secret.as_deref()) {
            Some(secret) => client.with_client_secret(secret),
            None => client,
        }
    }

    /// Returns the token given on the command line, if any part of one was.
    #[must_use]
    pub fn seed_token(&self) -> Option<Token> {
        let access = non_empty(self.access_token.as_deref());
        let refresh = non_empty(self.refresh_token.as_deref());
        if access.is_none() && refresh.is_none() {
            return None;
        }

        let token = Token::bearer(access.unwrap_or_default());
        Some(match refresh {
            Some(refresh) => token.with_refresh_token(refresh),
            None => token,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
