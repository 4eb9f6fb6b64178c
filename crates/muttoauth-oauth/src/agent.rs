//! The token agent: one `OAuth2` action per invocation.

use std::io::{BufRead, Write};

use rand::Rng;
use tracing::{debug, info};

use crate::error::{Error, Result, TokenError};
use crate::flow::{AuthorizationCodeFlow, OAuthClient, STATE_LEN, random_string};
use crate::sasl::xoauth2_string;
use crate::token::Token;

/// Owns a client configuration and the token seeded by the caller.
///
/// Both are fixed at construction. Grants return new tokens instead of
/// updating the agent.
#[derive(Debug)]
pub struct TokenAgent {
    client: OAuthClient,
    token: Option<Token>,
}

impl TokenAgent {
    /// Creates an agent, optionally seeded with a previously issued token.
    #[must_use]
    pub const fn new(client: OAuthClient, token: Option<Token>) -> Self {
        Self { client, token }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn client(&self) -> &OAuthClient {
        &self.client
    }

    /// Returns the seeded token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Runs the interactive authorization code flow.
    ///
    /// Writes the consent URL to `output`, reads the verification code from
    /// one line of `input`, exchanges it and prints the issued token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthorizationFailed`] if the exchange fails, or
    /// [`Error::Io`] if the console cannot be used.
    pub async fn run_authorization_code_flow<R, I, W>(
        &self,
        rng: &mut R,
        input: &mut I,
        output: &mut W,
        quiet: bool,
    ) -> Result<Token>
    where
        R: Rng + ?Sized,
        I: BufRead,
        W: Write,
    {
        let state = random_string(rng, STATE_LEN);
        let flow = AuthorizationCodeFlow::new(&self.client);
        let url = flow.authorization_url(&state)?;

        writeln!(
            output,
            "To authorize token, visit this url and follow the directions:"
        )?;
        writeln!(output, "  {url}")?;
        writeln!(output, "Enter verification code:")?;
        output.flush()?;

        let mut code = String::new();
        input.read_line(&mut code)?;
        debug!(len = code.trim().len(), "Read verification code");

        let token = flow.exchange_code(code.trim()).await?;
        info!("Authorization code exchanged");

        print_token(output, &token, quiet)?;
        Ok(token)
    }

    /// Obtains a fresh access token from the seeded refresh token.
    ///
    /// Nothing is written when the grant fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RefreshFailed`] if no refresh token was seeded or the
    /// provider rejects it.
    pub async fn refresh_access_token<W: Write>(
        &self,
        output: &mut W,
        quiet: bool,
    ) -> Result<Token> {
        let current = self
            .token
            .as_ref()
            .ok_or(Error::RefreshFailed(TokenError::NoRefreshToken))?;

        let token = self.client.refresh_token(current).await?;
        info!("Access token refreshed");

        print_token(output, &token, quiet)?;
        Ok(token)
    }

    /// Formats the XOAUTH2 string for `user` with the seeded access token.
    ///
    /// An agent without a token formats an empty bearer value.
    #[must_use]
    pub fn authorization_string(&self, user: &str, plain: bool) -> String {
        let access_token = self.token.as_ref().map_or("", |t| t.access_token.as_str());
        xoauth2_string(user, access_token, plain)
    }
}

/// Prints a token: only the access token when `quiet`, all fields otherwise.
///
/// # Errors
///
/// Returns an error if writing to `output` fails.
pub fn print_token<W: Write>(output: &mut W, token: &Token, quiet: bool) -> std::io::Result<()> {
    if quiet {
        return writeln!(output, "{}", token.access_token);
    }

    let expiry = token
        .expires_at
        .map_or_else(|| "unknown".to_string(), |exp| exp.to_rfc3339());

    writeln!(
        output,
        "Refresh Token: {}",
        token.refresh_token.as_deref().unwrap_or_default()
    )?;
    writeln!(output, "Access Token: {}", token.access_token)?;
    writeln!(output, "Access Token Expiration Seconds: {expiry}")
}
