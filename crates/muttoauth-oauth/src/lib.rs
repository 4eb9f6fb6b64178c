//! # muttoauth-oauth
//!
//! `OAuth2` token lifecycle for mail clients that authenticate with XOAUTH2.
//!
//! ## Features
//!
//! - **Authorization Code Flow**: consent URL with a random state nonce and
//!   offline access, code pasted back by the user
//! - **Token refresh**: refresh grant that keeps the old refresh token unless
//!   the provider rotates it
//! - **SASL XOAUTH2**: the authorization string IMAP/SMTP clients send
//!
//! ## Quick Start
//!
//! ```ignore
//! use muttoauth_oauth::{OAuthClient, Provider, Token, TokenAgent};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OAuthClient::new("your_client_id", Provider::google()?)
//!         .with_client_secret("your_secret");
//!     let seeded = Token::bearer("").with_refresh_token("1//saved-refresh-token");
//!     let agent = TokenAgent::new(client, Some(seeded));
//!
//!     // Prints the fresh access token on stdout
//!     let token = agent.refresh_access_token(&mut std::io::stdout(), true).await?;
//!
//!     let auth = muttoauth_oauth::sasl::xoauth2_string("user@gmail.com", &token.access_token, false);
//!     // Send: AUTHENTICATE XOAUTH2 {auth}
//!     Ok(())
//! }
//! ```
//!
//! Tokens are never stored: the caller keeps the printed values and seeds
//! them back on the next run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod agent;
mod error;
pub mod flow;
pub mod provider;
pub mod sasl;
pub mod token;

pub use agent::{TokenAgent, print_token};
pub use error::{Error, Result, TokenError};
pub use flow::{AuthorizationCodeFlow, OAuthClient};
pub use provider::Provider;
pub use token::Token;
