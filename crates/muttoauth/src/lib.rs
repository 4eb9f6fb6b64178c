//! `muttoauth` - `OAuth2` helper for mutt and other mail clients
//!
//! Obtains Google `OAuth2` tokens through the authorization code flow,
//! refreshes them, and formats XOAUTH2 strings for IMAP/SMTP logins.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;

pub use app::run;
pub use cli::{Action, Args};
