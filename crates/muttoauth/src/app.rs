//! Runs the selected action against one token agent.

use std::io::{BufRead, Write};

use anyhow::Context;
use muttoauth_oauth::{Provider, TokenAgent};
use rand::Rng;
use tracing::info;

use crate::cli::{Action, Args};

/// Performs the single action selected by `args`.
///
/// Results go to `output`; the verification code, when the authorization
/// flow needs one, is read from `input`.
///
/// # Errors
///
/// Returns an error if the token grant fails or `output` cannot be written.
/// The cause is a [`muttoauth_oauth::Error`] and can be recovered with
/// `downcast_ref`.
pub async fn run<R, I, W>(
    args: &Args,
    provider: Provider,
    rng: &mut R,
    input: &mut I,
    output: &mut W,
) -> anyhow::Result<()>
where
    R: Rng + ?Sized,
    I: BufRead,
    W: Write,
{
    let action = args.action();
    info!(?action, provider = %provider.name, "Running");

    let agent = TokenAgent::new(args.client(provider), args.seed_token());

    match action {
        Action::RefreshToken => {
            agent
                .refresh_access_token(output, args.quiet)
                .await
                .context("could not refresh the access token")?;
        }
        Action::GenerateString => {
            write!(output, "{}", agent.authorization_string(&args.user, false))?;
        }
        Action::GenerateToken => {
            agent
                .run_authorization_code_flow(rng, input, output, args.quiet)
                .await
                .context("could not generate an OAuth2 token")?;
        }
        Action::TestAuthentication => {
            write!(output, "{}", agent.authorization_string(&args.user, true))?;
        }
        Action::Nothing => writeln!(output, "Nothing to do.")?,
    }

    output.flush()?;
    Ok(())
}
