//! `muttoauth` command line entry point.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::io;
use std::process::ExitCode;

use clap::Parser;
use muttoauth::{Args, run};
use muttoauth_oauth::Provider;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muttoauth=warn,muttoauth_oauth=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    match try_main(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn try_main(args: &Args) -> anyhow::Result<()> {
    let provider = Provider::google()?;
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    run(args, provider, &mut rand::thread_rng(), &mut input, &mut output).await
}
