//! gh-activity - print a GitHub user's recent activity
//!
//! # Usage
//!
//! ```bash
//! gh-activity octocat
//! gh-activity octocat PushEvent
//! gh-activity octocat --cache-dir /tmp/gh-activity --log-level debug
//! ```

mod app;
mod cache;
mod config;
mod error;
mod github;
mod render;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::{Cli, Settings};
use crate::error::Result;
use crate::github::GitHubClient;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(config::parse_exit_code(&e));
        }
    };

    init_logging(&config::resolve_log_level(cli.log_level.as_deref()));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_cli(cli)?;
    let client = GitHubClient::new(&settings.api_url)?;

    let outcome = app::run(&settings, &client, &mut io::stdout(), &mut io::stderr()).await?;

    tracing::debug!(origin = ?outcome.origin, lines = outcome.lines, "done");
    Ok(())
}

/// Initialize the tracing subscriber. Logs go to stderr so stdout carries only activity.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .with(filter)
        .init();
}
