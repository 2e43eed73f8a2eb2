// Command-line parsing and resolved runtime settings.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::builder::NonEmptyStringValueParser;

use crate::cache::{self, DEFAULT_TTL};
use crate::error::{ActivityError, Result};
use crate::github::GITHUB_API_BASE;

/// Show a GitHub user's recent activity
#[derive(Parser, Debug)]
#[command(name = "gh-activity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// GitHub username whose activity to show
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub username: String,

    /// Only show events of this type (e.g. PushEvent, WatchEvent)
    #[arg(value_name = "FILTER_TYPE")]
    pub filter_type: Option<String>,

    /// Directory for cached snapshots
    #[arg(long, env = "GH_ACTIVITY_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GH_ACTIVITY_API_URL", default_value = GITHUB_API_BASE)]
    pub api_url: String,

    /// Seconds a cached snapshot stays fresh
    #[arg(long, default_value_t = DEFAULT_TTL.as_secs())]
    pub ttl_secs: u64,

    /// Log level (trace, debug, info, warn, error). Overrides RUST_LOG.
    #[arg(short, long)]
    pub log_level: Option<String>,
}

/// Everything one invocation needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub username: String,
    pub filter_type: Option<String>,
    pub cache_dir: PathBuf,
    pub api_url: String,
    pub ttl: Duration,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let cache_dir = match cli.cache_dir {
            Some(dir) => dir,
            None => cache::cache_dir().ok_or_else(|| {
                ActivityError::Usage(
                    "could not determine a cache directory; pass --cache-dir".to_string(),
                )
            })?,
        };

        Ok(Self {
            username: cli.username,
            filter_type: cli.filter_type,
            cache_dir,
            api_url: cli.api_url,
            ttl: Duration::from_secs(cli.ttl_secs),
        })
    }

    /// Where this user's snapshot lives.
    pub fn snapshot_path(&self) -> PathBuf {
        cache::snapshot_path(&self.cache_dir, &self.username)
    }
}

/// Exit code for a rejected command line.
/// Usage errors exit 1 rather than clap's default 2; `--help` and `--version` exit 0.
pub fn parse_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { 1 } else { 0 }
}

/// Resolve log level: CLI flag > RUST_LOG > default "warn"
pub fn resolve_log_level(cli_level: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return level.to_string();
    }
    std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string())
}
