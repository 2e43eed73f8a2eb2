// Error types for gh-activity.
// Separates fatal failures (usage, cache read, fetch) from the best-effort cache write.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("{0}")]
    Usage(String),

    #[error("Error reading cache file {path}: {source}")]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing cache file {path}: {source}")]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error fetching data: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Error parsing JSON response: {0}")]
    ResponseParse(#[source] serde_json::Error),

    #[error("Error writing output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Error writing cache file {path}: {reason}")]
    CacheWrite { path: PathBuf, reason: String },
}

impl ActivityError {
    /// Whether the error must stop the program.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ActivityError::CacheWrite { .. })
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() { 1 } else { 0 }
    }
}

pub type Result<T> = std::result::Result<T, ActivityError>;
