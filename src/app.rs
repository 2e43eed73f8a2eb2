// One invocation: cache lookup, conditional fetch, cache write, display.

use std::future::Future;
use std::io::Write;

use serde_json::Value;
use tokio::task::JoinHandle;

use crate::cache;
use crate::config::Settings;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::render::ActivityRenderer;

/// Anything that can produce a user's raw events feed.
pub trait EventSource {
    fn fetch_events(&self, username: &str) -> impl Future<Output = Result<Value>>;
}

impl EventSource for GitHubClient {
    fn fetch_events(&self, username: &str) -> impl Future<Output = Result<Value>> {
        self.get_user_events(username)
    }
}

/// Where the displayed events came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOrigin {
    Cache,
    Network,
}

/// Result of a completed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub origin: FeedOrigin,
    /// Event lines written to `out`.
    pub lines: usize,
}

/// Show the activity for `settings.username`.
///
/// A fresh snapshot is rendered without touching `source`. Otherwise the feed is
/// fetched once, written to the cache in the background while it renders, and the
/// write is joined before returning. Write failures are logged and never fail the run.
pub async fn run<S: EventSource>(
    settings: &Settings,
    source: &S,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome> {
    let renderer = ActivityRenderer::new(&settings.username, settings.filter_type.as_deref());
    let path = settings.snapshot_path();

    if let Some(feed) = cache::read_if_valid(&path, settings.ttl)? {
        tracing::debug!(path = %path.display(), "cache hit");
        let lines = renderer.render(&feed, out, err)?;
        return Ok(Outcome {
            origin: FeedOrigin::Cache,
            lines,
        });
    }

    tracing::debug!(username = %settings.username, "cache miss, fetching events");
    let feed = source.fetch_events(&settings.username).await?;

    let pending_write = spawn_cache_write(&path, &feed);
    let rendered = renderer.render(&feed, out, err);

    match pending_write.await {
        Ok(Ok(())) => tracing::debug!(path = %path.display(), "cache written"),
        Ok(Err(e)) => tracing::warn!(error = %e, "cache write failed"),
        Err(e) => tracing::warn!(error = %e, "cache write task failed"),
    }

    Ok(Outcome {
        origin: FeedOrigin::Network,
        lines: rendered?,
    })
}

/// Start persisting the fetched body, whatever its shape.
fn spawn_cache_write(path: &std::path::Path, feed: &Value) -> JoinHandle<Result<()>> {
    let path = path.to_path_buf();
    let feed = feed.clone();
    tokio::task::spawn_blocking(move || cache::write_snapshot(&path, feed))
}
