// Cache store for reading and writing activity snapshots.
// Handles JSON serialization, TTL checking, and filesystem operations.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ActivityError, Result};

/// Default snapshot TTL: 10 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// A user's feed as last fetched, with the time it was captured.
#[derive(Debug, Clone, Serialize)]
pub struct CacheSnapshot {
    /// When the feed was fetched.
    pub timestamp: DateTime<Utc>,
    /// The feed body exactly as the API returned it.
    pub events: Value,
}

impl CacheSnapshot {
    /// Create a snapshot captured now.
    pub fn new(events: Value) -> Self {
        Self {
            timestamp: Utc::now(),
            events,
        }
    }

    /// Decode a parsed cache document.
    /// Returns the reason when the document is well-formed JSON but not a usable snapshot.
    fn from_document(mut doc: Value) -> std::result::Result<Self, &'static str> {
        let timestamp = doc
            .get("timestamp")
            .and_then(Value::as_str)
            .ok_or("missing timestamp")?
            .parse::<DateTime<Utc>>()
            .map_err(|_| "unparseable timestamp")?;

        match doc.get_mut("events").map(Value::take) {
            Some(events) if !events.is_null() => Ok(Self { timestamp, events }),
            _ => Err("missing events"),
        }
    }

    /// Age of the snapshot relative to `now`.
    /// A timestamp in the future has no meaningful age and reports `Duration::MAX`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.timestamp)
            .to_std()
            .unwrap_or(Duration::MAX)
    }

    /// Check if this snapshot has expired based on TTL.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age(Utc::now()) >= ttl
    }

    /// Check if this snapshot is still valid (not expired).
    pub fn is_valid(&self, ttl: Duration) -> bool {
        !self.is_expired(ttl)
    }
}

/// Read a snapshot from a file.
///
/// A missing file, or valid JSON without a usable `timestamp` and `events`, is absence.
/// Only a file that is not JSON at all is `CacheCorrupt`.
pub fn read_snapshot(path: &Path) -> Result<Option<CacheSnapshot>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ActivityError::CacheIo {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let doc: Value =
        serde_json::from_str(&contents).map_err(|source| ActivityError::CacheCorrupt {
            path: path.to_path_buf(),
            source,
        })?;

    match CacheSnapshot::from_document(doc) {
        Ok(snapshot) => Ok(Some(snapshot)),
        Err(reason) => {
            tracing::debug!(path = %path.display(), reason, "ignoring unusable cache snapshot");
            Ok(None)
        }
    }
}

/// Read a snapshot's feed, returning None if absent or expired.
/// Stale files are left in place for the next write to replace.
pub fn read_if_valid(path: &Path, ttl: Duration) -> Result<Option<Value>> {
    match read_snapshot(path)? {
        Some(snapshot) if snapshot.is_valid(ttl) => Ok(Some(snapshot.events)),
        Some(snapshot) => {
            tracing::debug!(
                path = %path.display(),
                captured_at = %snapshot.timestamp,
                "cache snapshot is stale"
            );
            Ok(None)
        }
        None => Ok(None),
    }
}

/// Write a feed to the cache as a fresh snapshot, replacing any previous one.
pub fn write_snapshot(path: &Path, events: Value) -> Result<()> {
    let snapshot = CacheSnapshot::new(events);
    write_json(path, &snapshot).map_err(|reason| ActivityError::CacheWrite {
        path: path.to_path_buf(),
        reason,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> std::result::Result<(), String> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| e.to_string())?;
    file.write_all(json.as_bytes()).map_err(|e| e.to_string())?;
    file.sync_all().map_err(|e| e.to_string())?;
    fs::rename(&temp_path, path).map_err(|e| e.to_string())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_raw_snapshot(path: &Path, timestamp: DateTime<Utc>, events: Value) {
        let doc = json!({ "timestamp": timestamp.to_rfc3339(), "events": events });
        fs::write(path, doc.to_string()).unwrap();
    }

    #[test]
    fn test_write_and_read_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users").join("octocat.json");

        let events = json!([{"type": "WatchEvent", "repo": {"name": "a/b"}}]);
        write_snapshot(&path, events.clone()).unwrap();

        let snapshot = read_snapshot(&path).unwrap().unwrap();
        assert_eq!(snapshot.events, events);
        assert!(snapshot.is_valid(DEFAULT_TTL));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        assert!(read_snapshot(&path).unwrap().is_none());
        assert!(read_if_valid(&path, DEFAULT_TTL).unwrap().is_none());
    }

    #[test]
    fn test_five_minute_old_snapshot_is_valid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("octocat.json");
        let events = json!([{"type": "PushEvent"}]);

        write_raw_snapshot(&path, Utc::now() - chrono::Duration::minutes(5), events);

        let cached = read_if_valid(&path, DEFAULT_TTL).unwrap().unwrap();
        assert_eq!(cached, json!([{"type": "PushEvent"}]));
    }

    #[test]
    fn test_stale_snapshot_is_absent_and_kept() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("octocat.json");

        write_raw_snapshot(&path, Utc::now() - chrono::Duration::minutes(11), json!([]));

        assert!(read_if_valid(&path, DEFAULT_TTL).unwrap().is_none());
        assert!(path.exists());
    }

    #[test]
    fn test_future_timestamp_is_expired() {
        let snapshot = CacheSnapshot {
            timestamp: Utc::now() + chrono::Duration::hours(1),
            events: json!([]),
        };
        assert!(snapshot.is_expired(DEFAULT_TTL));
    }

    #[test]
    fn test_truncated_snapshot_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("octocat.json");
        fs::write(&path, r#"{"timestamp": "2024-01-01T00:00:00Z", "events": [{"ty"#).unwrap();

        let err = read_if_valid(&path, DEFAULT_TTL).unwrap_err();
        assert!(matches!(err, ActivityError::CacheCorrupt { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_not_json_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("octocat.json");
        fs::write(&path, "timestamp=yesterday").unwrap();

        let err = read_snapshot(&path).unwrap_err();
        assert!(matches!(err, ActivityError::CacheCorrupt { .. }));
    }

    fn assert_unusable(contents: &str) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("octocat.json");
        fs::write(&path, contents).unwrap();

        assert!(read_snapshot(&path).unwrap().is_none(), "{}", contents);
        assert!(read_if_valid(&path, DEFAULT_TTL).unwrap().is_none(), "{}", contents);
        assert!(path.exists());
    }

    #[test]
    fn test_bad_timestamp_is_absent() {
        assert_unusable(r#"{"timestamp": "yesterday", "events": []}"#);
        assert_unusable(r#"{"timestamp": 1700000000, "events": []}"#);
    }

    #[test]
    fn test_missing_timestamp_is_absent() {
        assert_unusable(r#"{"events": []}"#);
    }

    #[test]
    fn test_missing_events_is_absent() {
        let now = Utc::now().to_rfc3339();
        assert_unusable(&format!(r#"{{"timestamp": "{}"}}"#, now));
        assert_unusable(&format!(r#"{{"timestamp": "{}", "events": null}}"#, now));
    }

    #[test]
    fn test_empty_document_is_absent() {
        assert_unusable("{}");
        assert_unusable("[]");
    }

    #[test]
    fn test_non_array_feed_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ghost.json");

        write_snapshot(&path, json!({"message": "Not Found"})).unwrap();

        let cached = read_if_valid(&path, DEFAULT_TTL).unwrap().unwrap();
        assert_eq!(cached["message"], "Not Found");
    }

    #[test]
    fn test_directory_in_place_of_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("octocat.json");
        fs::create_dir(&path).unwrap();

        let err = read_snapshot(&path).unwrap_err();
        assert!(matches!(err, ActivityError::CacheIo { .. }));
    }

    #[test]
    fn test_write_overwrites_previous_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("octocat.json");

        write_snapshot(&path, json!([1, 2])).unwrap();
        write_snapshot(&path, json!([3])).unwrap();

        let snapshot = read_snapshot(&path).unwrap().unwrap();
        assert_eq!(snapshot.events, json!([3]));
    }

    #[test]
    fn test_write_failure_is_cache_write_error() {
        let temp_dir = TempDir::new().unwrap();
        // Parent "directory" is a regular file
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let path = blocker.join("octocat.json");

        let err = write_snapshot(&path, json!([])).unwrap_err();
        assert!(matches!(err, ActivityError::CacheWrite { .. }));
        assert!(!err.is_fatal());
    }
}
