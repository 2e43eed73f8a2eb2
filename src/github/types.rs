// GitHub event types.
// Decodes raw entries from the user events feed into typed activity.

use serde_json::Value;

/// Repository an event happened in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRepo {
    pub name: String,
    pub description: Option<String>,
}

impl EventRepo {
    /// Read `name` and `description` independently; a bad one never hides the other.
    fn from_value(repo: Option<&Value>) -> Self {
        let field = |key: &str| {
            repo.and_then(|r| r.get(key))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            name: field("name").unwrap_or_else(|| "unknown".to_string()),
            description: field("description"),
        }
    }

    /// Description, or a placeholder when the API gave none.
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or("No description")
    }
}

/// Event kind with the payload details the summary needs.
/// Unrecognized tags are kept verbatim so new upstream kinds still display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push { commits: usize },
    Issues { action: Option<String> },
    Watch,
    Other(String),
}

/// One entry from a user's activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEvent {
    /// The raw `type` tag as sent by the API.
    pub type_name: String,
    pub kind: EventKind,
    pub repo: EventRepo,
}

impl ActivityEvent {
    /// Decode one raw feed entry. Missing or mistyped fields fall back field by field.
    pub fn from_value(value: &Value) -> Self {
        let type_name = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();
        let null = Value::Null;
        let payload = value.get("payload").unwrap_or(&null);

        let kind = match type_name.as_str() {
            "PushEvent" => EventKind::Push {
                commits: commit_count(payload),
            },
            "IssuesEvent" => EventKind::Issues {
                action: payload
                    .get("action")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            "WatchEvent" => EventKind::Watch,
            other => EventKind::Other(other.to_string()),
        };

        Self {
            type_name,
            kind,
            repo: EventRepo::from_value(value.get("repo")),
        }
    }

    /// One-line summary, or None for events that produce no line.
    pub fn summary(&self) -> Option<String> {
        let repo = &self.repo.name;
        let desc = self.repo.description_or_default();

        match &self.kind {
            EventKind::Push { commits } => Some(format!(
                "- Pushed {} commits to {} ({})",
                commits, repo, desc
            )),
            EventKind::Issues { action } if action.as_deref() == Some("opened") => {
                Some(format!("- Opened a new issue in {} ({})", repo, desc))
            }
            EventKind::Issues { .. } => None,
            EventKind::Watch => Some(format!("- Starred {} ({})", repo, desc)),
            EventKind::Other(type_name) => {
                Some(format!("- {} event in {} ({})", type_name, repo, desc))
            }
        }
    }
}

/// Number of commits in a push payload.
/// The feed sometimes omits the commit list and only reports `size`.
fn commit_count(payload: &Value) -> usize {
    if let Some(commits) = payload.get("commits").and_then(Value::as_array) {
        return commits.len();
    }
    payload
        .get("size")
        .and_then(Value::as_u64)
        .map(|size| size as usize)
        .unwrap_or(0)
}
