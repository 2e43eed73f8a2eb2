// GitHub API endpoint functions.

use serde_json::Value;

use crate::error::Result;

use super::client::GitHubClient;

impl GitHubClient {
    /// Get the public events feed for a user. Only the first page is requested.
    pub async fn get_user_events(&self, username: &str) -> Result<Value> {
        self.get_json(&["users", username, "events"]).await
    }
}
