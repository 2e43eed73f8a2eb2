// GitHub API HTTP client.
// Unauthenticated client that issues a single request per call and returns the raw JSON body.

use reqwest::{
    Client, Url,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::Value;

use crate::error::{ActivityError, Result};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const CLIENT_USER_AGENT: &str = "GitHubActivityCLI";

/// GitHub API client for public endpoints.
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    /// Create a client against the given API base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ActivityError::Usage(format!("invalid API URL {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ActivityError::Usage(format!(
                "invalid API URL {}: not a base URL",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client, base_url })
    }

    /// Build an endpoint URL from path segments, escaping each one.
    pub fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Make a GET request and parse the body as JSON.
    /// Non-success statuses are not errors here; GitHub reports them as JSON objects.
    pub async fn get_json(&self, segments: &[&str]) -> Result<Value> {
        let url = self.endpoint_url(segments);
        tracing::debug!(%url, "GET");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "GitHub returned a non-success status");
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(ActivityError::ResponseParse)
    }
}
