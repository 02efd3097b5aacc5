use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

const API_ROOT: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = "gh-hud";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error bodies are truncated to this many characters before they are
/// embedded in an error message.
const BODY_SNIPPET_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
}

/// Account summary from `GET /users/{handle}`.
///
/// Absent fields deserialize to zero; the API omitting a count is not an
/// error.
#[derive(Debug, Default, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub public_repos: u64,
}

/// One entry of the repository listing, newest-pushed first.
#[derive(Debug, Default, Deserialize)]
pub struct Repo {
    #[serde(default)]
    pub stargazers_count: u64,
    pub languages_url: Option<String>,
}

#[derive(Clone)]
pub struct GithubClient {
    http: Arc<Client>,
    token: Option<Arc<String>>,
}

impl GithubClient {
    /// Create a GitHub REST client. The bearer token is optional; without
    /// one the Authorization header is never sent.
    pub fn new(token: Option<String>) -> Result<Self, GithubError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(GithubError::Client)?;

        Ok(Self {
            http: Arc::new(http),
            token: token.map(Arc::new),
        })
    }

    /// Fetch the account summary for `handle`.
    pub async fn profile(&self, handle: &str) -> Result<Profile, GithubError> {
        self.get_json(&format!("{API_ROOT}/users/{handle}")).await
    }

    /// Fetch the account's repositories, sorted by push recency. The API
    /// itself caps the listing at the first 100 entries.
    pub async fn repos(&self, handle: &str) -> Result<Vec<Repo>, GithubError> {
        self.get_json(&format!(
            "{API_ROOT}/users/{handle}/repos?per_page=100&sort=pushed"
        ))
        .await
    }

    /// Fetch one repository's language byte counts via its `languages_url`.
    pub async fn languages(&self, url: &str) -> Result<HashMap<String, u64>, GithubError> {
        self.get_json(url).await
    }

    fn apply_headers(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);

        match &self.token {
            Some(token) => req.bearer_auth(token.as_str()),
            None => req,
        }
    }

    /// Single-attempt GET returning deserialized JSON. A non-success status
    /// drains the body into a [`GithubError::Api`] so callers can report
    /// what the API actually said.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GithubError> {
        let resp = self
            .apply_headers(self.http.get(url))
            .send()
            .await
            .map_err(|source| GithubError::Transport {
                endpoint: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GithubError::Api {
                endpoint: url.to_string(),
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        resp.json()
            .await
            .map_err(|source| GithubError::Transport {
                endpoint: url.to_string(),
                source,
            })
    }
}

/// Keeps the first [`BODY_SNIPPET_CHARS`] characters of an error body,
/// cutting on a character boundary.
fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(BODY_SNIPPET_CHARS) {
        Some((idx, _)) => body[..idx].to_string(),
        None => body.to_string(),
    }
}
