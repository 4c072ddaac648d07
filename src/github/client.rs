use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::github::query::{SEARCH_DOCUMENT, SEARCH_LIMIT};
use crate::github::types::{GraphQlResponse, RawPullRequest, SearchData};

/// Default GitHub GraphQL endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com/graphql";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GitHub API returned HTTP {status}: {payload}")]
    Status { status: u16, payload: String },
    #[error("GraphQL query failed: {0}")]
    GraphQl(String),
}

impl FetchError {
    /// True when GitHub rejected the token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Status { status: 401, .. })
    }
}

/// GitHub GraphQL client authenticated with a personal access token
pub struct GitHubClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl GitHubClient {
    pub fn new(endpoint: &str, token: &str) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("review-metrics/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Run the merged pull request search in a single request.
    ///
    /// Non-success responses are returned as `FetchError::Status` with the
    /// response body as payload. Nothing is retried.
    pub async fn search_merged_prs(&self, search: &str) -> Result<Vec<RawPullRequest>, FetchError> {
        debug!(endpoint = %self.endpoint, search, "POST search");

        let body = json!({
            "query": SEARCH_DOCUMENT,
            "variables": {
                "searchQuery": search,
                "limit": SEARCH_LIMIT,
            },
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let payload = match resp.text().await {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to read body of HTTP {} response: {}", status.as_u16(), e);
                    String::new()
                }
            };
            return Err(FetchError::Status {
                status: status.as_u16(),
                payload,
            });
        }

        let response: GraphQlResponse<SearchData> = resp.json().await?;
        let messages = response
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        let Some(data) = response.data else {
            return Err(FetchError::GraphQl(if messages.is_empty() {
                "response contained no data".to_string()
            } else {
                messages
            }));
        };

        if !messages.is_empty() {
            warn!("GitHub reported errors alongside data: {}", messages);
        }

        let search = data.search;
        let returned = search.edges.len() as u64;
        if search.issue_count > returned {
            warn!(
                "Search matched {} pull requests but only {} were returned; older ones are not included",
                search.issue_count, returned
            );
        }
        info!("Fetched {} merged pull requests", returned);

        Ok(search.into_pull_requests())
    }
}
