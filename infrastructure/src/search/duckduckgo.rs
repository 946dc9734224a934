//! DuckDuckGo Instant Answer search capability.
//!
//! Uses the [DuckDuckGo Instant Answer API](https://api.duckduckgo.com/),
//! which needs no API key. It does not return full result listings; the
//! `RelatedTopics` array is the closest thing to hits, so each topic with
//! a `Text` field becomes one [`SearchHit`].

use async_trait::async_trait;
use concord_application::{SearchCapability, SearchError, SearchHit};
use concord_domain::util::truncate_str;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// DuckDuckGo Instant Answer API endpoint (no API key required).
pub const DDG_API_URL: &str = "https://api.duckduckgo.com";

/// Titles are the topic text cut to this many bytes.
const TITLE_MAX_BYTES: usize = 100;

pub struct DuckDuckGoSearch {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl DuckDuckGoSearch {
    pub fn new(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl SearchCapability for DuckDuckGoSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        let response = self
            .client
            .get(format!("{}/", self.base_url))
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    SearchError::Unavailable(e.to_string())
                } else {
                    SearchError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(SearchError::RequestFailed(format!(
                "Search API returned error: {}",
                response.status()
            )));
        }

        // DuckDuckGo answers with `application/x-javascript`; decode the text ourselves
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;
        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        let hits = extract_hits(&body, limit);
        debug!(query, hits = hits.len(), "DuckDuckGo search completed");
        Ok(hits)
    }
}

/// Take the first `limit` related topics and keep those that carry text.
///
/// Nested topic groups have no `Text` field and are skipped, but still
/// count toward `limit`.
fn extract_hits(data: &serde_json::Value, limit: usize) -> Vec<SearchHit> {
    let Some(topics) = data["RelatedTopics"].as_array() else {
        return Vec::new();
    };

    topics
        .iter()
        .take(limit)
        .filter_map(|topic| {
            let text = topic["Text"].as_str()?;
            let url = topic["FirstURL"].as_str().unwrap_or_default();
            Some(SearchHit::new(
                truncate_str(text, TITLE_MAX_BYTES),
                url,
                text,
            ))
        })
        .collect()
}
