//! Client for the external book API that the proxy routes forward to.
//!
//! Responses are relayed as raw JSON; any transport failure, non-2xx status
//! or undecodable body surfaces as an [`UpstreamError`].

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Clone, Debug)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let base_url = Url::parse(base_url).map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Network(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub async fn fetch_books(&self) -> Result<serde_json::Value, UpstreamError> {
        self.get_json(&["books"]).await
    }

    pub async fn fetch_by_isbn(&self, isbn: &str) -> Result<serde_json::Value, UpstreamError> {
        self.get_json(&["books", isbn]).await
    }

    pub async fn fetch_by_author(&self, author: &str) -> Result<serde_json::Value, UpstreamError> {
        self.get_json(&["books", "author", author]).await
    }

    pub async fn fetch_by_title(&self, title: &str) -> Result<serde_json::Value, UpstreamError> {
        self.get_json(&["books", "title", title]).await
    }

    /// Append percent-encoded path segments to the base url.
    fn url_for(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, segments: &[&str]) -> Result<serde_json::Value, UpstreamError> {
        let url = self.url_for(segments)?;
        debug!(%url, "forwarding to upstream");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }
        resp.json::<serde_json::Value>()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))
    }
}
