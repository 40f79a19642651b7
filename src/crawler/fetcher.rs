//! HTTP fetcher implementation
//!
//! Performs a single GET with the caller's headers and classifies the
//! outcome. Every failure is returned as a value; nothing escapes this
//! boundary as an error. Non-2xx statuses and network-level failures are all
//! transient by policy: the sources reject over-eager clients with a mix of
//! status codes and resets, and a later attempt of the same page routinely
//! succeeds, so no finer distinction is drawn.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::model::RawPage;

/// Result of fetching one page
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx with a non-empty body
    Body(RawPage),

    /// 2xx with an empty body; a successful zero-record page
    Empty,

    /// Non-2xx status or network-level failure; the page may work later
    Transient(String),

    /// The request itself could not be constructed; retrying cannot help
    Permanent(String),
}

impl FetchOutcome {
    /// Returns true for outcomes the orchestrator records as a page failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::Permanent(_))
    }
}

/// Builds the shared HTTP client from the configured timeouts
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and classifies the outcome
///
/// Headers are supplied per source; the movie chart rejects requests without
/// a browser-like user agent, the book chart needs none.
pub async fn fetch_page(client: &Client, url: &str, headers: &[(String, String)]) -> FetchOutcome {
    let mut header_map = HeaderMap::new();
    for (name, value) in headers {
        let name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(n) => n,
            Err(e) => return FetchOutcome::Permanent(format!("Invalid header '{}': {}", name, e)),
        };
        let value = match HeaderValue::from_str(value) {
            Ok(v) => v,
            Err(e) => {
                return FetchOutcome::Permanent(format!("Invalid value for '{}': {}", name, e))
            }
        };
        header_map.insert(name, value);
    }

    match client.get(url).headers(header_map).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                return FetchOutcome::Transient(format!("HTTP {}", status));
            }

            match response.text().await {
                Ok(body) if body.is_empty() => FetchOutcome::Empty,
                Ok(body) => FetchOutcome::Body(RawPage::new(url, body)),
                Err(e) => FetchOutcome::Transient(format!("Body read failed: {}", e)),
            }
        }
        Err(e) => {
            if e.is_builder() {
                FetchOutcome::Permanent(format!("Request build failed: {}", e))
            } else if e.is_timeout() {
                FetchOutcome::Transient("Request timeout".to_string())
            } else if e.is_connect() {
                FetchOutcome::Transient(format!("Connection failed: {}", e))
            } else {
                FetchOutcome::Transient(e.to_string())
            }
        }
    }
}
