//! Document retrieval for the live precedent sources

mod http;

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::model::FetchConfig;

pub use http::HttpFetcher;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("timeout of {timeout_ms}ms exceeded: {url}")]
    Timeout { url: Url, timeout_ms: u64 },

    #[error("HTTP {status}: {url}")]
    Status { status: u16, url: Url },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid request header: {0}")]
    InvalidHeader(String),
}

/// A single bounded-timeout retrieval
#[derive(Debug, Clone)]
pub struct RetrievalRequest {
    pub url: Url,
    pub timeout_ms: u64,
    pub headers: BTreeMap<String, String>,
}

impl RetrievalRequest {
    /// Build a request carrying the configured agent string, locale and timeout
    pub fn new(url: Url, config: &FetchConfig) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("User-Agent".to_string(), config.user_agent.clone());
        headers.insert("Accept-Language".to_string(), config.accept_language.clone());

        Self {
            url,
            timeout_ms: config.effective_timeout_ms(),
            headers,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Result of a document retrieval. Consumed by extraction, never cached.
#[derive(Debug, Clone)]
pub struct RetrievedDocument {
    pub raw_markup: String,
    pub source_url: Url,
}

impl RetrievedDocument {
    /// `scheme://host[:port]` of the source, used to absolutize rooted hrefs
    pub fn origin(&self) -> String {
        extract_origin(&self.source_url)
    }
}

/// Trait for document fetchers
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Perform exactly one attempt; no retries
    async fn fetch(&self, request: &RetrievalRequest) -> Result<RetrievedDocument, FetchError>;
}

/// Extract origin from URL
fn extract_origin(url: &Url) -> String {
    url.origin().ascii_serialization()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_configured_headers() {
        let url = Url::parse("https://example.go.jp/list/").unwrap();
        let request = RetrievalRequest::new(url, &FetchConfig::default());

        assert_eq!(request.timeout_ms, 15_000);
        assert_eq!(
            request.headers.get("Accept-Language").map(String::as_str),
            Some("ja,en;q=0.9")
        );
        assert!(request.headers["User-Agent"].contains("JapanLegalMCP"));
    }

    #[test]
    fn test_origin_drops_path() {
        let doc = RetrievedDocument {
            raw_markup: String::new(),
            source_url: Url::parse("https://www.no-harassment.mhlw.go.jp/foundation/judicail-precedent/")
                .unwrap(),
        };
        assert_eq!(doc.origin(), "https://www.no-harassment.mhlw.go.jp");

        let doc = RetrievedDocument {
            raw_markup: String::new(),
            source_url: Url::parse("http://127.0.0.1:8080/a/b").unwrap(),
        };
        assert_eq!(doc.origin(), "http://127.0.0.1:8080");
    }
}
