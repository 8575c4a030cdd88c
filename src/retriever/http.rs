//! Plain HTTP page fetcher

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use super::{DocumentFetcher, FetchError, RetrievalRequest, RetrievedDocument};

/// Fetches a page with a single GET bounded by the request timeout
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_client(Client::builder().build().unwrap_or_else(|_| Client::new()))
    }

    /// Use a preconfigured client (proxy, TLS roots)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn build_headers(request: &RetrievalRequest) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| FetchError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| FetchError::InvalidHeader(name.as_str().to_string()))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn map_error(err: reqwest::Error, request: &RetrievalRequest) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout {
                url: request.url.clone(),
                timeout_ms: request.timeout_ms,
            }
        } else {
            FetchError::Http(err)
        }
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, request: &RetrievalRequest) -> Result<RetrievedDocument, FetchError> {
        tracing::debug!(url = %request.url, timeout_ms = request.timeout_ms, "Fetching page");

        let headers = Self::build_headers(request)?;

        // The timeout covers connect, headers and body; the request is dropped when it fires
        let response = self
            .client
            .get(request.url.clone())
            .headers(headers)
            .timeout(request.timeout())
            .send()
            .await
            .map_err(|e| Self::map_error(e, request))?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: request.url.clone(),
            });
        }

        let raw_markup = response
            .text()
            .await
            .map_err(|e| Self::map_error(e, request))?;

        tracing::debug!(url = %request.url, bytes = raw_markup.len(), "Fetched page");

        Ok(RetrievedDocument {
            raw_markup,
            source_url: request.url.clone(),
        })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::sync::oneshot;
    use url::Url;

    use super::*;
    use crate::model::FetchConfig;

    /// Loopback servers must not be routed through an environment proxy
    fn local_fetcher() -> HttpFetcher {
        HttpFetcher::with_client(Client::builder().no_proxy().build().unwrap())
    }

    async fn read_request_head(socket: &mut TcpStream) -> String {
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => head.extend_from_slice(&buf[..n]),
            }
        }
        String::from_utf8_lossy(&head).into_owned()
    }

    /// Serve one canned response and report the request head that was received
    async fn serve_once(status_line: &'static str, body: &'static str) -> (Url, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let head = read_request_head(&mut socket).await;
            let response = format!(
                "{}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            let _ = tx.send(head);
        });

        (Url::parse(&format!("http://{}/list/", addr)).unwrap(), rx)
    }

    #[tokio::test]
    async fn test_fetch_success_sends_headers() {
        let body = "<html><body><a href=\"/x\">判例</a></body></html>";
        let (url, head) = serve_once("HTTP/1.1 200 OK", body).await;

        let request = RetrievalRequest::new(url.clone(), &FetchConfig::default());
        let doc = local_fetcher().fetch(&request).await.unwrap();

        assert_eq!(doc.raw_markup, body);
        assert_eq!(doc.source_url, url);

        let head = head.await.unwrap().to_lowercase();
        assert!(head.contains("accept-language: ja,en;q=0.9"));
        assert!(head.contains("user-agent: mozilla/5.0 (compatible; japanlegalmcp/1.0)"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let (url, _head) = serve_once("HTTP/1.1 503 Service Unavailable", "down").await;

        let request = RetrievalRequest::new(url, &FetchConfig::default());
        let result = local_fetcher().fetch(&request).await;

        assert!(matches!(result, Err(FetchError::Status { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let _ = read_request_head(&mut socket).await;
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let config = FetchConfig {
            timeout_ms: 200,
            ..FetchConfig::default()
        };
        let url = Url::parse(&format!("http://{}/slow", addr)).unwrap();
        let request = RetrievalRequest::new(url, &config);
        let result = local_fetcher().fetch(&request).await;

        match result {
            Err(FetchError::Timeout { timeout_ms, .. }) => assert_eq!(timeout_ms, 200),
            other => panic!("expected timeout, got {:?}", other.map(|d| d.source_url)),
        }
    }

    #[tokio::test]
    async fn test_invalid_header_rejected_before_sending() {
        let mut request = RetrievalRequest::new(
            Url::parse("http://127.0.0.1:9/").unwrap(),
            &FetchConfig::default(),
        );
        request
            .headers
            .insert("Bad Header".to_string(), "value".to_string());

        let result = local_fetcher().fetch(&request).await;
        assert!(matches!(result, Err(FetchError::InvalidHeader(_))));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_live_precedent_listing() {
        let url = Url::parse(crate::model::config::DEFAULT_PRECEDENTS_URL).unwrap();
        let request = RetrievalRequest::new(url, &FetchConfig::default());
        let doc = HttpFetcher::new().fetch(&request).await.unwrap();
        assert!(doc.raw_markup.contains("judicail-precedent"));
    }
}
