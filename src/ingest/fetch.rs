//! HTTP retrieval of CSV documents.

use reqwest::{Client, header};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{LifemapError, Result};

/// Shared HTTP client for the dataset fetches.
///
/// One `Fetcher` serves a whole invocation; both dataset requests reuse its
/// connection pool. Every request carries `Accept: text/csv` and the
/// configured timeout.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("text/csv"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| LifemapError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// GET one CSV document as text. Non-2xx responses and network failures
    /// both surface as [`LifemapError::Transport`]; there is no retry.
    pub async fn fetch_csv(&self, name: &str, url: &Url) -> Result<String> {
        debug!(source = name, %url, "fetching CSV");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.send_error(name, url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LifemapError::Transport(format!(
                "{} source returned HTTP {} for {}",
                name, status, url
            )));
        }

        let text = response.text().await.map_err(|e| {
            LifemapError::Transport(format!("Failed to read {} response body: {}", name, e))
        })?;

        debug!(source = name, bytes = text.len(), "fetched CSV");
        Ok(text)
    }

    fn send_error(&self, name: &str, url: &Url, e: reqwest::Error) -> LifemapError {
        if e.is_timeout() {
            LifemapError::Transport(format!(
                "Request for {} source timed out after {}s ({})",
                name,
                self.timeout.as_secs(),
                url
            ))
        } else {
            LifemapError::Transport(format!("Failed to fetch {} source from {}: {}", name, url, e))
        }
    }
}
