use crate::error::{Error, Result};
use crate::http_client::build_http_client;
use std::time::Instant;

/// Raw fetch result: the body text and the wall-clock time the retrieval
/// took, measured around the whole request including body download.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: String,
    pub response_time_ms: u64,
}

/// Retrieves raw page content for analysis. One GET per analysis request, no
/// retries; a failed or empty fetch fails the whole request.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
        })
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let started = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("request to {url} failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::Fetch(format!("request to {url} failed: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("failed to read body from {url}: {e}")))?;

        let response_time_ms = started.elapsed().as_millis() as u64;

        if body.is_empty() {
            return Err(Error::Fetch(format!("empty response body from {url}")));
        }

        tracing::debug!(url = %url, elapsed_ms = response_time_ms, bytes = body.len(), "page fetched");

        Ok(FetchedPage {
            body,
            response_time_ms,
        })
    }
}
