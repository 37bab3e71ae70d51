//! QuickFS API client implementation.

use crate::{
    Result,
    error::QuickFsError,
    types::{BatchData, BatchResponse, FetchConfig, FetchOutcome, batch_request_body, split_batch},
};
use futures::{StreamExt, stream};
use reqwest::Client;
use std::env;

/// Base URL for the QuickFS v1 API.
const QUICKFS_BASE_URL: &str = "https://public-api.quickfs.net/v1";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-qfs-api-key";

/// QuickFS API client.
#[derive(Debug, Clone)]
pub struct QuickFsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl QuickFsClient {
    /// Create a new QuickFS client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: QUICKFS_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create a new QuickFS client from the `QUICKFS_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("QUICKFS_API_KEY").map_err(|_| QuickFsError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build an endpoint URL.
    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    /// Fetch `metrics` over `period` for every symbol in one request.
    ///
    /// Bare tickers are qualified with `:US`.
    ///
    /// # Errors
    ///
    /// Returns [`QuickFsError::RateLimitExceeded`] on HTTP 429 or an
    /// exhausted quota, [`QuickFsError::Api`] on any other non-success
    /// status or a response without data, and transport or JSON errors as
    /// they occur.
    pub async fn data_batch(&self, symbols: &[String], metrics: &[String], period: &str) -> Result<BatchData> {
        let body = batch_request_body(symbols, metrics, period);
        let response = self
            .client
            .post(self.url("data/batch"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(QuickFsError::RateLimitExceeded);
        }

        let text = response.text().await?;
        if !status.is_success() {
            if text.contains("QuotaExceeded") {
                return Err(QuickFsError::RateLimitExceeded);
            }
            return Err(QuickFsError::Api(format!("HTTP {status}: {text}")));
        }

        let parsed: BatchResponse = serde_json::from_str(&text)?;
        if let Some(errors) = &parsed.errors {
            tracing::warn!(errors = %errors, "batch response carried errors");
        }
        parsed
            .data
            .ok_or_else(|| QuickFsError::Api(format!("response without data: {text}")))
    }

    /// [`Self::data_batch`] with retries on transient failures.
    async fn data_batch_with_retry(&self, symbols: &[String], config: &FetchConfig) -> Result<BatchData> {
        let mut attempt = 0;
        loop {
            match self.data_batch(symbols, &config.metrics, &config.period).await {
                Ok(data) => return Ok(data),
                Err(e) if e.is_retryable() && attempt < config.max_retries => {
                    let delay = config.backoff(attempt);
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max_retries = config.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "batch request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Fetch raw quarterly arrays for many tickers.
    ///
    /// Tickers are split into batches of `config.batch_size`; at most
    /// `config.concurrency` batches are in flight. Companies come back in
    /// ticker order. A batch that still fails after its retries is logged
    /// and its tickers are reported in [`FetchOutcome::failed`].
    pub async fn fetch_companies(&self, tickers: &[String], config: &FetchConfig) -> FetchOutcome {
        let chunks: Vec<&[String]> = tickers.chunks(config.batch_size.max(1)).collect();
        let total = chunks.len();

        let results: Vec<(&[String], Result<BatchData>)> = stream::iter(chunks.into_iter().enumerate())
            .map(|(i, chunk)| async move {
                tracing::info!(batch = i + 1, total, symbols = chunk.len(), "fetching batch");
                (chunk, self.data_batch_with_retry(chunk, config).await)
            })
            .buffered(config.concurrency.max(1))
            .collect()
            .await;

        let mut outcome = FetchOutcome::default();
        for (chunk, result) in results {
            match result {
                Ok(batch) => {
                    for ticker in chunk {
                        match split_batch(&batch, ticker, &config.date_keys) {
                            Some(company) => outcome.companies.push(company),
                            None => {
                                tracing::warn!(symbol = %ticker, "no period data returned");
                                outcome.missing.push(ticker.clone());
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(symbols = chunk.len(), error = %e, "batch failed");
                    outcome.failed.extend(chunk.iter().cloned());
                }
            }
        }

        tracing::info!(
            fetched = outcome.companies.len(),
            missing = outcome.missing.len(),
            failed = outcome.failed.len(),
            "fetch finished"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = QuickFsClient::new("test_key");
        assert_eq!(
            client.url("data/batch"),
            "https://public-api.quickfs.net/v1/data/batch"
        );

        let local = QuickFsClient::new("test_key").with_base_url("http://localhost:8080/v1/");
        assert_eq!(local.url("data/batch"), "http://localhost:8080/v1/data/batch");
    }

    #[tokio::test]
    async fn test_fetch_without_tickers_makes_no_requests() {
        let client = QuickFsClient::new("test_key").with_base_url("http://127.0.0.1:9");
        let outcome = client.fetch_companies(&[], &FetchConfig::default()).await;
        assert!(outcome.companies.is_empty());
        assert!(outcome.failed.is_empty());
        assert!(outcome.missing.is_empty());
    }
}
