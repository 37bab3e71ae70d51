//! Request and response types for the QuickFS batch API.

use std::{collections::BTreeMap, time::Duration};

use faro_core::{DerivationConfig, RawCompany, Symbol};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Default quarter range: the last 100 fiscal quarters up to the latest.
pub const DEFAULT_PERIOD: &str = "FQ-100:FQ";

/// Exchange suffix added to bare tickers.
pub const DEFAULT_EXCHANGE: &str = "US";

/// Batch response payload: metric name, then formatted symbol, then the
/// per-quarter values (oldest first) or an error object.
pub type BatchData = BTreeMap<String, BTreeMap<String, Value>>;

/// Envelope of a batch response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchResponse {
    /// Requested values.
    #[serde(default)]
    pub data: Option<BatchData>,
    /// Request-level errors reported by the API.
    #[serde(default)]
    pub errors: Option<Value>,
}

/// Ticker list file, `{"tickers": ["AAPL", "MSFT"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tickers {
    /// Tickers to fetch.
    #[serde(default)]
    pub tickers: Vec<String>,
}

/// Settings for [`crate::QuickFsClient::fetch_companies`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// QuickFS period expression.
    pub period: String,
    /// Metrics to request.
    pub metrics: Vec<String>,
    /// Keys that identify a quarter; a ticker without any is dropped.
    pub date_keys: Vec<String>,
    /// Symbols per batch request.
    pub batch_size: usize,
    /// Batch requests in flight at once.
    pub concurrency: usize,
    /// Retries per batch after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each subsequent one.
    pub initial_backoff_ms: u64,
    /// Upper bound on a single retry delay.
    pub max_backoff_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::for_derivation(&DerivationConfig::default())
    }
}

impl FetchConfig {
    /// Request every metric a derivation config reads.
    #[must_use]
    pub fn for_derivation(config: &DerivationConfig) -> Self {
        Self {
            period: DEFAULT_PERIOD.to_string(),
            metrics: config.provider_metrics(),
            date_keys: config.date_keys.clone(),
            batch_size: 100,
            concurrency: 4,
            max_retries: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 30_000,
        }
    }

    /// Delay before retry number `attempt` (0-based).
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let delay_ms = self
            .initial_backoff_ms
            .saturating_mul(2_u64.saturating_pow(attempt))
            .min(self.max_backoff_ms);
        Duration::from_millis(delay_ms)
    }
}

/// Symbols fetched, missing from the response, or lost to failed batches.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    /// Companies with data, in ticker order.
    pub companies: Vec<RawCompany>,
    /// Tickers the API returned no period data for.
    pub missing: Vec<Symbol>,
    /// Tickers in batches that failed after all retries.
    pub failed: Vec<Symbol>,
}

/// Qualify a ticker with the default exchange unless it already has one.
///
/// ```
/// use faro_quickfs::format_symbol;
///
/// assert_eq!(format_symbol("AAPL"), "AAPL:US");
/// assert_eq!(format_symbol("SHOP:CA"), "SHOP:CA");
/// ```
#[must_use]
pub fn format_symbol(ticker: &str) -> String {
    if ticker.contains(':') {
        ticker.to_string()
    } else {
        format!("{ticker}:{DEFAULT_EXCHANGE}")
    }
}

/// Build the JSON body of a batch request.
///
/// Every (metric, symbol) cell holds a `QFS(symbol,metric,period)`
/// expression.
#[must_use]
pub fn batch_request_body(symbols: &[String], metrics: &[String], period: &str) -> Value {
    let data: BTreeMap<&str, BTreeMap<String, String>> = metrics
        .iter()
        .map(|metric| {
            let cells = symbols
                .iter()
                .map(|symbol| {
                    let symbol = format_symbol(symbol);
                    let expr = format!("QFS({symbol},{metric},{period})");
                    (symbol, expr)
                })
                .collect();
            (metric.as_str(), cells)
        })
        .collect();
    json!({ "data": data })
}

/// Pull one ticker's arrays out of a batch response.
///
/// The company is keyed by the original ticker, not the exchange-qualified
/// symbol. Cells that are not arrays (per-cell errors) are dropped. Returns
/// `None` if none of `date_keys` holds a non-empty array.
#[must_use]
pub fn split_batch<K: AsRef<str>>(batch: &BatchData, ticker: &str, date_keys: &[K]) -> Option<RawCompany> {
    let symbol = format_symbol(ticker);
    let mut company = RawCompany::new(ticker);

    for (metric, cells) in batch {
        if let Some(values @ Value::Array(_)) = cells.get(&symbol) {
            company.data.insert(metric.clone(), values.clone());
        }
    }

    company.first_present(date_keys)?;
    Some(company)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> BatchData {
        serde_json::from_value(json!({
            "period_end_date": {
                "AAA:US": ["2024-03-31", "2024-06-30"],
                "BBB:US": [],
                "CCC:CA": ["2024-03-31"]
            },
            "period_end_price": {
                "AAA:US": [10.0, null],
                "BBB:US": [5.0],
                "CCC:CA": {"error": "UnsupportedMetric"}
            },
            "roa": {
                "AAA:US": [0.1]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_request_body() {
        let body = batch_request_body(
            &["AAPL".to_string(), "SHOP:CA".to_string()],
            &["roa".to_string()],
            "FQ-4:FQ",
        );
        assert_eq!(
            body,
            json!({"data": {"roa": {
                "AAPL:US": "QFS(AAPL:US,roa,FQ-4:FQ)",
                "SHOP:CA": "QFS(SHOP:CA,roa,FQ-4:FQ)"
            }}})
        );
    }

    #[test]
    fn test_split_batch() {
        let keys = ["period_end_date"];
        let aaa = split_batch(&batch(), "AAA", &keys).unwrap();
        assert_eq!(aaa.symbol, "AAA");
        assert_eq!(aaa.series("period_end_price").unwrap().len(), 2);
        assert_eq!(aaa.number("roa", 0), Some(0.1));

        assert!(split_batch(&batch(), "BBB", &keys).is_none());
        assert!(split_batch(&batch(), "ZZZ", &keys).is_none());

        let ccc = split_batch(&batch(), "CCC:CA", &keys).unwrap();
        assert!(ccc.series("period_end_price").is_none());
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let config = FetchConfig {
            max_backoff_ms: 3_000,
            ..Default::default()
        };
        assert_eq!(config.backoff(0), Duration::from_millis(500));
        assert_eq!(config.backoff(1), Duration::from_millis(1_000));
        assert_eq!(config.backoff(2), Duration::from_millis(2_000));
        assert_eq!(config.backoff(3), Duration::from_millis(3_000));
    }

    #[test]
    fn test_default_fetch_config_covers_derivation_inputs() {
        let config = FetchConfig::default();
        assert_eq!(config.period, DEFAULT_PERIOD);
        for key in ["period_end_date", "period_end_price", "dividends", "cogs", "enterprise_value"] {
            assert!(config.metrics.iter().any(|m| m == key), "{key}");
        }
    }
}
