//! Error types for faro.
//!
//! Missing history is not an error anywhere in faro: derived fields that
//! cannot be computed are `None`. The variants here cover caller bugs,
//! per-company input problems and I/O.

use thiserror::Error;

/// The main error type for faro operations.
#[derive(Debug, Error)]
pub enum FaroError {
    /// Caller passed inputs that break an API contract, such as feature and
    /// target sequences of different lengths.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// A company record lacks a field required for derivation.
    #[error("Missing field '{field}' for {symbol}")]
    MissingField {
        /// Company symbol.
        symbol: String,
        /// Logical field name (e.g. `period`, `price`).
        field: String,
    },

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Metric name that no record field answers to.
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Rank-based Pearson and direct Spearman disagree.
    #[error("Rank correlation mismatch: rank-based Pearson {rank_pearson} vs Spearman {spearman}")]
    RankMismatch {
        /// Pearson coefficient of the two rank vectors.
        rank_pearson: f64,
        /// Spearman coefficient from the tie-corrected closed form.
        spearman: f64,
    },

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for FaroError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for FaroError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for faro operations.
pub type Result<T> = std::result::Result<T, FaroError>;
