//! Cross-sectional correlation for faro.
//!
//! This crate pools (feature, target) pairs from derived company series and
//! measures how they move together:
//! - Pool-and-filter across companies and quarters ([`pool`])
//! - Fractional (average) ranks ([`rank`])
//! - Pearson and Spearman coefficients with t-test p-values ([`correlation`])
//! - A serializable [`CorrelationReport`] with descriptive statistics ([`report`])
//!
//! # Example
//!
//! ```
//! use faro_eval::{CorrelationOptions, CorrelationSample, correlate};
//!
//! let sample: CorrelationSample =
//!     [(0.01, 4.0), (0.03, 9.0), (0.02, 5.0), (0.05, 12.0)].into_iter().collect();
//!
//! let report = correlate(&sample, &CorrelationOptions::default()).unwrap();
//! assert_eq!(report.n_pairs, 4);
//! assert!((report.spearman_correlation.unwrap() - 1.0).abs() < 1e-12);
//! ```

pub mod correlation;
pub mod pool;
pub mod rank;
pub mod report;

// Re-export main types
pub use correlation::{pearson, rank_pearson, spearman, t_test_p_value};
pub use pool::{CorrelationSample, carries_metric, pool, pool_by};
pub use rank::fractional_ranks;
pub use report::{CorrelationOptions, CorrelationReport, CorrelationStatus, correlate, correlate_values};
