#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/faro/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Quick Start
//!
//! ```
//! use faro::{CorrelationOptions, DerivationConfig, RawCompany};
//! use faro::{eval, metrics};
//!
//! let raw = RawCompany::new("ACME")
//!     .with_labels("period_end_date", ["2023Q1", "2023Q2", "2023Q3", "2023Q4"])
//!     .with_numbers("period_end_price", [Some(10.0), Some(11.0), Some(10.5), Some(12.0)])
//!     .with_numbers("roa", [Some(0.01), Some(0.02), Some(0.015), Some(0.03)]);
//!
//! let outcome = metrics::derive_all(&[raw], &DerivationConfig::default());
//! let sample = eval::pool(&outcome.series, "roa", "forward_return").unwrap();
//! let report = eval::correlate(&sample, &CorrelationOptions::default()).unwrap();
//!
//! // The last quarter has no future, so three quarters pair up.
//! assert_eq!(report.n_pairs, 3);
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Data model, configuration, errors and persistence
//! - [`metrics`] - Total return, forward return and ratio derivation
//! - [`eval`] - Pooling, ranks and correlation statistics
//! - [`quickfs`] - QuickFS batch API client
//!
//! ## Pipeline
//!
//! 1. **Fetch** raw quarterly arrays per company from the provider
//! 2. **Derive** per-quarter metrics for each company independently
//! 3. **Pool** a feature and a forward-return horizon across all companies
//! 4. **Correlate** the pooled pairs

/// Version information for the faro crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core
// ============================================================================

/// Data model, configuration, errors and persistence.
///
/// - [`RawCompany`] - Provider arrays keyed by metric name
/// - [`QuarterlyRecord`] / [`CompanySeries`] - Derived per-quarter metrics
/// - [`DerivationConfig`] - Key fallbacks, horizons and TTM window
pub mod model {
    pub use faro_core::*;
}

pub use faro_core::{
    CompanySeries, DerivationConfig, FaroError, HorizonSpec, QuarterlyRecord, RawCompany, Result,
    Symbol,
};

// ============================================================================
// Metric Derivation
// ============================================================================

/// Metric derivation.
///
/// ## Derived Metrics
///
/// ### Total return
///
/// ```text
/// TR_j = (P_j - P_{j-1} + D_j) / P_{j-1} * 100
/// ```
///
/// Null unless both prices are positive.
///
/// ### Forward return
///
/// Compounds `TR` over quarters `j+1..=end` and annualizes:
///
/// ```text
/// FR_j = ((Π (1 + TR_k / 100))^(4 / quarters) - 1) * 100
/// ```
///
/// Any missing `TR` inside the window makes the whole horizon null.
///
/// ### EBIT/PPE (TTM)
///
/// ```text
/// Σ operating_income[j-3..=j] / Σ ppe_net[j-3..=j]
/// ```
pub mod metrics {
    pub use faro_metrics::*;
}

// ============================================================================
// Correlation
// ============================================================================

/// Pooling, fractional ranks and correlation statistics.
///
/// Spearman is computed both as the Pearson correlation of fractional ranks
/// and from the tie-corrected closed form; the two must agree.
pub mod eval {
    pub use faro_eval::*;
}

pub use faro_eval::{CorrelationOptions, CorrelationReport, CorrelationSample};

// ============================================================================
// Data Providers
// ============================================================================

/// QuickFS batch API client.
///
/// ## Setup
///
/// Set the `QUICKFS_API_KEY` environment variable or add it to a `.env` file.
pub mod quickfs {
    pub use faro_quickfs::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use faro::prelude::*;
/// ```
pub mod prelude {
    pub use crate::eval::{correlate, pool};
    pub use crate::metrics::{derive_all, derive_company};
    pub use crate::{
        CompanySeries, CorrelationOptions, CorrelationReport, CorrelationSample, DerivationConfig,
        FaroError, QuarterlyRecord, RawCompany, Result,
    };
}

// ============================================================================
// Tests
// ============================================================================
