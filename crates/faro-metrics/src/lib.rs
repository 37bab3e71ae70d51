//! Metric derivation for faro.
//!
//! Turns raw per-company quarterly arrays into [`faro_core::QuarterlyRecord`]s:
//! - Quarter-over-quarter total return ([`returns`])
//! - Annualized forward returns over open and fixed horizons ([`forward`])
//! - Trailing-twelve-month EBIT/PPE ([`ttm`])
//! - Point-in-time margins and multiples ([`ratios`])
//!
//! # Example
//!
//! ```
//! use faro_core::{DerivationConfig, RawCompany};
//! use faro_metrics::derive_company;
//!
//! let raw = RawCompany::new("ACME")
//!     .with_labels("period_end_date", ["2024-03-31", "2024-06-30"])
//!     .with_numbers("period_end_price", [Some(10.0), Some(11.0)]);
//!
//! let series = derive_company(&raw, &DerivationConfig::default()).unwrap();
//! assert_eq!(series.data[0].total_return, None);
//! assert!((series.data[1].total_return.unwrap() - 10.0).abs() < 1e-9);
//! ```

pub mod columns;
pub mod derive;
pub mod forward;
pub mod ratios;
pub mod returns;
pub mod ttm;

// Re-export main types
pub use columns::QuarterColumns;
pub use derive::{DerivationOutcome, SkippedCompany, derive_all, derive_company};
