#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/faro/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the faro return-metrics engine.
//!
//! This crate provides the data model shared by the derivation and
//! correlation pipelines, the error type, configuration, and the on-disk
//! JSON/JSONL formats.

/// The version of the faro-core crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod config;
pub mod error;
pub mod io;
pub mod stats;
pub mod types;

// Re-exports
pub use config::{DerivationConfig, FieldKeys, HorizonSpec};
pub use error::{FaroError, Result};
pub use stats::Summary;
pub use types::{CompanySeries, ForwardReturns, QuarterlyRecord, RawCompany, Symbol};
