//! QuickFS API client for faro.
//!
//! This crate fetches raw quarterly fundamentals from the
//! [QuickFS](https://quickfs.net/) batch endpoint and turns the response
//! into one [`faro_core::RawCompany`] per ticker.
//!
//! # Usage
//!
//! ```rust,ignore
//! use faro_quickfs::{FetchConfig, QuickFsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QuickFsClient::from_env()?;
//!     let tickers = vec!["AAPL".to_string(), "MSFT".to_string()];
//!
//!     let outcome = client.fetch_companies(&tickers, &FetchConfig::default()).await;
//!     println!("fetched {} companies", outcome.companies.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `QUICKFS_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! QUICKFS_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod types;

pub use client::QuickFsClient;
pub use error::QuickFsError;
pub use types::*;

/// Result type for QuickFS operations.
pub type Result<T> = std::result::Result<T, QuickFsError>;
