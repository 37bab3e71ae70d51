//! Fetch command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use faro_core::io::write_jsonl;
use faro_quickfs::{FetchConfig, QuickFsClient};

use crate::{
    cmd::{RULE_WIDTH, banner},
    data,
};

/// Options for [`fetch_data`] beyond the file paths.
#[derive(Debug)]
pub(crate) struct FetchArgs {
    pub(crate) period: String,
    pub(crate) batch_size: usize,
    pub(crate) concurrency: usize,
}

/// Fetch raw quarterly arrays for every ticker and write them as JSONL.
pub(crate) async fn fetch_data(
    tickers_path: &Path,
    output: &Path,
    config_path: Option<&Path>,
    args: FetchArgs,
) -> Result<()> {
    println!("Fetching Quarterly Fundamentals");
    println!("{}", "=".repeat(RULE_WIDTH));

    let tickers = data::load_tickers(tickers_path)?;
    if tickers.is_empty() {
        bail!("no tickers found in {}", tickers_path.display());
    }
    println!("\nFound {} ticker(s): {}\n", tickers.len(), tickers.join(", "));

    let derivation = data::load_config(config_path)?;
    let config = FetchConfig {
        period: args.period,
        batch_size: args.batch_size,
        concurrency: args.concurrency,
        ..FetchConfig::for_derivation(&derivation)
    };

    let client = QuickFsClient::from_env()?;
    let outcome = client.fetch_companies(&tickers, &config).await;

    for symbol in &outcome.missing {
        println!("  No data found for {symbol}");
    }
    for symbol in &outcome.failed {
        println!("  Error fetching {symbol}");
    }

    if outcome.companies.is_empty() {
        bail!("no data was successfully fetched");
    }

    write_jsonl(output, &outcome.companies)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("\nData saved to {}", output.display());

    banner("SUMMARY");
    println!("Successfully fetched data for {} stock(s):", outcome.companies.len());
    for company in &outcome.companies {
        let quarters = company
            .first_present(&config.date_keys)
            .map_or(0, |(_, values)| values.len());
        println!("  - {} ({}): {} quarters", company.display_name(), company.symbol, quarters);
    }
    if !outcome.missing.is_empty() || !outcome.failed.is_empty() {
        println!(
            "\n{} without data, {} in failed batches",
            outcome.missing.len(),
            outcome.failed.len()
        );
    }

    Ok(())
}
