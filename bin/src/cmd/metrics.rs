//! Metrics command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};
use faro_core::{
    RawCompany,
    io::{read_jsonl, write_json},
};
use faro_metrics::derive_all;

use crate::{
    cmd::{RULE_WIDTH, banner},
    data,
};

/// Derive per-quarter metrics from raw JSONL and write them as JSON.
pub(crate) fn calculate_metrics(input: &Path, output: &Path, config_path: Option<&Path>) -> Result<()> {
    println!("Calculating Metrics from {}", input.display());
    println!("{}", "=".repeat(RULE_WIDTH));

    let config = data::load_config(config_path)?;
    let horizons: Vec<&str> = config.horizons.iter().map(|h| h.name.as_str()).collect();

    println!("\nLoading data from {}...", input.display());
    let companies: Vec<RawCompany> =
        read_jsonl(input).with_context(|| format!("failed to read {}", input.display()))?;
    if companies.is_empty() {
        bail!("no stock data found in {}", input.display());
    }
    println!("Found {} stock(s)\n", companies.len());

    println!("Calculating metrics (total_return, {}, ROA, EBIT/PPE)...", horizons.join(", "));
    let outcome = derive_all(&companies, &config);

    for series in &outcome.series {
        println!("  Processed {}: {} quarters", series.symbol, series.len());
    }
    for skipped in &outcome.skipped {
        println!("  Skipped {}: {}", skipped.symbol, skipped.reason);
    }

    if outcome.series.is_empty() {
        bail!("no metrics were successfully calculated");
    }

    write_json(output, &outcome.series).with_context(|| format!("failed to write {}", output.display()))?;
    println!("\nMetrics saved to {}", output.display());
    println!("Saved metrics for {} stock(s)", outcome.series.len());

    banner("SUMMARY");
    println!("Successfully calculated metrics for {} stock(s):", outcome.series.len());
    for series in &outcome.series {
        println!("  - {} ({}): {} quarters", series.company_name, series.symbol, series.len());
    }

    Ok(())
}
