//! Correlate command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use faro_core::{
    CompanySeries,
    io::{read_json, write_json},
    types::FORWARD_RETURN_PREFIX,
};
use faro_eval::{CorrelationOptions, CorrelationReport, correlate, pool};

use crate::cmd::{RULE_WIDTH, banner};

/// Options for [`correlate_metrics`].
#[derive(Debug)]
pub(crate) struct CorrelateArgs {
    pub(crate) feature: String,
    pub(crate) target: String,
    pub(crate) ranks: bool,
    pub(crate) json: bool,
}

/// Pool a feature against a target across every company and report their
/// correlation.
pub(crate) fn correlate_metrics(input: &Path, output: Option<&Path>, args: CorrelateArgs) -> Result<()> {
    let quiet = args.json;
    let say = |line: String| {
        if !quiet {
            println!("{line}");
        }
    };

    say("Loading data...".to_string());
    let series: Vec<CompanySeries> =
        read_json(input).with_context(|| format!("failed to read {}", input.display()))?;
    say(format!("Loaded data for {} stock(s)", series.len()));

    say(format!(
        "\nExtracting {} and {} pairs...",
        label(&args.feature),
        label(&args.target)
    ));
    let sample = pool(&series, &args.feature, &args.target)?;
    say(format!(
        "Found {} valid ({}, {}) pairs",
        with_commas(sample.len()),
        args.feature,
        args.target
    ));

    say("\nCalculating correlations...".to_string());
    let options = CorrelationOptions::new(&args.feature, &args.target).with_ranks(args.ranks);
    let report = correlate(&sample, &options)?;

    if let Some(path) = output {
        write_json(path, &report).with_context(|| format!("failed to write {}", path.display()))?;
        say(format!("Report saved to {}", path.display()));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Print a report in the console layout.
fn print_report(report: &CorrelationReport) {
    let feature = label(&report.feature);
    let target = label(&report.target);
    let target_pct = report.target.starts_with(FORWARD_RETURN_PREFIX);

    banner(&format!("{feature} vs {target} Correlation Analysis"));
    println!("\nNumber of data points: {}", with_commas(report.n_pairs));

    if let Some(error) = &report.error {
        println!("\n{error}");
    }

    println!("\n{feature} Statistics:");
    print_stat("Mean", report.feature_mean, false);
    print_stat("Std Dev", report.feature_std, false);
    print_stat("Min", report.feature_min, false);
    print_stat("Max", report.feature_max, false);

    println!("\n{target} Statistics:");
    print_stat("Mean", report.target_mean, target_pct);
    print_stat("Std Dev", report.target_std, target_pct);
    print_stat("Min", report.target_min, target_pct);
    print_stat("Max", report.target_max, target_pct);

    println!("\nCorrelation Results:");
    print_coefficient("Pearson", report.pearson_correlation, report.pearson_pvalue, report.pearson_significant);
    println!();
    print_coefficient(
        "Spearman",
        report.spearman_correlation,
        report.spearman_pvalue,
        report.spearman_significant,
    );
    if let Some(r) = report.rank_pearson_correlation {
        println!("  Rank-based Pearson: {r:.4}");
    }

    if let (Some(fr), Some(tr)) = (&report.feature_ranks, &report.target_ranks) {
        println!("\nRanks ({feature}, {target}):");
        for (f, t) in fr.iter().zip(tr) {
            println!("  {f:>10.1} {t:>10.1}");
        }
    }

    println!("\n{}", "=".repeat(RULE_WIDTH));
}

fn print_stat(name: &str, value: Option<f64>, percent: bool) {
    match value {
        Some(v) if percent => println!("  {name}: {v:.2}%"),
        Some(v) => println!("  {name}: {v:.4}"),
        None => println!("  {name}: N/A"),
    }
}

fn print_coefficient(name: &str, r: Option<f64>, p: Option<f64>, significant: Option<bool>) {
    match r {
        Some(r) => println!("  {name} Correlation: {r:.4}"),
        None => println!("  {name} Correlation: N/A"),
    }
    match p {
        Some(p) => println!("  {name} p-value: {p:.4e}"),
        None => println!("  {name} p-value: N/A"),
    }
    match significant {
        Some(true) => println!("    -> Statistically significant (p < 0.05)"),
        Some(false) => println!("    -> Not statistically significant (p >= 0.05)"),
        None => {}
    }
}

/// Display label for a metric name.
fn label(name: &str) -> String {
    match name {
        "roa" => "ROA".to_string(),
        "ebit_ppe" => "EBIT/PPE".to_string(),
        "ebit_ppe_ttm" => "EBIT/PPE (TTM)".to_string(),
        "ev_ebit" => "EV/EBIT".to_string(),
        FORWARD_RETURN_PREFIX => "Forward Return".to_string(),
        other => match other.strip_prefix(FORWARD_RETURN_PREFIX).and_then(|s| s.strip_prefix('_')) {
            Some(horizon) => format!("Forward Return ({horizon})"),
            None => title_case(other),
        },
    }
}

fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format an integer with thousands separators.
fn with_commas(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
