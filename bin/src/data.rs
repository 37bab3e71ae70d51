//! Input loading and date helpers for the faro CLI.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use faro_core::{DerivationConfig, io::read_json};
use faro_quickfs::Tickers;

/// Load the ticker list from a `{"tickers": [...]}` file.
pub(crate) fn load_tickers(path: &Path) -> Result<Vec<String>> {
    let file: Tickers =
        read_json(path).with_context(|| format!("failed to read tickers from {}", path.display()))?;
    Ok(file
        .tickers
        .into_iter()
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect())
}

/// Load a derivation config, or the defaults when no path is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<DerivationConfig> {
    match path {
        Some(path) => DerivationConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(DerivationConfig::default()),
    }
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").with_context(|| format!("Invalid date format: {date_str}"))
}

/// Calendar date of a period label such as `2024-03-31` or
/// `2024-03-31T00:00:00`. `None` for labels like fiscal quarter keys.
pub(crate) fn period_date(period: &str) -> Option<NaiveDate> {
    let head = period.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_date_invalid() {
        let result = parse_date("invalid");
        assert!(result.is_err());
    }

    #[test]
    fn test_period_date() {
        assert_eq!(period_date("2023-06-30"), NaiveDate::from_ymd_opt(2023, 6, 30));
        assert_eq!(period_date("2023-06-30T00:00:00Z"), NaiveDate::from_ymd_opt(2023, 6, 30));
        assert_eq!(period_date("2023.Q2"), None);
        assert_eq!(period_date(""), None);
    }

    #[test]
    fn test_load_tickers_normalizes() {
        let path = std::env::temp_dir().join(format!("faro-tickers-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"tickers": [" aapl", "MSFT", "", "shop:ca"]}"#).unwrap();

        let tickers = load_tickers(&path).unwrap();
        assert_eq!(tickers, vec!["AAPL", "MSFT", "SHOP:CA"]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_config_defaults() {
        assert_eq!(load_config(None).unwrap(), DerivationConfig::default());
    }
}
