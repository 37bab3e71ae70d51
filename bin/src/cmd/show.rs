//! Show command implementation.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use faro_core::{CompanySeries, QuarterlyRecord, io::read_json};

use crate::{cmd::banner, data};

/// Print one company's quarters, most recent first.
pub(crate) fn show_company(input: &Path, symbol: &str, horizon: &str, since: Option<&str>) -> Result<()> {
    let since: Option<NaiveDate> = since.map(data::parse_date).transpose()?;

    let series: Vec<CompanySeries> =
        read_json(input).with_context(|| format!("failed to read {}", input.display()))?;
    let company = series
        .iter()
        .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| anyhow!("no data available for {symbol}"))?;

    banner(&format!("{} ({})", company.company_name, company.symbol));
    println!(
        "\n{:<15} {:<15} {:<15} {:<15} {:<15} {:<15}",
        "Period", "Price", "Dividends", "Total Return", "Forward Return", "EBIT/PPE TTM"
    );
    println!("{}", "-".repeat(95));

    let mut shown = 0usize;
    for record in company.data.iter().rev() {
        if let Some(since) = since
            && data::period_date(&record.period).is_some_and(|d| d < since)
        {
            continue;
        }
        println!("{}", format_row(record, horizon));
        shown += 1;
    }

    println!("\nTotal quarters: {shown}");
    Ok(())
}

fn format_row(record: &QuarterlyRecord, horizon: &str) -> String {
    format!(
        "{:<15} {:<15} {:<15} {:<15} {:<15} {:<15}",
        record.period,
        format_price(record.price),
        format_dividend(record.dividend),
        format_percent(record.total_return),
        format_percent(record.forward_return(horizon)),
        format_ratio(record.ebit_ppe_ttm),
    )
}

fn format_price(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("${v:.2}"))
}

fn format_dividend(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("${v:.4}"))
}

fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}%"))
}

fn format_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.4}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nulls_render_as_na() {
        let record = QuarterlyRecord::new("2024-03-31");
        let row = format_row(&record, "forward_return");
        assert!(row.starts_with("2024-03-31"));
        assert_eq!(row.matches("N/A").count(), 5);
    }

    #[test]
    fn test_values_render() {
        let mut record = QuarterlyRecord::new("2024-03-31");
        record.price = Some(123.456);
        record.dividend = Some(0.5);
        record.total_return = Some(-2.5);
        record.forward_returns.insert("forward_return_1y", Some(12.0));

        let row = format_row(&record, "forward_return_1y");
        assert!(row.contains("$123.46"));
        assert!(row.contains("$0.5000"));
        assert!(row.contains("-2.50%"));
        assert!(row.contains("12.00%"));
    }
}
