//! Persisted layout keeps every null where it was.

use std::path::PathBuf;

use faro_core::{CompanySeries, QuarterlyRecord, io};

fn sample_series() -> CompanySeries {
    let mut first = QuarterlyRecord::new("2023-03-31");
    first.price = Some(100.0);
    first.dividend = None;
    first.roa = Some(0.04);
    first.forward_returns.insert("forward_return", Some(9.5));
    first.forward_returns.insert("forward_return_1y", None);

    let mut second = QuarterlyRecord::new("2023-06-30");
    second.price = Some(0.0);
    second.dividend = Some(0.0);
    second.operating_income = Some(-5.0);
    second.total_return = None;
    second.ev_ebit = Some(-12.0);
    second.forward_returns.insert("forward_return", None);
    second.forward_returns.insert("forward_return_1y", None);

    CompanySeries::new("ACME", "Acme Corp", vec![first, second])
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("faro-{}-{name}", std::process::id()))
}

#[test]
fn test_string_round_trip_preserves_nulls() {
    let series = sample_series();
    let text = serde_json::to_string(&series).unwrap();
    let back: CompanySeries = serde_json::from_str(&text).unwrap();

    assert_eq!(back, series);
    assert_eq!(back.data[0].dividend, None);
    assert_eq!(back.data[1].price, Some(0.0));
    assert!(back.data[0].forward_returns.contains("forward_return_1y"));
    assert_eq!(back.data[0].forward_return("forward_return_1y"), None);
}

#[test]
fn test_nulls_are_written_as_null_not_zero() {
    let value = serde_json::to_value(sample_series()).unwrap();
    let first = &value["data"][0];

    assert!(first["dividend"].is_null());
    assert!(first["total_return"].is_null());
    assert!(first["forward_return_1y"].is_null());
    assert_eq!(value["data"][1]["dividend"], serde_json::json!(0.0));
}

#[test]
fn test_file_round_trip() {
    let path = temp_path("metrics.json");
    let series = vec![sample_series()];

    io::write_json(&path, &series).unwrap();
    let back: Vec<CompanySeries> = io::read_json(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(back, series);
}

#[test]
fn test_jsonl_round_trip() {
    let path = temp_path("data.jsonl");
    let raw = vec![
        faro_core::RawCompany::new("AAA")
            .with_labels("period_end_date", ["2024-03-31", "2024-06-30"])
            .with_numbers("period_end_price", [Some(10.0), None]),
        faro_core::RawCompany::new("BBB").with_name("Bravo"),
    ];

    io::write_jsonl(&path, &raw).unwrap();
    let back: Vec<faro_core::RawCompany> = io::read_jsonl(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(back, raw);
    assert_eq!(back[0].number("period_end_price", 1), None);
}
