//! Per-company derivation and batch processing.
//!
//! Stages run in a fixed order and each reads only what earlier stages
//! produced: total return from raw prices, forward returns from total
//! returns, then TTM and point-in-time ratios from raw fundamentals.

use faro_core::{CompanySeries, DerivationConfig, FaroError, QuarterlyRecord, RawCompany, Result, Symbol};
use rayon::prelude::*;

use crate::{
    columns::{QuarterColumns, at},
    forward, ratios, returns, ttm,
};

/// A company that could not be derived, with the reason.
#[derive(Debug)]
pub struct SkippedCompany {
    /// Company symbol.
    pub symbol: Symbol,
    /// Why derivation failed.
    pub reason: FaroError,
}

/// Result of deriving a batch of companies.
#[derive(Debug, Default)]
pub struct DerivationOutcome {
    /// Successfully derived series, in input order.
    pub series: Vec<CompanySeries>,
    /// Companies that were skipped, in input order.
    pub skipped: Vec<SkippedCompany>,
}

impl DerivationOutcome {
    /// Total quarters across all derived series.
    #[must_use]
    pub fn quarters(&self) -> usize {
        self.series.iter().map(CompanySeries::len).sum()
    }
}

/// Derive every metric for one company.
///
/// # Errors
///
/// Returns [`FaroError::MissingField`] when the company has no usable
/// period array or no price array. Gaps inside the data never error; they
/// surface as `None` fields.
pub fn derive_company(raw: &RawCompany, config: &DerivationConfig) -> Result<CompanySeries> {
    let columns = QuarterColumns::resolve(raw, config)?;
    let series = derive_columns(&raw.symbol, raw.display_name(), &columns, config);

    tracing::debug!(symbol = %series.symbol, quarters = series.len(), "derived company metrics");
    Ok(series)
}

/// Derive every metric from already resolved columns.
#[must_use]
pub fn derive_columns(
    symbol: &str,
    company_name: &str,
    columns: &QuarterColumns,
    config: &DerivationConfig,
) -> CompanySeries {
    let total_returns = returns::total_returns(&columns.price, &columns.dividend);

    let horizons: Vec<(&str, Vec<Option<f64>>)> = config
        .horizons
        .iter()
        .map(|h| (h.name.as_str(), forward::forward_returns(&total_returns, h.quarters)))
        .collect();

    let ebit_ppe_ttm =
        ttm::ebit_ppe_ttm_series(&columns.operating_income, &columns.ppe_net, config.ttm_quarters);

    let data = columns
        .periods
        .iter()
        .enumerate()
        .map(|(j, period)| {
            let operating_income = at(&columns.operating_income, j);
            let ppe_net = at(&columns.ppe_net, j);
            let revenue = at(&columns.revenue, j);
            let cost_of_goods_sold = at(&columns.cost_of_goods_sold, j);
            let enterprise_value = at(&columns.enterprise_value, j);

            let mut record = QuarterlyRecord {
                period: period.clone(),
                price: at(&columns.price, j),
                dividend: at(&columns.dividend, j),
                roa: at(&columns.roa, j),
                operating_income,
                ppe_net,
                revenue,
                cost_of_goods_sold,
                enterprise_value,
                total_return: at(&total_returns, j),
                ..Default::default()
            };
            for (name, values) in &horizons {
                record.forward_returns.insert(*name, at(values, j));
            }
            record.ebit_ppe = ratios::ebit_ppe(operating_income, ppe_net);
            record.ebit_ppe_ttm = at(&ebit_ppe_ttm, j);
            record.gross_margin = ratios::gross_margin(revenue, cost_of_goods_sold);
            record.operating_margin = ratios::operating_margin(operating_income, revenue);
            record.ev_ebit = ratios::ev_ebit(enterprise_value, operating_income);
            record
        })
        .collect();

    CompanySeries::new(symbol, company_name, data)
}

/// Derive a batch of companies in parallel.
///
/// Companies are independent; each result lands in its own slot and input
/// order is preserved. A company that fails is recorded in
/// [`DerivationOutcome::skipped`] and the rest carry on.
#[must_use]
pub fn derive_all(companies: &[RawCompany], config: &DerivationConfig) -> DerivationOutcome {
    let results: Vec<(Symbol, Result<CompanySeries>)> = companies
        .par_iter()
        .map(|raw| (raw.symbol.clone(), derive_company(raw, config)))
        .collect();

    let mut outcome = DerivationOutcome::default();
    for (symbol, result) in results {
        match result {
            Ok(series) => outcome.series.push(series),
            Err(reason) => {
                tracing::warn!(symbol = %symbol, error = %reason, "skipping company");
                outcome.skipped.push(SkippedCompany { symbol, reason });
            }
        }
    }

    tracing::info!(
        derived = outcome.series.len(),
        skipped = outcome.skipped.len(),
        quarters = outcome.quarters(),
        "derivation finished"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn company() -> RawCompany {
        RawCompany::new("ACME")
            .with_name("Acme Corp")
            .with_labels(
                "period_end_date",
                ["2023-03-31", "2023-06-30", "2023-09-30", "2023-12-31", "2024-03-31"],
            )
            .with_numbers(
                "period_end_price",
                [Some(10.0), Some(11.0), Some(12.1), Some(13.31), Some(14.641)],
            )
            .with_numbers("dividends", [None, None, None, None, None])
            .with_numbers("roa", [Some(0.01), Some(0.02), None, Some(0.04), Some(0.05)])
            .with_numbers("operating_income", [Some(10.0), Some(20.0), Some(30.0), Some(40.0), Some(0.0)])
            .with_numbers("ppe_net", [Some(100.0), Some(100.0), Some(100.0), Some(100.0), Some(100.0)])
            .with_numbers("revenue", [Some(200.0), Some(200.0), Some(0.0), Some(200.0), Some(200.0)])
            .with_numbers("cogs", [Some(100.0), Some(150.0), Some(50.0), None, Some(100.0)])
            .with_numbers("enterprise_value", [Some(1000.0), Some(-500.0), Some(900.0), Some(800.0), Some(700.0)])
    }

    #[test]
    fn test_derive_company_fields() {
        let series = derive_company(&company(), &DerivationConfig::default()).unwrap();

        assert_eq!(series.symbol, "ACME");
        assert_eq!(series.company_name, "Acme Corp");
        assert_eq!(series.len(), 5);

        let q0 = &series.data[0];
        assert_eq!(q0.total_return, None);
        assert_relative_eq!(q0.ebit_ppe.unwrap(), 0.1);
        assert_relative_eq!(q0.gross_margin.unwrap(), 0.5);
        assert_relative_eq!(q0.ev_ebit.unwrap(), 100.0);
        assert_eq!(q0.ebit_ppe_ttm, None);

        // Every quarter after the first returns 10%.
        for record in &series.data[1..] {
            assert_relative_eq!(record.total_return.unwrap(), 10.0, epsilon = 1e-9);
        }

        // Four quarters of 10% compound to 46.41% over exactly one year.
        assert_relative_eq!(
            q0.forward_return("forward_return_1y").unwrap(),
            46.41,
            epsilon = 1e-9
        );
        assert_relative_eq!(q0.forward_return("forward_return").unwrap(), 46.41, epsilon = 1e-9);
        assert_eq!(q0.forward_return("forward_return_3y"), None);
        assert!(series.data[1].forward_return("forward_return_1y").is_none());

        let q1 = &series.data[1];
        assert_relative_eq!(q1.ev_ebit.unwrap(), -25.0);

        let q2 = &series.data[2];
        assert_eq!(q2.roa, None);
        assert_eq!(q2.gross_margin, None);
        assert_eq!(q2.operating_margin, None);

        let q3 = &series.data[3];
        assert_eq!(q3.gross_margin, None);
        assert_relative_eq!(q3.ebit_ppe_ttm.unwrap(), 100.0 / 400.0);

        let q4 = &series.data[4];
        assert_eq!(q4.ev_ebit, None);
        assert_relative_eq!(q4.ebit_ppe_ttm.unwrap(), 90.0 / 400.0);
        assert!(q4.forward_return("forward_return").is_none());
    }

    #[test]
    fn test_every_configured_horizon_is_recorded() {
        let series = derive_company(&company(), &DerivationConfig::default()).unwrap();
        for record in &series.data {
            assert_eq!(record.forward_returns.len(), 5);
        }
    }

    #[test]
    fn test_derive_all_isolates_failures() {
        let companies = vec![
            company(),
            RawCompany::new("NODATE").with_numbers("period_end_price", [Some(1.0)]),
            RawCompany::new("NOPRICE").with_labels("period_end_date", ["2024-03-31"]),
            company().with_name("Acme Again"),
        ];

        let outcome = derive_all(&companies, &DerivationConfig::default());

        let derived: Vec<&str> = outcome.series.iter().map(|s| s.company_name.as_str()).collect();
        assert_eq!(derived, vec!["Acme Corp", "Acme Again"]);
        let skipped: Vec<&str> = outcome.skipped.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(skipped, vec!["NODATE", "NOPRICE"]);
        assert_eq!(outcome.quarters(), 10);
    }
}
