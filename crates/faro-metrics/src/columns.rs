//! Column resolution for raw provider records.
//!
//! Provider arrays may be missing, shorter or longer than the period array,
//! or hold nulls and strings. [`QuarterColumns::resolve`] settles all of that
//! once: every column comes out exactly as long as the period column, with
//! `None` wherever the provider had nothing usable. Formulas then read
//! values through [`at`].

use faro_core::{DerivationConfig, FaroError, RawCompany, Result, types::as_period};

/// Value of `column` at `index`, `None` when out of range or missing.
#[inline]
#[must_use]
pub fn at(column: &[Option<f64>], index: usize) -> Option<f64> {
    column.get(index).copied().flatten()
}

/// Raw fields of one company, aligned on the period index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuarterColumns {
    /// Period labels, oldest first. Defines the number of quarters.
    pub periods: Vec<String>,
    /// Period-end share price.
    pub price: Vec<Option<f64>>,
    /// Dividends paid in the quarter.
    pub dividend: Vec<Option<f64>>,
    /// Return on assets.
    pub roa: Vec<Option<f64>>,
    /// Operating income.
    pub operating_income: Vec<Option<f64>>,
    /// Net PPE.
    pub ppe_net: Vec<Option<f64>>,
    /// Revenue.
    pub revenue: Vec<Option<f64>>,
    /// Cost of goods sold.
    pub cost_of_goods_sold: Vec<Option<f64>>,
    /// Enterprise value.
    pub enterprise_value: Vec<Option<f64>>,
}

impl QuarterColumns {
    /// Resolve the columns of `raw` using the candidate keys in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::MissingField`] when none of the date keys holds
    /// a non-empty array (`period`), or when no price array is present
    /// (`price`).
    pub fn resolve(raw: &RawCompany, config: &DerivationConfig) -> Result<Self> {
        let missing = |field: &str| FaroError::MissingField {
            symbol: raw.symbol.clone(),
            field: field.to_string(),
        };

        let (_, dates) = raw
            .first_present(&config.date_keys)
            .ok_or_else(|| missing("period"))?;
        let periods: Vec<String> = dates
            .iter()
            .map(|value| as_period(value).unwrap_or_default())
            .collect();
        let len = periods.len();

        let column = |keys: &[String]| -> Option<Vec<Option<f64>>> {
            let (key, _) = raw.first_present(keys)?;
            Some((0..len).map(|j| raw.number(key, j)).collect())
        };
        let optional = |keys: &[String]| column(keys).unwrap_or_else(|| vec![None; len]);

        let fields = &config.fields;
        Ok(Self {
            price: column(&fields.price).ok_or_else(|| missing("price"))?,
            dividend: optional(&fields.dividend),
            roa: optional(&fields.roa),
            operating_income: optional(&fields.operating_income),
            ppe_net: optional(&fields.ppe_net),
            revenue: optional(&fields.revenue),
            cost_of_goods_sold: optional(&fields.cost_of_goods_sold),
            enterprise_value: optional(&fields.enterprise_value),
            periods,
        })
    }

    /// Number of quarters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether there are no quarters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DerivationConfig {
        DerivationConfig::default()
    }

    #[test]
    fn test_ragged_columns_are_padded_and_truncated() {
        let raw = RawCompany::new("AAA")
            .with_labels("period_end_date", ["q1", "q2", "q3"])
            .with_numbers("period_end_price", [Some(1.0)])
            .with_numbers("roa", [Some(0.1), Some(0.2), Some(0.3), Some(0.4)]);

        let columns = QuarterColumns::resolve(&raw, &config()).unwrap();

        assert_eq!(columns.len(), 3);
        assert_eq!(columns.price, vec![Some(1.0), None, None]);
        assert_eq!(columns.roa, vec![Some(0.1), Some(0.2), Some(0.3)]);
        assert_eq!(columns.revenue, vec![None, None, None]);
    }

    #[test]
    fn test_date_key_fallback() {
        let raw = RawCompany::new("AAA")
            .with_labels("period_end_date", Vec::<String>::new())
            .with_labels("fiscal_quarter_key", ["2020Q1", "2020Q2"])
            .with_numbers("period_end_price", [Some(1.0), Some(2.0)]);

        let columns = QuarterColumns::resolve(&raw, &config()).unwrap();
        assert_eq!(columns.periods, vec!["2020Q1", "2020Q2"]);
    }

    #[test]
    fn test_cogs_alias() {
        let raw = RawCompany::new("AAA")
            .with_labels("period_end_date", ["q1"])
            .with_numbers("period_end_price", [Some(1.0)])
            .with_numbers("cogs", [Some(40.0)]);

        let columns = QuarterColumns::resolve(&raw, &config()).unwrap();
        assert_eq!(columns.cost_of_goods_sold, vec![Some(40.0)]);
    }

    #[test]
    fn test_missing_dates_and_prices() {
        let no_dates = RawCompany::new("AAA").with_numbers("period_end_price", [Some(1.0)]);
        assert!(matches!(
            QuarterColumns::resolve(&no_dates, &config()),
            Err(FaroError::MissingField { ref field, .. }) if field == "period"
        ));

        let no_prices = RawCompany::new("AAA").with_labels("period_end_date", ["q1"]);
        assert!(matches!(
            QuarterColumns::resolve(&no_prices, &config()),
            Err(FaroError::MissingField { ref field, .. }) if field == "price"
        ));
    }

    #[test]
    fn test_at_is_bounds_checked() {
        let column = vec![Some(1.0), None];
        assert_eq!(at(&column, 0), Some(1.0));
        assert_eq!(at(&column, 1), None);
        assert_eq!(at(&column, 5), None);
    }
}
