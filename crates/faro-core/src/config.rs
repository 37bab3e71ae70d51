//! Derivation configuration.
//!
//! Everything the derivation pipeline would otherwise hard-code lives here:
//! which provider keys feed which raw field (in priority order), which
//! forward-return horizons to compute, and the trailing window length.
//! The whole structure is passed explicitly into derivation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{FaroError, Result, types::FORWARD_RETURN_PREFIX};

/// Quarters in a year, used for annualization and horizon labels.
pub const QUARTERS_PER_YEAR: usize = 4;

/// Name of the open horizon (through the most recent quarter).
pub const OPEN_HORIZON: &str = "forward_return";

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

/// Candidate provider keys for each raw field, tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldKeys {
    /// Period-end share price.
    pub price: Vec<String>,
    /// Dividends paid in the quarter.
    pub dividend: Vec<String>,
    /// Return on assets.
    pub roa: Vec<String>,
    /// Operating income.
    pub operating_income: Vec<String>,
    /// Net PPE.
    pub ppe_net: Vec<String>,
    /// Revenue.
    pub revenue: Vec<String>,
    /// Cost of goods sold.
    pub cost_of_goods_sold: Vec<String>,
    /// Enterprise value.
    pub enterprise_value: Vec<String>,
}

impl Default for FieldKeys {
    fn default() -> Self {
        Self {
            price: keys(&["period_end_price"]),
            dividend: keys(&["dividends"]),
            roa: keys(&["roa"]),
            operating_income: keys(&["operating_income"]),
            ppe_net: keys(&["ppe_net"]),
            revenue: keys(&["revenue"]),
            cost_of_goods_sold: keys(&["cost_of_goods_sold", "cogs"]),
            enterprise_value: keys(&["enterprise_value"]),
        }
    }
}

impl FieldKeys {
    /// Every provider key mentioned, deduplicated, in declaration order.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for key in [
            &self.price,
            &self.dividend,
            &self.roa,
            &self.operating_income,
            &self.ppe_net,
            &self.revenue,
            &self.cost_of_goods_sold,
            &self.enterprise_value,
        ]
        .into_iter()
        .flatten()
        {
            if !out.contains(key) {
                out.push(key.clone());
            }
        }
        out
    }
}

/// A forward-return horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonSpec {
    /// Field name the result is stored under.
    pub name: String,
    /// Quarters that must follow the start quarter; `None` compounds
    /// through the most recent quarter.
    pub quarters: Option<usize>,
}

impl HorizonSpec {
    /// Horizon running through the most recent available quarter.
    pub fn open(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quarters: None,
        }
    }

    /// Horizon of a fixed number of quarters.
    pub fn fixed(name: impl Into<String>, quarters: usize) -> Self {
        Self {
            name: name.into(),
            quarters: Some(quarters),
        }
    }

    /// Horizon of whole years, named `forward_return_{years}y`.
    pub fn years(years: usize) -> Self {
        Self::fixed(
            format!("{FORWARD_RETURN_PREFIX}_{years}y"),
            years * QUARTERS_PER_YEAR,
        )
    }

    /// Whether this is the open horizon.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.quarters.is_none()
    }
}

/// Configuration for metric derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationConfig {
    /// Candidate keys for the period identifier, first present and
    /// non-empty wins.
    pub date_keys: Vec<String>,
    /// Candidate keys for each raw field.
    pub fields: FieldKeys,
    /// Forward-return horizons, computed in this order.
    pub horizons: Vec<HorizonSpec>,
    /// Length of the trailing window for TTM ratios.
    pub ttm_quarters: usize,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            date_keys: keys(&["period_end_date", "fiscal_quarter_key", "original_filing_date"]),
            fields: FieldKeys::default(),
            horizons: vec![
                HorizonSpec::open(OPEN_HORIZON),
                HorizonSpec::years(1),
                HorizonSpec::years(3),
                HorizonSpec::years(5),
                HorizonSpec::years(10),
            ],
            ttm_quarters: QUARTERS_PER_YEAR,
        }
    }
}

impl DerivationConfig {
    /// Load a configuration from a JSON file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails [`DerivationConfig::validate`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = crate::io::read_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values derivation cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::InvalidConfig`] on an empty date key list, a
    /// zero-length window or horizon, or a horizon name that is duplicated
    /// or does not start with `forward_return`.
    pub fn validate(&self) -> Result<()> {
        if self.date_keys.is_empty() {
            return Err(FaroError::InvalidConfig("date_keys must not be empty".into()));
        }
        if self.fields.price.is_empty() {
            return Err(FaroError::InvalidConfig("fields.price must not be empty".into()));
        }
        if self.ttm_quarters == 0 {
            return Err(FaroError::InvalidConfig("ttm_quarters must be at least 1".into()));
        }
        for (i, horizon) in self.horizons.iter().enumerate() {
            if !horizon.name.starts_with(FORWARD_RETURN_PREFIX) {
                return Err(FaroError::InvalidConfig(format!(
                    "horizon '{}' must start with '{FORWARD_RETURN_PREFIX}'",
                    horizon.name
                )));
            }
            if horizon.quarters == Some(0) {
                return Err(FaroError::InvalidConfig(format!(
                    "horizon '{}' must span at least one quarter",
                    horizon.name
                )));
            }
            if self.horizons[..i].iter().any(|h| h.name == horizon.name) {
                return Err(FaroError::InvalidConfig(format!(
                    "duplicate horizon '{}'",
                    horizon.name
                )));
            }
        }
        Ok(())
    }

    /// Provider metric names a fetch must request to feed this config.
    #[must_use]
    pub fn provider_metrics(&self) -> Vec<String> {
        let mut metrics = self.date_keys.clone();
        for key in self.fields.all() {
            if !metrics.contains(&key) {
                metrics.push(key);
            }
        }
        metrics
    }
}
