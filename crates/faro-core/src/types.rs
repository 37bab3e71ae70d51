//! Data types shared by the derivation and correlation pipelines.
//!
//! Two shapes of company data live here:
//!
//! - [`RawCompany`]: what the data provider hands over. Arrays keyed by
//!   metric name, aligned by quarter index, possibly ragged, possibly
//!   holding nulls or values of the wrong type.
//! - [`CompanySeries`]: the derived result, one [`QuarterlyRecord`] per
//!   quarter in ascending chronological order.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A company symbol (ticker).
pub type Symbol = String;

/// Prefix shared by every forward-return field name.
pub const FORWARD_RETURN_PREFIX: &str = "forward_return";

/// Convert a JSON value to a finite number, or `None` for null,
/// non-numeric and non-finite values.
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|x| x.is_finite())
}

/// Convert a JSON value to a period label, or `None` for null and empty
/// strings.
#[must_use]
pub fn as_period(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Raw per-company data as returned by the provider.
///
/// `data` maps a metric name (`period_end_price`, `roa`, ...) to an array
/// indexed by quarter, oldest first. Nothing is assumed about array
/// lengths or element types; use [`RawCompany::number`] and
/// [`RawCompany::first_present`] for bounds-checked access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCompany {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Display name, when the provider supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Metric arrays keyed by metric name.
    #[serde(default)]
    pub data: BTreeMap<String, Value>,
}

impl RawCompany {
    /// Create an empty record for a symbol.
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            company_name: None,
            data: BTreeMap::new(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    /// Add a numeric array; `None` entries are stored as JSON null.
    #[must_use]
    pub fn with_numbers<I>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let array = values
            .into_iter()
            .map(|v| v.map_or(Value::Null, Value::from))
            .collect();
        self.data.insert(key.into(), Value::Array(array));
        self
    }

    /// Add a text array (dates, fiscal quarter keys).
    #[must_use]
    pub fn with_labels<I, S>(mut self, key: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let array = labels.into_iter().map(|s| Value::String(s.into())).collect();
        self.data.insert(key.into(), Value::Array(array));
        self
    }

    /// Display name, falling back to the symbol.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or(&self.symbol)
    }

    /// The array stored under `key`, if present and actually an array.
    #[must_use]
    pub fn series(&self, key: &str) -> Option<&[Value]> {
        self.data.get(key)?.as_array().map(Vec::as_slice)
    }

    /// The first of `keys` whose array is present and non-empty, together
    /// with the key that matched.
    #[must_use]
    pub fn first_present<'a, K: AsRef<str>>(&'a self, keys: &[K]) -> Option<(&'a str, &'a [Value])> {
        keys.iter().find_map(|key| {
            let (name, value) = self.data.get_key_value(key.as_ref())?;
            let array = value.as_array()?;
            (!array.is_empty()).then_some((name.as_str(), array.as_slice()))
        })
    }

    /// Numeric value of `key` at quarter `index`.
    ///
    /// `None` when the key is absent, the index is past the end of a short
    /// array, or the element is null or not a number.
    #[must_use]
    pub fn number(&self, key: &str, index: usize) -> Option<f64> {
        self.series(key)?.get(index).and_then(as_number)
    }
}

/// Forward returns of one quarter, keyed by horizon field name.
///
/// Serialized flattened into the enclosing [`QuarterlyRecord`], so the
/// horizon names (`forward_return`, `forward_return_1y`, ...) appear as
/// ordinary record fields. On read, only keys starting with
/// [`FORWARD_RETURN_PREFIX`] are kept and non-numeric values become `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForwardReturns(BTreeMap<String, Option<f64>>);

impl ForwardReturns {
    /// Create an empty set.
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Forward return for a horizon, `None` if unknown or not computable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied().flatten()
    }

    /// Whether a horizon was recorded at all (even as `None`).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Record the value for a horizon.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<f64>) {
        self.0.insert(name.into(), value);
    }

    /// Iterate over `(horizon name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of recorded horizons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no horizon has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ForwardReturns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ForwardReturns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter(|(key, _)| key.starts_with(FORWARD_RETURN_PREFIX))
                .map(|(key, value)| {
                    let number = as_number(&value);
                    (key, number)
                })
                .collect(),
        ))
    }
}

/// One derived quarter for one company.
///
/// Raw inputs are carried through unchanged (`None` stays `None`); the
/// derived fields are filled once by the derivation pipeline, in the order
/// total return, forward returns, ratios.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyRecord {
    /// Period identifier (period end date or fiscal quarter key).
    #[serde(default, deserialize_with = "lenient::label")]
    pub period: String,
    /// Period-end share price.
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    /// Dividends paid during the quarter.
    #[serde(default, alias = "dividends", deserialize_with = "lenient::number")]
    pub dividend: Option<f64>,
    /// Return on assets, passed through from the provider.
    #[serde(default, deserialize_with = "lenient::number")]
    pub roa: Option<f64>,
    /// Operating income (EBIT proxy).
    #[serde(default, deserialize_with = "lenient::number")]
    pub operating_income: Option<f64>,
    /// Net property, plant and equipment.
    #[serde(default, deserialize_with = "lenient::number")]
    pub ppe_net: Option<f64>,
    /// Revenue.
    #[serde(default, deserialize_with = "lenient::number")]
    pub revenue: Option<f64>,
    /// Cost of goods sold.
    #[serde(default, deserialize_with = "lenient::number")]
    pub cost_of_goods_sold: Option<f64>,
    /// Enterprise value.
    #[serde(default, deserialize_with = "lenient::number")]
    pub enterprise_value: Option<f64>,
    /// Quarter-over-quarter total return in percent.
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_return: Option<f64>,
    /// Annualized forward returns in percent, by horizon name.
    #[serde(flatten)]
    pub forward_returns: ForwardReturns,
    /// Operating income / net PPE for the quarter.
    #[serde(default, deserialize_with = "lenient::number")]
    pub ebit_ppe: Option<f64>,
    /// Trailing-twelve-month operating income / net PPE.
    #[serde(default, deserialize_with = "lenient::number")]
    pub ebit_ppe_ttm: Option<f64>,
    /// (revenue - COGS) / revenue.
    #[serde(default, deserialize_with = "lenient::number")]
    pub gross_margin: Option<f64>,
    /// Operating income / revenue.
    #[serde(default, deserialize_with = "lenient::number")]
    pub operating_margin: Option<f64>,
    /// Enterprise value / operating income.
    #[serde(default, deserialize_with = "lenient::number")]
    pub ev_ebit: Option<f64>,
}

impl QuarterlyRecord {
    /// Names of the numeric fields that are not forward returns.
    pub const FIXED_METRICS: &'static [&'static str] = &[
        "price",
        "dividend",
        "roa",
        "operating_income",
        "ppe_net",
        "revenue",
        "cost_of_goods_sold",
        "enterprise_value",
        "total_return",
        "ebit_ppe",
        "ebit_ppe_ttm",
        "gross_margin",
        "operating_margin",
        "ev_ebit",
    ];

    /// Alternate names accepted for fixed metrics, as (alias, field).
    pub const METRIC_ALIASES: &'static [(&'static str, &'static str)] =
        &[("dividends", "dividend"), ("cogs", "cost_of_goods_sold")];

    /// Create a record with only the period set.
    pub fn new(period: impl Into<String>) -> Self {
        Self {
            period: period.into(),
            ..Default::default()
        }
    }

    /// Whether `name` can address a numeric field of a record.
    #[must_use]
    pub fn is_metric_name(name: &str) -> bool {
        let name = Self::canonical_metric_name(name);
        Self::FIXED_METRICS.contains(&name) || name.starts_with(FORWARD_RETURN_PREFIX)
    }

    /// Resolve an alias to its persisted field name; other names pass through.
    #[must_use]
    pub fn canonical_metric_name(name: &str) -> &str {
        Self::METRIC_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map_or(name, |&(_, field)| field)
    }

    /// Whether this record carries `name` at all, even as null.
    ///
    /// Fixed metrics are always carried; a forward-return horizon only when
    /// derivation recorded it.
    #[must_use]
    pub fn has_metric(&self, name: &str) -> bool {
        let name = Self::canonical_metric_name(name);
        Self::FIXED_METRICS.contains(&name) || self.forward_returns.contains(name)
    }

    /// Look up a numeric field by its persisted name.
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        match Self::canonical_metric_name(name) {
            "price" => self.price,
            "dividend" => self.dividend,
            "roa" => self.roa,
            "operating_income" => self.operating_income,
            "ppe_net" => self.ppe_net,
            "revenue" => self.revenue,
            "cost_of_goods_sold" => self.cost_of_goods_sold,
            "enterprise_value" => self.enterprise_value,
            "total_return" => self.total_return,
            "ebit_ppe" => self.ebit_ppe,
            "ebit_ppe_ttm" => self.ebit_ppe_ttm,
            "gross_margin" => self.gross_margin,
            "operating_margin" => self.operating_margin,
            "ev_ebit" => self.ev_ebit,
            other => self.forward_returns.get(other),
        }
    }

    /// Forward return for a horizon name.
    #[must_use]
    pub fn forward_return(&self, horizon: &str) -> Option<f64> {
        self.forward_returns.get(horizon)
    }
}

/// Derived quarterly records for one company, oldest quarter first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanySeries {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Display name.
    #[serde(default)]
    pub company_name: String,
    /// Quarterly records in ascending chronological order.
    #[serde(default)]
    pub data: Vec<QuarterlyRecord>,
}

impl CompanySeries {
    /// Create a series from its parts.
    pub fn new(
        symbol: impl Into<Symbol>,
        company_name: impl Into<String>,
        data: Vec<QuarterlyRecord>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            company_name: company_name.into(),
            data,
        }
    }

    /// Number of quarters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series has no quarters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The most recent quarter.
    #[must_use]
    pub fn latest(&self) -> Option<&QuarterlyRecord> {
        self.data.last()
    }
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(super::as_number(&value))
    }

    pub(super) fn label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(super::as_period(&value).unwrap_or_default())
    }
}
