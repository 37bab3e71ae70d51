//! Pooling of (feature, target) pairs across companies and quarters.

use faro_core::{CompanySeries, FaroError, QuarterlyRecord, Result};

/// Pooled (feature, target) pairs from every company and quarter.
///
/// Only pairs where both values are finite numbers are kept. Insertion order
/// is retained but carries no meaning; [`CorrelationSample::canonical`] gives
/// the order statistics are computed over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationSample {
    pairs: Vec<(f64, f64)>,
}

impl CorrelationSample {
    /// Create an empty sample.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Add a pair if both values are present and finite. Returns whether the
    /// pair was kept.
    pub fn push(&mut self, feature: Option<f64>, target: Option<f64>) -> bool {
        match (feature, target) {
            (Some(f), Some(t)) if f.is_finite() && t.is_finite() => {
                self.pairs.push((f, t));
                true
            }
            _ => false,
        }
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the sample holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(f64, f64)] {
        &self.pairs
    }

    /// Feature values in insertion order.
    #[must_use]
    pub fn features(&self) -> Vec<f64> {
        self.pairs.iter().map(|&(f, _)| f).collect()
    }

    /// Target values in insertion order.
    #[must_use]
    pub fn targets(&self) -> Vec<f64> {
        self.pairs.iter().map(|&(_, t)| t).collect()
    }

    /// Pairs sorted by feature, then target.
    ///
    /// Any permutation of the same multiset yields the same sequence.
    #[must_use]
    pub fn canonical(&self) -> Vec<(f64, f64)> {
        let mut pairs = self.pairs.clone();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        pairs
    }
}

impl FromIterator<(f64, f64)> for CorrelationSample {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut sample = Self::new();
        for (f, t) in iter {
            sample.push(Some(f), Some(t));
        }
        sample
    }
}

/// Pool pairs using arbitrary extractors for feature and target.
pub fn pool_by<F, T>(series: &[CompanySeries], feature: F, target: T) -> CorrelationSample
where
    F: Fn(&QuarterlyRecord) -> Option<f64>,
    T: Fn(&QuarterlyRecord) -> Option<f64>,
{
    let mut sample = CorrelationSample::new();
    let mut dropped = 0usize;
    for company in series {
        for record in &company.data {
            if !sample.push(feature(record), target(record)) {
                dropped += 1;
            }
        }
    }
    tracing::debug!(kept = sample.len(), dropped, "pooled correlation pairs");
    sample
}

/// Whether any record of any company carries `name`, even as null.
///
/// False for a forward-return horizon that derivation was not configured
/// with.
#[must_use]
pub fn carries_metric(series: &[CompanySeries], name: &str) -> bool {
    series.iter().flat_map(|s| &s.data).any(|r| r.has_metric(name))
}

/// Pool pairs of two named metrics, e.g. `roa` against `forward_return`.
///
/// A well-formed name that no record carries pools nothing and is logged
/// as a warning.
///
/// # Errors
///
/// Returns [`FaroError::UnknownMetric`] if either name does not address a
/// numeric field of [`QuarterlyRecord`].
pub fn pool(series: &[CompanySeries], feature: &str, target: &str) -> Result<CorrelationSample> {
    for name in [feature, target] {
        if !QuarterlyRecord::is_metric_name(name) {
            return Err(FaroError::UnknownMetric(name.to_string()));
        }
    }
    for name in [feature, target] {
        if !series.is_empty() && !carries_metric(series, name) {
            tracing::warn!(metric = name, "no record carries metric; check the configured horizons");
        }
    }
    Ok(pool_by(series, |r| r.metric(feature), |r| r.metric(target)))
}
