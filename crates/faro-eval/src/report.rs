//! Correlation report between a feature and a forward-return target.

use faro_core::{FaroError, Result, stats::summarize};
use serde::{Deserialize, Serialize};

use crate::{
    correlation::{RANK_AGREEMENT_TOLERANCE, pearson, rank_pearson, spearman, t_test_p_value},
    pool::CorrelationSample,
    rank::fractional_ranks,
};

/// Message attached to reports with fewer than two pairs.
pub const INSUFFICIENT_DATA: &str = "Insufficient data points for correlation";

/// Message attached to reports where one side has no variance.
pub const CONSTANT_INPUT: &str = "Feature or target is constant; correlation is undefined";

/// Outcome class of a correlation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStatus {
    /// Coefficients were computed.
    Ok,
    /// Fewer than two pairs.
    InsufficientData,
    /// At least one side has zero variance.
    ConstantInput,
}

/// Options for [`correlate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationOptions {
    /// Label of the feature side.
    pub feature: String,
    /// Label of the target side.
    pub target: String,
    /// Attach the fractional rank arrays to the report.
    pub include_ranks: bool,
    /// Threshold for the `*_significant` flags.
    pub significance_level: f64,
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        Self {
            feature: "roa".to_string(),
            target: "forward_return".to_string(),
            include_ranks: false,
            significance_level: 0.05,
        }
    }
}

impl CorrelationOptions {
    /// Options for a feature/target pair with default settings otherwise.
    pub fn new(feature: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            target: target.into(),
            ..Default::default()
        }
    }

    /// Toggle the rank arrays.
    #[must_use]
    pub const fn with_ranks(mut self, include_ranks: bool) -> Self {
        self.include_ranks = include_ranks;
        self
    }
}

/// Summary statistics and correlation coefficients for a pooled sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    /// Feature label.
    pub feature: String,
    /// Target label.
    pub target: String,
    /// Number of pooled pairs.
    pub n_pairs: usize,
    /// Outcome class.
    pub status: CorrelationStatus,

    /// Feature mean.
    pub feature_mean: Option<f64>,
    /// Feature population standard deviation.
    pub feature_std: Option<f64>,
    /// Feature minimum.
    pub feature_min: Option<f64>,
    /// Feature maximum.
    pub feature_max: Option<f64>,
    /// Target mean.
    pub target_mean: Option<f64>,
    /// Target population standard deviation.
    pub target_std: Option<f64>,
    /// Target minimum.
    pub target_min: Option<f64>,
    /// Target maximum.
    pub target_max: Option<f64>,

    /// Pearson correlation coefficient.
    pub pearson_correlation: Option<f64>,
    /// Two-sided p-value of the Pearson coefficient.
    pub pearson_pvalue: Option<f64>,
    /// Whether the Pearson p-value is below the significance level.
    pub pearson_significant: Option<bool>,
    /// Spearman rank correlation coefficient.
    pub spearman_correlation: Option<f64>,
    /// Two-sided p-value of the Spearman coefficient.
    pub spearman_pvalue: Option<f64>,
    /// Whether the Spearman p-value is below the significance level.
    pub spearman_significant: Option<bool>,
    /// Pearson correlation of the fractional ranks; equals Spearman.
    pub rank_pearson_correlation: Option<f64>,

    /// Fractional ranks of the feature, in canonical pair order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_ranks: Option<Vec<f64>>,
    /// Fractional ranks of the target, in canonical pair order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_ranks: Option<Vec<f64>>,
    /// Explanation when no coefficient could be computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CorrelationReport {
    fn empty(options: &CorrelationOptions, n_pairs: usize) -> Self {
        Self {
            feature: options.feature.clone(),
            target: options.target.clone(),
            n_pairs,
            status: CorrelationStatus::Ok,
            feature_mean: None,
            feature_std: None,
            feature_min: None,
            feature_max: None,
            target_mean: None,
            target_std: None,
            target_min: None,
            target_max: None,
            pearson_correlation: None,
            pearson_pvalue: None,
            pearson_significant: None,
            spearman_correlation: None,
            spearman_pvalue: None,
            spearman_significant: None,
            rank_pearson_correlation: None,
            feature_ranks: None,
            target_ranks: None,
            error: None,
        }
    }

    /// Whether coefficients were computed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == CorrelationStatus::Ok
    }
}

/// Correlate a pooled sample.
///
/// Statistics are computed over the sample's canonical order, so any
/// permutation of the same pairs produces an identical report. Fewer than
/// two pairs or a constant side yield a report with a non-`Ok` status and
/// `error` set rather than an error.
///
/// # Errors
///
/// Returns [`FaroError::RankMismatch`] if the rank-based Pearson coefficient
/// and the closed-form Spearman coefficient disagree.
pub fn correlate(sample: &CorrelationSample, options: &CorrelationOptions) -> Result<CorrelationReport> {
    let (features, targets): (Vec<f64>, Vec<f64>) = sample.canonical().into_iter().unzip();
    correlate_values(&features, &targets, options)
}

/// Correlate two aligned value sequences in the order given.
///
/// # Errors
///
/// Returns [`FaroError::ContractViolation`] if the sequences differ in
/// length and [`FaroError::RankMismatch`] if the two Spearman computations
/// disagree.
pub fn correlate_values(
    features: &[f64],
    targets: &[f64],
    options: &CorrelationOptions,
) -> Result<CorrelationReport> {
    if features.len() != targets.len() {
        return Err(FaroError::ContractViolation(format!(
            "{} and {} must have the same length ({} vs {})",
            options.feature,
            options.target,
            features.len(),
            targets.len()
        )));
    }

    let n = features.len();
    let mut report = CorrelationReport::empty(options, n);

    if let Some(s) = summarize(features) {
        report.feature_mean = Some(s.mean);
        report.feature_std = Some(s.std);
        report.feature_min = Some(s.min);
        report.feature_max = Some(s.max);
    }
    if let Some(s) = summarize(targets) {
        report.target_mean = Some(s.mean);
        report.target_std = Some(s.std);
        report.target_min = Some(s.min);
        report.target_max = Some(s.max);
    }
    if options.include_ranks {
        report.feature_ranks = Some(fractional_ranks(features));
        report.target_ranks = Some(fractional_ranks(targets));
    }

    if n < 2 {
        tracing::warn!(n_pairs = n, "not enough pairs to correlate");
        report.status = CorrelationStatus::InsufficientData;
        report.error = Some(INSUFFICIENT_DATA.to_string());
        return Ok(report);
    }

    let r_pearson = pearson(features, targets)?;
    let r_spearman = spearman(features, targets)?;
    let r_rank = rank_pearson(features, targets)?;

    let agree = match (r_rank, r_spearman) {
        (Some(a), Some(b)) => (a - b).abs() <= RANK_AGREEMENT_TOLERANCE,
        (None, None) => true,
        _ => false,
    };
    if !agree {
        return Err(FaroError::RankMismatch {
            rank_pearson: r_rank.unwrap_or(f64::NAN),
            spearman: r_spearman.unwrap_or(f64::NAN),
        });
    }

    let level = options.significance_level;
    report.pearson_correlation = r_pearson;
    report.pearson_pvalue = r_pearson.and_then(|r| t_test_p_value(r, n));
    report.pearson_significant = report.pearson_pvalue.map(|p| p < level);
    report.spearman_correlation = r_spearman;
    report.spearman_pvalue = r_spearman.and_then(|r| t_test_p_value(r, n));
    report.spearman_significant = report.spearman_pvalue.map(|p| p < level);
    report.rank_pearson_correlation = r_rank;

    if r_pearson.is_none() || r_spearman.is_none() {
        report.status = CorrelationStatus::ConstantInput;
        report.error = Some(CONSTANT_INPUT.to_string());
    }

    tracing::info!(
        feature = %report.feature,
        target = %report.target,
        n_pairs = n,
        pearson = ?report.pearson_correlation,
        spearman = ?report.spearman_correlation,
        "correlation computed"
    );
    Ok(report)
}
