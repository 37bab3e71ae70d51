//! Descriptive statistics.
//!
//! Population moments (N denominator) to match how the correlation report
//! describes its two samples.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Count, mean, population standard deviation and range of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation (N denominator).
    pub std: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
}

/// Summarize a slice of values.
///
/// Returns `None` for an empty slice. Values are assumed finite; callers
/// filter nulls before getting here.
///
/// # Examples
///
/// ```
/// use faro_core::stats::summarize;
///
/// let summary = summarize(&[1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(summary.count, 4);
/// assert!((summary.mean - 2.5).abs() < 1e-12);
/// assert!((summary.std - 1.25_f64.sqrt()).abs() < 1e-12);
/// ```
#[must_use]
pub fn summarize(values: &[f64]) -> Option<Summary> {
    summarize_view(ArrayView1::from(values))
}

/// Summarize an ndarray view.
#[must_use]
pub fn summarize_view(values: ArrayView1<'_, f64>) -> Option<Summary> {
    let mean = values.mean()?;
    let std = values.std(0.0);
    let min = values.fold(f64::INFINITY, |acc, &x| acc.min(x));
    let max = values.fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));

    Some(Summary {
        count: values.len(),
        mean,
        std,
        min,
        max,
    })
}
