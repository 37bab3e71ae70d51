//! Trailing-twelve-month aggregation.

use crate::columns::at;

/// Sum of `column[j - window + 1 ..= j]`.
///
/// `None` if the window reaches before the first quarter or any value in it
/// is missing.
#[must_use]
pub fn trailing_sum(column: &[Option<f64>], j: usize, window: usize) -> Option<f64> {
    if window == 0 || j + 1 < window {
        return None;
    }
    (j + 1 - window..=j).map(|k| at(column, k)).sum()
}

/// Trailing operating income over trailing net PPE at quarter `j`.
///
/// Both sums need every quarter of the window. A trailing PPE of exactly
/// zero gives `None`.
#[must_use]
pub fn ebit_ppe_ttm(
    operating_income: &[Option<f64>],
    ppe_net: &[Option<f64>],
    j: usize,
    window: usize,
) -> Option<f64> {
    let income = trailing_sum(operating_income, j, window)?;
    let ppe = trailing_sum(ppe_net, j, window)?;
    (ppe != 0.0).then(|| income / ppe)
}

/// [`ebit_ppe_ttm`] for every quarter.
#[must_use]
pub fn ebit_ppe_ttm_series(
    operating_income: &[Option<f64>],
    ppe_net: &[Option<f64>],
    window: usize,
) -> Vec<Option<f64>> {
    let len = operating_income.len().max(ppe_net.len());
    (0..len)
        .map(|j| ebit_ppe_ttm(operating_income, ppe_net, j, window))
        .collect()
}
