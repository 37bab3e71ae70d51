//! Pearson and Spearman correlation with two-sided p-values.
//!
//! Spearman is available two ways: as the Pearson correlation of the
//! fractional ranks ([`rank_pearson`]), and from the tie-corrected closed
//! form ([`spearman`]). The two are algebraically identical; the report
//! computes both and treats disagreement as a bug.

use faro_core::{FaroError, Result};
use ndarray::ArrayView1;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::rank::{fractional_ranks, tie_correction};

/// Largest tolerated gap between [`rank_pearson`] and [`spearman`].
pub const RANK_AGREEMENT_TOLERANCE: f64 = 1e-9;

fn check_lengths(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() == y.len() {
        Ok(())
    } else {
        Err(FaroError::ContractViolation(format!(
            "feature and target must have the same length ({} vs {})",
            x.len(),
            y.len()
        )))
    }
}

/// Pearson product-moment correlation.
///
/// `Ok(None)` for fewer than two pairs or when either input has zero
/// variance.
///
/// # Errors
///
/// Returns [`FaroError::ContractViolation`] if `x` and `y` differ in length.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Option<f64>> {
    check_lengths(x, y)?;
    Ok(pearson_unchecked(x, y))
}

fn pearson_unchecked(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 {
        return None;
    }
    let x = ArrayView1::from(x);
    let y = ArrayView1::from(y);

    let dx = &x - x.mean()?;
    let dy = &y - y.mean()?;

    let sxx = dx.dot(&dx);
    let syy = dy.dot(&dy);
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }

    let r = dx.dot(&dy) / (sxx * syy).sqrt();
    Some(r.clamp(-1.0, 1.0))
}

/// Pearson correlation of the fractional ranks of `x` and `y`.
///
/// # Errors
///
/// Returns [`FaroError::ContractViolation`] if `x` and `y` differ in length.
pub fn rank_pearson(x: &[f64], y: &[f64]) -> Result<Option<f64>> {
    check_lengths(x, y)?;
    Ok(pearson_unchecked(&fractional_ranks(x), &fractional_ranks(y)))
}

/// Spearman rank correlation from the tie-corrected closed form.
///
/// With `Sx = (n³ - n - Tx) / 12`, `Sy` likewise and `D = Σ (rx - ry)²`:
/// `rho = (Sx + Sy - D) / (2 √(Sx Sy))`, where `T` is the
/// [`tie_correction`] term. `Ok(None)` when fewer than two pairs or either
/// input is constant.
///
/// # Errors
///
/// Returns [`FaroError::ContractViolation`] if `x` and `y` differ in length.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<Option<f64>> {
    check_lengths(x, y)?;
    if x.len() < 2 {
        return Ok(None);
    }

    let n = x.len() as f64;
    let base = n * n * n - n;
    let sx = (base - tie_correction(x)) / 12.0;
    let sy = (base - tie_correction(y)) / 12.0;
    if sx <= 0.0 || sy <= 0.0 {
        return Ok(None);
    }

    let d: f64 = fractional_ranks(x)
        .iter()
        .zip(fractional_ranks(y))
        .map(|(rx, ry)| (rx - ry).powi(2))
        .sum();

    let rho = (sx + sy - d) / (2.0 * (sx * sy).sqrt());
    Ok(Some(rho.clamp(-1.0, 1.0)))
}

/// Two-sided p-value for a correlation coefficient `r` over `n` pairs.
///
/// Uses `t = r √((n - 2) / (1 - r²))` against a Student t distribution
/// with `n - 2` degrees of freedom. With exactly two pairs the line always
/// fits and the p-value is 1; a perfect correlation on more pairs gives 0.
#[must_use]
pub fn t_test_p_value(r: f64, n: usize) -> Option<f64> {
    if !r.is_finite() || n < 2 {
        return None;
    }
    if n == 2 {
        return Some(1.0);
    }
    if r.abs() >= 1.0 {
        return Some(0.0);
    }

    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * dist.sf(t.abs())).min(1.0))
}
