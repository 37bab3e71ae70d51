//! Annualized forward returns.
//!
//! The forward return at quarter `j` is what an investor would have earned,
//! annualized, holding from the quarter after `j` through the end of a
//! horizon. Quarterly total returns are compounded geometrically in
//! chronological order, starting from a value of 100:
//!
//! ```text
//! value = 100 * Π (1 + total_return[k] / 100)     for k in j+1 ..= end
//! annualized = ((value / 100) ^ (4 / quarters) - 1) * 100
//! ```
//!
//! A horizon is all-or-nothing: one missing total return inside the window
//! makes the whole forward return `None`.

use faro_core::config::QUARTERS_PER_YEAR;

use crate::columns::at;

/// Compound total returns over `start + 1 ..= end`.
///
/// Returns the ending value of 100 invested and the number of quarters
/// compounded, or `None` if `end <= start`, `end` is out of range, or any
/// total return in the window is missing.
#[must_use]
pub fn compound(total_returns: &[Option<f64>], start: usize, end: usize) -> Option<(f64, usize)> {
    if end <= start || end >= total_returns.len() {
        return None;
    }

    let mut value = 100.0;
    for k in start + 1..=end {
        let period_return = at(total_returns, k)?;
        value *= 1.0 + period_return / 100.0;
    }
    Some((value, end - start))
}

/// Annualize a cumulative percentage return earned over `quarters`.
///
/// `None` for zero quarters or a total loss, where no geometric rate exists.
#[must_use]
pub fn annualize(cumulative_return: f64, quarters: usize) -> Option<f64> {
    if quarters == 0 {
        return None;
    }
    let growth = 1.0 + cumulative_return / 100.0;
    if growth <= 0.0 {
        return None;
    }
    let years = quarters as f64 / QUARTERS_PER_YEAR as f64;
    let annualized = (growth.powf(1.0 / years) - 1.0) * 100.0;
    annualized.is_finite().then_some(annualized)
}

/// Annualized forward return from quarter `start`.
///
/// `quarters = Some(h)` requires `start + h` to be a valid index and
/// compounds exactly `h` quarters. `quarters = None` compounds through the
/// last quarter, so it needs at least one quarter after `start`.
#[must_use]
pub fn forward_return(total_returns: &[Option<f64>], start: usize, quarters: Option<usize>) -> Option<f64> {
    let end = match quarters {
        Some(h) => start.checked_add(h)?,
        None => total_returns.len().checked_sub(1)?,
    };
    let (value, compounded) = compound(total_returns, start, end)?;
    annualize(value - 100.0, compounded)
}

/// Forward return for every quarter of a series under one horizon.
#[must_use]
pub fn forward_returns(total_returns: &[Option<f64>], quarters: Option<usize>) -> Vec<Option<f64>> {
    (0..total_returns.len())
        .map(|j| forward_return(total_returns, j, quarters))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compound_order_and_count() {
        let returns = vec![None, Some(10.0), Some(-10.0), Some(20.0)];
        let (value, n) = compound(&returns, 0, 3).unwrap();
        assert_relative_eq!(value, 100.0 * 1.1 * 0.9 * 1.2);
        assert_eq!(n, 3);
    }

    #[test]
    fn test_compound_rejects_empty_or_out_of_range_window() {
        let returns = vec![None, Some(1.0)];
        assert!(compound(&returns, 1, 1).is_none());
        assert!(compound(&returns, 0, 2).is_none());
    }

    #[test]
    fn test_annualize_one_year_is_identity() {
        assert_relative_eq!(annualize(12.0, 4).unwrap(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_annualize_two_years() {
        // 21% over two years is 10% a year.
        assert_relative_eq!(annualize(21.0, 8).unwrap(), 10.0, epsilon = 1e-10);
    }

    #[test]
    fn test_annualize_single_quarter() {
        let r = annualize(5.0, 1).unwrap();
        assert_relative_eq!(r, (1.05_f64.powi(4) - 1.0) * 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_annualize_guards() {
        assert!(annualize(5.0, 0).is_none());
        assert!(annualize(-100.0, 4).is_none());
    }

    #[test]
    fn test_open_horizon_two_quarters() {
        // Two-quarter series: the open forward return at index 0 is the
        // single quarter return at index 1, annualized with years = 0.25.
        let returns = vec![None, Some(3.0)];
        let r = forward_return(&returns, 0, None).unwrap();
        assert_relative_eq!(r, (1.03_f64.powi(4) - 1.0) * 100.0, epsilon = 1e-10);
        assert!(forward_return(&returns, 1, None).is_none());
    }

    #[test]
    fn test_open_horizon_uses_actual_quarter_count() {
        let returns = vec![None, Some(10.0), Some(10.0), Some(10.0), Some(10.0), Some(10.0)];
        // Five quarters of 10% from index 0.
        let r = forward_return(&returns, 0, None).unwrap();
        let expected = (1.1_f64.powi(5).powf(4.0 / 5.0) - 1.0) * 100.0;
        assert_relative_eq!(r, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_fixed_horizon_needs_full_window() {
        let returns = vec![None, Some(1.0), Some(1.0), Some(1.0), Some(1.0)];
        // j + 4 < len only for j = 0.
        let all = forward_returns(&returns, Some(4));
        assert!(all[0].is_some());
        assert!(all[1..].iter().all(Option::is_none));
    }

    #[test]
    fn test_missing_return_voids_spanning_windows() {
        let returns = vec![Some(1.0), Some(2.0), Some(3.0), None, Some(4.0), Some(5.0)];

        let one = forward_returns(&returns, Some(1));
        assert!(one[0].is_some());
        assert!(one[1].is_some());
        assert!(one[2].is_none());
        assert!(one[3].is_some());
        assert!(one[4].is_some());
        assert!(one[5].is_none());

        let two = forward_returns(&returns, Some(2));
        assert!(two[0].is_some());
        assert!(two[1].is_none());
        assert!(two[2].is_none());
        assert!(two[3].is_some());

        let open = forward_returns(&returns, None);
        assert!(open[..3].iter().all(Option::is_none));
        assert!(open[3].is_some());
        assert!(open[4].is_some());
        assert!(open[5].is_none());
    }

    #[test]
    fn test_empty_series() {
        assert!(forward_returns(&[], None).is_empty());
        assert!(forward_return(&[], 0, Some(4)).is_none());
    }
}
