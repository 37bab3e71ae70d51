//! Quarter-over-quarter total return.
//!
//! `total_return[j] = (price[j] - price[j-1] + dividend[j]) / price[j-1] * 100`
//!
//! Missing prices and dividends count as `0.0` inside the formula, which
//! makes a missing price fail the positivity check rather than produce a
//! number. The first quarter never has a total return.

use crate::columns::at;

/// Total return in percent from two adjacent observations.
///
/// `None` unless both prices are strictly positive.
#[must_use]
pub fn total_return(prev_price: Option<f64>, price: Option<f64>, dividend: Option<f64>) -> Option<f64> {
    let prev = prev_price.unwrap_or(0.0);
    let current = price.unwrap_or(0.0);
    let dividend = dividend.unwrap_or(0.0);

    (prev > 0.0 && current > 0.0).then(|| (current - prev + dividend) / prev * 100.0)
}

/// Total return for every quarter of a price/dividend series.
///
/// The output has one entry per element of `prices`; index 0 is always
/// `None`.
#[must_use]
pub fn total_returns(prices: &[Option<f64>], dividends: &[Option<f64>]) -> Vec<Option<f64>> {
    (0..prices.len())
        .map(|j| {
            if j == 0 {
                None
            } else {
                total_return(at(prices, j - 1), at(prices, j), at(dividends, j))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_total_return_with_dividend() {
        let r = total_return(Some(100.0), Some(105.0), Some(1.0)).unwrap();
        assert_relative_eq!(r, 6.0);
    }

    #[test]
    fn test_missing_dividend_counts_as_zero() {
        let r = total_return(Some(50.0), Some(40.0), None).unwrap();
        assert_relative_eq!(r, -20.0);
    }

    #[rstest]
    #[case(None, Some(10.0))]
    #[case(Some(0.0), Some(10.0))]
    #[case(Some(-1.0), Some(10.0))]
    #[case(Some(10.0), None)]
    #[case(Some(10.0), Some(0.0))]
    fn test_non_positive_price_gives_none(#[case] prev: Option<f64>, #[case] current: Option<f64>) {
        assert_eq!(total_return(prev, current, Some(1.0)), None);
    }

    #[test]
    fn test_series_first_quarter_is_none() {
        let prices = vec![Some(10.0), Some(11.0), None, Some(12.0), Some(12.0)];
        let dividends = vec![None, Some(0.5), None, None, Some(0.6)];
        let returns = total_returns(&prices, &dividends);

        assert_eq!(returns.len(), 5);
        assert_eq!(returns[0], None);
        assert_relative_eq!(returns[1].unwrap(), 15.0);
        assert_eq!(returns[2], None);
        assert_eq!(returns[3], None);
        assert_relative_eq!(returns[4].unwrap(), 5.0);
    }

    #[test]
    fn test_short_dividend_column() {
        let prices = vec![Some(10.0), Some(10.0), Some(10.0)];
        let returns = total_returns(&prices, &[]);
        assert_eq!(returns, vec![None, Some(0.0), Some(0.0)]);
    }
}
