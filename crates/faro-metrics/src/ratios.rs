//! Point-in-time accounting ratios.
//!
//! Each ratio reads only the current quarter. Inputs are never coerced to
//! zero here: a missing numerator or denominator, or a zero denominator,
//! gives `None`.

/// `numerator / denominator`, `None` if either is missing or the
/// denominator is zero.
#[inline]
#[must_use]
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (n, d) = (numerator?, denominator?);
    (d != 0.0).then(|| n / d)
}

/// Operating income over net PPE.
#[must_use]
pub fn ebit_ppe(operating_income: Option<f64>, ppe_net: Option<f64>) -> Option<f64> {
    ratio(operating_income, ppe_net)
}

/// Gross margin: `(revenue - cogs) / revenue`.
#[must_use]
pub fn gross_margin(revenue: Option<f64>, cost_of_goods_sold: Option<f64>) -> Option<f64> {
    let revenue = revenue?;
    ratio(Some(revenue - cost_of_goods_sold?), Some(revenue))
}

/// Operating margin: `operating_income / revenue`.
#[must_use]
pub fn operating_margin(operating_income: Option<f64>, revenue: Option<f64>) -> Option<f64> {
    ratio(operating_income, revenue)
}

/// Enterprise value over operating income.
///
/// The sign of enterprise value is not checked; a negative EV gives a
/// negative ratio.
#[must_use]
pub fn ev_ebit(enterprise_value: Option<f64>, operating_income: Option<f64>) -> Option<f64> {
    ratio(enterprise_value, operating_income)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ebit_ppe() {
        assert_relative_eq!(ebit_ppe(Some(25.0), Some(100.0)).unwrap(), 0.25);
        assert_eq!(ebit_ppe(Some(25.0), Some(0.0)), None);
        assert_eq!(ebit_ppe(None, Some(100.0)), None);
        assert_eq!(ebit_ppe(Some(25.0), None), None);
    }

    #[test]
    fn test_gross_margin() {
        assert_relative_eq!(gross_margin(Some(200.0), Some(150.0)).unwrap(), 0.25);
        assert_eq!(gross_margin(Some(0.0), Some(10.0)), None);
        assert_eq!(gross_margin(Some(200.0), None), None);
        assert_eq!(gross_margin(None, Some(10.0)), None);
    }

    #[test]
    fn test_gross_margin_negative() {
        assert_relative_eq!(gross_margin(Some(100.0), Some(130.0)).unwrap(), -0.3);
    }

    #[test]
    fn test_operating_margin() {
        assert_relative_eq!(operating_margin(Some(30.0), Some(200.0)).unwrap(), 0.15);
        assert_eq!(operating_margin(Some(30.0), Some(0.0)), None);
    }

    #[test]
    fn test_ev_ebit_keeps_negative_ev() {
        assert_relative_eq!(ev_ebit(Some(-500.0), Some(50.0)).unwrap(), -10.0);
        assert_eq!(ev_ebit(Some(500.0), Some(0.0)), None);
        assert_eq!(ev_ebit(None, Some(50.0)), None);
    }
}
