//! Equity-curve statistics — pure functions, values in, scalar out.
//!
//! No dependency on the account or the loop; callers pass the snapshot totals
//! as a plain slice.

/// Total return as a fraction: `final / initial - 1`.
pub fn total_return(initial: f64, final_value: f64) -> f64 {
    if initial <= 0.0 {
        return 0.0;
    }
    final_value / initial - 1.0
}

/// Annualized return over `days_elapsed` calendar days.
///
/// `(final / initial) ^ (365 / days) - 1`. Returns 0.0 when the span is empty
/// or either endpoint is non-positive.
pub fn annualized_return(initial: f64, final_value: f64, days_elapsed: i64) -> f64 {
    if days_elapsed <= 0 || initial <= 0.0 || final_value <= 0.0 {
        return 0.0;
    }
    (final_value / initial).powf(365.0 / days_elapsed as f64) - 1.0
}

/// Pairwise returns between consecutive equity values. Empty for fewer than
/// two points; a non-positive predecessor yields a 0.0 entry.
pub fn daily_returns(equity_curve: &[f64]) -> Vec<f64> {
    if equity_curve.len() < 2 {
        return Vec::new();
    }
    equity_curve
        .windows(2)
        .map(|w| if w[0] > 0.0 { w[1] / w[0] - 1.0 } else { 0.0 })
        .collect()
}

/// Maximum drawdown as a non-positive fraction (e.g. -0.18 for an 18% dip).
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }
    let mut peak = equity_curve[0];
    let mut max_dd = 0.0_f64;
    for &value in equity_curve {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (value - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Annualized Sharpe ratio of the curve's daily returns, zero risk-free rate.
///
/// `sqrt(252) * mean / std`, sample standard deviation. Returns 0.0 with
/// fewer than two return samples or zero variance.
pub fn sharpe_ratio(equity_curve: &[f64]) -> f64 {
    let returns = daily_returns(equity_curve);
    if returns.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(&returns);
    let std = std_dev(&returns);
    if std < 1e-15 {
        return 0.0;
    }
    (mean / std) * (252.0_f64).sqrt()
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_return_basic() {
        assert!((total_return(100_000.0, 110_000.0) - 0.1).abs() < 1e-10);
        assert!((total_return(100_000.0, 90_000.0) - (-0.1)).abs() < 1e-10);
        assert_eq!(total_return(0.0, 110_000.0), 0.0);
    }

    #[test]
    fn annualized_return_one_year_is_total() {
        let r = annualized_return(100_000.0, 110_000.0, 365);
        assert!((r - 0.1).abs() < 1e-10);
    }

    #[test]
    fn annualized_return_half_year_compounds() {
        // 10% in half a year annualizes to (1.1)^2 - 1 = 21%.
        let r = annualized_return(100_000.0, 110_000.0, 182);
        assert!(r > 0.2, "expected > 20%, got {r}");
    }

    #[test]
    fn annualized_return_degenerate_spans() {
        assert_eq!(annualized_return(100_000.0, 110_000.0, 0), 0.0);
        assert_eq!(annualized_return(100_000.0, 110_000.0, -3), 0.0);
        assert_eq!(annualized_return(100_000.0, 0.0, 100), 0.0);
    }

    #[test]
    fn daily_returns_pairwise() {
        let r = daily_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(r.len(), 2);
        assert!((r[0] - 0.1).abs() < 1e-10);
        assert!((r[1] - (-0.1)).abs() < 1e-10);
        assert!(daily_returns(&[100.0]).is_empty());
    }

    #[test]
    fn max_drawdown_known_dip() {
        let eq = [100_000.0, 110_000.0, 90_000.0, 95_000.0];
        let expected = (90_000.0 - 110_000.0) / 110_000.0;
        assert!((max_drawdown(&eq) - expected).abs() < 1e-10);
    }

    #[test]
    fn max_drawdown_monotonic_is_zero() {
        let eq: Vec<f64> = (0..50).map(|i| 100_000.0 + i as f64 * 100.0).collect();
        assert_eq!(max_drawdown(&eq), 0.0);
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn sharpe_zero_for_constant_curve() {
        assert_eq!(sharpe_ratio(&[100_000.0; 50]), 0.0);
        // Constant growth rate → zero variance → zero, not infinity.
        let mut eq = vec![100_000.0];
        for i in 1..50 {
            eq.push(eq[i - 1] * 1.001);
        }
        assert_eq!(sharpe_ratio(&eq), 0.0);
    }

    #[test]
    fn sharpe_positive_for_mostly_up_curve() {
        let mut eq = vec![100_000.0];
        for i in 1..253 {
            let r = if i % 5 == 0 { 0.999 } else { 1.002 };
            eq.push(eq[i - 1] * r);
        }
        assert!(sharpe_ratio(&eq) > 0.0);
    }

    #[test]
    fn std_dev_sample_denominator() {
        // Sample stdev of [1, 2, 3, 4] is sqrt(5/3).
        let s = std_dev(&[1.0, 2.0, 3.0, 4.0]);
        assert!((s - (5.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }
}
