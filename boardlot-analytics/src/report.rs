//! Aggregate performance report over a completed run's ledger and snapshots.

use boardlot_core::{PortfolioAccount, TradeRecord, ValuationSnapshot};
use serde::{Deserialize, Serialize};

use crate::metrics;
use crate::round_trip::{pair_round_trips, RoundTrip};

/// The full statistics block for one run.
///
/// Trade statistics are computed over reconstructed round trips, not raw
/// fills. Loss figures (`avg_loss`, `max_loss`) are reported as positive
/// magnitudes. `win_rate` is a percentage in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub initial_cash: f64,
    pub final_value: f64,
    pub total_return: f64,
    pub annualized_return: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub win_rate: f64,
    /// Gross profits / gross losses; infinite when there are profits and no
    /// losses, 0.0 when there are neither.
    pub profit_factor: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub break_even_trades: usize,
    pub avg_profit: f64,
    pub avg_loss: f64,
    pub max_profit: f64,
    pub max_loss: f64,
    pub avg_holding_days: f64,
}

impl PerformanceReport {
    /// Compute the report from a ledger and its snapshot sequence.
    ///
    /// A ledger with no fills (Init only) or an empty snapshot sequence is
    /// not an error: the report comes back with every statistic zeroed.
    pub fn compute(
        initial_cash: f64,
        history: &[TradeRecord],
        snapshots: &[ValuationSnapshot],
    ) -> Self {
        if history.len() <= 1 || snapshots.is_empty() {
            let final_value = snapshots
                .last()
                .map_or(initial_cash, |snap| snap.total_value);
            return Self::zeroed(initial_cash, final_value);
        }

        let equity: Vec<f64> = snapshots.iter().map(|snap| snap.total_value).collect();
        let final_value = snapshots[snapshots.len() - 1].total_value;
        let days_elapsed =
            (snapshots[snapshots.len() - 1].date - snapshots[0].date).num_days();

        let trips = pair_round_trips(history);
        let trade = TradeStats::from_trips(&trips);

        Self {
            initial_cash,
            final_value,
            total_return: metrics::total_return(initial_cash, final_value),
            annualized_return: metrics::annualized_return(
                initial_cash,
                final_value,
                days_elapsed,
            ),
            max_drawdown: metrics::max_drawdown(&equity),
            sharpe_ratio: metrics::sharpe_ratio(&equity),
            win_rate: trade.win_rate,
            profit_factor: trade.profit_factor,
            total_trades: trade.total,
            winning_trades: trade.winning,
            losing_trades: trade.losing,
            break_even_trades: trade.break_even,
            avg_profit: trade.avg_profit,
            avg_loss: trade.avg_loss,
            max_profit: trade.max_profit,
            max_loss: trade.max_loss,
            avg_holding_days: trade.avg_holding_days,
        }
    }

    /// Compute the report straight off an account.
    pub fn for_account(account: &PortfolioAccount) -> Self {
        Self::compute(
            account.initial_cash(),
            account.trade_history(),
            account.snapshots(),
        )
    }

    fn zeroed(initial_cash: f64, final_value: f64) -> Self {
        Self {
            initial_cash,
            final_value,
            total_return: 0.0,
            annualized_return: 0.0,
            max_drawdown: 0.0,
            sharpe_ratio: 0.0,
            win_rate: 0.0,
            profit_factor: 0.0,
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            break_even_trades: 0,
            avg_profit: 0.0,
            avg_loss: 0.0,
            max_profit: 0.0,
            max_loss: 0.0,
            avg_holding_days: 0.0,
        }
    }
}

/// Round-trip aggregates, folded in one pass.
struct TradeStats {
    total: usize,
    winning: usize,
    losing: usize,
    break_even: usize,
    win_rate: f64,
    profit_factor: f64,
    avg_profit: f64,
    avg_loss: f64,
    max_profit: f64,
    max_loss: f64,
    avg_holding_days: f64,
}

impl TradeStats {
    fn from_trips(trips: &[RoundTrip]) -> Self {
        let total = trips.len();
        let mut winning = 0;
        let mut losing = 0;
        let mut gross_profit = 0.0;
        let mut gross_loss = 0.0;
        let mut max_profit = 0.0_f64;
        let mut max_loss = 0.0_f64;
        let mut holding_days = 0_i64;

        for trip in trips {
            holding_days += trip.holding_days;
            if trip.profit > 0.0 {
                winning += 1;
                gross_profit += trip.profit;
                max_profit = max_profit.max(trip.profit);
            } else if trip.profit < 0.0 {
                losing += 1;
                gross_loss += -trip.profit;
                max_loss = max_loss.max(-trip.profit);
            }
        }
        let break_even = total - winning - losing;

        let win_rate = if total > 0 {
            winning as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let profit_factor = if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else if gross_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        Self {
            total,
            winning,
            losing,
            break_even,
            win_rate,
            profit_factor,
            avg_profit: if winning > 0 {
                gross_profit / winning as f64
            } else {
                0.0
            },
            avg_loss: if losing > 0 {
                gross_loss / losing as f64
            } else {
                0.0
            },
            max_profit,
            max_loss,
            avg_holding_days: if total > 0 {
                holding_days as f64 / total as f64
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardlot_core::TradeType;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn fill(trade_type: TradeType, d: u32, price: f64, shares: f64) -> TradeRecord {
        TradeRecord {
            date: day(d),
            symbol: "600000".into(),
            trade_type,
            price,
            shares,
            commission: 0.0,
            slippage: 0.0,
            total_cost: 0.0,
            cash_change: 0.0,
            cash_balance: 0.0,
        }
    }

    fn snap(d: u32, total_value: f64) -> ValuationSnapshot {
        ValuationSnapshot {
            date: day(d),
            cash: total_value,
            positions_value: HashMap::new(),
            total_value,
        }
    }

    #[test]
    fn single_winning_round_trip() {
        let history = vec![
            TradeRecord::init(day(1), 100_000.0),
            fill(TradeType::Buy, 1, 10.0, 1_000.0),
            fill(TradeType::Sell, 11, 12.0, 1_000.0),
        ];
        let snapshots = vec![snap(1, 100_000.0), snap(11, 102_000.0)];
        let report = PerformanceReport::compute(100_000.0, &history, &snapshots);

        assert_eq!(report.total_trades, 1);
        assert_eq!(report.winning_trades, 1);
        assert_eq!(report.losing_trades, 0);
        assert!((report.win_rate - 100.0).abs() < 1e-10);
        assert!((report.avg_holding_days - 10.0).abs() < 1e-10);
        assert!((report.avg_profit - 2_000.0).abs() < 1e-9);
        assert!((report.max_profit - 2_000.0).abs() < 1e-9);
        assert_eq!(report.profit_factor, f64::INFINITY);
        assert!((report.total_return - 0.02).abs() < 1e-10);
    }

    #[test]
    fn mixed_trips_split_into_buckets() {
        let history = vec![
            TradeRecord::init(day(1), 100_000.0),
            fill(TradeType::Buy, 2, 10.0, 100.0),
            fill(TradeType::Sell, 4, 13.0, 100.0), // +300
            fill(TradeType::Buy, 6, 10.0, 100.0),
            fill(TradeType::Sell, 9, 9.0, 100.0), // -100
            fill(TradeType::Buy, 12, 10.0, 100.0),
            fill(TradeType::Sell, 15, 10.0, 100.0), // break even
        ];
        let snapshots = vec![snap(2, 100_000.0), snap(15, 100_200.0)];
        let report = PerformanceReport::compute(100_000.0, &history, &snapshots);

        assert_eq!(report.total_trades, 3);
        assert_eq!(report.winning_trades, 1);
        assert_eq!(report.losing_trades, 1);
        assert_eq!(report.break_even_trades, 1);
        assert!((report.win_rate - 100.0 / 3.0).abs() < 1e-9);
        assert!((report.profit_factor - 3.0).abs() < 1e-10);
        assert!((report.avg_profit - 300.0).abs() < 1e-9);
        assert!((report.avg_loss - 100.0).abs() < 1e-9);
        assert!((report.max_loss - 100.0).abs() < 1e-9);
        // (2 + 3 + 3) / 3 days.
        assert!((report.avg_holding_days - 8.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn all_losses_zero_profit_factor() {
        let history = vec![
            TradeRecord::init(day(1), 100_000.0),
            fill(TradeType::Buy, 2, 10.0, 100.0),
            fill(TradeType::Sell, 5, 9.0, 100.0),
        ];
        let snapshots = vec![snap(2, 100_000.0), snap(5, 99_900.0)];
        let report = PerformanceReport::compute(100_000.0, &history, &snapshots);
        assert_eq!(report.profit_factor, 0.0);
        assert_eq!(report.win_rate, 0.0);
        assert!(report.total_return < 0.0);
    }

    #[test]
    fn init_only_ledger_degrades_to_zeroed_report() {
        let history = vec![TradeRecord::init(day(1), 100_000.0)];
        let snapshots = vec![snap(1, 100_000.0)];
        let report = PerformanceReport::compute(100_000.0, &history, &snapshots);

        assert_eq!(report.total_trades, 0);
        assert_eq!(report.total_return, 0.0);
        assert_eq!(report.sharpe_ratio, 0.0);
        assert_eq!(report.max_drawdown, 0.0);
        assert!((report.final_value - 100_000.0).abs() < 1e-10);
    }

    #[test]
    fn empty_snapshots_degrade_to_zeroed_report() {
        let history = vec![
            TradeRecord::init(day(1), 100_000.0),
            fill(TradeType::Buy, 2, 10.0, 100.0),
        ];
        let report = PerformanceReport::compute(100_000.0, &history, &[]);
        assert_eq!(report.total_trades, 0);
        assert!((report.final_value - 100_000.0).abs() < 1e-10);
    }

    #[test]
    fn drawdown_read_from_snapshot_curve() {
        let history = vec![
            TradeRecord::init(day(1), 100_000.0),
            fill(TradeType::Buy, 2, 10.0, 100.0),
            fill(TradeType::Sell, 8, 10.0, 100.0),
        ];
        let snapshots = vec![
            snap(2, 100_000.0),
            snap(3, 110_000.0),
            snap(4, 99_000.0),
            snap(8, 105_000.0),
        ];
        let report = PerformanceReport::compute(100_000.0, &history, &snapshots);
        let expected = (99_000.0 - 110_000.0) / 110_000.0;
        assert!((report.max_drawdown - expected).abs() < 1e-10);
    }

    #[test]
    fn report_serialization_roundtrip() {
        // Needs at least one loss: an all-win report carries an infinite
        // profit factor, which JSON cannot represent.
        let history = vec![
            TradeRecord::init(day(1), 100_000.0),
            fill(TradeType::Buy, 2, 10.0, 100.0),
            fill(TradeType::Sell, 5, 11.0, 100.0),
            fill(TradeType::Buy, 6, 11.0, 100.0),
            fill(TradeType::Sell, 9, 10.0, 100.0),
        ];
        let snapshots = vec![snap(2, 100_000.0), snap(9, 100_000.0)];
        let report = PerformanceReport::compute(100_000.0, &history, &snapshots);
        let json = serde_json::to_string(&report).unwrap();
        let deser: PerformanceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(deser.total_trades, report.total_trades);
        assert_eq!(deser.final_value, report.final_value);
    }
}
