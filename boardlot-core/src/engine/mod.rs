//! Backtest engine — per-bar execution of an externally supplied signal
//! sequence against a portfolio account.

pub mod loop_runner;

pub use loop_runner::run_backtest;

use crate::domain::Signal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fraction of available cash committed per entry when no sizing is configured.
pub const DEFAULT_CASH_FRACTION: f64 = 0.9;

/// How each entry is sized. Exactly one option is resolved per trade decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntrySizing {
    /// Fixed share count per entry.
    FixedShares(f64),
    /// Fraction of current cash per entry, in (0, 1].
    CashFraction(f64),
    /// 90% of current cash.
    Default,
}

/// Stop-loss / take-profit thresholds, as fractions of the entry price.
///
/// When configured, an adverse move of `stop_loss_pct` or a favorable move of
/// `take_profit_pct` forces a full exit before the bar's ordinary signal is
/// consulted, and ordinary signal handling is skipped for that bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtectionConfig {
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            stop_loss_pct: 0.05,
            take_profit_pct: 0.10,
        }
    }
}

/// Configuration for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// The traded symbol; bars and signals describe this symbol only.
    pub symbol: String,
    pub sizing: EntrySizing,
    pub protection: Option<ProtectionConfig>,
}

impl BacktestConfig {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            sizing: EntrySizing::Default,
            protection: None,
        }
    }

    pub fn with_sizing(mut self, sizing: EntrySizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_protection(mut self, protection: ProtectionConfig) -> Self {
        self.protection = Some(protection);
        self
    }
}

/// The trade committed on a bar, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarAction {
    Buy,
    Sell,
    StopLoss,
    TakeProfit,
}

/// Per-bar simulation state, recorded in bar order.
///
/// `position_shares` and `portfolio_value` are read before the bar's trade;
/// `cash` is the post-trade balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarState {
    pub date: NaiveDate,
    pub close: f64,
    pub signal: Signal,
    pub action: Option<BarAction>,
    pub shares_traded: f64,
    pub position_shares: f64,
    pub portfolio_value: f64,
    pub cash: f64,
}

/// Result of a complete backtest run. The trade history and valuation
/// snapshots stay on the account the run was given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub bar_states: Vec<BarState>,
    /// Total value at the final bar's close (initial cash if no bars ran).
    pub final_value: f64,
    pub bar_count: usize,
}
