//! TradeRecord — one immutable entry in the account's append-only ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ledger entry kind. A fresh ledger always opens with exactly one `Init`
/// record carrying the initial cash; every committed fill appends a `Buy` or
/// `Sell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    Buy,
    Sell,
    Init,
}

/// A committed trade (or the opening cash deposit), never mutated after append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub symbol: String,
    pub trade_type: TradeType,
    pub price: f64,
    pub shares: f64,
    pub commission: f64,
    pub slippage: f64,
    pub total_cost: f64,
    /// Signed cash delta: negative for buys, positive for sells and Init.
    pub cash_change: f64,
    /// Cash balance immediately after this record was committed.
    pub cash_balance: f64,
}

impl TradeRecord {
    /// The opening record of a fresh ledger.
    pub fn init(date: NaiveDate, initial_cash: f64) -> Self {
        Self {
            date,
            symbol: String::new(),
            trade_type: TradeType::Init,
            price: 0.0,
            shares: 0.0,
            commission: 0.0,
            slippage: 0.0,
            total_cost: 0.0,
            cash_change: initial_cash,
            cash_balance: initial_cash,
        }
    }
}
