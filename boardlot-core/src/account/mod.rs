//! PortfolioAccount — cash, positions, and the append-only audit trail.
//!
//! The account is the single owner of all mutable simulation state. Its only
//! mutators are `buy`, `sell`, `record_valuation`, and `reset`; every committed
//! trade is appended atomically (full record plus state update, or nothing).
//!
//! Insufficient cash degrades a buy to the largest affordable lot count, or a
//! no-op. Insufficient held shares clamp a sell. Neither is an error.

pub mod cost_model;
pub mod sizing;

pub use cost_model::{CostModel, TradeCosts};
pub use sizing::{round_down_to_lot, SizeDirective, LOT_SIZE};

use crate::domain::{Position, TradeRecord, TradeType, ValuationSnapshot};
use crate::error::OrderError;
use chrono::NaiveDate;
use std::collections::HashMap;

/// A single simulation run's account: cash, per-symbol positions, trade
/// history, and daily valuation snapshots.
///
/// Accounting identity: at every snapshot,
/// `total_value == cash + sum(position market values)`.
#[derive(Debug, Clone)]
pub struct PortfolioAccount {
    initial_cash: f64,
    cash: f64,
    cost_model: CostModel,
    positions: HashMap<String, Position>,
    trade_history: Vec<TradeRecord>,
    snapshots: Vec<ValuationSnapshot>,
}

impl PortfolioAccount {
    /// Open an account with `initial_cash`. The ledger starts with one Init
    /// record dated `opened`.
    pub fn new(initial_cash: f64, cost_model: CostModel, opened: NaiveDate) -> Self {
        let mut account = Self {
            initial_cash,
            cash: initial_cash,
            cost_model,
            positions: HashMap::new(),
            trade_history: Vec::new(),
            snapshots: Vec::new(),
        };
        account.reset(opened);
        account
    }

    /// Clear all state back to the opening deposit. Idempotent.
    pub fn reset(&mut self, date: NaiveDate) {
        self.cash = self.initial_cash;
        self.positions.clear();
        self.trade_history.clear();
        self.snapshots.clear();
        self.trade_history
            .push(TradeRecord::init(date, self.initial_cash));
    }

    /// Buy `symbol` at `price`, sized by `size` (`Shares` or `Amount` only).
    ///
    /// Amount sizing rounds down to whole lots, with a single-lot fallback
    /// when the amount covers at least one share. If the sized order exceeds
    /// available cash, it is reduced to the largest affordable lot count;
    /// `Ok(None)` means no lot was affordable and nothing changed.
    pub fn buy(
        &mut self,
        date: NaiveDate,
        symbol: &str,
        price: f64,
        size: SizeDirective,
    ) -> Result<Option<TradeRecord>, OrderError> {
        if price <= 0.0 {
            return Err(OrderError::InvalidPrice(price));
        }

        let mut shares = match size {
            SizeDirective::Shares(n) => n,
            SizeDirective::Amount(amount) => {
                let max_shares = amount / price;
                let lots = round_down_to_lot(max_shares);
                if lots == 0.0 && max_shares >= 1.0 {
                    // Best-effort single lot when the amount covers at least
                    // one share but not a full lot.
                    LOT_SIZE
                } else {
                    lots
                }
            }
            SizeDirective::Fraction(_) | SizeDirective::Default => {
                return Err(OrderError::MissingSizeDirective)
            }
        };
        if shares <= 0.0 {
            return Ok(None);
        }

        let mut costs = self.cost_model.cost(price, shares);
        let mut total_spend = price * shares + costs.total;

        if total_spend > self.cash {
            // Largest lot count affordable under proportional costs. The
            // commission floor is not in this estimate, so step down further
            // until the fill actually fits; cash must never go negative.
            let per_share = price
                * (1.0 + self.cost_model.commission_rate + self.cost_model.slippage_rate);
            shares = round_down_to_lot(self.cash / per_share);
            costs = self.cost_model.cost(price, shares);
            total_spend = price * shares + costs.total;
            while shares > 0.0 && total_spend > self.cash {
                shares -= LOT_SIZE;
                costs = self.cost_model.cost(price, shares);
                total_spend = price * shares + costs.total;
            }
            if shares <= 0.0 {
                return Ok(None);
            }
        }

        self.cash -= total_spend;
        self.positions
            .entry(symbol.to_string())
            .or_insert_with(|| Position::new(symbol))
            .add(shares, price);

        let record = TradeRecord {
            date,
            symbol: symbol.to_string(),
            trade_type: TradeType::Buy,
            price,
            shares,
            commission: costs.commission,
            slippage: costs.slippage,
            total_cost: costs.total,
            cash_change: -total_spend,
            cash_balance: self.cash,
        };
        self.trade_history.push(record.clone());
        Ok(Some(record))
    }

    /// Sell `symbol` at `price`, sized by `size`.
    ///
    /// `Default` sells the entire position; `Amount`/`Fraction` round down to
    /// whole lots with a minimum-lot fallback when nonzero intent rounds to
    /// zero. The fill is always clamped to the held quantity. A flat or absent
    /// position is a no-op, not an error.
    pub fn sell(
        &mut self,
        date: NaiveDate,
        symbol: &str,
        price: f64,
        size: SizeDirective,
    ) -> Result<Option<TradeRecord>, OrderError> {
        if price <= 0.0 {
            return Err(OrderError::InvalidPrice(price));
        }

        let held = match self.positions.get(symbol) {
            Some(pos) if pos.shares > 0.0 => pos.shares,
            _ => return Ok(None),
        };

        let mut shares = match size {
            SizeDirective::Default => held,
            SizeDirective::Shares(n) => n,
            SizeDirective::Amount(amount) => {
                let lots = round_down_to_lot(amount / price).min(held);
                if lots == 0.0 && amount >= price {
                    held.min(LOT_SIZE)
                } else {
                    lots
                }
            }
            SizeDirective::Fraction(fraction) => {
                if !(0.0..=1.0).contains(&fraction) {
                    return Err(OrderError::InvalidFraction(fraction));
                }
                let lots = round_down_to_lot(held * fraction);
                if lots == 0.0 && fraction > 0.0 {
                    held.min(LOT_SIZE)
                } else {
                    lots
                }
            }
        };
        shares = shares.min(held);
        if shares <= 0.0 {
            return Ok(None);
        }

        let costs = self.cost_model.cost(price, shares);
        let total_income = price * shares - costs.total;

        self.cash += total_income;
        if let Some(pos) = self.positions.get_mut(symbol) {
            pos.remove(shares);
        }

        let record = TradeRecord {
            date,
            symbol: symbol.to_string(),
            trade_type: TradeType::Sell,
            price,
            shares,
            commission: costs.commission,
            slippage: costs.slippage,
            total_cost: costs.total,
            cash_change: total_income,
            cash_balance: self.cash,
        };
        self.trade_history.push(record.clone());
        Ok(Some(record))
    }

    /// Append one valuation snapshot, valuing each open position at the
    /// supplied price. Positions with no price entry or zero shares are
    /// excluded from the valuation map.
    pub fn record_valuation(&mut self, date: NaiveDate, prices: &HashMap<String, f64>) {
        let mut positions_value = HashMap::new();
        let mut total_value = self.cash;
        for (symbol, position) in &self.positions {
            if position.shares > 0.0 {
                if let Some(&price) = prices.get(symbol) {
                    let value = position.market_value(price);
                    positions_value.insert(symbol.clone(), value);
                    total_value += value;
                }
            }
        }
        self.snapshots.push(ValuationSnapshot {
            date,
            cash: self.cash,
            positions_value,
            total_value,
        });
    }

    pub fn initial_cash(&self) -> f64 {
        self.initial_cash
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// Shares currently held in `symbol` (0 if no position exists).
    pub fn held_shares(&self, symbol: &str) -> f64 {
        self.positions.get(symbol).map_or(0.0, |p| p.shares)
    }

    pub fn positions(&self) -> &HashMap<String, Position> {
        &self.positions
    }

    pub fn trade_history(&self) -> &[TradeRecord] {
        &self.trade_history
    }

    pub fn snapshots(&self) -> &[ValuationSnapshot] {
        &self.snapshots
    }
}
