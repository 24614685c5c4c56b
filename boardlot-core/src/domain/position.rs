//! Position — per-symbol average-cost holding.

use serde::{Deserialize, Serialize};

/// A single symbol's holding, carried at average cost.
///
/// Created lazily on first buy and never destroyed; selling out reduces it to
/// the zero-share state. Invariant: `shares >= 0`, and a flat position has
/// `avg_price == 0` and `cost_basis == 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub shares: f64,
    pub avg_price: f64,
    pub cost_basis: f64,
}

impl Position {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            shares: 0.0,
            avg_price: 0.0,
            cost_basis: 0.0,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.shares == 0.0
    }

    /// Add shares at `price`, blending into the average cost basis.
    /// Non-positive share counts are ignored.
    pub fn add(&mut self, shares: f64, price: f64) {
        if shares <= 0.0 {
            return;
        }
        let total_cost = self.cost_basis + shares * price;
        let total_shares = self.shares + shares;
        self.shares = total_shares;
        self.cost_basis = total_cost;
        self.avg_price = if total_shares > 0.0 {
            total_cost / total_shares
        } else {
            0.0
        };
    }

    /// Remove up to `shares`, returning the quantity actually removed.
    ///
    /// The average price is unchanged by a partial removal; selling out
    /// resets the basis to zero.
    pub fn remove(&mut self, shares: f64) -> f64 {
        if shares <= 0.0 {
            return 0.0;
        }
        let actual = shares.min(self.shares);
        self.shares -= actual;
        if self.shares == 0.0 {
            self.avg_price = 0.0;
            self.cost_basis = 0.0;
        } else {
            self.cost_basis = self.shares * self.avg_price;
        }
        actual
    }

    pub fn market_value(&self, current_price: f64) -> f64 {
        self.shares * current_price
    }

    /// Unrealized profit/loss at `current_price`.
    pub fn profit_loss(&self, current_price: f64) -> f64 {
        self.shares * (current_price - self.avg_price)
    }

    /// Unrealized profit/loss as a percentage of the average cost.
    pub fn profit_loss_percent(&self, current_price: f64) -> f64 {
        if self.avg_price == 0.0 || self.shares == 0.0 {
            return 0.0;
        }
        (current_price - self.avg_price) / self.avg_price * 100.0
    }
}
