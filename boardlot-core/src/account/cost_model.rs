//! Cost model — commission and slippage for a single fill.
//!
//! Commission is proportional to notional with a per-trade floor; slippage is
//! proportional to notional. A zero-share fill costs nothing, including the
//! commission floor.

/// Immutable friction parameters shared by every execution on an account.
#[derive(Debug, Clone)]
pub struct CostModel {
    pub commission_rate: f64,
    pub min_commission: f64,
    pub slippage_rate: f64,
}

/// Cost breakdown for one fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeCosts {
    pub commission: f64,
    pub slippage: f64,
    pub total: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            commission_rate: 0.0003,
            min_commission: 5.0,
            slippage_rate: 0.0001,
        }
    }
}

impl CostModel {
    pub fn new(commission_rate: f64, min_commission: f64, slippage_rate: f64) -> Self {
        Self {
            commission_rate,
            min_commission,
            slippage_rate,
        }
    }

    pub fn frictionless() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Compute the cost of trading `shares` at `price`.
    ///
    /// `commission = max(price * shares * commission_rate, min_commission)`,
    /// `slippage = price * shares * slippage_rate`, except that zero shares
    /// cost exactly zero.
    pub fn cost(&self, price: f64, shares: f64) -> TradeCosts {
        if shares == 0.0 {
            return TradeCosts {
                commission: 0.0,
                slippage: 0.0,
                total: 0.0,
            };
        }
        let notional = price * shares;
        let commission = (notional * self.commission_rate).max(self.min_commission);
        let slippage = notional * self.slippage_rate;
        TradeCosts {
            commission,
            slippage,
            total: commission + slippage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commission_floor_applies_on_small_trades() {
        // 100 * 100 * 0.0003 = 3 < 5, so the floor wins.
        let model = CostModel::new(0.0003, 5.0, 0.0001);
        let costs = model.cost(100.0, 100.0);
        assert!((costs.commission - 5.0).abs() < 1e-10);
        assert!((costs.slippage - 1.0).abs() < 1e-10);
        assert!((costs.total - 6.0).abs() < 1e-10);
    }

    #[test]
    fn proportional_commission_above_floor() {
        let model = CostModel::new(0.0003, 5.0, 0.0001);
        // Notional 100 * 1000 = 100_000 → commission 30, slippage 10.
        let costs = model.cost(100.0, 1000.0);
        assert!((costs.commission - 30.0).abs() < 1e-10);
        assert!((costs.slippage - 10.0).abs() < 1e-10);
        assert!((costs.total - 40.0).abs() < 1e-10);
    }

    #[test]
    fn zero_shares_cost_nothing() {
        let model = CostModel::default();
        let costs = model.cost(100.0, 0.0);
        assert_eq!(costs.commission, 0.0);
        assert_eq!(costs.slippage, 0.0);
        assert_eq!(costs.total, 0.0);
    }

    #[test]
    fn frictionless_is_free() {
        let model = CostModel::frictionless();
        let costs = model.cost(100.0, 10_000.0);
        assert_eq!(costs.total, 0.0);
    }
}
