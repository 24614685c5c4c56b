//! ValuationSnapshot — end-of-bar portfolio valuation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Portfolio valuation at one bar's close, appended once per simulated bar.
///
/// The accounting identity must hold for every snapshot:
/// `total_value == cash + sum(positions_value)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    pub date: NaiveDate,
    pub cash: f64,
    /// Market value per open symbol; flat positions are omitted.
    pub positions_value: HashMap<String, f64>,
    pub total_value: f64,
}

impl ValuationSnapshot {
    /// Check the accounting identity within floating-point tolerance.
    pub fn is_consistent(&self) -> bool {
        let positions: f64 = self.positions_value.values().sum();
        (self.cash + positions - self.total_value).abs() < 1e-6
    }
}
