//! Round-trip reconstruction from the flat trade ledger.
//!
//! The ledger is a flat list of fills; trade statistics need entry/exit pairs.
//! Pairing is a greedy two-cursor walk per symbol: each buy is matched with the
//! earliest sell strictly after it, and sells dated at or before the buy are
//! skipped. This is a reporting heuristic, not FIFO lot accounting — with
//! partial exits it can leave fills unpaired.

use boardlot_core::{TradeRecord, TradeType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One completed entry/exit pair, net of costs on both legs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTrip {
    pub symbol: String,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub entry_shares: f64,
    pub exit_date: NaiveDate,
    pub exit_price: f64,
    pub exit_shares: f64,
    /// Net proceeds of the sell leg minus net outlay of the buy leg.
    pub profit: f64,
    pub holding_days: i64,
}

/// Reconstruct round trips from a ledger, grouped by symbol.
///
/// Symbols are visited in sorted order; within a symbol, fills keep their
/// ledger (chronological) order. Init records are ignored.
pub fn pair_round_trips(history: &[TradeRecord]) -> Vec<RoundTrip> {
    let mut by_symbol: BTreeMap<&str, (Vec<&TradeRecord>, Vec<&TradeRecord>)> = BTreeMap::new();
    for record in history {
        let entry = by_symbol.entry(record.symbol.as_str()).or_default();
        match record.trade_type {
            TradeType::Buy => entry.0.push(record),
            TradeType::Sell => entry.1.push(record),
            TradeType::Init => {}
        }
    }

    let mut trips = Vec::new();
    for (symbol, (buys, sells)) in by_symbol {
        let mut sell_idx = 0;
        for buy in buys {
            while sell_idx < sells.len() && sells[sell_idx].date <= buy.date {
                sell_idx += 1;
            }
            if sell_idx >= sells.len() {
                break;
            }
            let sell = sells[sell_idx];
            sell_idx += 1;

            let entry_outlay = buy.price * buy.shares + buy.total_cost;
            let exit_proceeds = sell.price * sell.shares - sell.total_cost;
            trips.push(RoundTrip {
                symbol: symbol.to_string(),
                entry_date: buy.date,
                entry_price: buy.price,
                entry_shares: buy.shares,
                exit_date: sell.date,
                exit_price: sell.price,
                exit_shares: sell.shares,
                profit: exit_proceeds - entry_outlay,
                holding_days: (sell.date - buy.date).num_days(),
            });
        }
    }
    trips
}
