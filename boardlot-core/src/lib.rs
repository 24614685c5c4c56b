//! boardlot core — signal-driven trade simulation with auditable accounting.
//!
//! This crate contains the simulation core:
//! - Domain types (bars, signals, positions, trade records, valuation snapshots)
//! - Trade cost model (commission floor + proportional slippage)
//! - Portfolio account with board-lot order sizing and partial-fill fallback
//! - Bar-by-bar backtest loop with optional stop-loss/take-profit protection
//!
//! The account is the single owner of all mutable state; data flows strictly
//! downward from the bar/signal feeds through the loop into the ledger, which
//! the analytics crate consumes read-only.

pub mod account;
pub mod domain;
pub mod engine;
pub mod error;

pub use account::{CostModel, PortfolioAccount, SizeDirective, TradeCosts, LOT_SIZE};
pub use domain::{Bar, Position, Signal, TradeRecord, TradeType, ValuationSnapshot};
pub use engine::{
    run_backtest, BacktestConfig, BarAction, BarState, EntrySizing, ProtectionConfig, RunResult,
};
pub use error::{EngineError, OrderError};
