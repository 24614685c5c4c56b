//! boardlot analytics — read-only statistics over a completed run.
//!
//! Consumes the ledger and snapshot sequence an account accumulated during a
//! backtest and produces round trips, equity-curve metrics, and an aggregate
//! [`PerformanceReport`]. Nothing here mutates the account.

pub mod metrics;
pub mod report;
pub mod round_trip;

pub use report::PerformanceReport;
pub use round_trip::{pair_round_trips, RoundTrip};
