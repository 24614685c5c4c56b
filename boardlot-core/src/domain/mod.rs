//! Domain types for the boardlot simulation core.

pub mod bar;
pub mod position;
pub mod signal;
pub mod snapshot;
pub mod trade;

pub use bar::Bar;
pub use position::Position;
pub use signal::Signal;
pub use snapshot::ValuationSnapshot;
pub use trade::{TradeRecord, TradeType};
