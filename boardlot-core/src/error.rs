//! Error taxonomies for execution calls and the bar loop.
//!
//! Insufficient cash and insufficient held shares are deliberately NOT errors:
//! they degrade to a reduced fill or a no-op trade, and the caller continues.

use thiserror::Error;

/// Failures of a single buy/sell call. Fatal to the call, never to the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    #[error("trade price must be positive, got {0}")]
    InvalidPrice(f64),

    #[error("buy requires a share count or a cash amount")]
    MissingSizeDirective,

    #[error("sell fraction must be within [0, 1], got {0}")]
    InvalidFraction(f64),
}

/// Failures of a whole backtest run: feed-contract violations detected before
/// any bar runs, or an execution call failing mid-loop (e.g. a non-positive
/// close price in the bar feed).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("signal feed length {signals} does not match bar feed length {bars}")]
    SignalMismatch { bars: usize, signals: usize },

    #[error("bar feed is not strictly ascending by date at index {index}")]
    OutOfOrderBars { index: usize },

    #[error(transparent)]
    Order(#[from] OrderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_error_messages() {
        assert_eq!(
            OrderError::InvalidPrice(-1.0).to_string(),
            "trade price must be positive, got -1"
        );
        assert_eq!(
            OrderError::InvalidFraction(1.5).to_string(),
            "sell fraction must be within [0, 1], got 1.5"
        );
    }

    #[test]
    fn engine_error_messages() {
        let err = EngineError::SignalMismatch { bars: 10, signals: 9 };
        assert_eq!(
            err.to_string(),
            "signal feed length 9 does not match bar feed length 10"
        );
    }
}
