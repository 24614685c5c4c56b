//! Trade signal — the per-bar decision supplied by the signal collaborator.

use serde::{Deserialize, Serialize};

/// Threshold applied when collapsing a continuous score to a signal.
const SCORE_THRESHOLD: f64 = 0.5;

/// Per-bar trade decision, aligned 1:1 with the bar feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

impl Signal {
    /// Collapse a continuous score to a signal: above +0.5 buys, below -0.5
    /// sells, anything between holds.
    pub fn from_score(score: f64) -> Self {
        if score > SCORE_THRESHOLD {
            Signal::Buy
        } else if score < -SCORE_THRESHOLD {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Hold => 0,
            Signal::Sell => -1,
        }
    }
}

impl From<i8> for Signal {
    /// Any positive value buys, any negative sells, zero holds.
    fn from(value: i8) -> Self {
        match value.signum() {
            1 => Signal::Buy,
            -1 => Signal::Sell,
            _ => Signal::Hold,
        }
    }
}
