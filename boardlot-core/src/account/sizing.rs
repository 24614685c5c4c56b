//! Order sizing — board-lot rounding and the size directive sum type.

use serde::{Deserialize, Serialize};

/// Minimum tradeable increment (one board lot).
pub const LOT_SIZE: f64 = 100.0;

/// How a single buy or sell call is sized. Exactly one directive is resolved
/// per call:
///
/// - `Shares`: explicit share count, used as-is (buys may still be reduced by
///   the cash constraint, sells are clamped to the held quantity).
/// - `Amount`: target cash notional, rounded down to whole lots.
/// - `Fraction`: sell-only, fraction of the held position in [0, 1].
/// - `Default`: sell-only, the entire held position. A buy called with
///   `Fraction` or `Default` fails with `MissingSizeDirective`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SizeDirective {
    Shares(f64),
    Amount(f64),
    Fraction(f64),
    Default,
}

/// Round a share count down to a whole number of board lots.
pub fn round_down_to_lot(shares: f64) -> f64 {
    (shares / LOT_SIZE).floor() * LOT_SIZE
}
