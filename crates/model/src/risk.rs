//! Price threshold and the mode it implies

use crate::state::Mode;

/// Fixed-point scale of oracle prices (1.00 == 1_000_000)
pub const PRICE_SCALE: u64 = 1_000_000;

/// Below this price the pool moves to the defensive strategy (0.98 of peg).
/// Compile-time only; there is no runtime knob.
pub const DEPEG_THRESHOLD: u64 = 980_000;

/// Whether `price` would put the router on the defensive side
pub fn simulate_risk(price: u64) -> bool {
    price < DEPEG_THRESHOLD
}

/// Mode a rebalance at `price` steers towards. No hysteresis band.
pub fn target_mode(price: u64) -> Mode {
    if simulate_risk(price) {
        Mode::Defensive
    } else {
        Mode::Farming
    }
}
