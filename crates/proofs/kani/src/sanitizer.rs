//! State space sanitizer - bounds values for Kani exploration

use crate::adversary::Step;
use harbor_model::{DEPEG_THRESHOLD, PRICE_SCALE};

pub const N_USERS: usize = 2;
pub const MAX_STEPS: u8 = 3;

/// Bounds for tractable verification
pub const MAX_AMOUNT: u64 = 1_000;
pub const MAX_YIELD: u64 = 100;
/// Prices explored sit within this distance of the threshold
pub const PRICE_BAND: u64 = 50_000;

pub trait Sanitize {
    fn sanitize(self) -> Self;
}

/// Clamp a price into the band around the threshold
pub fn clamp_price(price: u64) -> u64 {
    let low = DEPEG_THRESHOLD - PRICE_BAND;
    low + price % (PRICE_SCALE + PRICE_BAND - low)
}

impl Sanitize for Step {
    fn sanitize(self) -> Step {
        match self {
            Step::Deposit { user, amount } => Step::Deposit {
                user: user % N_USERS,
                amount: amount % (MAX_AMOUNT + 1),
            },
            Step::Withdraw { user, amount } => Step::Withdraw {
                user: user % N_USERS,
                amount: amount % (MAX_AMOUNT + 1),
            },
            Step::Rebalance => Step::Rebalance,
            Step::PriceMove { price } => Step::PriceMove {
                price: clamp_price(price),
            },
            Step::Yield { defensive, amount } => Step::Yield {
                defensive,
                amount: amount % (MAX_YIELD + 1),
            },
        }
    }
}
