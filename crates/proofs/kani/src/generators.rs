//! Generators for arbitrary routers (for Kani)

#[cfg(kani)]
use kani::any;
use harbor_model::{sim::SimVenue, Address, Router};

use crate::sanitizer::{N_USERS, MAX_AMOUNT};

/// Depositors exercised by the harnesses
pub const USERS: [Address; N_USERS] = [[1; 32], [2; 32]];

/// Wallet balance every depositor starts with
pub const WALLET: u64 = MAX_AMOUNT * 4;

/// Fresh router with funded, router-authorized wallets
pub fn funded_router() -> Router<SimVenue> {
    let mut venue = SimVenue::new();
    for user in USERS.iter() {
        venue.fund(user, WALLET);
    }
    Router::new(venue)
}

#[cfg(kani)]
pub fn any_amount() -> u64 {
    let raw: u16 = any();
    u64::from(raw) % (MAX_AMOUNT + 1)
}

#[cfg(kani)]
pub fn any_price() -> u64 {
    crate::sanitizer::clamp_price(u64::from(any::<u32>()))
}

#[cfg(kani)]
pub fn any_user() -> usize {
    (any::<u8>() as usize) % N_USERS
}

/// Funded router with one prior deposit per user
#[cfg(kani)]
pub fn any_router_bounded() -> Router<SimVenue> {
    let mut router = funded_router();
    for user in USERS.iter() {
        let amount = any_amount();
        let _ = router.deposit(user, amount);
    }
    router
}
