//! Harbor Integration Tests
//!
//! Scenario tests drive the model router against the in-memory venue. The
//! persistence tests carry the same state through the on-chain account
//! layouts and back.

use harbor_model::{
    helpers::{conservation_ok, custody_covers_claims},
    sim::{SimVenue, SIM_ROUTER},
    Address, Ledger, Mode, Router, StrategySlot, VaultState,
};
use harbor_router::{ClaimAccount, RouterAccount, StrategyLink};

pub const X: Address = [0x11; 32];
pub const Y: Address = [0x22; 32];
pub const Z: Address = [0x33; 32];

pub const PEG: u64 = 1_000_000;
pub const DEPEGGED: u64 = 975_000;

/// Router whose depositors each hold `amount` and have authorized the router
pub fn funded_router(depositors: &[(Address, u64)]) -> Router<SimVenue> {
    let mut venue = SimVenue::new();
    for (account, amount) in depositors {
        venue.fund(account, *amount);
    }
    Router::new(venue)
}

/// Router restored from persisted state, custody seeded to match
pub fn restored_router(mode: Mode, claims: &[(Address, u64)]) -> Router<SimVenue> {
    let total: u64 = claims.iter().map(|(_, amount)| amount).sum();
    let mut venue = SimVenue::new();
    match mode {
        Mode::Farming => venue.accrue(StrategySlot::A, total),
        Mode::Defensive => venue.accrue(StrategySlot::B, total),
        Mode::Emergency => venue.mint(&SIM_ROUTER, total),
    }
    Router::from_parts(
        VaultState::restore(mode, total),
        Ledger::from_entries(claims.iter().copied()),
        venue,
    )
}

/// Both router-level invariants hold
pub fn assert_sound(router: &Router<SimVenue>) {
    assert!(
        conservation_ok(router.state(), router.ledger()),
        "total {} does not match the sum of claims",
        router.total_deposits()
    );
    assert!(
        custody_covers_claims(router.state(), router.venue()),
        "active custody cannot cover {} in claims",
        router.total_deposits()
    );
}

/// Router state as it would sit in the router account
pub fn persist_router(router: &Router<SimVenue>) -> RouterAccount {
    // SAFETY: all-zero is a valid RouterAccount
    let mut account: RouterAccount = unsafe { core::mem::zeroed() };
    account.initialize_in_place(
        [0x01; 32],
        [0x02; 32],
        255,
        [0x03; 32],
        [0x04; 32],
        [StrategyLink::default(); 2],
    );
    account.store(router.state());
    account
}

/// One claim as it would sit in the depositor's claim account
pub fn persist_claim(router: &Router<SimVenue>, owner: &Address) -> ClaimAccount {
    // SAFETY: all-zero is a valid ClaimAccount
    let mut claim: ClaimAccount = unsafe { core::mem::zeroed() };
    claim.initialize_in_place([0x01; 32], *owner, 255);
    claim.amount = router.balance_of(owner);
    claim
}
