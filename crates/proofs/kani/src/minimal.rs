//! Minimal Kani proofs using concrete values
//! Start with specific cases, then generalize in `safety`

use harbor_model::{helpers::*, simulate_risk, Mode, StrategySlot, DEPEG_THRESHOLD};
use crate::generators::{funded_router, USERS};

/// Threshold boundary is strict
#[kani::proof]
fn threshold_concrete() {
    assert!(simulate_risk(DEPEG_THRESHOLD - 1));
    assert!(!simulate_risk(DEPEG_THRESHOLD));
}

/// Single deposit lands in strategy A
#[kani::proof]
fn deposit_concrete_single_user() {
    let mut router = funded_router();
    assert!(router.deposit(&USERS[0], 500).is_ok());

    assert_eq!(router.total_deposits(), 500);
    assert_eq!(router.venue().pool_balance(StrategySlot::A), 500);
    assert!(conservation_ok(router.state(), router.ledger()));
}

/// Depeg moves everything to strategy B
#[kani::proof]
fn rebalance_concrete_depeg() {
    let mut router = funded_router();
    assert!(router.deposit(&USERS[0], 300).is_ok());
    assert!(router.deposit(&USERS[1], 200).is_ok());
    router.venue_mut().set_price(950_000);

    assert!(router.rebalance().is_ok());
    assert_eq!(router.current_mode(), Mode::Defensive);
    assert_eq!(router.venue().pool_balance(StrategySlot::A), 0);
    assert_eq!(router.venue().pool_balance(StrategySlot::B), 500);
}
