//! Kani safety proofs over the router model

use kani::{any, assume};
use harbor_model::{helpers::*, RouteError};
use crate::{adversary::*, generators::*, sanitizer::*};

/// Conservation
/// Total deposits equal the sum of claims after any short operation sequence
#[kani::proof]
#[kani::unwind(4)]
fn conservation_holds_across_short_adversary_sequences() {
    let mut router = any_router_bounded();
    kani::assert(
        conservation_ok(router.state(), router.ledger()),
        "Conservation must hold after setup",
    );

    let steps = (any::<u8>() % MAX_STEPS) + 1;
    for _ in 0..steps {
        let _ = adversary_step(&mut router);
        kani::assert(
            conservation_ok(router.state(), router.ledger()),
            "Total deposits must equal the sum of claims",
        );
        kani::assert(
            custody_covers_claims(router.state(), router.venue()),
            "Active custody must cover every claim",
        );
    }
}

/// Atomicity
/// A failed operation leaves the ledger and the mode untouched
#[kani::proof]
fn failed_step_changes_nothing() {
    let mut router = any_router_bounded();
    let state = *router.state();
    let ledger = router.ledger().clone();

    let result = adversary_step(&mut router);
    if result.is_err() {
        kani::assert(
            ledger_unchanged((&state, &ledger), (router.state(), router.ledger())),
            "Failed step must not touch the ledger",
        );
        kani::assert(router.current_mode() == state.mode, "Failed step must not flip the mode");
    }
}

/// Reachability
/// Emergency is never entered through the public surface
#[kani::proof]
#[kani::unwind(4)]
fn emergency_never_reached() {
    let mut router = any_router_bounded();
    let steps = (any::<u8>() % MAX_STEPS) + 1;
    for _ in 0..steps {
        let _ = adversary_step(&mut router);
        kani::assert(mode_reachable(router.current_mode()), "Mode must stay Farming or Defensive");
    }
}

/// Idempotence
/// A second rebalance at the same price is a no-op
#[kani::proof]
fn rebalance_is_idempotent() {
    let mut router = any_router_bounded();
    router.venue_mut().set_price(any_price());

    let first = router.rebalance();
    assume(first.is_ok());
    let mode = router.current_mode();
    let events = router.events().len();

    let second = router.rebalance();
    kani::assert(second == Ok(None), "Second rebalance must not move funds");
    kani::assert(router.current_mode() == mode, "Mode must be stable");
    kani::assert(router.events().len() == events, "No events on a no-op");
}

/// Round trip
/// Depositing then withdrawing the same amount returns exactly that amount
#[kani::proof]
fn deposit_withdraw_round_trip() {
    let mut router = funded_router();
    let user = USERS[any_user()];
    let amount = any_amount();
    assume(amount > 0);

    let wallet_before = router.venue().balance(&user);
    kani::assert(router.deposit(&user, amount).is_ok(), "Funded deposit must succeed");
    kani::assert(router.withdraw(&user, amount).is_ok(), "Withdrawing the claim must succeed");
    kani::assert(router.venue().balance(&user) == wallet_before, "Principal must come back");
    kani::assert(router.balance_of(&user) == 0, "Claim must be zero again");
}

/// Bounded withdrawal
/// Nobody withdraws more than their claim
#[kani::proof]
fn withdraw_bounded_by_claim() {
    let mut router = any_router_bounded();
    let user = USERS[any_user()];
    let claim = router.balance_of(&user);
    let mode = router.current_mode();
    let amount = any_amount();
    assume(amount > claim);

    kani::assert(
        router.withdraw(&user, amount) == Err(RouteError::InsufficientBalance),
        "Over-withdrawal must be rejected",
    );
    kani::assert(router.balance_of(&user) == claim, "Claim must be untouched");
    kani::assert(router.current_mode() == mode, "Mode must be untouched");
}
