//! End-to-end routing scenarios against the in-memory venue

use harbor_integration_tests::*;
use harbor_model::{Mode, RouteError, RouterEvent, StrategySlot, Transition, Venue};

#[test]
fn scenario_a_first_deposit_lands_in_strategy_a() {
    let mut router = funded_router(&[(X, 1_000)]);

    router.deposit(&X, 1_000).unwrap();

    assert_eq!(router.balance_of(&X), 1_000);
    assert_eq!(router.total_deposits(), 1_000);
    assert_eq!(router.current_mode(), Mode::Farming);
    assert_eq!(router.venue().pool_balance(StrategySlot::A), 1_000);
    assert_eq!(router.venue().pool_balance(StrategySlot::B), 0);
    assert_eq!(router.venue().router_balance(), 0);
    assert_eq!(
        router.events(),
        &[RouterEvent::Deposited {
            account: X,
            amount: 1_000
        }]
    );
    assert_sound(&router);
}

#[test]
fn scenario_b_depeg_moves_pool_to_strategy_b() {
    let mut router = funded_router(&[(X, 1_000)]);
    router.deposit(&X, 1_000).unwrap();
    router.drain_events();

    router.venue_mut().set_price(DEPEGGED);
    let transition = router.rebalance().unwrap();

    assert_eq!(
        transition,
        Some(Transition {
            from: Mode::Farming,
            to: Mode::Defensive,
            moved: 1_000
        })
    );
    assert_eq!(router.current_mode(), Mode::Defensive);
    assert_eq!(router.venue().pool_balance(StrategySlot::A), 0);
    assert_eq!(router.venue().pool_balance(StrategySlot::B), 1_000);
    assert_eq!(
        router.events(),
        &[
            RouterEvent::ModeChanged {
                from: Mode::Farming,
                to: Mode::Defensive
            },
            RouterEvent::Rebalanced {
                mode: Mode::Defensive,
                moved: 1_000
            },
        ]
    );
    assert_sound(&router);
}

#[test]
fn scenario_c_partial_withdraw_in_defensive_redeposits_the_rest() {
    let mut router = funded_router(&[(X, 1_000)]);
    router.deposit(&X, 1_000).unwrap();
    router.venue_mut().set_price(DEPEGGED);
    router.rebalance().unwrap();
    let liquidations = router.venue().pool(StrategySlot::B).withdraw_calls();
    router.drain_events();

    router.withdraw(&X, 400).unwrap();

    assert_eq!(router.balance_of(&X), 600);
    assert_eq!(router.total_deposits(), 600);
    assert_eq!(router.venue().balance(&X), 400);
    assert_eq!(router.venue().pool_balance(StrategySlot::B), 600);
    assert_eq!(router.venue().router_balance(), 0);
    assert_eq!(
        router.venue().pool(StrategySlot::B).withdraw_calls(),
        liquidations + 1
    );
    assert_eq!(
        router.events(),
        &[RouterEvent::Withdrawn {
            account: X,
            amount: 400
        }]
    );
    assert_sound(&router);
}

#[test]
fn scenario_d_overdraw_is_rejected_without_side_effects() {
    let mut router = funded_router(&[(X, 1_000)]);
    router.deposit(&X, 1_000).unwrap();
    let ledger = router.ledger().clone();
    let state = *router.state();
    let events = router.events().len();

    assert_eq!(router.withdraw(&X, 1_001), Err(RouteError::InsufficientBalance));

    assert_eq!(router.ledger(), &ledger);
    assert_eq!(router.state(), &state);
    assert_eq!(router.events().len(), events);
    assert_eq!(router.venue().pool_balance(StrategySlot::A), 1_000);
    assert_eq!(router.venue().balance(&X), 0);
}

#[test]
fn zero_amounts_are_always_invalid() {
    for mode in [Mode::Farming, Mode::Defensive, Mode::Emergency] {
        let mut router = restored_router(mode, &[(X, 500)]);
        router.venue_mut().fund(&X, 500);

        assert_eq!(router.deposit(&X, 0), Err(RouteError::InvalidAmount));
        assert_eq!(router.withdraw(&X, 0), Err(RouteError::InvalidAmount));
        assert_eq!(router.balance_of(&X), 500);
        assert!(router.events().is_empty());
    }
}

#[test]
fn depeg_and_recovery_with_several_depositors() {
    let mut router = funded_router(&[(X, 1_000), (Y, 2_000), (Z, 500)]);
    router.deposit(&X, 1_000).unwrap();
    router.deposit(&Y, 2_000).unwrap();

    router.venue_mut().set_price(DEPEGGED);
    router.rebalance().unwrap();
    router.deposit(&Z, 500).unwrap();
    assert_eq!(router.venue().pool_balance(StrategySlot::B), 3_500);

    router.withdraw(&Y, 1_500).unwrap();
    router.venue_mut().set_price(PEG);
    let back = router.rebalance().unwrap();

    assert_eq!(
        back,
        Some(Transition {
            from: Mode::Defensive,
            to: Mode::Farming,
            moved: 2_000
        })
    );
    assert_eq!(router.venue().pool_balance(StrategySlot::A), 2_000);
    assert_eq!(router.venue().pool_balance(StrategySlot::B), 0);
    assert_eq!(router.balance_of(&X), 1_000);
    assert_eq!(router.balance_of(&Y), 500);
    assert_eq!(router.balance_of(&Z), 500);
    assert_sound(&router);
}

#[test]
fn strategy_yield_stays_with_the_pool() {
    let mut router = funded_router(&[(X, 1_000)]);
    router.deposit(&X, 1_000).unwrap();
    router.venue_mut().accrue(StrategySlot::A, 50);

    router.withdraw(&X, 1_000).unwrap();

    assert_eq!(router.balance_of(&X), 0);
    assert_eq!(router.venue().balance(&X), 1_000);
    assert_eq!(router.venue().pool_balance(StrategySlot::A), 50);
    assert_sound(&router);
}

#[test]
fn strategy_shortfall_aborts_the_withdrawal() {
    let mut router = funded_router(&[(X, 1_000)]);
    router.deposit(&X, 1_000).unwrap();
    router.venue_mut().slash(StrategySlot::A, 300);

    assert_eq!(
        router.withdraw(&X, 800),
        Err(RouteError::InsufficientStrategyFunds)
    );
    assert_eq!(router.balance_of(&X), 1_000);
    assert_eq!(router.venue().pool_balance(StrategySlot::A), 700);
    assert_eq!(router.venue().balance(&X), 0);
}

#[test]
fn unavailable_oracle_blocks_rebalance_only() {
    let mut router = funded_router(&[(X, 1_000)]);
    router.venue_mut().fail_oracle(true);

    assert_eq!(router.rebalance(), Err(RouteError::OracleUnavailable));
    router.deposit(&X, 600).unwrap();
    router.withdraw(&X, 100).unwrap();
    assert_eq!(router.balance_of(&X), 500);
    assert_eq!(router.current_mode(), Mode::Farming);
}

#[test]
fn emergency_serves_withdrawals_from_custody() {
    let mut router = restored_router(Mode::Emergency, &[(X, 700), (Y, 300)]);
    router.venue_mut().fund(&Z, 200);

    router.deposit(&Z, 200).unwrap();
    assert_eq!(router.venue().router_balance(), 1_200);

    router.withdraw(&X, 700).unwrap();
    assert_eq!(router.venue().balance(&X), 700);
    assert_eq!(router.venue().router_balance(), 500);

    router.venue_mut().set_price(DEPEGGED);
    assert_eq!(router.rebalance(), Ok(None));
    router.venue_mut().set_price(PEG);
    assert_eq!(router.rebalance(), Ok(None));
    assert_eq!(router.current_mode(), Mode::Emergency);
    assert_sound(&router);
}

#[test]
fn emergency_custody_shortfall_is_reported() {
    let mut router = restored_router(Mode::Emergency, &[(X, 700)]);
    router.venue_mut().burn(&harbor_model::sim::SIM_ROUTER, 400);

    assert_eq!(
        router.withdraw(&X, 500),
        Err(RouteError::InsufficientVaultBalance)
    );
    assert_eq!(router.balance_of(&X), 700);
}
