//! Model state carried through the on-chain account layouts

use harbor_integration_tests::*;
use harbor_model::{Ledger, Mode, Router, StrategySlot};
use harbor_router::{ClaimAccount, RouterAccount};

#[test]
fn router_account_round_trips_engine_state() {
    let mut router = funded_router(&[(X, 1_000)]);
    router.deposit(&X, 1_000).unwrap();
    router.venue_mut().set_price(DEPEGGED);
    router.rebalance().unwrap();

    let account = persist_router(&router);
    let bytes = unsafe {
        core::slice::from_raw_parts(
            &account as *const RouterAccount as *const u8,
            RouterAccount::LEN,
        )
    };
    let decoded = RouterAccount::from_bytes(bytes).unwrap();

    assert_eq!(decoded.current_mode(), Ok(Mode::Defensive));
    assert_eq!(decoded.total_deposits(), 1_000);
    assert_eq!(decoded.vault_state().unwrap(), *router.state());
}

#[test]
fn reloaded_router_continues_where_it_left_off() {
    let mut router = funded_router(&[(X, 800), (Y, 400)]);
    router.deposit(&X, 800).unwrap();
    router.deposit(&Y, 400).unwrap();
    router.venue_mut().set_price(DEPEGGED);
    router.rebalance().unwrap();

    let account = persist_router(&router);
    let claims: Vec<ClaimAccount> = [X, Y].iter().map(|o| persist_claim(&router, o)).collect();
    let mut reloaded = Router::from_parts(
        account.vault_state().unwrap(),
        Ledger::from_entries(claims.iter().map(|c| (c.owner, c.amount))),
        router.venue().fork(),
    );

    assert_eq!(reloaded.current_mode(), Mode::Defensive);
    assert_eq!(reloaded.balance_of(&X), 800);
    assert_eq!(reloaded.balance_of(&Y), 400);

    reloaded.withdraw(&Y, 400).unwrap();
    assert_eq!(reloaded.venue().pool_balance(StrategySlot::B), 800);
    assert_eq!(reloaded.total_deposits(), 800);
    assert_sound(&reloaded);
}

#[test]
fn persisted_emergency_is_honored() {
    let mut account = persist_router(&restored_router(Mode::Farming, &[]));
    account.mode = Mode::Emergency.as_u8();
    account.total_deposits = 250;

    let mut router = Router::from_parts(
        account.vault_state().unwrap(),
        Ledger::from_entries([(X, 250)]),
        restored_router(Mode::Emergency, &[(X, 250)]).venue().fork(),
    );

    assert_eq!(router.current_mode(), Mode::Emergency);
    router.withdraw(&X, 250).unwrap();
    assert_eq!(router.venue().balance(&X), 250);
}

#[test]
fn corrupt_mode_byte_is_rejected() {
    let mut account = persist_router(&restored_router(Mode::Farming, &[]));
    account.mode = 9;
    assert!(account.vault_state().is_err());
}
