//! Router-level properties over generated operation sequences

use harbor_integration_tests::*;
use harbor_model::{helpers::mode_reachable, Address, Mode, StrategySlot};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Action {
    Deposit(usize, u64),
    Withdraw(usize, u64),
    Price(u64),
    Rebalance,
}

const ACCOUNTS: [Address; 3] = [X, Y, Z];

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..3usize, 0..2_000u64).prop_map(|(who, amount)| Action::Deposit(who, amount)),
        (0..3usize, 0..2_000u64).prop_map(|(who, amount)| Action::Withdraw(who, amount)),
        (950_000..1_010_000u64).prop_map(Action::Price),
        Just(Action::Rebalance),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_between_operations(actions in prop::collection::vec(action(), 1..40)) {
        let mut router = funded_router(&[(X, 10_000), (Y, 10_000), (Z, 10_000)]);

        for action in actions {
            let _ = match action {
                Action::Deposit(who, amount) => router.deposit(&ACCOUNTS[who], amount),
                Action::Withdraw(who, amount) => router.withdraw(&ACCOUNTS[who], amount),
                Action::Price(price) => {
                    router.venue_mut().set_price(price);
                    Ok(())
                }
                Action::Rebalance => router.rebalance().map(|_| ()),
            };

            assert_sound(&router);
            prop_assert!(mode_reachable(router.current_mode()));
            prop_assert_ne!(router.current_mode(), Mode::Emergency);
        }

        let held: u64 = ACCOUNTS.iter().map(|a| router.venue().balance(a)).sum();
        prop_assert_eq!(held + router.total_deposits(), 30_000);
    }

    #[test]
    fn second_rebalance_is_silent(price in 900_000..1_100_000u64, amount in 1..5_000u64) {
        let mut router = funded_router(&[(X, amount)]);
        router.deposit(&X, amount).unwrap();
        router.venue_mut().set_price(price);

        router.rebalance().unwrap();
        let mode = router.current_mode();
        let events = router.events().len();

        prop_assert_eq!(router.rebalance(), Ok(None));
        prop_assert_eq!(router.events().len(), events);
        prop_assert_eq!(router.current_mode(), mode);
    }

    #[test]
    fn deposit_then_withdraw_restores_claim(
        seed in 0..5_000u64,
        amount in 1..5_000u64,
        depegged in any::<bool>(),
    ) {
        let mut router = funded_router(&[(X, seed + amount), (Y, 1_000)]);
        router.deposit(&Y, 1_000).unwrap();
        if seed > 0 {
            router.deposit(&X, seed).unwrap();
        }
        if depegged {
            router.venue_mut().set_price(DEPEGGED);
            router.rebalance().unwrap();
        }
        let slot = if depegged { StrategySlot::B } else { StrategySlot::A };
        let claim = router.balance_of(&X);
        let strategy = router.venue().pool_balance(slot);

        router.deposit(&X, amount).unwrap();
        router.withdraw(&X, amount).unwrap();

        prop_assert_eq!(router.balance_of(&X), claim);
        prop_assert_eq!(router.venue().pool_balance(slot), strategy);
        prop_assert_eq!(router.venue().balance(&X), amount);
    }
}
