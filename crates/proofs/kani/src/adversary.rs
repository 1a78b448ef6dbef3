//! Adversarial step generator

#[cfg(kani)]
use kani::any;
use harbor_model::{sim::SimVenue, RouteResult, Router, StrategySlot};

use crate::generators::USERS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Deposit { user: usize, amount: u64 },
    Withdraw { user: usize, amount: u64 },
    Rebalance,
    PriceMove { price: u64 },
    Yield { defensive: bool, amount: u64 },
}

#[cfg(kani)]
impl kani::Arbitrary for Step {
    fn any() -> Self {
        use crate::sanitizer::Sanitize;

        let choice: u8 = any();
        let step = match choice % 5 {
            0 => Step::Deposit {
                user: any::<u8>() as usize,
                amount: any(),
            },
            1 => Step::Withdraw {
                user: any::<u8>() as usize,
                amount: any(),
            },
            2 => Step::Rebalance,
            3 => Step::PriceMove { price: any() },
            _ => Step::Yield {
                defensive: any(),
                amount: any(),
            },
        };
        step.sanitize()
    }
}

/// Apply one step. Router operations report their result; environment moves
/// (price, yield) always succeed.
pub fn apply(router: &mut Router<SimVenue>, step: Step) -> RouteResult<()> {
    match step {
        Step::Deposit { user, amount } => router.deposit(&USERS[user % USERS.len()], amount),
        Step::Withdraw { user, amount } => router.withdraw(&USERS[user % USERS.len()], amount),
        Step::Rebalance => router.rebalance().map(|_| ()),
        Step::PriceMove { price } => {
            router.venue_mut().set_price(price);
            Ok(())
        }
        Step::Yield { defensive, amount } => {
            let slot = if defensive { StrategySlot::B } else { StrategySlot::A };
            router.venue_mut().accrue(slot, amount);
            Ok(())
        }
    }
}

#[cfg(kani)]
pub fn adversary_step(router: &mut Router<SimVenue>) -> RouteResult<()> {
    apply(router, any::<Step>())
}
