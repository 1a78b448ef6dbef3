//! Allocation engine - deposit, withdraw and rebalance
//!
//! Each function mutates the state it is handed in place and stops at the
//! first failure. It does not undo anything itself: callers run it against a
//! staged copy (the in-memory [`Router`](crate::Router)) or inside a host
//! that reverts failed transactions (the on-chain program).
//!
//! All three algorithms dispatch on the active strategy handle taken from
//! [`Mode::custody`]; there is no per-mode copy of any path.

use log::{debug, info, warn};

use crate::error::{RouteError, RouteResult};
use crate::events::{EventSink, RouterEvent, Transition};
use crate::math::{add_amount, sub_amount, surplus};
use crate::risk::target_mode;
use crate::state::{Address, Custody, Mode, StrategySlot, VaultState};
use crate::venue::{AssetToken, PriceFeed, StrategyPool, Venue};

/// Pull `amount` from `account` into custody, credit its claim and route
/// the funds to wherever the current mode keeps the pool.
pub fn deposit<V, E>(
    state: &mut VaultState,
    claim: &mut u64,
    venue: &mut V,
    events: &mut E,
    account: &Address,
    amount: u64,
) -> RouteResult<()>
where
    V: Venue,
    E: EventSink,
{
    if amount == 0 {
        return Err(RouteError::InvalidAmount);
    }

    let router = venue.router();
    if !venue.token_mut().transfer_from(account, &router, amount) {
        return Err(RouteError::TransferFailed);
    }

    credit(state, claim, amount)?;

    match state.mode.custody() {
        Custody::Strategy(slot) => seed(venue, slot, amount)?,
        Custody::Router => {}
    }

    debug!("deposit of {} routed to {}", amount, state.mode);
    events.emit(RouterEvent::Deposited {
        account: *account,
        amount,
    });
    Ok(())
}

/// Debit `amount` from `account`'s claim, source it from the active custody
/// and send it to the account.
///
/// Strategy custody can only be emptied in full, so the active strategy is
/// liquidated and whatever exceeds `amount` goes straight back in.
pub fn withdraw<V, E>(
    state: &mut VaultState,
    claim: &mut u64,
    venue: &mut V,
    events: &mut E,
    account: &Address,
    amount: u64,
) -> RouteResult<()>
where
    V: Venue,
    E: EventSink,
{
    if amount == 0 {
        return Err(RouteError::InvalidAmount);
    }
    if amount > *claim {
        return Err(RouteError::InsufficientBalance);
    }

    // Ledger first, custody second.
    debit(state, claim, amount)?;

    match state.mode.custody() {
        Custody::Strategy(slot) => {
            let returned = venue.pool_mut(slot).withdraw_all()?;
            let Some(rest) = surplus(returned, amount) else {
                warn!(
                    "strategy {:?} returned {} against {} owed",
                    slot, returned, amount
                );
                return Err(RouteError::InsufficientStrategyFunds);
            };
            if rest > 0 {
                seed(venue, slot, rest)?;
            }
        }
        Custody::Router => {
            let router = venue.router();
            if venue.token().balance_of(&router) < amount {
                return Err(RouteError::InsufficientVaultBalance);
            }
        }
    }

    if !venue.token_mut().transfer(account, amount) {
        return Err(RouteError::TransferFailed);
    }

    debug!("withdrawal of {} served from {}", amount, state.mode);
    events.emit(RouterEvent::Withdrawn {
        account: *account,
        amount,
    });
    Ok(())
}

/// Compare the published price with the threshold and, if the mode has to
/// flip, move the whole pool from one strategy to the other.
///
/// Returns `None` when nothing changed. Emergency is left untouched.
pub fn rebalance<V, E>(
    state: &mut VaultState,
    venue: &mut V,
    events: &mut E,
) -> RouteResult<Option<Transition>>
where
    V: Venue,
    E: EventSink,
{
    let price = venue.feed().price()?;
    let desired = target_mode(price);

    if state.mode == Mode::Emergency || desired == state.mode {
        return Ok(None);
    }

    let (Custody::Strategy(from), Custody::Strategy(to)) =
        (state.mode.custody(), desired.custody())
    else {
        return Ok(None);
    };

    let moved = venue.pool_mut(from).withdraw_all()?;
    if moved > 0 {
        seed(venue, to, moved)?;
    }

    let transition = Transition {
        from: state.mode,
        to: desired,
        moved,
    };
    state.mode = desired;

    info!(
        "rebalanced {} -> {} at price {}, moved {}",
        transition.from, transition.to, price, moved
    );
    events.emit(RouterEvent::ModeChanged {
        from: transition.from,
        to: transition.to,
    });
    events.emit(RouterEvent::Rebalanced {
        mode: transition.to,
        moved,
    });
    Ok(Some(transition))
}

/// Approve the strategy for `amount` and hand it over
fn seed<V: Venue>(venue: &mut V, slot: StrategySlot, amount: u64) -> RouteResult<()> {
    let spender = venue.pool(slot).address();
    if !venue.token_mut().approve(&spender, amount) {
        return Err(RouteError::ApprovalFailed);
    }
    venue.pool_mut(slot).deposit(amount)
}

/// Claim and total move together or not at all
fn credit(state: &mut VaultState, claim: &mut u64, amount: u64) -> RouteResult<()> {
    let new_claim = add_amount(*claim, amount)?;
    let new_total = add_amount(state.total_deposits, amount)?;
    *claim = new_claim;
    state.total_deposits = new_total;
    Ok(())
}

fn debit(state: &mut VaultState, claim: &mut u64, amount: u64) -> RouteResult<()> {
    let new_claim = sub_amount(*claim, amount)?;
    let new_total = sub_amount(state.total_deposits, amount)?;
    *claim = new_claim;
    state.total_deposits = new_total;
    Ok(())
}
