//! Collaborator contracts consumed by the allocation engine
//!
//! The engine never talks to a token, an oracle or a strategy directly. It
//! goes through a [`Venue`], which on-chain is backed by CPIs and account
//! reads, and in tests by the in-memory collaborators in [`crate::sim`].

use crate::error::RouteResult;
use crate::state::{Address, StrategySlot};

/// The pooled asset, as seen from the router
///
/// Mirrors the token standard the router was designed against: mutating
/// calls report success as a boolean and the engine turns `false` into the
/// matching error.
pub trait AssetToken {
    /// Move `amount` from `from` to `to` using an allowance granted to the router
    #[must_use]
    fn transfer_from(&mut self, from: &Address, to: &Address, amount: u64) -> bool;

    /// Move `amount` out of router custody to `to`
    #[must_use]
    fn transfer(&mut self, to: &Address, amount: u64) -> bool;

    /// Allow `spender` to pull `amount` out of router custody
    #[must_use]
    fn approve(&mut self, spender: &Address, amount: u64) -> bool;

    fn balance_of(&self, account: &Address) -> u64;
}

/// Published price of the pooled asset, fixed point at [`crate::PRICE_SCALE`]
pub trait PriceFeed {
    fn price(&self) -> RouteResult<u64>;
}

/// A yield strategy. Deposits are pulled through a prior approval; the only
/// way out is a full liquidation back into router custody.
pub trait StrategyPool {
    /// Identity the router approves as spender
    fn address(&self) -> Address;

    fn deposit(&mut self, amount: u64) -> RouteResult<()>;

    /// Liquidate everything contributed by the router, returning the total
    fn withdraw_all(&mut self) -> RouteResult<u64>;
}

/// Everything the engine needs from the outside world
pub trait Venue {
    type Token: AssetToken;
    type Feed: PriceFeed;
    type Pool: StrategyPool;

    /// The router's own custody identity
    fn router(&self) -> Address;

    fn token(&self) -> &Self::Token;

    fn token_mut(&mut self) -> &mut Self::Token;

    fn feed(&self) -> &Self::Feed;

    fn pool(&self, slot: StrategySlot) -> &Self::Pool;

    fn pool_mut(&mut self, slot: StrategySlot) -> &mut Self::Pool;
}

/// Snapshot/restore over collaborator state.
///
/// Hosts that already revert everything on failure (the Solana runtime)
/// don't need this; the in-memory router uses it to make each public
/// operation all-or-nothing.
pub trait Checkpoint {
    type Snapshot;

    fn checkpoint(&self) -> Self::Snapshot;

    fn rollback(&mut self, snapshot: Self::Snapshot);
}
