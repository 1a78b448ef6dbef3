//! In-memory collaborators
//!
//! A token book shared by the token and both strategy pools, a settable price
//! feed, and failure switches for every collaborator call. Used by the unit
//! tests, the scenario suite and the Kani harnesses. Strategy yield and
//! losses are injected from outside with [`SimVenue::accrue`] and
//! [`SimVenue::slash`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{RouteError, RouteResult};
use crate::risk::PRICE_SCALE;
use crate::state::{Address, StrategySlot};
use crate::venue::{AssetToken, Checkpoint, PriceFeed, StrategyPool, Venue};

pub const SIM_ROUTER: Address = [0xAA; 32];
pub const SIM_POOL_A: Address = [0xA0; 32];
pub const SIM_POOL_B: Address = [0xB0; 32];

/// Balances and allowances of the pooled asset
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenBook {
    balances: BTreeMap<Address, u64>,
    allowances: BTreeMap<(Address, Address), u64>,
}

impl TokenBook {
    pub fn balance(&self, account: &Address) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u64 {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    fn mint(&mut self, account: &Address, amount: u64) {
        let entry = self.balances.entry(*account).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    fn burn(&mut self, account: &Address, amount: u64) {
        let entry = self.balances.entry(*account).or_insert(0);
        *entry = entry.saturating_sub(amount);
    }

    fn set_allowance(&mut self, owner: &Address, spender: &Address, amount: u64) {
        self.allowances.insert((*owner, *spender), amount);
    }

    /// Move funds if the source can cover them
    fn move_funds(&mut self, from: &Address, to: &Address, amount: u64) -> bool {
        let available = self.balance(from);
        if available < amount {
            return false;
        }
        let Some(credited) = self.balance(to).checked_add(amount) else {
            return false;
        };
        if from != to {
            self.balances.insert(*from, available - amount);
            self.balances.insert(*to, credited);
        }
        true
    }

    /// Allowance-checked move, consuming the allowance
    fn pull(&mut self, owner: &Address, spender: &Address, to: &Address, amount: u64) -> bool {
        let allowed = self.allowance(owner, spender);
        if allowed < amount {
            return false;
        }
        if !self.move_funds(owner, to, amount) {
            return false;
        }
        self.set_allowance(owner, spender, allowed - amount);
        true
    }
}

type SharedBook = Rc<RefCell<TokenBook>>;

pub struct SimToken {
    book: SharedBook,
    router: Address,
    reject_transfers: bool,
    reject_approvals: bool,
}

impl AssetToken for SimToken {
    fn transfer_from(&mut self, from: &Address, to: &Address, amount: u64) -> bool {
        if self.reject_transfers {
            return false;
        }
        self.book.borrow_mut().pull(from, &self.router, to, amount)
    }

    fn transfer(&mut self, to: &Address, amount: u64) -> bool {
        if self.reject_transfers {
            return false;
        }
        self.book.borrow_mut().move_funds(&self.router, to, amount)
    }

    fn approve(&mut self, spender: &Address, amount: u64) -> bool {
        if self.reject_approvals {
            return false;
        }
        self.book
            .borrow_mut()
            .set_allowance(&self.router, spender, amount);
        true
    }

    fn balance_of(&self, account: &Address) -> u64 {
        self.book.borrow().balance(account)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimFeed {
    price: u64,
    unavailable: bool,
}

impl PriceFeed for SimFeed {
    fn price(&self) -> RouteResult<u64> {
        if self.unavailable {
            return Err(RouteError::OracleUnavailable);
        }
        Ok(self.price)
    }
}

pub struct SimPool {
    address: Address,
    router: Address,
    book: SharedBook,
    reject_deposits: bool,
    deposit_calls: u32,
    withdraw_calls: u32,
}

impl SimPool {
    pub fn deposit_calls(&self) -> u32 {
        self.deposit_calls
    }

    pub fn withdraw_calls(&self) -> u32 {
        self.withdraw_calls
    }
}

impl StrategyPool for SimPool {
    fn address(&self) -> Address {
        self.address
    }

    fn deposit(&mut self, amount: u64) -> RouteResult<()> {
        if self.reject_deposits {
            return Err(RouteError::StrategyRejected);
        }
        let pulled = self
            .book
            .borrow_mut()
            .pull(&self.router, &self.address, &self.address, amount);
        if !pulled {
            return Err(RouteError::StrategyRejected);
        }
        self.deposit_calls += 1;
        Ok(())
    }

    fn withdraw_all(&mut self) -> RouteResult<u64> {
        let mut book = self.book.borrow_mut();
        let held = book.balance(&self.address);
        if !book.move_funds(&self.address, &self.router, held) {
            return Err(RouteError::StrategyRejected);
        }
        self.withdraw_calls += 1;
        Ok(held)
    }
}

/// Collaborator state captured by [`Checkpoint`]
#[derive(Clone, Debug)]
pub struct SimSnapshot {
    book: TokenBook,
    feed: SimFeed,
    calls: [(u32, u32); 2],
}

pub struct SimVenue {
    book: SharedBook,
    token: SimToken,
    feed: SimFeed,
    pools: [SimPool; 2],
}

impl SimVenue {
    /// Empty book, price at peg
    pub fn new() -> Self {
        let book: SharedBook = Rc::new(RefCell::new(TokenBook::default()));
        let pool = |address| SimPool {
            address,
            router: SIM_ROUTER,
            book: Rc::clone(&book),
            reject_deposits: false,
            deposit_calls: 0,
            withdraw_calls: 0,
        };
        let pools = [pool(SIM_POOL_A), pool(SIM_POOL_B)];
        Self {
            token: SimToken {
                book: Rc::clone(&book),
                router: SIM_ROUTER,
                reject_transfers: false,
                reject_approvals: false,
            },
            feed: SimFeed {
                price: PRICE_SCALE,
                unavailable: false,
            },
            pools,
            book,
        }
    }

    /// Independent venue holding a copy of this one's balances and price
    pub fn fork(&self) -> Self {
        let mut venue = Self::new();
        *venue.book.borrow_mut() = self.book.borrow().clone();
        venue.feed = self.feed;
        venue
    }

    /// Mint `amount` to `account` and authorize the router to pull it
    pub fn fund(&mut self, account: &Address, amount: u64) {
        self.mint(account, amount);
        let allowed = self.book.borrow().allowance(account, &SIM_ROUTER);
        self.authorize(account, allowed.saturating_add(amount));
    }

    pub fn mint(&mut self, account: &Address, amount: u64) {
        self.book.borrow_mut().mint(account, amount);
    }

    pub fn burn(&mut self, account: &Address, amount: u64) {
        self.book.borrow_mut().burn(account, amount);
    }

    /// Set the router's allowance over `account`
    pub fn authorize(&mut self, account: &Address, amount: u64) {
        self.book
            .borrow_mut()
            .set_allowance(account, &SIM_ROUTER, amount);
    }

    pub fn balance(&self, account: &Address) -> u64 {
        self.book.borrow().balance(account)
    }

    pub fn router_balance(&self) -> u64 {
        self.balance(&SIM_ROUTER)
    }

    pub fn pool_balance(&self, slot: StrategySlot) -> u64 {
        self.balance(&self.pools[slot.index()].address)
    }

    /// Everything held on the router's behalf: custody plus both pools
    pub fn custodied(&self) -> u128 {
        u128::from(self.router_balance())
            + u128::from(self.pool_balance(StrategySlot::A))
            + u128::from(self.pool_balance(StrategySlot::B))
    }

    /// Yield landing in a strategy
    pub fn accrue(&mut self, slot: StrategySlot, amount: u64) {
        let address = self.pools[slot.index()].address;
        self.mint(&address, amount);
    }

    /// Loss inside a strategy
    pub fn slash(&mut self, slot: StrategySlot, amount: u64) {
        let address = self.pools[slot.index()].address;
        self.burn(&address, amount);
    }

    pub fn set_price(&mut self, price: u64) {
        self.feed.price = price;
    }

    pub fn fail_oracle(&mut self, unavailable: bool) {
        self.feed.unavailable = unavailable;
    }

    pub fn reject_transfers(&mut self, reject: bool) {
        self.token.reject_transfers = reject;
    }

    pub fn reject_approvals(&mut self, reject: bool) {
        self.token.reject_approvals = reject;
    }

    pub fn reject_pool_deposits(&mut self, slot: StrategySlot, reject: bool) {
        self.pools[slot.index()].reject_deposits = reject;
    }
}

impl Default for SimVenue {
    fn default() -> Self {
        Self::new()
    }
}

impl Venue for SimVenue {
    type Token = SimToken;
    type Feed = SimFeed;
    type Pool = SimPool;

    fn router(&self) -> Address {
        SIM_ROUTER
    }

    fn token(&self) -> &SimToken {
        &self.token
    }

    fn token_mut(&mut self) -> &mut SimToken {
        &mut self.token
    }

    fn feed(&self) -> &SimFeed {
        &self.feed
    }

    fn pool(&self, slot: StrategySlot) -> &SimPool {
        &self.pools[slot.index()]
    }

    fn pool_mut(&mut self, slot: StrategySlot) -> &mut SimPool {
        &mut self.pools[slot.index()]
    }
}

impl Checkpoint for SimVenue {
    type Snapshot = SimSnapshot;

    fn checkpoint(&self) -> SimSnapshot {
        SimSnapshot {
            book: self.book.borrow().clone(),
            feed: self.feed,
            calls: [
                (self.pools[0].deposit_calls, self.pools[0].withdraw_calls),
                (self.pools[1].deposit_calls, self.pools[1].withdraw_calls),
            ],
        }
    }

    fn rollback(&mut self, snapshot: SimSnapshot) {
        *self.book.borrow_mut() = snapshot.book;
        self.feed = snapshot.feed;
        for (pool, (deposits, withdrawals)) in self.pools.iter_mut().zip(snapshot.calls) {
            pool.deposit_calls = deposits;
            pool.withdraw_calls = withdrawals;
        }
    }
}
