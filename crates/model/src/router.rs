//! In-memory router: one owned state object behind an explicit API
//!
//! Every mutating call takes `&mut self` for its whole duration and runs the
//! engine against a staged copy of the state. The copy, the touched claim and
//! the emitted events are committed only if the engine returns `Ok`;
//! otherwise the collaborators are rolled back to their checkpoint and the
//! router is exactly as it was before the call.

use log::debug;

use crate::engine;
use crate::error::RouteResult;
use crate::events::{RouterEvent, Transition};
use crate::ledger::Ledger;
use crate::risk::simulate_risk;
use crate::state::{Address, Mode, VaultState};
use crate::venue::{Checkpoint, Venue};

pub struct Router<V> {
    state: VaultState,
    ledger: Ledger,
    venue: V,
    journal: Vec<RouterEvent>,
}

impl<V> Router<V>
where
    V: Venue + Checkpoint,
{
    /// Fresh router in Farming mode with an empty ledger
    pub fn new(venue: V) -> Self {
        Self::from_parts(VaultState::new(), Ledger::new(), venue)
    }

    /// Restore a router from persisted state
    pub fn from_parts(state: VaultState, ledger: Ledger, venue: V) -> Self {
        Self {
            state,
            ledger,
            venue,
            journal: Vec::new(),
        }
    }

    pub fn balance_of(&self, account: &Address) -> u64 {
        self.ledger.balance_of(account)
    }

    pub fn total_deposits(&self) -> u64 {
        self.state.total_deposits
    }

    pub fn current_mode(&self) -> Mode {
        self.state.mode
    }

    /// Whether `price` would put the router on the defensive side
    pub fn simulate_risk(&self, price: u64) -> bool {
        simulate_risk(price)
    }

    pub fn state(&self) -> &VaultState {
        &self.state
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn venue(&self) -> &V {
        &self.venue
    }

    /// Direct access to the collaborators, for driving prices and yield
    pub fn venue_mut(&mut self) -> &mut V {
        &mut self.venue
    }

    /// Events of all committed operations, oldest first
    pub fn events(&self) -> &[RouterEvent] {
        &self.journal
    }

    pub fn drain_events(&mut self) -> Vec<RouterEvent> {
        std::mem::take(&mut self.journal)
    }

    pub fn deposit(&mut self, account: &Address, amount: u64) -> RouteResult<()> {
        self.atomically(Some(account), |state, claim, venue, events| {
            engine::deposit(state, claim, venue, events, account, amount)
        })
    }

    pub fn withdraw(&mut self, account: &Address, amount: u64) -> RouteResult<()> {
        self.atomically(Some(account), |state, claim, venue, events| {
            engine::withdraw(state, claim, venue, events, account, amount)
        })
    }

    /// Permissionless; anyone may call at any time
    pub fn rebalance(&mut self) -> RouteResult<Option<Transition>> {
        self.atomically(None, |state, _claim, venue, events| {
            engine::rebalance(state, venue, events)
        })
    }

    fn atomically<T, F>(&mut self, account: Option<&Address>, op: F) -> RouteResult<T>
    where
        F: FnOnce(&mut VaultState, &mut u64, &mut V, &mut Vec<RouterEvent>) -> RouteResult<T>,
    {
        let snapshot = self.venue.checkpoint();
        let mut staged = self.state;
        let mut claim = account.map_or(0, |a| self.ledger.balance_of(a));
        let mut events = Vec::new();

        match op(&mut staged, &mut claim, &mut self.venue, &mut events) {
            Ok(value) => {
                self.state = staged;
                if let Some(account) = account {
                    self.ledger.commit_claim(account, claim);
                }
                self.journal.extend(events);
                Ok(value)
            }
            Err(err) => {
                self.venue.rollback(snapshot);
                debug!("operation aborted: {}", err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;
