//! Event records published for external observers

use crate::state::{Address, Mode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouterEvent {
    Deposited { account: Address, amount: u64 },
    Withdrawn { account: Address, amount: u64 },
    ModeChanged { from: Mode, to: Mode },
    Rebalanced { mode: Mode, moved: u64 },
}

/// Destination for events emitted by the engine
pub trait EventSink {
    fn emit(&mut self, event: RouterEvent);
}

impl EventSink for Vec<RouterEvent> {
    fn emit(&mut self, event: RouterEvent) {
        self.push(event);
    }
}

/// Outcome of a rebalance that actually moved the pool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    pub moved: u64,
}
