//! Event publication through program logs
//!
//! One line per committed event:
//!
//! ```text
//! event:deposit amount=<n>
//! event:withdraw amount=<n>
//! event:mode_change from=<mode> to=<mode>
//! event:rebalance mode=<mode> moved=<n>
//! ```
//!
//! Deposit and withdraw lines are followed by the depositor pubkey.

use harbor_model::{EventSink, RouterEvent};
use pinocchio_log::log;

/// Logs engine events as they are emitted. A failed instruction discards its
/// logs together with its state changes.
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: RouterEvent) {
        match event {
            RouterEvent::Deposited { account, amount } => {
                log!("event:deposit amount={}", amount);
                pinocchio::pubkey::log(&account);
            }
            RouterEvent::Withdrawn { account, amount } => {
                log!("event:withdraw amount={}", amount);
                pinocchio::pubkey::log(&account);
            }
            RouterEvent::ModeChanged { from, to } => {
                log!("event:mode_change from={} to={}", from.as_u8(), to.as_u8());
            }
            RouterEvent::Rebalanced { mode, moved } => {
                log!("event:rebalance mode={} moved={}", mode.as_u8(), moved);
            }
        }
    }
}
