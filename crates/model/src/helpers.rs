//! Invariant checking helpers

use crate::ledger::Ledger;
use crate::state::{Custody, Mode, VaultState};
use crate::venue::{AssetToken, StrategyPool, Venue};

/// Aggregate total equals the sum of every claim
pub fn conservation_ok(state: &VaultState, ledger: &Ledger) -> bool {
    ledger.sum_of_claims() == u128::from(state.total_deposits)
}

/// Modes the public surface can move the router into
pub fn mode_reachable(mode: Mode) -> bool {
    matches!(mode, Mode::Farming | Mode::Defensive)
}

/// Funds sitting at the custody location the mode points to
pub fn active_custody_balance<V: Venue>(state: &VaultState, venue: &V) -> u64 {
    match state.mode.custody() {
        Custody::Strategy(slot) => {
            let pool = venue.pool(slot).address();
            venue.token().balance_of(&pool)
        }
        Custody::Router => venue.token().balance_of(&venue.router()),
    }
}

/// Active custody covers every claim (yield may push it above)
pub fn custody_covers_claims<V: Venue>(state: &VaultState, venue: &V) -> bool {
    active_custody_balance(state, venue) >= state.total_deposits
}

/// Ledger untouched between two snapshots
pub fn ledger_unchanged(
    before: (&VaultState, &Ledger),
    after: (&VaultState, &Ledger),
) -> bool {
    before.0.total_deposits == after.0.total_deposits && before.1 == after.1
}
