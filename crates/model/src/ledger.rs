//! Per-depositor claim ledger
//!
//! Claims are created on first successful deposit and never removed; a fully
//! withdrawn depositor keeps a zero entry. The aggregate total lives in
//! [`VaultState`](crate::state::VaultState) so the on-chain router can keep it
//! in the router account while claims live in their own accounts.

use std::collections::BTreeMap;

use crate::math::wide_sum;
use crate::state::Address;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    claims: BTreeMap<Address, u64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current claim, zero if the account never deposited
    pub fn balance_of(&self, account: &Address) -> u64 {
        self.claims.get(account).copied().unwrap_or(0)
    }

    /// Whether the account ever completed a deposit
    pub fn contains(&self, account: &Address) -> bool {
        self.claims.contains_key(account)
    }

    /// Number of addressable claims, zero-valued ones included
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, u64)> + '_ {
        self.claims.iter().map(|(k, v)| (k, *v))
    }

    /// Sum of all claims, widened so it cannot overflow
    pub fn sum_of_claims(&self) -> u128 {
        wide_sum(self.claims.values().copied())
    }

    /// Write back a claim staged by the engine.
    ///
    /// Only the router's commit path calls this, after the matching total has
    /// been staged in the same operation.
    pub(crate) fn commit_claim(&mut self, account: &Address, amount: u64) {
        self.claims.insert(*account, amount);
    }

    /// Rebuild a ledger from persisted entries
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Address, u64)>,
    {
        Self {
            claims: entries.into_iter().collect(),
        }
    }
}
