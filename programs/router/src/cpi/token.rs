//! Pooled asset backed by SPL token CPIs

use super::AuthoritySeeds;
use harbor_common::token::{approve, token_balance, transfer};
use harbor_model::{Address, AssetToken};
use pinocchio::account_info::AccountInfo;

/// Depositor side of a deposit or withdraw
#[derive(Clone, Copy)]
pub struct Depositor<'a> {
    /// Wallet, signer of the instruction
    pub wallet: &'a AccountInfo,
    /// Wallet's token account for the pooled asset
    pub token: &'a AccountInfo,
}

/// A strategy as seen by the token: the delegate the router approves and the
/// vault the delegate moves funds into
#[derive(Clone, Copy)]
pub struct PoolHolding<'a> {
    pub delegate: &'a AccountInfo,
    pub vault: &'a AccountInfo,
}

pub struct ChainToken<'a> {
    custody: &'a AccountInfo,
    authority: &'a AccountInfo,
    seeds: AuthoritySeeds,
    depositor: Option<Depositor<'a>>,
    pools: [PoolHolding<'a>; 2],
}

impl<'a> ChainToken<'a> {
    pub fn new(
        custody: &'a AccountInfo,
        authority: &'a AccountInfo,
        seeds: AuthoritySeeds,
        depositor: Option<Depositor<'a>>,
        pools: [PoolHolding<'a>; 2],
    ) -> Self {
        Self {
            custody,
            authority,
            seeds,
            depositor,
            pools,
        }
    }

    fn depositor_for(&self, wallet: &Address) -> Option<Depositor<'a>> {
        self.depositor.filter(|d| d.wallet.key() == wallet)
    }
}

impl AssetToken for ChainToken<'_> {
    fn transfer_from(&mut self, from: &Address, to: &Address, amount: u64) -> bool {
        let Some(depositor) = self.depositor_for(from) else {
            return false;
        };
        if self.custody.key() != to {
            return false;
        }
        // The wallet signed the outer instruction.
        transfer(depositor.token, self.custody, depositor.wallet, amount, &[]).is_ok()
    }

    fn transfer(&mut self, to: &Address, amount: u64) -> bool {
        let Some(depositor) = self.depositor_for(to) else {
            return false;
        };
        self.seeds.signed(|signers| {
            transfer(self.custody, depositor.token, self.authority, amount, signers).is_ok()
        })
    }

    fn approve(&mut self, spender: &Address, amount: u64) -> bool {
        let Some(pool) = self.pools.iter().find(|p| p.delegate.key() == spender) else {
            return false;
        };
        self.seeds.signed(|signers| {
            approve(self.custody, pool.delegate, self.authority, amount, signers).is_ok()
        })
    }

    fn balance_of(&self, account: &Address) -> u64 {
        if self.custody.key() == account {
            return token_balance(self.custody);
        }
        if let Some(pool) = self.pools.iter().find(|p| p.delegate.key() == account) {
            return token_balance(pool.vault);
        }
        match self.depositor_for(account) {
            Some(depositor) => token_balance(depositor.token),
            None => 0,
        }
    }
}
