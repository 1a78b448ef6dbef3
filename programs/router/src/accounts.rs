//! Account list shared by every routing instruction
//!
//! ```text
//! 0. `[writable]` Router account
//! 1. `[]` Custody authority PDA
//! 2. `[writable]` Custody token account
//! 3. `[]` SPL token program
//! 4. `[]` Oracle price account
//! 5..9.  Strategy A: `[]` program, `[writable]` pool, `[]` pool authority, `[writable]` vault
//! 9..13. Strategy B: same as A
//! ```
//!
//! Deposit and withdraw append the depositor accounts after these.

use crate::cpi::{AuthoritySeeds, ChainFeed, ChainPool, ChainToken, ChainVenue, Depositor, PoolHolding};
use crate::state::{RouterAccount, StrategyLink};
use harbor_common::{
    borrow_account_data_mut, token::TOKEN_PROGRAM_ID, validate_key, validate_owner,
    validate_writable, HarborError,
};
use harbor_model::{StrategySlot, VaultState};
use pinocchio::{account_info::AccountInfo, pubkey::Pubkey};

/// Number of accounts in the shared prefix
pub const ROUTE_ACCOUNTS_LEN: usize = 13;

#[derive(Clone, Copy)]
pub struct StrategyAccounts<'a> {
    pub program: &'a AccountInfo,
    pub pool: &'a AccountInfo,
    pub authority: &'a AccountInfo,
    pub vault: &'a AccountInfo,
}

impl StrategyAccounts<'_> {
    /// Keys as recorded on the router account
    pub fn link(&self) -> StrategyLink {
        StrategyLink {
            program: *self.program.key(),
            pool: *self.pool.key(),
            authority: *self.authority.key(),
            vault: *self.vault.key(),
        }
    }

    fn validate(&self, link: &StrategyLink) -> Result<(), HarborError> {
        validate_key(self.program, &link.program)?;
        validate_key(self.pool, &link.pool)?;
        validate_key(self.authority, &link.authority)?;
        validate_key(self.vault, &link.vault)?;
        validate_writable(self.pool)?;
        validate_writable(self.vault)?;
        Ok(())
    }
}

pub struct RouteAccounts<'a> {
    pub router_state: &'a AccountInfo,
    pub authority: &'a AccountInfo,
    pub custody: &'a AccountInfo,
    pub token_program: &'a AccountInfo,
    pub oracle: &'a AccountInfo,
    pub strategies: [StrategyAccounts<'a>; 2],
}

impl<'a> RouteAccounts<'a> {
    /// Split off the shared prefix, returning the remaining accounts
    pub fn parse(accounts: &'a [AccountInfo]) -> Result<(Self, &'a [AccountInfo]), HarborError> {
        let [router_state, authority, custody, token_program, oracle, a_program, a_pool, a_authority, a_vault, b_program, b_pool, b_authority, b_vault, rest @ ..] =
            accounts
        else {
            return Err(HarborError::InvalidInstruction);
        };

        let parsed = Self {
            router_state,
            authority,
            custody,
            token_program,
            oracle,
            strategies: [
                StrategyAccounts {
                    program: a_program,
                    pool: a_pool,
                    authority: a_authority,
                    vault: a_vault,
                },
                StrategyAccounts {
                    program: b_program,
                    pool: b_pool,
                    authority: b_authority,
                    vault: b_vault,
                },
            ],
        };
        Ok((parsed, rest))
    }

    /// Copy out the router account, checking ownership and initialization
    pub fn load_router(&self, program_id: &Pubkey) -> Result<RouterAccount, HarborError> {
        validate_owner(self.router_state, program_id)?;
        let data = self
            .router_state
            .try_borrow_data()
            .map_err(|_| HarborError::InvalidAccount)?;
        RouterAccount::from_bytes(&data).ok_or(HarborError::Uninitialized)
    }

    /// Check every key against what Initialize recorded
    pub fn validate(&self, router: &RouterAccount) -> Result<(), HarborError> {
        validate_writable(self.router_state)?;
        validate_key(self.authority, &router.authority)?;
        validate_key(self.custody, &router.custody)?;
        validate_writable(self.custody)?;
        validate_key(self.token_program, &TOKEN_PROGRAM_ID)?;
        validate_key(self.oracle, &router.oracle)?;
        for slot in StrategySlot::ALL {
            self.strategies[slot.index()].validate(router.link(slot))?;
        }
        Ok(())
    }

    /// Collaborators for the engine
    pub fn venue(&self, router: &RouterAccount, depositor: Option<Depositor<'a>>) -> ChainVenue<'a> {
        let seeds = AuthoritySeeds::new(*self.router_state.key(), router.authority_bump);
        let holdings = self.strategies.map(|s| PoolHolding {
            delegate: s.authority,
            vault: s.vault,
        });
        let token = ChainToken::new(self.custody, self.authority, seeds, depositor, holdings);
        let pools = self.strategies.map(|s| {
            ChainPool::new(
                s.program,
                s.pool,
                s.authority,
                s.vault,
                self.custody,
                self.authority,
                self.token_program,
                seeds,
            )
        });
        ChainVenue::new(*self.custody.key(), token, ChainFeed::new(self.oracle), pools)
    }

    /// Write engine state back to the router account
    pub fn store(&self, state: &VaultState) -> Result<(), HarborError> {
        let router = unsafe { borrow_account_data_mut::<RouterAccount>(self.router_state)? };
        router.store(state);
        Ok(())
    }
}
