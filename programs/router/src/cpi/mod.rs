//! CPI-backed collaborators
//!
//! The allocation engine in `harbor-model` is written against the
//! [`Venue`](harbor_model::Venue) traits. Here they are implemented over the
//! accounts of the current instruction: token movements become SPL token
//! CPIs signed by the custody authority PDA, strategy calls become CPIs into
//! the strategy programs, and the price is read straight from the oracle
//! account.

pub mod token;
pub mod pool;
pub mod venue;

pub use token::*;
pub use pool::*;
pub use venue::*;

use crate::pda::AUTHORITY_SEED;
use pinocchio::{
    instruction::{Seed, Signer},
    pubkey::Pubkey,
};

/// Signer seeds of the custody authority PDA
#[derive(Debug, Clone, Copy)]
pub struct AuthoritySeeds {
    router: Pubkey,
    bump: [u8; 1],
}

impl AuthoritySeeds {
    pub fn new(router: Pubkey, bump: u8) -> Self {
        Self {
            router,
            bump: [bump],
        }
    }

    /// Run `f` with the authority signature available
    pub fn signed<R>(&self, f: impl FnOnce(&[Signer]) -> R) -> R {
        let seeds = [
            Seed::from(AUTHORITY_SEED),
            Seed::from(&self.router),
            Seed::from(&self.bump),
        ];
        let signer = Signer::from(&seeds);
        f(&[signer])
    }
}
