//! Program derived addresses

use pinocchio::pubkey::{find_program_address, Pubkey};

/// Seed of the PDA that owns a pool vault and acts as token delegate
pub const POOL_SEED: &[u8] = b"pool";

/// PDA: ["pool", pool_state]
pub fn derive_pool_authority(pool_state: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    find_program_address(&[POOL_SEED, pool_state.as_ref()], program_id)
}
