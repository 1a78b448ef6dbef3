//! Program derived addresses

use pinocchio::pubkey::{find_program_address, Pubkey};

/// Seed of the PDA that owns router custody
pub const AUTHORITY_SEED: &[u8] = b"authority";

/// Derive the custody authority of a router account
///
/// PDA: ["authority", router_state]
pub fn derive_authority_pda(router_state: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    find_program_address(&[AUTHORITY_SEED, router_state.as_ref()], program_id)
}

/// Seed of the per-depositor claim PDA
pub const CLAIM_SEED: &[u8] = b"claim";

/// Derive the claim account of `depositor` on a router account
///
/// PDA: ["claim", router_state, depositor]
pub fn derive_claim_pda(router_state: &Pubkey, depositor: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    find_program_address(&[CLAIM_SEED, router_state.as_ref(), depositor.as_ref()], program_id)
}
