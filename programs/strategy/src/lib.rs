//! Harbor Strategy Program
//!
//! A yield pool the router parks the whole pooled balance in. The pool only
//! knows two moves: pull a delegated amount out of the depositor's token
//! account, and send everything it holds back. Whatever else lands in the
//! vault (yield) goes back with it.
//!
//! Deployed once and initialized twice: strategy A for Farming, strategy B
//! for Defensive.
//!
//! ## Instructions
//!
//! - **Initialize** (0): Bind a pool to its vault and depositor
//! - **Deposit** (1): Pull `amount` from the depositor using the delegate approval
//! - **WithdrawAll** (2): Return the vault's entire balance (depositor only)

#![cfg_attr(target_os = "solana", no_std)]

pub mod entrypoint;
pub mod instructions;
pub mod pda;
pub mod state;

// Panic handler for no_std builds (only for Solana BPF)
#[cfg(all(target_os = "solana", feature = "bpf-entrypoint", not(test)))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

pub use state::*;

pinocchio_pubkey::declare_id!("HrbStrat3gyVpQm7XkZ2wLbN9cJtRsDfGaUhYe4KoPn");
