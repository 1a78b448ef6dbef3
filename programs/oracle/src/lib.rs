//! Harbor Oracle Program
//!
//! Publishes the price of the pooled asset against its peg. The router reads
//! the price account directly; nothing here calls back into the router.
//!
//! ## Instructions
//!
//! - **Initialize** (0): Create a price account for an asset mint
//! - **UpdatePrice** (1): Publish a new price (authority only)
//!
//! ## Account Structure
//!
//! ```text
//! PriceOracle (128 bytes):
//!   magic: u64           - Magic bytes for validation
//!   version: u8          - Version (currently 0)
//!   bump: u8             - PDA bump seed
//!   authority: Pubkey    - Who can update prices
//!   asset: Pubkey        - Mint of the priced asset
//!   price: u64           - Current price (1_000_000 == peg)
//!   timestamp: i64       - Last update time
//!   confidence: u64      - Price confidence interval
//! ```

#![cfg_attr(target_os = "solana", no_std)]

// Always expose entrypoint for testing
pub mod entrypoint;

pub mod instructions;
pub mod state;

// Panic handler for no_std builds (only for Solana BPF)
#[cfg(all(target_os = "solana", feature = "bpf-entrypoint", not(test)))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}

pub use state::{PriceOracle, PRICE_ORACLE_SIZE};

pinocchio_pubkey::declare_id!("HrbPrice5tYpLqW2ZxMvB8nKcJdR4sFgHaUwEe7Tnq3");
