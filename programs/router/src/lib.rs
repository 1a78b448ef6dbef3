//! Harbor Router Program
//!
//! Custodial router for one pooled asset. Depositors hold claims redeemable
//! 1:1; the pooled balance sits in strategy A (Farming), strategy B
//! (Defensive) or router custody (Emergency). Anyone may call Rebalance to
//! move the whole pool when the oracle price crosses the depeg threshold.
//!
//! The allocation logic lives in `harbor-model`; this crate supplies the
//! account layouts and the CPI-backed collaborators it runs against.

pub mod accounts;
pub mod cpi;
pub mod error;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;

// Always expose entrypoint for testing, but only register as entrypoint when feature enabled
pub mod entrypoint;

pub use state::*;
pub use instructions::*;

pinocchio_pubkey::declare_id!("HrbRoutr9xWq4Zk7VmB3yPeN6cJtLsDfGaQhUw2KoEn");
