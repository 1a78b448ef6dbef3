//! Pure model of the Harbor fund router
//!
//! Everything that decides where pooled funds live is here: the claim ledger,
//! the mode state machine and the allocation engine. No Solana dependencies;
//! the on-chain program drives the same engine through CPI-backed
//! implementations of the collaborator traits in [`venue`].

pub mod error;
pub mod math;
pub mod state;
pub mod ledger;
pub mod venue;
pub mod events;
pub mod risk;
pub mod engine;
pub mod router;
pub mod helpers;
pub mod sim;

// Re-export commonly used types
pub use error::*;
pub use state::*;
pub use ledger::Ledger;
pub use venue::*;
pub use events::*;
pub use risk::{simulate_risk, target_mode, DEPEG_THRESHOLD, PRICE_SCALE};
pub use router::Router;
