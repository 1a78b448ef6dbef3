//! Router instruction handlers

pub mod initialize;
pub mod initialize_claim;
pub mod deposit;
pub mod withdraw;
pub mod rebalance;
pub mod simulate_risk;

pub use initialize::*;
pub use initialize_claim::*;
pub use deposit::*;
pub use withdraw::*;
pub use rebalance::*;
pub use simulate_risk::*;

use harbor_common::HarborError;

/// Instruction discriminator
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterInstruction {
    /// Record custody, oracle and strategy accounts
    Initialize = 0,
    /// Bind a zero claim to a depositor
    InitializeClaim = 1,
    /// Deposit the pooled asset
    Deposit = 2,
    /// Withdraw against a claim
    Withdraw = 3,
    /// Move the pool to the strategy the price calls for (permissionless)
    Rebalance = 4,
    /// Report whether a price is below the depeg threshold
    SimulateRisk = 5,
}

impl TryFrom<u8> for RouterInstruction {
    type Error = HarborError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RouterInstruction::Initialize),
            1 => Ok(RouterInstruction::InitializeClaim),
            2 => Ok(RouterInstruction::Deposit),
            3 => Ok(RouterInstruction::Withdraw),
            4 => Ok(RouterInstruction::Rebalance),
            5 => Ok(RouterInstruction::SimulateRisk),
            _ => Err(HarborError::InvalidInstruction),
        }
    }
}

// Note: account parsing and validation happen in entrypoint.rs; the
// functions in this module run once the accounts are known to be the ones
// recorded on the router account.

#[cfg(all(test, not(target_os = "solana")))]
mod tests {
    use super::*;

    #[test]
    fn test_discriminators() {
        for ix in [
            RouterInstruction::Initialize,
            RouterInstruction::InitializeClaim,
            RouterInstruction::Deposit,
            RouterInstruction::Withdraw,
            RouterInstruction::Rebalance,
            RouterInstruction::SimulateRisk,
        ] {
            assert_eq!(RouterInstruction::try_from(ix as u8), Ok(ix));
        }
        assert_eq!(
            RouterInstruction::try_from(6),
            Err(HarborError::InvalidInstruction)
        );
    }
}
