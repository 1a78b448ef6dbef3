//! Program error codes shared by the Harbor programs

use pinocchio::program_error::ProgramError;

/// Errors surfaced by the Harbor programs as `ProgramError::Custom(code)`.
///
/// Codes are stable; clients match on them.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarborError {
    // Instruction / account validation
    InvalidInstruction = 0,
    InvalidAccount = 1,
    InvalidAccountOwner = 2,
    AccountNotWritable = 3,
    MissingSignature = 4,
    AccountDataTooSmall = 5,
    AlreadyInitialized = 6,
    Uninitialized = 7,
    InvalidPda = 8,
    InvalidTokenAccount = 9,

    // Routing
    InvalidAmount = 100,
    InsufficientBalance = 101,
    TransferFailed = 102,
    ApprovalFailed = 103,
    InsufficientStrategyFunds = 104,
    InsufficientVaultBalance = 105,
    StrategyRejected = 106,
    OracleUnavailable = 107,
    Overflow = 108,
}

impl HarborError {
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Reverse of [`HarborError::code`]
    pub fn from_code(code: u32) -> Option<Self> {
        use HarborError::*;
        let err = match code {
            0 => InvalidInstruction,
            1 => InvalidAccount,
            2 => InvalidAccountOwner,
            3 => AccountNotWritable,
            4 => MissingSignature,
            5 => AccountDataTooSmall,
            6 => AlreadyInitialized,
            7 => Uninitialized,
            8 => InvalidPda,
            9 => InvalidTokenAccount,
            100 => InvalidAmount,
            101 => InsufficientBalance,
            102 => TransferFailed,
            103 => ApprovalFailed,
            104 => InsufficientStrategyFunds,
            105 => InsufficientVaultBalance,
            106 => StrategyRejected,
            107 => OracleUnavailable,
            108 => Overflow,
            _ => return None,
        };
        Some(err)
    }
}

impl From<HarborError> for ProgramError {
    fn from(e: HarborError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
