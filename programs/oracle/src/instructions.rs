//! Oracle instruction handlers

use crate::state::{PriceOracle, PRICE_ORACLE_SIZE};
use pinocchio::{
    account_info::AccountInfo,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
    sysvars::{clock::Clock, Sysvar},
    ProgramResult,
};
use harbor_common::InstructionReader;
use pinocchio_log::log;

/// Initialize data: initial_price u64, bump u8
fn parse_initialize(data: &[u8]) -> Result<(u64, u8), ProgramError> {
    let mut reader = InstructionReader::new(data);
    let price = reader.read_u64().map_err(|_| ProgramError::InvalidInstructionData)?;
    let bump = reader.read_u8().map_err(|_| ProgramError::InvalidInstructionData)?;
    Ok((price, bump))
}

/// UpdatePrice data: price u64, confidence u64
fn parse_update_price(data: &[u8]) -> Result<(u64, u64), ProgramError> {
    let mut reader = InstructionReader::new(data);
    let price = reader.read_u64().map_err(|_| ProgramError::InvalidInstructionData)?;
    let confidence = reader.read_u64().map_err(|_| ProgramError::InvalidInstructionData)?;
    Ok((price, confidence))
}

/// Initialize a new price oracle
///
/// Accounts:
/// 0. `[writable]` Oracle account (owned by this program)
/// 1. `[signer]` Authority
/// 2. `[]` Asset mint
///
/// Instruction data:
/// - initial_price: u64 (8 bytes)
/// - bump: u8 (1 byte)
pub fn process_initialize(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let [oracle_account, authority_account, asset_account, ..] = accounts else {
        msg!("Error: Initialize requires 3 accounts");
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    let Ok((initial_price, bump)) = parse_initialize(data) else {
        msg!("Error: Initialize requires 9 bytes of data");
        return Err(ProgramError::InvalidInstructionData);
    };

    if !authority_account.is_signer() {
        msg!("Error: Authority must be signer");
        return Err(ProgramError::MissingRequiredSignature);
    }

    if !oracle_account.is_writable() || !oracle_account.is_owned_by(program_id) {
        msg!("Error: Oracle account must be writable and program-owned");
        return Err(ProgramError::InvalidAccountData);
    }

    let mut oracle_data = oracle_account.try_borrow_mut_data()?;
    if oracle_data.len() < PRICE_ORACLE_SIZE {
        msg!("Error: Oracle account too small");
        return Err(ProgramError::AccountDataTooSmall);
    }

    let oracle = unsafe { &mut *(oracle_data.as_mut_ptr() as *mut PriceOracle) };
    if oracle.validate() {
        msg!("Error: Oracle already initialized");
        return Err(ProgramError::AccountAlreadyInitialized);
    }
    *oracle = PriceOracle::new(
        *authority_account.key(),
        *asset_account.key(),
        initial_price,
        bump,
    );

    log!("Oracle initialized at price {}", initial_price);
    Ok(())
}

/// Update oracle price
///
/// Accounts:
/// 0. `[writable]` Oracle account
/// 1. `[signer]` Authority
///
/// Instruction data:
/// - price: u64 (8 bytes)
/// - confidence: u64 (8 bytes)
pub fn process_update_price(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let [oracle_account, authority_account, ..] = accounts else {
        msg!("Error: UpdatePrice requires 2 accounts");
        return Err(ProgramError::NotEnoughAccountKeys);
    };

    let Ok((price, confidence)) = parse_update_price(data) else {
        msg!("Error: UpdatePrice requires 16 bytes of data");
        return Err(ProgramError::InvalidInstructionData);
    };

    if !authority_account.is_signer() {
        msg!("Error: Authority must be signer");
        return Err(ProgramError::MissingRequiredSignature);
    }

    if !oracle_account.is_writable() || !oracle_account.is_owned_by(program_id) {
        msg!("Error: Oracle account must be writable and program-owned");
        return Err(ProgramError::InvalidAccountData);
    }

    let timestamp = Clock::get()?.unix_timestamp;

    let mut oracle_data = oracle_account.try_borrow_mut_data()?;
    if oracle_data.len() < PRICE_ORACLE_SIZE {
        return Err(ProgramError::AccountDataTooSmall);
    }
    let oracle = unsafe { &mut *(oracle_data.as_mut_ptr() as *mut PriceOracle) };

    if !oracle.validate() {
        msg!("Error: Invalid oracle account");
        return Err(ProgramError::InvalidAccountData);
    }

    if oracle.authority != *authority_account.key() {
        msg!("Error: Invalid authority");
        return Err(ProgramError::InvalidAccountData);
    }

    oracle.update_price(price, timestamp, confidence);

    log!("Price updated to {}", price);
    Ok(())
}
