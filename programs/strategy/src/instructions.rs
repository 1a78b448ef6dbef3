//! Strategy instructions - initialize, deposit and withdraw_all

use crate::pda::{derive_pool_authority, POOL_SEED};
use crate::state::PoolAccount;
use harbor_common::{
    borrow_account_data_mut,
    token::{token_balance, transfer, TokenAccountView, TOKEN_PROGRAM_ID},
    validate_key, validate_owner, validate_signer, validate_writable, HarborError,
};
use pinocchio::{
    account_info::AccountInfo,
    cpi::set_return_data,
    instruction::{Seed, Signer},
    msg,
    pubkey::Pubkey,
    ProgramResult,
};
use pinocchio_log::log;

/// Instruction discriminator
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyInstruction {
    Initialize = 0,
    Deposit = 1,
    WithdrawAll = 2,
}

impl TryFrom<u8> for StrategyInstruction {
    type Error = HarborError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(StrategyInstruction::Initialize),
            1 => Ok(StrategyInstruction::Deposit),
            2 => Ok(StrategyInstruction::WithdrawAll),
            _ => Err(HarborError::InvalidInstruction),
        }
    }
}

/// Load a pool account and make sure `authority` and `vault` are its own
fn load_pool<'a>(
    program_id: &Pubkey,
    pool_account: &'a AccountInfo,
    authority: &AccountInfo,
    vault: &AccountInfo,
) -> Result<&'a mut PoolAccount, HarborError> {
    validate_owner(pool_account, program_id)?;
    validate_writable(pool_account)?;
    validate_writable(vault)?;

    let pool = unsafe { borrow_account_data_mut::<PoolAccount>(pool_account)? };
    if !pool.is_initialized() {
        return Err(HarborError::Uninitialized);
    }
    validate_key(authority, &pool.authority)?;
    validate_key(vault, &pool.vault)?;
    Ok(pool)
}

/// Move `amount` out of `from` with the pool authority signing
fn transfer_as_pool(
    pool_key: &Pubkey,
    bump: u8,
    from: &AccountInfo,
    to: &AccountInfo,
    authority: &AccountInfo,
    amount: u64,
) -> ProgramResult {
    let bump = [bump];
    let seeds = [
        Seed::from(POOL_SEED),
        Seed::from(pool_key),
        Seed::from(&bump),
    ];
    let signer = Signer::from(&seeds);
    transfer(from, to, authority, amount, &[signer])
}

/// Initialize a pool
///
/// Accounts:
/// 0. `[writable]` Pool account (owned by this program)
/// 1. `[]` Pool authority PDA
/// 2. `[]` Vault token account, owned by the pool authority
/// 3. `[]` Depositor (the router's custody authority)
pub fn process_initialize(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let [pool_account, authority, vault, depositor, ..] = accounts else {
        msg!("Error: Initialize requires 4 accounts");
        return Err(HarborError::InvalidInstruction.into());
    };

    validate_owner(pool_account, program_id)?;
    validate_writable(pool_account)?;

    let (expected, bump) = derive_pool_authority(pool_account.key(), program_id);
    if authority.key() != &expected {
        msg!("Error: Pool authority is not the expected PDA");
        return Err(HarborError::InvalidPda.into());
    }

    let vault_view = TokenAccountView::load(vault)?;
    if vault_view.owner != expected {
        msg!("Error: Vault must be owned by the pool authority");
        return Err(HarborError::InvalidTokenAccount.into());
    }

    let pool = unsafe { borrow_account_data_mut::<PoolAccount>(pool_account)? };
    if pool.is_initialized() {
        msg!("Error: Pool already initialized");
        return Err(HarborError::AlreadyInitialized.into());
    }
    pool.initialize_in_place(expected, bump, *depositor.key(), vault_view.mint, *vault.key());

    msg!("Pool initialized");
    Ok(())
}

/// Pull `amount` from the depositor's token account into the vault using the
/// delegate approval held by the pool authority
///
/// Accounts:
/// 0. `[writable]` Pool account
/// 1. `[]` Pool authority PDA
/// 2. `[writable]` Vault token account
/// 3. `[writable]` Source token account, owned by the depositor
/// 4. `[]` SPL token program
pub fn process_deposit(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    let [pool_account, authority, vault, source, token_program, ..] = accounts else {
        msg!("Error: Deposit requires 5 accounts");
        return Err(HarborError::InvalidInstruction.into());
    };

    if amount == 0 {
        return Err(HarborError::InvalidAmount.into());
    }

    let pool = load_pool(program_id, pool_account, authority, vault)?;
    validate_key(token_program, &TOKEN_PROGRAM_ID)?;
    validate_writable(source)?;

    let source_view = TokenAccountView::load(source)?;
    if source_view.owner != pool.depositor || source_view.mint != pool.mint {
        msg!("Error: Source is not the depositor's token account");
        return Err(HarborError::InvalidTokenAccount.into());
    }

    pool.record_deposit(amount).ok_or(HarborError::Overflow)?;
    transfer_as_pool(
        pool_account.key(),
        pool.authority_bump,
        source,
        vault,
        authority,
        amount,
    )?;

    log!("Pool deposit {}", amount);
    Ok(())
}

/// Send the vault's entire balance back to the depositor.
/// The amount is published as return data (u64 LE).
///
/// Accounts:
/// 0. `[writable]` Pool account
/// 1. `[]` Pool authority PDA
/// 2. `[writable]` Vault token account
/// 3. `[writable]` Destination token account, owned by the depositor
/// 4. `[signer]` Depositor
/// 5. `[]` SPL token program
pub fn process_withdraw_all(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let [pool_account, authority, vault, destination, depositor, token_program, ..] = accounts
    else {
        msg!("Error: WithdrawAll requires 6 accounts");
        return Err(HarborError::InvalidInstruction.into());
    };

    let pool = load_pool(program_id, pool_account, authority, vault)?;
    validate_key(token_program, &TOKEN_PROGRAM_ID)?;
    validate_key(depositor, &pool.depositor)?;
    validate_signer(depositor)?;
    validate_writable(destination)?;

    let destination_view = TokenAccountView::load(destination)?;
    if destination_view.owner != pool.depositor {
        msg!("Error: Destination is not the depositor's token account");
        return Err(HarborError::InvalidTokenAccount.into());
    }

    let held = token_balance(vault);
    pool.record_withdrawal(held).ok_or(HarborError::Overflow)?;
    if held > 0 {
        transfer_as_pool(
            pool_account.key(),
            pool.authority_bump,
            vault,
            destination,
            authority,
            held,
        )?;
    }

    set_return_data(&held.to_le_bytes());
    log!("Pool withdraw_all {}", held);
    Ok(())
}
