//! InitializeClaim instruction - open a zero claim for a depositor

use crate::pda::{derive_claim_pda, CLAIM_SEED};
use crate::state::{ClaimAccount, RouterAccount};
use harbor_common::{borrow_account_data_mut, create_account, HarborError};
use pinocchio::{
    account_info::AccountInfo,
    instruction::{Seed, Signer},
    msg,
    pubkey::Pubkey,
    sysvars::{rent::Rent, Sysvar},
};

/// The claim must be a distinct account from the router it is opened against
pub fn check_claim_distinct(router: &Pubkey, claim: &Pubkey) -> Result<(), HarborError> {
    if router == claim {
        msg!("Error: Claim account cannot be the router account");
        return Err(HarborError::InvalidAccount);
    }
    Ok(())
}

/// The claim slot must not exist yet: one claim per (router, depositor)
pub fn check_claim_vacant(owned_by_program: bool, data_len: usize) -> Result<(), HarborError> {
    if owned_by_program {
        msg!("Error: Claim already initialized");
        return Err(HarborError::AlreadyInitialized);
    }
    if data_len != 0 {
        return Err(HarborError::InvalidAccount);
    }
    Ok(())
}

/// The claim must sit at the derived address
pub fn check_claim_address(claim: &Pubkey, expected: &Pubkey) -> Result<(), HarborError> {
    if claim != expected {
        msg!("Error: Claim account is not the correct PDA");
        return Err(HarborError::InvalidPda);
    }
    Ok(())
}

/// Create the claim PDA of `depositor`, bind it to the router with a zero
/// amount and bump the router's depositor count.
///
/// Accounts are already validated by the caller: router owned by this
/// program and writable, claim writable, depositor a writable signer.
pub fn process_initialize_claim(
    program_id: &Pubkey,
    router_account: &AccountInfo,
    claim_account: &AccountInfo,
    depositor: &AccountInfo,
) -> Result<(), HarborError> {
    check_claim_distinct(router_account.key(), claim_account.key())?;

    {
        let data = router_account
            .try_borrow_data()
            .map_err(|_| HarborError::InvalidAccount)?;
        if RouterAccount::from_bytes(&data).is_none() {
            return Err(HarborError::Uninitialized);
        }
    }

    check_claim_vacant(claim_account.is_owned_by(program_id), claim_account.data_len())?;

    let (expected, bump) = derive_claim_pda(router_account.key(), depositor.key(), program_id);
    check_claim_address(claim_account.key(), &expected)?;

    let lamports = Rent::get()
        .map_err(|_| HarborError::InvalidAccount)?
        .minimum_balance(ClaimAccount::LEN);
    let bump_seed = [bump];
    let seeds = [
        Seed::from(CLAIM_SEED),
        Seed::from(router_account.key()),
        Seed::from(depositor.key()),
        Seed::from(&bump_seed),
    ];
    create_account(
        depositor,
        claim_account,
        lamports,
        ClaimAccount::LEN as u64,
        program_id,
        &[Signer::from(&seeds)],
    )
    .map_err(|_| HarborError::InvalidAccount)?;

    let claim = unsafe { borrow_account_data_mut::<ClaimAccount>(claim_account)? };
    claim.initialize_in_place(*router_account.key(), *depositor.key(), bump);

    let router = unsafe { borrow_account_data_mut::<RouterAccount>(router_account)? };
    router.depositor_count = router
        .depositor_count
        .checked_add(1)
        .ok_or(HarborError::Overflow)?;

    msg!("Claim initialized");
    Ok(())
}
