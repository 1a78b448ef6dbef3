//! Router program entrypoint

use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey, ProgramResult};

use crate::accounts::RouteAccounts;
use crate::cpi::Depositor;
use crate::instructions::{
    process_deposit, process_initialize, process_initialize_claim, process_rebalance,
    process_simulate_risk, process_withdraw, RouterInstruction,
};
use crate::state::ClaimAccount;
use harbor_common::{
    token::TokenAccountView, validate_key, validate_owner, validate_signer, validate_writable,
    HarborError, InstructionReader, SYSTEM_PROGRAM_ID,
};

#[cfg(feature = "bpf-entrypoint")]
use pinocchio::entrypoint;

#[cfg(feature = "bpf-entrypoint")]
entrypoint!(process_instruction);

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let mut reader = InstructionReader::new(instruction_data);
    let Ok(instruction) = reader.read_u8().and_then(RouterInstruction::try_from) else {
        msg!("Error: Unknown instruction");
        return Err(HarborError::InvalidInstruction.into());
    };

    match instruction {
        RouterInstruction::Initialize => {
            msg!("Instruction: Initialize");
            reader.finish()?;
            process_initialize_inner(program_id, accounts)
        }
        RouterInstruction::InitializeClaim => {
            msg!("Instruction: InitializeClaim");
            reader.finish()?;
            process_initialize_claim_inner(program_id, accounts)
        }
        RouterInstruction::Deposit => {
            msg!("Instruction: Deposit");
            let amount = reader.read_u64()?;
            reader.finish()?;
            process_deposit_inner(program_id, accounts, amount)
        }
        RouterInstruction::Withdraw => {
            msg!("Instruction: Withdraw");
            let amount = reader.read_u64()?;
            reader.finish()?;
            process_withdraw_inner(program_id, accounts, amount)
        }
        RouterInstruction::Rebalance => {
            msg!("Instruction: Rebalance");
            reader.finish()?;
            process_rebalance_inner(program_id, accounts)
        }
        RouterInstruction::SimulateRisk => {
            msg!("Instruction: SimulateRisk");
            let price = reader.read_u64()?;
            reader.finish()?;
            process_simulate_risk(price)
        }
    }
}

// Instruction processors with account validation

/// Process initialize instruction
///
/// Expected accounts: the shared routing prefix (see [`crate::accounts`]),
/// with the router account program-owned, sized and still zeroed.
fn process_initialize_inner(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let (route, _) = RouteAccounts::parse(accounts)?;
    process_initialize(program_id, &route)?;
    Ok(())
}

/// Process initialize claim instruction
///
/// Expected accounts:
/// 0. `[writable]` Router account
/// 1. `[writable]` Claim PDA ["claim", router, depositor], not yet created
/// 2. `[writable, signer]` Depositor (pays for the claim account)
/// 3. `[]` System program
fn process_initialize_claim_inner(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let [router_account, claim_account, depositor, system_program, ..] = accounts else {
        msg!("Error: InitializeClaim requires 4 accounts");
        return Err(HarborError::InvalidInstruction.into());
    };

    validate_owner(router_account, program_id)?;
    validate_writable(router_account)?;
    validate_writable(claim_account)?;
    validate_signer(depositor)?;
    validate_writable(depositor)?;
    validate_key(system_program, &SYSTEM_PROGRAM_ID)?;

    process_initialize_claim(program_id, router_account, claim_account, depositor)?;
    Ok(())
}

/// Accounts after the routing prefix for deposit and withdraw
///
/// 13. `[writable]` Claim account of the depositor
/// 14. `[signer]` Depositor
/// 15. `[writable]` Depositor token account
fn parse_depositor<'a>(
    program_id: &Pubkey,
    route: &RouteAccounts<'a>,
    rest: &'a [AccountInfo],
) -> Result<(&'a AccountInfo, Depositor<'a>), HarborError> {
    let [claim_account, wallet, token, ..] = rest else {
        msg!("Error: Missing depositor accounts");
        return Err(HarborError::InvalidInstruction);
    };

    validate_owner(claim_account, program_id)?;
    validate_writable(claim_account)?;
    validate_signer(wallet)?;
    validate_writable(token)?;

    {
        let data = claim_account
            .try_borrow_data()
            .map_err(|_| HarborError::InvalidAccount)?;
        let claim = ClaimAccount::from_bytes(&data).ok_or(HarborError::Uninitialized)?;
        claim.check_binding(route.router_state.key(), wallet.key())?;
    }

    let view = TokenAccountView::load(token)?;
    if &view.owner != wallet.key() {
        msg!("Error: Token account does not belong to the depositor");
        return Err(HarborError::InvalidTokenAccount);
    }

    Ok((claim_account, Depositor { wallet, token }))
}

/// Process deposit instruction
///
/// Expected accounts: routing prefix + depositor accounts.
///
/// Expected data layout (8 bytes):
/// - amount: u64
fn process_deposit_inner(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    let (route, rest) = RouteAccounts::parse(accounts)?;
    let router = route.load_router(program_id)?;
    route.validate(&router)?;
    let (claim_account, depositor) = parse_depositor(program_id, &route, rest)?;

    if TokenAccountView::load(depositor.token)?.mint != router.mint {
        return Err(HarborError::InvalidTokenAccount.into());
    }

    process_deposit(&route, &router, claim_account, depositor, amount)?;

    msg!("Deposit processed successfully");
    Ok(())
}

/// Process withdraw instruction
///
/// Expected accounts: routing prefix + depositor accounts.
///
/// Expected data layout (8 bytes):
/// - amount: u64
fn process_withdraw_inner(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    let (route, rest) = RouteAccounts::parse(accounts)?;
    let router = route.load_router(program_id)?;
    route.validate(&router)?;
    let (claim_account, depositor) = parse_depositor(program_id, &route, rest)?;

    process_withdraw(&route, &router, claim_account, depositor, amount)?;

    msg!("Withdraw processed successfully");
    Ok(())
}

/// Process rebalance instruction (no signer required)
///
/// Expected accounts: routing prefix.
fn process_rebalance_inner(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let (route, _) = RouteAccounts::parse(accounts)?;
    let router = route.load_router(program_id)?;
    route.validate(&router)?;

    process_rebalance(&route, &router)?;

    msg!("Rebalance processed successfully");
    Ok(())
}
