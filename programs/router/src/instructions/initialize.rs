//! Initialize instruction - bind a router account to its custody, oracle and
//! strategies

use crate::accounts::RouteAccounts;
use crate::pda::derive_authority_pda;
use crate::state::{RouterAccount, StrategyLink};
use harbor_common::{
    borrow_account_data_mut,
    token::{TokenAccountView, TOKEN_PROGRAM_ID},
    validate_key, validate_owner, validate_writable, HarborError,
};
use harbor_model::StrategySlot;
use harbor_oracle::PriceOracle;
use harbor_strategy::PoolAccount;
use pinocchio::{msg, pubkey::Pubkey};

/// One strategy slot as decoded at initialization
pub struct StrategyCandidate {
    pub link: StrategyLink,
    pub pool: Option<PoolAccount>,
    pub pool_owner_ok: bool,
    pub vault: TokenAccountView,
}

/// Cross-account consistency required before a router can be initialized
pub fn check_initialize(
    authority: &Pubkey,
    custody: &TokenAccountView,
    oracle: Option<&PriceOracle>,
    strategies: &[StrategyCandidate; 2],
) -> Result<(), HarborError> {
    if &custody.owner != authority {
        msg!("Error: Custody must be owned by the router authority");
        return Err(HarborError::InvalidTokenAccount);
    }

    let oracle = oracle.ok_or(HarborError::OracleUnavailable)?;
    if oracle.asset != custody.mint {
        msg!("Error: Oracle prices a different asset");
        return Err(HarborError::InvalidAccount);
    }

    for candidate in strategies {
        let pool = candidate.pool.as_ref().ok_or(HarborError::Uninitialized)?;
        if !candidate.pool_owner_ok {
            return Err(HarborError::InvalidAccountOwner);
        }
        if &pool.depositor != authority
            || pool.authority != candidate.link.authority
            || pool.vault != candidate.link.vault
        {
            msg!("Error: Strategy pool is not bound to this router");
            return Err(HarborError::InvalidAccount);
        }
        if candidate.vault.mint != custody.mint || pool.mint != custody.mint {
            msg!("Error: Strategy vault holds a different asset");
            return Err(HarborError::InvalidTokenAccount);
        }
    }

    let [a, b] = strategies;
    if a.link.pool == b.link.pool {
        msg!("Error: Strategies A and B must be distinct pools");
        return Err(HarborError::InvalidAccount);
    }
    Ok(())
}

/// Process initialize instruction
///
/// Records the custody, oracle and strategy accounts on the router account.
/// Mode starts at Farming with nothing deposited. Called once per router.
pub fn process_initialize(program_id: &Pubkey, route: &RouteAccounts) -> Result<(), HarborError> {
    validate_owner(route.router_state, program_id)?;
    validate_writable(route.router_state)?;
    validate_writable(route.custody)?;
    validate_key(route.token_program, &TOKEN_PROGRAM_ID)?;
    validate_owner(route.oracle, &harbor_oracle::ID)?;

    {
        let data = route
            .router_state
            .try_borrow_data()
            .map_err(|_| HarborError::InvalidAccount)?;
        if data.len() < RouterAccount::LEN {
            msg!("Error: Router account has incorrect size");
            return Err(HarborError::AccountDataTooSmall);
        }
        if RouterAccount::from_bytes(&data).is_some() {
            msg!("Error: Router account already initialized");
            return Err(HarborError::AlreadyInitialized);
        }
    }

    let (authority, bump) = derive_authority_pda(route.router_state.key(), program_id);
    if route.authority.key() != &authority {
        msg!("Error: Authority is not the router PDA");
        return Err(HarborError::InvalidPda);
    }

    let custody = TokenAccountView::load(route.custody)?;
    let oracle = {
        let data = route
            .oracle
            .try_borrow_data()
            .map_err(|_| HarborError::OracleUnavailable)?;
        PriceOracle::from_bytes(&data)
    };

    let mut candidates = Vec::with_capacity(2);
    for slot in StrategySlot::ALL {
        let accounts = &route.strategies[slot.index()];
        let pool = {
            let data = accounts
                .pool
                .try_borrow_data()
                .map_err(|_| HarborError::InvalidAccount)?;
            PoolAccount::from_bytes(&data)
        };
        candidates.push(StrategyCandidate {
            link: accounts.link(),
            pool,
            pool_owner_ok: accounts.pool.is_owned_by(accounts.program.key()),
            vault: TokenAccountView::load(accounts.vault)?,
        });
    }
    let strategies: [StrategyCandidate; 2] = candidates
        .try_into()
        .map_err(|_| HarborError::InvalidInstruction)?;

    check_initialize(&authority, &custody, oracle.as_ref(), &strategies)?;

    let router = unsafe { borrow_account_data_mut::<RouterAccount>(route.router_state)? };
    router.initialize_in_place(
        custody.mint,
        authority,
        bump,
        *route.custody.key(),
        *route.oracle.key(),
        strategies.map(|s| s.link),
    );

    msg!("Router initialized successfully");
    Ok(())
}

// Exclude test module from BPF builds
#[cfg(all(test, not(target_os = "solana")))]
#[path = "initialize_test.rs"]
mod initialize_test;
