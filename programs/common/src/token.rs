//! Read-only view of SPL token accounts and instruction packing for the
//! token program calls the Harbor programs make.

use crate::error::HarborError;
use crate::instruction::pack_u64;
use pinocchio::{
    account_info::AccountInfo,
    cpi::invoke_signed,
    instruction::{AccountMeta, Instruction, Signer},
    pubkey::Pubkey,
    ProgramResult,
};

/// SPL token program id
pub const TOKEN_PROGRAM_ID: Pubkey = pinocchio_pubkey::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// Size of an SPL token account
pub const TOKEN_ACCOUNT_LEN: usize = 165;

/// SPL token instruction tags
pub const TOKEN_IX_TRANSFER: u8 = 3;
pub const TOKEN_IX_APPROVE: u8 = 4;

const MINT_OFFSET: usize = 0;
const OWNER_OFFSET: usize = 32;
const AMOUNT_OFFSET: usize = 64;

/// Fields of a token account the programs care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccountView {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub amount: u64,
}

impl TokenAccountView {
    /// Decode from raw account data
    pub fn from_bytes(data: &[u8]) -> Result<Self, HarborError> {
        if data.len() < TOKEN_ACCOUNT_LEN {
            return Err(HarborError::InvalidTokenAccount);
        }
        let mut mint = [0u8; 32];
        mint.copy_from_slice(&data[MINT_OFFSET..MINT_OFFSET + 32]);
        let mut owner = [0u8; 32];
        owner.copy_from_slice(&data[OWNER_OFFSET..OWNER_OFFSET + 32]);
        let mut amount = [0u8; 8];
        amount.copy_from_slice(&data[AMOUNT_OFFSET..AMOUNT_OFFSET + 8]);
        Ok(Self {
            mint,
            owner,
            amount: u64::from_le_bytes(amount),
        })
    }

    /// Decode a token-program-owned account
    pub fn load(account: &AccountInfo) -> Result<Self, HarborError> {
        if !account.is_owned_by(&TOKEN_PROGRAM_ID) {
            return Err(HarborError::InvalidTokenAccount);
        }
        let data = account
            .try_borrow_data()
            .map_err(|_| HarborError::InvalidTokenAccount)?;
        Self::from_bytes(&data)
    }
}

/// Balance of a token account, zero if it cannot be decoded
pub fn token_balance(account: &AccountInfo) -> u64 {
    TokenAccountView::load(account).map_or(0, |view| view.amount)
}

/// SPL `Transfer` of `amount` from `from` to `to`, signed by `authority`
/// (directly or through `signers` when it is a PDA).
pub fn transfer(
    from: &AccountInfo,
    to: &AccountInfo,
    authority: &AccountInfo,
    amount: u64,
    signers: &[Signer],
) -> ProgramResult {
    let metas = [
        AccountMeta::writable(from.key()),
        AccountMeta::writable(to.key()),
        AccountMeta::readonly_signer(authority.key()),
    ];
    let data = pack_u64(TOKEN_IX_TRANSFER, amount);
    let ix = Instruction {
        program_id: &TOKEN_PROGRAM_ID,
        accounts: &metas,
        data: &data,
    };
    invoke_signed(&ix, &[from, to, authority], signers)
}

/// SPL `Approve`: let `delegate` move up to `amount` out of `source`
pub fn approve(
    source: &AccountInfo,
    delegate: &AccountInfo,
    owner: &AccountInfo,
    amount: u64,
    signers: &[Signer],
) -> ProgramResult {
    let metas = [
        AccountMeta::writable(source.key()),
        AccountMeta::readonly(delegate.key()),
        AccountMeta::readonly_signer(owner.key()),
    ];
    let data = pack_u64(TOKEN_IX_APPROVE, amount);
    let ix = Instruction {
        program_id: &TOKEN_PROGRAM_ID,
        accounts: &metas,
        data: &data,
    };
    invoke_signed(&ix, &[source, delegate, owner], signers)
}
