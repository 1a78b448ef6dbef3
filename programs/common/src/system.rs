//! System program calls: account creation for program-derived accounts

use pinocchio::{
    account_info::AccountInfo,
    cpi::invoke_signed,
    instruction::{AccountMeta, Instruction, Signer},
    pubkey::Pubkey,
    ProgramResult,
};

/// System program id
pub const SYSTEM_PROGRAM_ID: Pubkey = [0u8; 32];

/// System instruction tag for `CreateAccount`
pub const SYSTEM_IX_CREATE_ACCOUNT: u32 = 0;

/// `CreateAccount` data: tag u32, lamports u64, space u64, owner
pub fn pack_create_account(lamports: u64, space: u64, owner: &Pubkey) -> [u8; 52] {
    let mut data = [0u8; 52];
    data[0..4].copy_from_slice(&SYSTEM_IX_CREATE_ACCOUNT.to_le_bytes());
    data[4..12].copy_from_slice(&lamports.to_le_bytes());
    data[12..20].copy_from_slice(&space.to_le_bytes());
    data[20..52].copy_from_slice(owner);
    data
}

/// Create `new_account` with `space` bytes owned by `owner`, funded by
/// `payer`. `new_account` signs through `signers` when it is a PDA.
pub fn create_account(
    payer: &AccountInfo,
    new_account: &AccountInfo,
    lamports: u64,
    space: u64,
    owner: &Pubkey,
    signers: &[Signer],
) -> ProgramResult {
    let metas = [
        AccountMeta::writable_signer(payer.key()),
        AccountMeta::writable_signer(new_account.key()),
    ];
    let data = pack_create_account(lamports, space, owner);
    let ix = Instruction {
        program_id: &SYSTEM_PROGRAM_ID,
        accounts: &metas,
        data: &data,
    };
    invoke_signed(&ix, &[payer, new_account], signers)
}
