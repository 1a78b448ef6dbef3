//! Strategy pool backed by CPIs into a strategy program

use super::AuthoritySeeds;
use harbor_common::{pack_u64, token::token_balance};
use harbor_model::{Address, RouteError, RouteResult, StrategyPool};
use harbor_strategy::instructions::StrategyInstruction;
use pinocchio::{
    account_info::AccountInfo,
    cpi::{invoke, invoke_signed},
    instruction::{AccountMeta, Instruction},
    msg,
};

pub struct ChainPool<'a> {
    program: &'a AccountInfo,
    pool: &'a AccountInfo,
    authority: &'a AccountInfo,
    vault: &'a AccountInfo,
    custody: &'a AccountInfo,
    router_authority: &'a AccountInfo,
    token_program: &'a AccountInfo,
    seeds: AuthoritySeeds,
}

impl<'a> ChainPool<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        program: &'a AccountInfo,
        pool: &'a AccountInfo,
        authority: &'a AccountInfo,
        vault: &'a AccountInfo,
        custody: &'a AccountInfo,
        router_authority: &'a AccountInfo,
        token_program: &'a AccountInfo,
        seeds: AuthoritySeeds,
    ) -> Self {
        Self {
            program,
            pool,
            authority,
            vault,
            custody,
            router_authority,
            token_program,
            seeds,
        }
    }
}

impl StrategyPool for ChainPool<'_> {
    fn address(&self) -> Address {
        *self.authority.key()
    }

    /// Strategy pulls `amount` out of custody with the approval just granted
    fn deposit(&mut self, amount: u64) -> RouteResult<()> {
        let metas = [
            AccountMeta::writable(self.pool.key()),
            AccountMeta::readonly(self.authority.key()),
            AccountMeta::writable(self.vault.key()),
            AccountMeta::writable(self.custody.key()),
            AccountMeta::readonly(self.token_program.key()),
        ];
        let data = pack_u64(StrategyInstruction::Deposit as u8, amount);
        let ix = Instruction {
            program_id: self.program.key(),
            accounts: &metas,
            data: &data,
        };
        invoke(
            &ix,
            &[self.pool, self.authority, self.vault, self.custody, self.token_program],
        )
        .map_err(|_| {
            msg!("Error: strategy deposit failed");
            RouteError::StrategyRejected
        })
    }

    /// Amount returned is measured on custody, not taken from the strategy
    fn withdraw_all(&mut self) -> RouteResult<u64> {
        let before = token_balance(self.custody);

        let metas = [
            AccountMeta::writable(self.pool.key()),
            AccountMeta::readonly(self.authority.key()),
            AccountMeta::writable(self.vault.key()),
            AccountMeta::writable(self.custody.key()),
            AccountMeta::readonly_signer(self.router_authority.key()),
            AccountMeta::readonly(self.token_program.key()),
        ];
        let data = [StrategyInstruction::WithdrawAll as u8];
        let ix = Instruction {
            program_id: self.program.key(),
            accounts: &metas,
            data: &data,
        };
        self.seeds
            .signed(|signers| {
                invoke_signed(
                    &ix,
                    &[
                        self.pool,
                        self.authority,
                        self.vault,
                        self.custody,
                        self.router_authority,
                        self.token_program,
                    ],
                    signers,
                )
            })
            .map_err(|_| {
                msg!("Error: strategy withdrawal failed");
                RouteError::StrategyRejected
            })?;

        let after = token_balance(self.custody);
        after.checked_sub(before).ok_or(RouteError::StrategyRejected)
    }
}
