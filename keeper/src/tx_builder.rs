//! Instruction and transaction builders for the router program

use anyhow::{Context, Result};
use harbor_router::{RouterAccount, RouterInstruction};
use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::Transaction,
};

fn key(bytes: &[u8; 32]) -> Pubkey {
    Pubkey::new_from_array(*bytes)
}

/// The 13-account prefix every routing instruction starts with
pub fn route_account_metas(router_state: &Pubkey, router: &RouterAccount) -> Vec<AccountMeta> {
    let mut accounts = vec![
        AccountMeta::new(*router_state, false),
        AccountMeta::new_readonly(key(&router.authority), false),
        AccountMeta::new(key(&router.custody), false),
        AccountMeta::new_readonly(key(&harbor_common::token::TOKEN_PROGRAM_ID), false),
        AccountMeta::new_readonly(key(&router.oracle), false),
    ];
    for link in &router.strategies {
        accounts.push(AccountMeta::new_readonly(key(&link.program), false));
        accounts.push(AccountMeta::new(key(&link.pool), false));
        accounts.push(AccountMeta::new_readonly(key(&link.authority), false));
        accounts.push(AccountMeta::new(key(&link.vault), false));
    }
    accounts
}

/// Build a permissionless rebalance instruction
pub fn build_rebalance_instruction(
    router_program: &Pubkey,
    router_state: &Pubkey,
    router: &RouterAccount,
) -> Instruction {
    Instruction {
        program_id: *router_program,
        accounts: route_account_metas(router_state, router),
        data: vec![RouterInstruction::Rebalance as u8],
    }
}

/// Build a signed rebalance transaction paid for by the keeper
pub fn build_rebalance_transaction(
    router_program: &Pubkey,
    router_state: &Pubkey,
    router: &RouterAccount,
    keeper: &Keypair,
    recent_blockhash: Hash,
) -> Result<Transaction> {
    let instruction = build_rebalance_instruction(router_program, router_state, router);

    let mut transaction = Transaction::new_with_payer(&[instruction], Some(&keeper.pubkey()));
    transaction
        .try_sign(&[keeper], recent_blockhash)
        .context("Failed to sign rebalance transaction")?;

    Ok(transaction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use harbor_router::StrategyLink;

    fn router() -> RouterAccount {
        let mut router: RouterAccount = unsafe { core::mem::zeroed() };
        router.initialize_in_place(
            [1; 32],
            [2; 32],
            254,
            [3; 32],
            [4; 32],
            [
                StrategyLink {
                    program: [10; 32],
                    pool: [11; 32],
                    authority: [12; 32],
                    vault: [13; 32],
                },
                StrategyLink {
                    program: [20; 32],
                    pool: [21; 32],
                    authority: [22; 32],
                    vault: [23; 32],
                },
            ],
        );
        router
    }

    #[test]
    fn test_build_rebalance_instruction() {
        let program = Pubkey::new_unique();
        let state = Pubkey::new_unique();
        let ix = build_rebalance_instruction(&program, &state, &router());

        assert_eq!(ix.program_id, program);
        assert_eq!(ix.data, vec![4]);
        assert_eq!(ix.accounts.len(), 13);
        assert_eq!(ix.accounts[0].pubkey, state);
        assert!(ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[2].pubkey, Pubkey::new_from_array([3; 32]));
        assert_eq!(ix.accounts[4].pubkey, Pubkey::new_from_array([4; 32]));
        assert_eq!(ix.accounts[6].pubkey, Pubkey::new_from_array([11; 32]));
        assert_eq!(ix.accounts[12].pubkey, Pubkey::new_from_array([23; 32]));
        assert!(ix.accounts.iter().all(|meta| !meta.is_signer));
    }

    #[test]
    fn test_writable_accounts() {
        let ix = build_rebalance_instruction(&Pubkey::new_unique(), &Pubkey::new_unique(), &router());
        let writable: Vec<usize> = ix
            .accounts
            .iter()
            .enumerate()
            .filter(|(_, meta)| meta.is_writable)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(writable, vec![0, 2, 6, 8, 10, 12]);
    }

    #[test]
    fn test_build_rebalance_transaction() {
        let keeper = Keypair::new();
        let tx = build_rebalance_transaction(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &router(),
            &keeper,
            Hash::default(),
        )
        .unwrap();

        assert_eq!(tx.message.account_keys[0], keeper.pubkey());
        assert_eq!(tx.signatures.len(), 1);
    }
}
