//! Strategy program entrypoint

use crate::instructions::{self, StrategyInstruction};
use harbor_common::InstructionReader;
use pinocchio::{account_info::AccountInfo, msg, pubkey::Pubkey, ProgramResult};

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
    let instruction = reader
        .read_u8()
        .and_then(StrategyInstruction::try_from)
        .map_err(|err| {
            msg!("Error: Unknown instruction");
            err
        })?;

    match instruction {
        StrategyInstruction::Initialize => {
            msg!("Instruction: Initialize");
            reader.finish()?;
            instructions::process_initialize(program_id, accounts)
        }
        StrategyInstruction::Deposit => {
            msg!("Instruction: Deposit");
            let amount = reader.read_u64()?;
            reader.finish()?;
            instructions::process_deposit(program_id, accounts, amount)
        }
        StrategyInstruction::WithdrawAll => {
            msg!("Instruction: WithdrawAll");
            reader.finish()?;
            instructions::process_withdraw_all(program_id, accounts)
        }
    }
}
