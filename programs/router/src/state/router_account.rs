//! Router account: mode, aggregate total and the keys fixed at initialization

use harbor_common::HarborError;
use harbor_model::{Mode, StrategySlot, VaultState};
use pinocchio::pubkey::Pubkey;

/// Accounts backing one strategy slot
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrategyLink {
    /// Strategy program id
    pub program: Pubkey,
    /// Pool state account
    pub pool: Pubkey,
    /// Pool authority PDA (the delegate the router approves)
    pub authority: Pubkey,
    /// Pool vault token account
    pub vault: Pubkey,
}

/// Router state, one per pooled asset.
/// Client-created and owned by the router program.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterAccount {
    /// Magic bytes: "HRBRRTR\0"
    pub magic: u64,
    /// Layout version
    pub version: u8,
    /// Current mode byte, see [`Mode`]
    pub mode: u8,
    /// Bump of the custody authority PDA
    pub authority_bump: u8,
    /// Padding
    pub _padding: [u8; 5],
    /// Pooled asset mint
    pub mint: Pubkey,
    /// Custody authority PDA
    pub authority: Pubkey,
    /// Router custody token account
    pub custody: Pubkey,
    /// Price account read by rebalance
    pub oracle: Pubkey,
    /// Strategy A (Farming) then B (Defensive)
    pub strategies: [StrategyLink; 2],
    /// Sum of all claims
    pub total_deposits: u64,
    /// Claims ever initialized against this router
    pub depositor_count: u64,
}

impl RouterAccount {
    pub const LEN: usize = core::mem::size_of::<Self>();
    pub const MAGIC: &'static [u8; 8] = b"HRBRRTR\0";
    pub const VERSION: u8 = 0;

    /// Initialize in place, Farming with nothing deposited
    pub fn initialize_in_place(
        &mut self,
        mint: Pubkey,
        authority: Pubkey,
        authority_bump: u8,
        custody: Pubkey,
        oracle: Pubkey,
        strategies: [StrategyLink; 2],
    ) {
        self.magic = u64::from_le_bytes(*Self::MAGIC);
        self.version = Self::VERSION;
        self.mode = Mode::Farming.as_u8();
        self.authority_bump = authority_bump;
        self._padding = [0; 5];
        self.mint = mint;
        self.authority = authority;
        self.custody = custody;
        self.oracle = oracle;
        self.strategies = strategies;
        self.total_deposits = 0;
        self.depositor_count = 0;
    }

    pub fn is_initialized(&self) -> bool {
        self.magic == u64::from_le_bytes(*Self::MAGIC) && self.version == Self::VERSION
    }

    pub fn current_mode(&self) -> Result<Mode, HarborError> {
        Mode::from_u8(self.mode).ok_or(HarborError::InvalidAccount)
    }

    pub fn total_deposits(&self) -> u64 {
        self.total_deposits
    }

    pub fn link(&self, slot: StrategySlot) -> &StrategyLink {
        &self.strategies[slot.index()]
    }

    /// Mode and total as the engine sees them
    pub fn vault_state(&self) -> Result<VaultState, HarborError> {
        Ok(VaultState::restore(self.current_mode()?, self.total_deposits))
    }

    /// Write back engine state
    pub fn store(&mut self, state: &VaultState) {
        self.mode = state.mode.as_u8();
        self.total_deposits = state.total_deposits;
    }

    /// Decode raw account data without alignment requirements
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::LEN {
            return None;
        }
        // SAFETY: length checked above; every bit pattern is a valid RouterAccount
        let account = unsafe { core::ptr::read_unaligned(data.as_ptr() as *const Self) };
        account.is_initialized().then_some(account)
    }
}

#[cfg(all(test, not(target_os = "solana")))]
mod tests {
    use super::*;

    fn zeroed() -> RouterAccount {
        // SAFETY: all-zero is a valid RouterAccount
        unsafe { core::mem::zeroed() }
    }

    fn links() -> [StrategyLink; 2] {
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
        ]
    }

    #[test]
    fn test_router_account_layout() {
        assert_eq!(RouterAccount::LEN, 16 + 32 * 4 + 128 * 2 + 16);
        assert_eq!(core::mem::size_of::<StrategyLink>(), 128);
    }

    #[test]
    fn test_initialize_in_place() {
        let mut account = zeroed();
        assert!(!account.is_initialized());

        account.initialize_in_place([1; 32], [2; 32], 254, [3; 32], [4; 32], links());

        assert!(account.is_initialized());
        assert_eq!(account.current_mode(), Ok(Mode::Farming));
        assert_eq!(account.total_deposits(), 0);
        assert_eq!(account.link(StrategySlot::B).vault, [23; 32]);
        assert_eq!(account.authority_bump, 254);
    }

    #[test]
    fn test_store_round_trips_vault_state() {
        let mut account = zeroed();
        account.initialize_in_place([1; 32], [2; 32], 255, [3; 32], [4; 32], links());

        account.store(&VaultState::restore(Mode::Defensive, 7_500));
        assert_eq!(
            account.vault_state(),
            Ok(VaultState::restore(Mode::Defensive, 7_500))
        );
    }

    #[test]
    fn test_corrupt_mode_rejected() {
        let mut account = zeroed();
        account.initialize_in_place([1; 32], [2; 32], 255, [3; 32], [4; 32], links());
        account.mode = 9;
        assert_eq!(account.vault_state(), Err(HarborError::InvalidAccount));
    }

    #[test]
    fn test_from_bytes_unaligned() {
        let mut account = zeroed();
        account.initialize_in_place([1; 32], [2; 32], 255, [3; 32], [4; 32], links());
        account.total_deposits = 42;

        let raw: [u8; RouterAccount::LEN] = unsafe { core::mem::transmute_copy(&account) };
        let mut buf = vec![0u8; RouterAccount::LEN + 3];
        buf[3..].copy_from_slice(&raw);

        assert_eq!(RouterAccount::from_bytes(&buf[3..]), Some(account));
        assert_eq!(RouterAccount::from_bytes(&[0u8; RouterAccount::LEN]), None);
    }
}
