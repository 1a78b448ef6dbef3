//! Strategy pool state

use pinocchio::pubkey::Pubkey;

/// Pool account, one per strategy instance.
/// Client-created and owned by the strategy program.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolAccount {
    /// Magic bytes: "HRBRPOOL"
    pub magic: u64,
    pub version: u8,
    /// Bump of the pool authority PDA
    pub authority_bump: u8,
    pub _padding: [u8; 6],
    /// Pool authority PDA, owner of the vault and token delegate
    pub authority: Pubkey,
    /// The only account allowed to fund and drain the pool
    pub depositor: Pubkey,
    /// Pooled asset mint
    pub mint: Pubkey,
    /// Vault token account
    pub vault: Pubkey,
    /// Lifetime amount pulled in
    pub total_deposited: u64,
    /// Lifetime amount sent back, yield included
    pub total_withdrawn: u64,
}

impl PoolAccount {
    pub const LEN: usize = core::mem::size_of::<Self>();
    pub const MAGIC: &'static [u8; 8] = b"HRBRPOOL";
    pub const VERSION: u8 = 0;

    pub fn initialize_in_place(
        &mut self,
        authority: Pubkey,
        authority_bump: u8,
        depositor: Pubkey,
        mint: Pubkey,
        vault: Pubkey,
    ) {
        self.magic = u64::from_le_bytes(*Self::MAGIC);
        self.version = Self::VERSION;
        self.authority_bump = authority_bump;
        self._padding = [0; 6];
        self.authority = authority;
        self.depositor = depositor;
        self.mint = mint;
        self.vault = vault;
        self.total_deposited = 0;
        self.total_withdrawn = 0;
    }

    pub fn is_initialized(&self) -> bool {
        self.magic == u64::from_le_bytes(*Self::MAGIC) && self.version == Self::VERSION
    }

    /// Record a deposit, `None` on overflow
    pub fn record_deposit(&mut self, amount: u64) -> Option<()> {
        self.total_deposited = self.total_deposited.checked_add(amount)?;
        Some(())
    }

    /// Record a full withdrawal, `None` on overflow
    pub fn record_withdrawal(&mut self, amount: u64) -> Option<()> {
        self.total_withdrawn = self.total_withdrawn.checked_add(amount)?;
        Some(())
    }

    /// Decode raw account data without alignment requirements
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::LEN {
            return None;
        }
        // SAFETY: length checked above; every bit pattern is a valid PoolAccount
        let pool = unsafe { core::ptr::read_unaligned(data.as_ptr() as *const Self) };
        pool.is_initialized().then_some(pool)
    }
}
