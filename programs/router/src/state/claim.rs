//! Per-depositor claim account

use harbor_common::HarborError;
use pinocchio::pubkey::Pubkey;

/// One depositor's claim on one router.
/// Lives at the PDA ["claim", router, depositor], created by InitializeClaim.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimAccount {
    /// Magic bytes: "HRBRCLM\0"
    pub magic: u64,
    pub version: u8,
    /// Bump of the claim PDA
    pub bump: u8,
    pub _padding: [u8; 6],
    /// Router account this claim belongs to
    pub router: Pubkey,
    /// Depositor wallet
    pub owner: Pubkey,
    /// Redeemable amount, 1:1 with the pooled asset
    pub amount: u64,
}

impl ClaimAccount {
    pub const LEN: usize = core::mem::size_of::<Self>();
    pub const MAGIC: &'static [u8; 8] = b"HRBRCLM\0";
    pub const VERSION: u8 = 0;

    pub fn initialize_in_place(&mut self, router: Pubkey, owner: Pubkey, bump: u8) {
        self.magic = u64::from_le_bytes(*Self::MAGIC);
        self.version = Self::VERSION;
        self.bump = bump;
        self._padding = [0; 6];
        self.router = router;
        self.owner = owner;
        self.amount = 0;
    }

    pub fn is_initialized(&self) -> bool {
        self.magic == u64::from_le_bytes(*Self::MAGIC) && self.version == Self::VERSION
    }

    /// Ensure this claim binds `owner` to `router`
    pub fn check_binding(&self, router: &Pubkey, owner: &Pubkey) -> Result<(), HarborError> {
        if !self.is_initialized() {
            return Err(HarborError::Uninitialized);
        }
        if &self.router != router || &self.owner != owner {
            return Err(HarborError::InvalidAccount);
        }
        Ok(())
    }

    /// Decode raw account data without alignment requirements
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::LEN {
            return None;
        }
        // SAFETY: length checked above; every bit pattern is a valid ClaimAccount
        let claim = unsafe { core::ptr::read_unaligned(data.as_ptr() as *const Self) };
        claim.is_initialized().then_some(claim)
    }
}
