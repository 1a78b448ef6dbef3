//! Oracle state structures

use pinocchio::pubkey::Pubkey;

/// Size of PriceOracle account: 128 bytes
pub const PRICE_ORACLE_SIZE: usize = 128;

/// Price of the pooled asset against its peg
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceOracle {
    /// Magic bytes: "PRCLORCL"
    pub magic: u64,

    /// Version (currently 0)
    pub version: u8,

    /// Bump seed for PDA
    pub bump: u8,

    /// Padding for alignment
    pub _padding: [u8; 6],

    /// Authority that can update prices
    pub authority: Pubkey,

    /// Mint of the priced asset
    pub asset: Pubkey,

    /// Current price (scaled by 1_000_000, 1_000_000 == peg)
    pub price: u64,

    /// Last update timestamp (Unix timestamp)
    pub timestamp: i64,

    /// Price confidence interval (scaled by 1_000_000)
    pub confidence: u64,

    /// Reserved for future use (24 bytes to reach 128 total)
    pub _reserved: [u8; 24],
}

impl PriceOracle {
    /// Magic bytes for validation
    pub const MAGIC: &'static [u8; 8] = b"PRCLORCL";

    /// Current version
    pub const VERSION: u8 = 0;

    pub fn new(authority: Pubkey, asset: Pubkey, price: u64, bump: u8) -> Self {
        Self {
            magic: u64::from_le_bytes(*Self::MAGIC),
            version: Self::VERSION,
            bump,
            _padding: [0; 6],
            authority,
            asset,
            price,
            timestamp: 0,
            confidence: 0,
            _reserved: [0; 24],
        }
    }

    /// Validate the oracle account
    pub fn validate(&self) -> bool {
        self.magic == u64::from_le_bytes(*Self::MAGIC) && self.version == Self::VERSION
    }

    pub fn update_price(&mut self, price: u64, timestamp: i64, confidence: u64) {
        self.price = price;
        self.timestamp = timestamp;
        self.confidence = confidence;
    }

    /// Decode and validate raw account data without alignment requirements
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < PRICE_ORACLE_SIZE {
            return None;
        }
        // SAFETY: length checked above; every bit pattern is a valid PriceOracle
        let oracle = unsafe { core::ptr::read_unaligned(data.as_ptr() as *const Self) };
        oracle.validate().then_some(oracle)
    }

    /// Raw account bytes
    pub fn to_bytes(&self) -> [u8; PRICE_ORACLE_SIZE] {
        // SAFETY: repr(C), no padding beyond explicit fields, size asserted in tests
        unsafe { core::mem::transmute_copy(self) }
    }
}
