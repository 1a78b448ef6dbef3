//! Router state: mode machine and aggregate total

use core::fmt;

/// Opaque 32-byte account identifier (a Solana pubkey on-chain)
pub type Address = [u8; 32];

/// Fund-placement policy
///
/// Farming and Defensive each name the strategy that custodies the pool.
/// Emergency keeps everything in the router's own custody. Only rebalance
/// moves between Farming and Defensive; nothing enters or leaves Emergency.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Farming = 0,
    Defensive = 1,
    Emergency = 2,
}

/// One of the two strategy pools
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategySlot {
    A = 0,
    B = 1,
}

/// Where the pooled balance currently lives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Custody {
    Strategy(StrategySlot),
    Router,
}

impl Mode {
    /// Decode the on-chain mode byte
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Mode::Farming),
            1 => Some(Mode::Defensive),
            2 => Some(Mode::Emergency),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Custody location implied by this mode
    pub fn custody(self) -> Custody {
        match self {
            Mode::Farming => Custody::Strategy(StrategySlot::A),
            Mode::Defensive => Custody::Strategy(StrategySlot::B),
            Mode::Emergency => Custody::Router,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Farming => "farming",
            Mode::Defensive => "defensive",
            Mode::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl StrategySlot {
    pub const ALL: [StrategySlot; 2] = [StrategySlot::A, StrategySlot::B];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Process-wide router state excluding individual claims
///
/// `total_deposits` only ever moves together with exactly one claim, in the
/// same engine call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VaultState {
    pub mode: Mode,
    pub total_deposits: u64,
}

impl VaultState {
    /// Fresh router: Farming, nothing deposited
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore persisted state
    pub fn restore(mode: Mode, total_deposits: u64) -> Self {
        Self { mode, total_deposits }
    }
}
