//! Router observation and the rebalance decision

use harbor_model::{target_mode, Mode};
use harbor_oracle::PriceOracle;
use harbor_router::RouterAccount;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonitorError {
    #[error("router account is not an initialized Harbor router")]
    RouterUninitialized,
    #[error("router account holds unknown mode byte {0}")]
    UnknownMode(u8),
    #[error("oracle account is not an initialized price account")]
    OracleUninitialized,
    #[error("router is bound to oracle {expected:?}, not the account that was fetched")]
    OracleMismatch { expected: [u8; 32] },
}

/// What the keeper saw on one poll
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    pub router: RouterAccount,
    pub mode: Mode,
    pub price: u64,
}

/// Outcome of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Router already sits where the price says it should
    Hold,
    /// Emergency is never left by a rebalance
    Frozen,
    /// Submit a rebalance moving the pool
    Rebalance { from: Mode, to: Mode },
}

/// Decode the router account and the oracle it is bound to
pub fn observe(
    router_data: &[u8],
    oracle_key: &[u8; 32],
    oracle_data: &[u8],
) -> Result<Observation, MonitorError> {
    let router = RouterAccount::from_bytes(router_data).ok_or(MonitorError::RouterUninitialized)?;
    let mode = router
        .current_mode()
        .map_err(|_| MonitorError::UnknownMode(router.mode))?;
    if &router.oracle != oracle_key {
        return Err(MonitorError::OracleMismatch {
            expected: router.oracle,
        });
    }
    let oracle = PriceOracle::from_bytes(oracle_data).ok_or(MonitorError::OracleUninitialized)?;

    Ok(Observation {
        router,
        mode,
        price: oracle.price,
    })
}

/// Whether a rebalance would move anything at this price
pub fn decide(mode: Mode, price: u64) -> Decision {
    if mode == Mode::Emergency {
        return Decision::Frozen;
    }
    let target = target_mode(price);
    if target == mode {
        Decision::Hold
    } else {
        Decision::Rebalance {
            from: mode,
            to: target,
        }
    }
}
