//! Router error taxonomy
//!
//! Every error is terminal for the operation that raised it. Nothing in the
//! model retries or swallows a failure.

use thiserror::Error;

/// Result alias used throughout the model
pub type RouteResult<T> = Result<T, RouteError>;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum RouteError {
    /// Zero amount supplied to deposit or withdraw
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// Withdrawal exceeds the caller's recorded claim
    #[error("withdrawal exceeds the caller's claim")]
    InsufficientBalance,

    /// The asset token rejected a pull or a push
    #[error("asset transfer was rejected")]
    TransferFailed,

    /// The asset token rejected an allowance for a strategy pool
    #[error("asset approval was rejected")]
    ApprovalFailed,

    /// A full strategy liquidation returned less than the caller is owed.
    /// The ledger and the strategy disagree; treat as critical.
    #[error("strategy liquidation returned less than the amount owed")]
    InsufficientStrategyFunds,

    /// Emergency withdrawal exceeds what the router holds directly
    #[error("router custody holds less than the amount owed")]
    InsufficientVaultBalance,

    /// A strategy pool refused a deposit or a liquidation
    #[error("strategy pool rejected the call")]
    StrategyRejected,

    /// The price feed could not be read
    #[error("price feed unavailable")]
    OracleUnavailable,

    /// Checked amount arithmetic overflowed
    #[error("amount arithmetic overflowed")]
    Overflow,
}
