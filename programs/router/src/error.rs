//! Engine error to program error mapping

use harbor_common::HarborError;
use harbor_model::RouteError;
use pinocchio::program_error::ProgramError;

/// Map an engine error onto its stable program error code
pub fn map_route_error(err: RouteError) -> HarborError {
    match err {
        RouteError::InvalidAmount => HarborError::InvalidAmount,
        RouteError::InsufficientBalance => HarborError::InsufficientBalance,
        RouteError::TransferFailed => HarborError::TransferFailed,
        RouteError::ApprovalFailed => HarborError::ApprovalFailed,
        RouteError::InsufficientStrategyFunds => HarborError::InsufficientStrategyFunds,
        RouteError::InsufficientVaultBalance => HarborError::InsufficientVaultBalance,
        RouteError::StrategyRejected => HarborError::StrategyRejected,
        RouteError::OracleUnavailable => HarborError::OracleUnavailable,
        RouteError::Overflow => HarborError::Overflow,
    }
}

/// `map_err` adapter for processors returning `ProgramResult`
pub fn route_error(err: RouteError) -> ProgramError {
    map_route_error(err).into()
}
