//! Checked amount arithmetic - no unwrap, no panics, no silent wraparound

use crate::error::{RouteError, RouteResult};

/// Add two amounts, failing on overflow
pub fn add_amount(a: u64, b: u64) -> RouteResult<u64> {
    a.checked_add(b).ok_or(RouteError::Overflow)
}

/// Subtract two amounts, failing on underflow
pub fn sub_amount(a: u64, b: u64) -> RouteResult<u64> {
    a.checked_sub(b).ok_or(RouteError::Overflow)
}

/// Sum amounts in a wider type so the fold itself can never overflow
pub fn wide_sum<I>(amounts: I) -> u128
where
    I: IntoIterator<Item = u64>,
{
    amounts
        .into_iter()
        .fold(0u128, |acc, x| acc.saturating_add(u128::from(x)))
}

/// Amount left over after paying `owed` out of `returned`, if any
pub fn surplus(returned: u64, owed: u64) -> Option<u64> {
    returned.checked_sub(owed)
}
