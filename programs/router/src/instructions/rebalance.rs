//! Rebalance instruction - permissionless

use crate::accounts::RouteAccounts;
use crate::error::route_error;
use crate::events::LogSink;
use crate::state::RouterAccount;
use harbor_model::engine;
use pinocchio::{msg, ProgramResult};

pub fn process_rebalance(route: &RouteAccounts, router: &RouterAccount) -> ProgramResult {
    let mut state = router.vault_state()?;
    let mut venue = route.venue(router, None);

    match engine::rebalance(&mut state, &mut venue, &mut LogSink).map_err(route_error)? {
        Some(_) => route.store(&state)?,
        None => msg!("Rebalance: mode unchanged"),
    }
    Ok(())
}
