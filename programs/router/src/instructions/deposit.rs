//! Deposit instruction

use crate::accounts::RouteAccounts;
use crate::cpi::Depositor;
use crate::error::route_error;
use crate::events::LogSink;
use crate::state::{ClaimAccount, RouterAccount};
use harbor_common::borrow_account_data_mut;
use harbor_model::engine;
use pinocchio::{account_info::AccountInfo, ProgramResult};

/// Run the deposit algorithm over validated accounts.
///
/// The claim and the router totals are written back only after the engine
/// returns; any failure aborts the transaction and the runtime discards
/// every transfer made so far.
pub fn process_deposit(
    route: &RouteAccounts,
    router: &RouterAccount,
    claim_account: &AccountInfo,
    depositor: Depositor,
    amount: u64,
) -> ProgramResult {
    let mut state = router.vault_state()?;
    let mut claim = {
        let claim = unsafe { borrow_account_data_mut::<ClaimAccount>(claim_account)? };
        claim.amount
    };

    let mut venue = route.venue(router, Some(depositor));
    engine::deposit(
        &mut state,
        &mut claim,
        &mut venue,
        &mut LogSink,
        depositor.wallet.key(),
        amount,
    )
    .map_err(route_error)?;

    unsafe { borrow_account_data_mut::<ClaimAccount>(claim_account)? }.amount = claim;
    route.store(&state)?;
    Ok(())
}
