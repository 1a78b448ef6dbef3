//! SimulateRisk instruction - read-only threshold check

use harbor_model::simulate_risk;
use pinocchio::{cpi::set_return_data, ProgramResult};
use pinocchio_log::log;

/// Publish 1 as return data if `price` is below the depeg threshold, else 0
pub fn process_simulate_risk(price: u64) -> ProgramResult {
    let at_risk = u8::from(simulate_risk(price));
    set_return_data(&[at_risk]);
    log!("simulate_risk price={} at_risk={}", price, at_risk);
    Ok(())
}
