pub mod router_account;
pub mod claim;

pub use router_account::*;
pub use claim::*;
