#![no_std]

pub mod error;
pub mod account;
pub mod instruction;
pub mod token;
pub mod system;

pub use error::*;
pub use account::*;
pub use instruction::*;
pub use token::*;
pub use system::*;
