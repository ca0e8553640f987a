pub mod release;
pub mod token_ledger;

pub use release::*;
pub use token_ledger::*;
