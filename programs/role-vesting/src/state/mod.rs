pub mod vesting_schedule;
pub mod vesting_state;

pub use vesting_schedule::*;
pub use vesting_state::*;
