pub mod initialize_vesting;
pub mod allocate_tokens;
pub mod add_beneficiary;
pub mod start_vesting;
pub mod check_released_tokens;
pub mod claim_tokens;

pub use initialize_vesting::*;
pub use allocate_tokens::*;
pub use add_beneficiary::*;
pub use start_vesting::*;
pub use check_released_tokens::*;
pub use claim_tokens::*;
