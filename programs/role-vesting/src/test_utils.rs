use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::VestingState;

/// Address standing in for the vesting ledger PDA.
pub const LEDGER: Pubkey = Pubkey::new_from_array([200; 32]);

pub fn key(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

pub fn admin() -> Pubkey {
    key(100)
}

/// Freshly initialized ledger owned by `admin()`.
pub fn ledger_state() -> VestingState {
    VestingState {
        mint: key(101),
        admin: admin(),
        admin_token_account: key(102),
        bump: 254,
        ..VestingState::default()
    }
}

pub fn expect_err<T: std::fmt::Debug>(res: Result<T>, expected: VestingError) {
    match res {
        Err(anchor_lang::error::Error::AnchorError(e)) => assert_eq!(
            e.error_code_number,
            u32::from(expected),
            "expected {expected}, got {}",
            e.error_name
        ),
        other => panic!("expected {expected}, got {other:?}"),
    }
}
