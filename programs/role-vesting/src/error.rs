use anchor_lang::prelude::*;

/// Custom error codes for the role vesting program.
#[error_code]
pub enum VestingError {
    // Configuration.
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Vesting ledger has not been approved as delegate for the amount")]
    AllowanceInsufficient,

    #[msg("Beneficiary address can't be the zero address")]
    ZeroAddress,

    #[msg("Pools are not funded yet")]
    PoolNotFunded,

    #[msg("Grant exceeds the remaining balance of the role pool")]
    PoolExhausted,

    #[msg("Pools are already funded")]
    AlreadyFunded,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    // Lifecycle.
    #[msg("Unauthorized: admin signature required")]
    Unauthorized,

    #[msg("Vesting already started")]
    AlreadyActive,

    #[msg("Admin has not started the vesting")]
    NotStarted,

    #[msg("Vesting already active, registration is closed")]
    VestingAlreadyActive,

    // Registry.
    #[msg("Beneficiary already exists for this role")]
    DuplicateBeneficiary,

    #[msg("Beneficiary does not exist for this role")]
    BeneficiaryNotFound,

    // Release.
    #[msg("No tokens available yet")]
    NothingVestedYet,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Rent refund must go to the account that paid for the schedule")]
    InvalidRentPayer,
}
