//! Program-wide constants.

/// PDA seed of the per-mint vesting ledger.
pub const VESTING_STATE_SEED: &[u8] = b"vesting_state";

/// PDA seed of a beneficiary schedule, keyed by (ledger, beneficiary, role).
pub const VESTING_SCHEDULE_SEED: &[u8] = b"vesting_schedule";

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Share of the funded amount credited to the User pool.
pub const USER_SHARE_PERCENT: u64 = 50;

/// Share of the funded amount credited to the Partner pool.
/// The Team pool takes whatever is left so the split conserves the total.
pub const PARTNER_SHARE_PERCENT: u64 = 25;

/// Fixed release parameters of a role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleParams {
    /// Nothing is released while less than this has elapsed since start.
    pub cliff_seconds: i64,
    /// Time from start until the whole grant is released. Never below the cliff.
    pub vesting_seconds: i64,
}

/// Indexed by `Role as usize`: User, Partner, Team.
pub const ROLE_PARAMS: [RoleParams; 3] = [
    // User: the whole grant unlocks at the cliff.
    RoleParams {
        cliff_seconds: 300 * SECONDS_PER_DAY,
        vesting_seconds: 300 * SECONDS_PER_DAY,
    },
    // Partner: linear over one year, gated by a 60 day cliff.
    RoleParams {
        cliff_seconds: 60 * SECONDS_PER_DAY,
        vesting_seconds: 365 * SECONDS_PER_DAY,
    },
    // Team: linear over two years, gated by a 60 day cliff.
    RoleParams {
        cliff_seconds: 60 * SECONDS_PER_DAY,
        vesting_seconds: 730 * SECONDS_PER_DAY,
    },
];
