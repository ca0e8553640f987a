//! Cliff-then-linear release curve.
//! - elapsed = now - start, clamped at zero
//! - released = 0 while elapsed < cliff
//! - released = total * min(elapsed, vesting) / vesting afterwards
//!
//! The curve never looks at what was already withdrawn.

use anchor_lang::prelude::*;

use crate::constants::RoleParams;
use crate::error::VestingError;
use crate::state::VestingSchedule;

/// Amount of `schedule` unlocked at `now_ts` for a vesting started at `start_ts`.
pub fn released_amount(schedule: &VestingSchedule, start_ts: i64, now_ts: i64) -> Result<u64> {
    release_at(
        schedule.total_granted,
        schedule.role.params(),
        start_ts,
        now_ts,
    )
}

pub fn release_at(total: u64, params: &RoleParams, start_ts: i64, now_ts: i64) -> Result<u64> {
    let elapsed = now_ts.saturating_sub(start_ts).max(0);
    if elapsed < params.cliff_seconds {
        return Ok(0);
    }
    if elapsed >= params.vesting_seconds {
        return Ok(total);
    }

    let v = (total as u128)
        .checked_mul(elapsed as u128)
        .ok_or(VestingError::MathOverflow)?
        / params.vesting_seconds as u128;
    Ok(u64::try_from(v).map_err(|_| VestingError::MathOverflow)?)
}
