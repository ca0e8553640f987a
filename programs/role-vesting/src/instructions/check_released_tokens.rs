use anchor_lang::prelude::*;

use crate::constants::{VESTING_SCHEDULE_SEED, VESTING_STATE_SEED};
use crate::error::VestingError;
use crate::state::{Role, VestingSchedule, VestingState};
use crate::utils::release;

pub fn check_released_tokens(ctx: Context<CheckReleasedTokens>, role: Role) -> Result<u64> {
    let st = &ctx.accounts.vesting_state;
    st.require_active()?;

    let now = Clock::get()?.unix_timestamp;
    let schedule = VestingSchedule::load(&ctx.accounts.vesting_schedule)?;
    let released = quote_released(st, schedule.as_ref(), now)?;

    emit!(ReleasedTokensChecked {
        beneficiary: ctx.accounts.beneficiary.key(),
        role,
        released,
        withdrawn: schedule.map(|s| s.withdrawn).unwrap_or_default(),
    });
    Ok(released)
}

/// Amount released so far for a schedule that may be absent.
/// Zero is reported as `NothingVestedYet` rather than returned.
pub fn quote_released(
    st: &VestingState,
    schedule: Option<&VestingSchedule>,
    now_ts: i64,
) -> Result<u64> {
    st.require_active()?;
    let schedule = schedule.ok_or(VestingError::BeneficiaryNotFound)?;

    let released = release::released_amount(schedule, st.start_ts, now_ts)?;
    require!(released > 0, VestingError::NothingVestedYet);
    Ok(released)
}

#[derive(Accounts)]
#[instruction(role: Role)]
pub struct CheckReleasedTokens<'info> {
    #[account(
        seeds = [VESTING_STATE_SEED, vesting_state.mint.as_ref()],
        bump = vesting_state.bump
    )]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        seeds = [
            VESTING_SCHEDULE_SEED,
            vesting_state.key().as_ref(),
            beneficiary.key().as_ref(),
            &[role as u8],
        ],
        bump
    )]
    /// CHECK: May not exist. Read in-handler so absence maps to `BeneficiaryNotFound`.
    pub vesting_schedule: UncheckedAccount<'info>,

    pub beneficiary: Signer<'info>,
}

#[event]
pub struct ReleasedTokensChecked {
    pub beneficiary: Pubkey,
    pub role: Role,
    pub released: u64,
    pub withdrawn: u64,
}
