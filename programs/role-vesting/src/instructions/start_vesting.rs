use anchor_lang::prelude::*;

use crate::constants::VESTING_STATE_SEED;
use crate::state::VestingState;

pub fn start_vesting(ctx: Context<StartVesting>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let st = &mut ctx.accounts.vesting_state;
    let start_ts = st.start(&ctx.accounts.admin.key(), now)?;

    msg!("Vesting started at {}", start_ts);
    emit!(VestingStarted { start_ts });
    Ok(())
}

#[derive(Accounts)]
pub struct StartVesting<'info> {
    #[account(
        mut,
        seeds = [VESTING_STATE_SEED, vesting_state.mint.as_ref()],
        bump = vesting_state.bump
    )]
    pub vesting_state: Account<'info, VestingState>,

    pub admin: Signer<'info>,
}

#[event]
pub struct VestingStarted {
    pub start_ts: i64,
}
