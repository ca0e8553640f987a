use anchor_lang::prelude::*;

use crate::constants::{VESTING_SCHEDULE_SEED, VESTING_STATE_SEED};
use crate::error::VestingError;
use crate::state::{Role, VestingSchedule, VestingState};

pub fn add_beneficiary(
    ctx: Context<AddBeneficiary>,
    beneficiary: Pubkey,
    role: Role,
    amount: u64,
) -> Result<()> {
    let vesting_state_key = ctx.accounts.vesting_state.key();
    let schedule = &mut ctx.accounts.vesting_schedule;

    // init_if_needed hands back a zeroed record for a fresh PDA.
    let mut slot = if schedule.is_registered() {
        Some((**schedule).clone())
    } else {
        None
    };

    register_beneficiary(
        &mut ctx.accounts.vesting_state,
        &mut slot,
        vesting_state_key,
        ctx.accounts.payer.key(),
        beneficiary,
        role,
        amount,
        ctx.bumps.vesting_schedule,
    )?;

    if let Some(record) = slot {
        schedule.set_inner(record);
    }

    emit!(BeneficiaryAdded { beneficiary, role });
    Ok(())
}

/// Creates the schedule for (`beneficiary`, `role`) in `slot`, debiting the
/// role pool. `payer` funds the account rent and gets it back on settlement.
/// Leaves `st` and `slot` untouched on error.
#[allow(clippy::too_many_arguments)]
pub fn register_beneficiary(
    st: &mut VestingState,
    slot: &mut Option<VestingSchedule>,
    vesting_state_key: Pubkey,
    payer: Pubkey,
    beneficiary: Pubkey,
    role: Role,
    amount: u64,
    bump: u8,
) -> Result<()> {
    st.require_registration_open()?;
    require!(beneficiary != Pubkey::default(), VestingError::ZeroAddress);
    require!(amount > 0, VestingError::InvalidAmount);
    require!(st.funded, VestingError::PoolNotFunded);
    require!(slot.is_none(), VestingError::DuplicateBeneficiary);

    st.debit(role, amount)?;
    *slot = Some(VestingSchedule::new(
        vesting_state_key,
        beneficiary,
        role,
        amount,
        bump,
    )
    .paid_by(payer));
    Ok(())
}

#[derive(Accounts)]
#[instruction(beneficiary: Pubkey, role: Role)]
pub struct AddBeneficiary<'info> {
    #[account(
        mut,
        seeds = [VESTING_STATE_SEED, vesting_state.mint.as_ref()],
        bump = vesting_state.bump
    )]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + VestingSchedule::SIZE,
        seeds = [
            VESTING_SCHEDULE_SEED,
            vesting_state.key().as_ref(),
            beneficiary.as_ref(),
            &[role as u8],
        ],
        bump
    )]
    pub vesting_schedule: Account<'info, VestingSchedule>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct BeneficiaryAdded {
    pub beneficiary: Pubkey,
    pub role: Role,
}
