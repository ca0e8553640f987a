use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{VESTING_SCHEDULE_SEED, VESTING_STATE_SEED};
use crate::error::VestingError;
use crate::state::{Role, VestingSchedule, VestingState};
use crate::utils::{release, SplTokenLedger, TokenLedger};

pub fn claim_tokens(ctx: Context<ClaimTokens>, role: Role) -> Result<()> {
    ctx.accounts.vesting_state.require_active()?;

    let schedule_ai = ctx.accounts.vesting_schedule.to_account_info();
    let mut slot = VestingSchedule::load(&schedule_ai)?;
    if let Some(schedule) = &slot {
        schedule.check_refund_target(ctx.accounts.rent_payer.key)?;
    }

    let now = Clock::get()?.unix_timestamp;
    let beneficiary = ctx.accounts.beneficiary.key();

    let mint = ctx.accounts.vesting_state.mint;
    let bump = [ctx.accounts.vesting_state.bump];
    let signer_seeds: &[&[&[u8]]] = &[&[VESTING_STATE_SEED, mint.as_ref(), &bump]];
    let mut ledger = SplTokenLedger::new(
        ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.admin_token_account,
        ctx.accounts.vesting_state.to_account_info(),
        signer_seeds,
    )
    .with_destination(&ctx.accounts.beneficiary_token_account);

    let amount = settle_claim(
        &mut ctx.accounts.vesting_state,
        &mut slot,
        &beneficiary,
        now,
        &mut ledger,
    )?;

    let (withdrawn, settled) = match &slot {
        Some(schedule) => {
            schedule.store(&schedule_ai)?;
            (schedule.withdrawn, false)
        }
        None => {
            VestingSchedule::close(&schedule_ai, &ctx.accounts.rent_payer.to_account_info())?;
            msg!("Schedule settled for {}", beneficiary);
            (0, true)
        }
    };

    emit!(TokensClaimed {
        beneficiary,
        role,
        amount,
        withdrawn,
        settled,
    });
    Ok(())
}

/// Transfers the claimable delta of the schedule in `slot` to `caller`.
///
/// On success the schedule either records the new withdrawn total or, once
/// the whole grant is out, is removed from `slot`. Nothing is mutated unless
/// the transfer succeeds. Returns the amount transferred.
pub fn settle_claim<L: TokenLedger>(
    st: &mut VestingState,
    slot: &mut Option<VestingSchedule>,
    caller: &Pubkey,
    now_ts: i64,
    ledger: &mut L,
) -> Result<u64> {
    st.require_active()?;
    let schedule = slot.as_ref().ok_or(VestingError::BeneficiaryNotFound)?;
    require_keys_eq!(
        schedule.beneficiary,
        *caller,
        VestingError::BeneficiaryNotFound
    );

    let released = release::released_amount(schedule, st.start_ts, now_ts)?;
    let claimable = released.saturating_sub(schedule.withdrawn);
    require!(claimable > 0, VestingError::NothingVestedYet);

    let withdrawn = schedule
        .withdrawn
        .checked_add(claimable)
        .ok_or(VestingError::MathOverflow)?;
    require!(
        withdrawn <= schedule.total_granted,
        VestingError::MathOverflow
    );
    let settled = withdrawn == schedule.total_granted;

    ledger.transfer_from(&st.admin, caller, claimable)?;

    st.record_withdrawal(claimable)?;
    if settled {
        *slot = None;
    } else if let Some(schedule) = slot.as_mut() {
        schedule.withdrawn = withdrawn;
    }
    Ok(claimable)
}

#[derive(Accounts)]
#[instruction(role: Role)]
pub struct ClaimTokens<'info> {
    #[account(
        mut,
        seeds = [VESTING_STATE_SEED, vesting_state.mint.as_ref()],
        bump = vesting_state.bump
    )]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        mut,
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

    #[account(
        mut,
        address = vesting_state.admin_token_account @ VestingError::InvalidTokenAccount,
    )]
    pub admin_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = beneficiary_token_account.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
        constraint = beneficiary_token_account.owner == beneficiary.key() @ VestingError::InvalidTokenAccount,
    )]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    pub beneficiary: Signer<'info>,

    #[account(mut)]
    /// CHECK: Must match the schedule's `rent_payer`; receives the rent once it settles.
    pub rent_payer: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensClaimed {
    pub beneficiary: Pubkey,
    pub role: Role,
    pub amount: u64,
    /// Withdrawn total after this claim; zero when the schedule was settled.
    pub withdrawn: u64,
    pub settled: bool,
}
