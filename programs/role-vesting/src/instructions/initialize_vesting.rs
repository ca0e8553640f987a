use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};

use crate::constants::VESTING_STATE_SEED;
use crate::error::VestingError;
use crate::state::VestingState;

pub fn initialize_vesting(ctx: Context<InitializeVesting>) -> Result<()> {
    let st = &mut ctx.accounts.vesting_state;
    st.mint = ctx.accounts.mint.key();
    st.admin = ctx.accounts.admin.key();
    st.admin_token_account = ctx.accounts.admin_token_account.key();
    st.total_funded = 0;
    st.total_granted = 0;
    st.total_withdrawn = 0;
    st.user_pool = 0;
    st.partner_pool = 0;
    st.team_pool = 0;
    st.funded = false;
    st.active = false;
    st.start_ts = 0;
    st.bump = ctx.bumps.vesting_state;

    emit!(VestingInitialized {
        admin: st.admin,
        mint: st.mint,
        admin_token_account: st.admin_token_account,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeVesting<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + VestingState::SIZE,
        seeds = [VESTING_STATE_SEED, mint.key().as_ref()],
        bump
    )]
    pub vesting_state: Account<'info, VestingState>,

    pub mint: Account<'info, Mint>,

    /// Custodian of the vesting supply until claim time.
    #[account(
        constraint = admin_token_account.mint == mint.key() @ VestingError::InvalidTokenMint,
        constraint = admin_token_account.owner == admin.key() @ VestingError::InvalidTokenAccount,
    )]
    pub admin_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct VestingInitialized {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub admin_token_account: Pubkey,
}
