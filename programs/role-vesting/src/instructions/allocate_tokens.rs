use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::VESTING_STATE_SEED;
use crate::error::VestingError;
use crate::state::VestingState;
use crate::utils::{SplTokenLedger, TokenLedger};

pub fn allocate_tokens(ctx: Context<AllocateTokens>, total_amount: u64) -> Result<()> {
    let vesting_state_key = ctx.accounts.vesting_state.key();
    let ledger = SplTokenLedger::new(
        ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.admin_token_account,
        ctx.accounts.vesting_state.to_account_info(),
        &[],
    );

    let st = &mut ctx.accounts.vesting_state;
    fund_pools(
        st,
        &vesting_state_key,
        &ctx.accounts.admin.key(),
        total_amount,
        &ledger,
    )?;

    msg!(
        "Pools funded: user={} partner={} team={}",
        st.user_pool,
        st.partner_pool,
        st.team_pool
    );
    emit!(TokensAllocated {
        admin: st.admin,
        total_amount,
        user_pool: st.user_pool,
        partner_pool: st.partner_pool,
        team_pool: st.team_pool,
    });

    Ok(())
}

/// Splits `total_amount` into the role pools once the custodian has delegated
/// at least that much to the vesting ledger. No tokens move here.
pub fn fund_pools<L: TokenLedger>(
    st: &mut VestingState,
    vesting_state_key: &Pubkey,
    caller: &Pubkey,
    total_amount: u64,
    ledger: &L,
) -> Result<()> {
    let allowance = ledger.allowance(&st.admin, vesting_state_key);
    st.allocate(caller, total_amount, allowance)
}

#[derive(Accounts)]
pub struct AllocateTokens<'info> {
    #[account(
        mut,
        seeds = [VESTING_STATE_SEED, vesting_state.mint.as_ref()],
        bump = vesting_state.bump
    )]
    pub vesting_state: Account<'info, VestingState>,

    #[account(
        address = vesting_state.admin_token_account @ VestingError::InvalidTokenAccount,
    )]
    pub admin_token_account: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensAllocated {
    pub admin: Pubkey,
    pub total_amount: u64,
    pub user_pool: u64,
    pub partner_pool: u64,
    pub team_pool: u64,
}
