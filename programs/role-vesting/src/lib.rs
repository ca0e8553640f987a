#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

pub use instructions::*;
pub use state::Role;

declare_id!("EJQYuZCtizeQawX1emybi5bbHHH94MSrB3Kwas8VoWd6");

#[program]
pub mod role_vesting {
    use super::*;

    pub fn initialize_vesting(ctx: Context<InitializeVesting>) -> Result<()> {
        msg!("Vesting ledger for mint {}", ctx.accounts.mint.key());
        instructions::initialize_vesting::initialize_vesting(ctx)
    }

    pub fn allocate_tokens(ctx: Context<AllocateTokens>, total_amount: u64) -> Result<()> {
        instructions::allocate_tokens::allocate_tokens(ctx, total_amount)
    }

    pub fn add_beneficiary(
        ctx: Context<AddBeneficiary>,
        beneficiary: Pubkey,
        role: Role,
        amount: u64,
    ) -> Result<()> {
        instructions::add_beneficiary::add_beneficiary(ctx, beneficiary, role, amount)
    }

    pub fn start_vesting(ctx: Context<StartVesting>) -> Result<()> {
        instructions::start_vesting::start_vesting(ctx)
    }

    pub fn check_released_tokens(ctx: Context<CheckReleasedTokens>, role: Role) -> Result<u64> {
        instructions::check_released_tokens::check_released_tokens(ctx, role)
    }

    pub fn claim_tokens(ctx: Context<ClaimTokens>, role: Role) -> Result<()> {
        instructions::claim_tokens::claim_tokens(ctx, role)
    }
}
