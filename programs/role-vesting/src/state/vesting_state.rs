use anchor_lang::prelude::*;

use crate::constants::{PARTNER_SHARE_PERCENT, USER_SHARE_PERCENT};
use crate::error::VestingError;
use crate::state::Role;

/// Per-mint vesting ledger PDA: the three allocation pools and the vesting clock.
#[account]
#[derive(Default, Debug)]
pub struct VestingState {
    /// Token mint.
    pub mint: Pubkey,
    /// Administrator; the only identity allowed to fund and start vesting.
    pub admin: Pubkey,
    /// Administrator token account. Custodies every vested token until it is claimed.
    pub admin_token_account: Pubkey,
    /// Amount accounted for by `allocate`. Zero until funded.
    pub total_funded: u64,
    /// Sum of grants debited from the pools.
    pub total_granted: u64,
    /// Sum of tokens transferred out by claims.
    pub total_withdrawn: u64,
    /// Unallocated balance of the User pool.
    pub user_pool: u64,
    /// Unallocated balance of the Partner pool.
    pub partner_pool: u64,
    /// Unallocated balance of the Team pool (absorbs the split remainder).
    pub team_pool: u64,
    /// Set by the single successful `allocate`.
    pub funded: bool,
    /// One-way flag; registration closes once set.
    pub active: bool,
    /// Vesting start (Unix seconds, UTC). Meaningful only when `active`.
    pub start_ts: i64,
    /// PDA bump seed.
    pub bump: u8,
}

impl VestingState {
    pub const SIZE: usize =
        32 + // mint
        32 + // admin
        32 + // admin_token_account
        8 +  // total_funded
        8 +  // total_granted
        8 +  // total_withdrawn
        8 +  // user_pool
        8 +  // partner_pool
        8 +  // team_pool
        1 +  // funded
        1 +  // active
        8 +  // start_ts
        1;   // bump

    /// Funds the pools once, splitting `total_amount` across the roles.
    /// `allowance` is what the custodian account has delegated to this ledger.
    pub fn allocate(&mut self, caller: &Pubkey, total_amount: u64, allowance: u64) -> Result<()> {
        require_keys_eq!(*caller, self.admin, VestingError::Unauthorized);
        require!(total_amount > 0, VestingError::InvalidAmount);
        require!(!self.funded, VestingError::AlreadyFunded);
        require!(
            allowance >= total_amount,
            VestingError::AllowanceInsufficient
        );

        let (user, partner, team) = split_allocation(total_amount)?;
        self.user_pool = user;
        self.partner_pool = partner;
        self.team_pool = team;
        self.total_funded = total_amount;
        self.funded = true;
        Ok(())
    }

    pub fn pool(&self, role: Role) -> u64 {
        match role {
            Role::User => self.user_pool,
            Role::Partner => self.partner_pool,
            Role::Team => self.team_pool,
        }
    }

    /// Sum of all three pools (the unallocated part of the funding).
    pub fn unallocated(&self) -> u64 {
        self.user_pool
            .saturating_add(self.partner_pool)
            .saturating_add(self.team_pool)
    }

    /// Moves `amount` out of the role pool into granted. Pools never go negative.
    pub fn debit(&mut self, role: Role, amount: u64) -> Result<()> {
        let remaining = self
            .pool(role)
            .checked_sub(amount)
            .ok_or(VestingError::PoolExhausted)?;
        let granted = self
            .total_granted
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;

        match role {
            Role::User => self.user_pool = remaining,
            Role::Partner => self.partner_pool = remaining,
            Role::Team => self.team_pool = remaining,
        }
        self.total_granted = granted;
        Ok(())
    }

    /// One-shot transition to active. Returns the recorded start timestamp.
    pub fn start(&mut self, caller: &Pubkey, now_ts: i64) -> Result<i64> {
        require_keys_eq!(*caller, self.admin, VestingError::Unauthorized);
        require!(!self.active, VestingError::AlreadyActive);
        self.active = true;
        self.start_ts = now_ts;
        Ok(now_ts)
    }

    pub fn require_active(&self) -> Result<()> {
        require!(self.active, VestingError::NotStarted);
        Ok(())
    }

    pub fn require_registration_open(&self) -> Result<()> {
        require!(!self.active, VestingError::VestingAlreadyActive);
        Ok(())
    }

    pub fn record_withdrawal(&mut self, amount: u64) -> Result<()> {
        let withdrawn = self
            .total_withdrawn
            .checked_add(amount)
            .ok_or(VestingError::MathOverflow)?;
        require!(
            withdrawn <= self.total_granted,
            VestingError::MathOverflow
        );
        self.total_withdrawn = withdrawn;
        Ok(())
    }
}

/// User takes 50%, Partner 25%, Team absorbs the rounding remainder.
pub fn split_allocation(total_amount: u64) -> Result<(u64, u64, u64)> {
    let total = total_amount as u128;
    let user = u64::try_from(total * USER_SHARE_PERCENT as u128 / 100)
        .map_err(|_| VestingError::MathOverflow)?;
    let partner = u64::try_from(total * PARTNER_SHARE_PERCENT as u128 / 100)
        .map_err(|_| VestingError::MathOverflow)?;
    let team = total_amount
        .checked_sub(user)
        .and_then(|rest| rest.checked_sub(partner))
        .ok_or(VestingError::MathOverflow)?;
    Ok((user, partner, team))
}
