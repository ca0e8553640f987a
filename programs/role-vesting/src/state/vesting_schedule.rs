use anchor_lang::prelude::*;

use crate::constants::{RoleParams, ROLE_PARAMS};
use crate::error::VestingError;

/// Beneficiary role. Each role has its own pool and release parameters.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Role {
    User,
    Partner,
    Team,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Partner, Role::Team];

    pub fn params(self) -> &'static RoleParams {
        &ROLE_PARAMS[self as usize]
    }
}

/// One grant for one (beneficiary, role) pair.
/// Seeds: [b"vesting_schedule", vesting_state, beneficiary, role]
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct VestingSchedule {
    pub vesting_state: Pubkey,
    /// Zero only while the account is freshly allocated and not yet registered.
    pub beneficiary: Pubkey,
    pub role: Role,
    /// Fixed at registration.
    pub total_granted: u64,
    /// Cumulative amount claimed; never exceeds `total_granted`.
    pub withdrawn: u64,
    /// Signer that paid the account rent at registration; refunded on settlement.
    pub rent_payer: Pubkey,
    pub bump: u8,
}

impl VestingSchedule {
    pub const SIZE: usize =
        32 + // vesting_state
        32 + // beneficiary
        1 +  // role
        8 +  // total_granted
        8 +  // withdrawn
        32 + // rent_payer
        1;   // bump

    pub fn new(vesting_state: Pubkey, beneficiary: Pubkey, role: Role, amount: u64, bump: u8) -> Self {
        Self {
            vesting_state,
            beneficiary,
            role,
            total_granted: amount,
            withdrawn: 0,
            rent_payer: beneficiary,
            bump,
        }
    }

    pub fn paid_by(mut self, rent_payer: Pubkey) -> Self {
        self.rent_payer = rent_payer;
        self
    }

    /// Rent of a settled schedule goes back to whoever paid it, not the claimer.
    pub fn check_refund_target(&self, destination: &Pubkey) -> Result<()> {
        require_keys_eq!(
            *destination,
            self.rent_payer,
            VestingError::InvalidRentPayer
        );
        Ok(())
    }

    pub fn is_registered(&self) -> bool {
        self.beneficiary != Pubkey::default()
    }

    pub fn remaining(&self) -> u64 {
        self.total_granted.saturating_sub(self.withdrawn)
    }

    /// Reads a schedule PDA that may not exist. Absent and closed accounts are `None`.
    pub fn load(info: &AccountInfo) -> Result<Option<Self>> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return Ok(None);
        }
        let data = info.try_borrow_data()?;
        let schedule = Self::try_deserialize(&mut &data[..])?;
        Ok(schedule.is_registered().then_some(schedule))
    }

    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        self.try_serialize(&mut writer)
    }

    /// Deletes a settled schedule, refunding its rent to `destination`.
    /// Callers pass the account checked by `check_refund_target`.
    pub fn close<'info>(info: &AccountInfo<'info>, destination: &AccountInfo<'info>) -> Result<()> {
        let refund = destination
            .lamports()
            .checked_add(info.lamports())
            .ok_or(VestingError::MathOverflow)?;
        **destination.try_borrow_mut_lamports()? = refund;
        **info.try_borrow_mut_lamports()? = 0;

        info.assign(&system_program::ID);
        info.resize(0)?;
        Ok(())
    }
}
