//! The fungible-token ledger seen as a capability.
//!
//! Tokens stay in the administrator's account until claim time; the vesting
//! ledger only holds a delegate allowance over that account and pulls from it.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::error::VestingError;

pub trait TokenLedger {
    /// Amount `spender` may still pull from `owner`.
    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u64;

    /// Pulls `amount` from `owner` to `recipient` using the caller's allowance.
    fn transfer_from(&mut self, owner: &Pubkey, recipient: &Pubkey, amount: u64) -> Result<()>;
}

/// SPL Token adapter: the custodian account has approved `delegate` (the
/// vesting ledger PDA), which signs transfers with `signer_seeds`.
pub struct SplTokenLedger<'a, 'info> {
    token_program: AccountInfo<'info>,
    custodian: &'a Account<'info, TokenAccount>,
    delegate: AccountInfo<'info>,
    signer_seeds: &'a [&'a [&'a [u8]]],
    destination: Option<&'a Account<'info, TokenAccount>>,
}

impl<'a, 'info> SplTokenLedger<'a, 'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        custodian: &'a Account<'info, TokenAccount>,
        delegate: AccountInfo<'info>,
        signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> Self {
        Self {
            token_program,
            custodian,
            delegate,
            signer_seeds,
            destination: None,
        }
    }

    pub fn with_destination(mut self, destination: &'a Account<'info, TokenAccount>) -> Self {
        self.destination = Some(destination);
        self
    }
}

impl TokenLedger for SplTokenLedger<'_, '_> {
    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> u64 {
        let delegate: Option<Pubkey> = self.custodian.delegate.into();
        if self.custodian.owner != *owner || delegate != Some(*spender) {
            return 0;
        }
        self.custodian.delegated_amount
    }

    fn transfer_from(&mut self, owner: &Pubkey, recipient: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(
            self.custodian.owner,
            *owner,
            VestingError::InvalidTokenAccount
        );
        let destination = self
            .destination
            .ok_or(VestingError::InvalidTokenAccount)?;
        require_keys_eq!(
            destination.owner,
            *recipient,
            VestingError::InvalidTokenAccount
        );
        require_keys_eq!(
            destination.mint,
            self.custodian.mint,
            VestingError::InvalidTokenMint
        );
        require!(
            self.allowance(owner, self.delegate.key) >= amount,
            VestingError::AllowanceInsufficient
        );

        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.custodian.to_account_info(),
                    to: destination.to_account_info(),
                    authority: self.delegate.clone(),
                },
                self.signer_seeds,
            ),
            amount,
        )
    }
}
