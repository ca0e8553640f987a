//! Whole-lifecycle tests: fund, register, start, query and claim against an
//! in-memory token ledger. Every operation runs as a transaction that is
//! rolled back on error, as it would be on-chain.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::constants::SECONDS_PER_DAY;
use crate::error::VestingError;
use crate::instructions::{fund_pools, quote_released, register_beneficiary, settle_claim};
use crate::state::{Role, VestingSchedule, VestingState};
use crate::test_utils::{admin, expect_err, key, ledger_state, LEDGER};
use crate::utils::token_ledger::mock::MockLedger;

const T0: i64 = 1_700_000_000;

struct Harness {
    st: VestingState,
    schedules: BTreeMap<(Pubkey, Role), VestingSchedule>,
    tokens: MockLedger,
    now: i64,
}

impl Harness {
    /// Admin holds `minted` tokens and has approved the ledger for all of them.
    fn new(minted: u64) -> Self {
        let mut tokens = MockLedger::new(LEDGER);
        tokens.mint(admin(), minted);
        tokens.approve(admin(), LEDGER, minted);
        Self {
            st: ledger_state(),
            schedules: BTreeMap::new(),
            tokens,
            now: T0 - SECONDS_PER_DAY,
        }
    }

    fn funded(amount: u64) -> Self {
        let mut h = Self::new(amount);
        h.fund(admin(), amount).unwrap();
        h
    }

    fn atomic<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        let snapshot = (self.st.clone(), self.schedules.clone(), self.tokens.clone());
        let res = f(self);
        if res.is_err() {
            (self.st, self.schedules, self.tokens) = snapshot;
        }
        res
    }

    fn put(&mut self, k: (Pubkey, Role), slot: Option<VestingSchedule>) {
        match slot {
            Some(schedule) => self.schedules.insert(k, schedule),
            None => self.schedules.remove(&k),
        };
    }

    fn fund(&mut self, caller: Pubkey, amount: u64) -> Result<()> {
        self.atomic(|h| fund_pools(&mut h.st, &LEDGER, &caller, amount, &h.tokens))
    }

    fn register(&mut self, beneficiary: Pubkey, role: Role, amount: u64) -> Result<()> {
        self.atomic(|h| {
            let mut slot = h.schedules.get(&(beneficiary, role)).cloned();
            register_beneficiary(&mut h.st, &mut slot, LEDGER, admin(), beneficiary, role, amount, 255)?;
            h.put((beneficiary, role), slot);
            Ok(())
        })
    }

    fn start(&mut self, caller: Pubkey) -> Result<i64> {
        self.now = T0;
        self.atomic(|h| {
            let now = h.now;
            h.st.start(&caller, now)
        })
    }

    fn check(&self, caller: Pubkey, role: Role) -> Result<u64> {
        quote_released(&self.st, self.schedules.get(&(caller, role)), self.now)
    }

    fn claim(&mut self, caller: Pubkey, role: Role) -> Result<u64> {
        self.atomic(|h| {
            let mut slot = h.schedules.get(&(caller, role)).cloned();
            let amount = settle_claim(&mut h.st, &mut slot, &caller, h.now, &mut h.tokens)?;
            h.put((caller, role), slot);
            Ok(amount)
        })
    }

    fn advance(&mut self, seconds: i64) {
        self.now += seconds;
    }

    fn advance_days(&mut self, days: i64) {
        self.advance(days * SECONDS_PER_DAY);
    }

    fn assert_conserved(&self) {
        let outstanding: u64 = self.schedules.values().map(|s| s.remaining()).sum();
        let transferred = self.tokens.transferred_out();
        assert_eq!(
            self.st.unallocated() + outstanding + transferred,
            self.st.total_funded
        );
        assert_eq!(self.st.total_withdrawn, transferred);
        assert!(self.st.total_withdrawn <= self.st.total_granted);
        for s in self.schedules.values() {
            assert!(s.withdrawn < s.total_granted);
        }
    }
}

#[test]
fn end_to_end_user_claims_whole_grant_after_cliff() {
    let user = key(1);
    let mut h = Harness::funded(1000);
    assert_eq!(h.st.admin, admin());
    assert_eq!((h.st.user_pool, h.st.partner_pool, h.st.team_pool), (500, 250, 250));

    h.register(user, Role::User, 100).unwrap();
    assert_eq!(h.start(admin()).unwrap(), T0);
    h.advance_days(300);
    h.advance(1);

    assert_eq!(h.claim(user, Role::User).unwrap(), 100);
    assert_eq!(h.tokens.transfers, vec![(admin(), user, 100)]);
    assert_eq!(h.tokens.balance_of(&user), 100);
    assert_eq!(h.tokens.balance_of(&admin()), 900);
    assert!(!h.schedules.contains_key(&(user, Role::User)));
    h.assert_conserved();
}

#[test]
fn claim_exactly_at_cliff_transfers_grant() {
    let user = key(1);
    let mut h = Harness::funded(1000);
    h.register(user, Role::User, 100).unwrap();
    h.start(admin()).unwrap();
    h.advance_days(300);

    assert_eq!(h.claim(user, Role::User).unwrap(), 100);
    expect_err(h.claim(user, Role::User), VestingError::BeneficiaryNotFound);
    expect_err(h.check(user, Role::User), VestingError::BeneficiaryNotFound);
}

#[test]
fn funding_failures_leave_pools_empty() {
    let mut h = Harness::new(1000);
    expect_err(h.fund(admin(), 0), VestingError::InvalidAmount);
    expect_err(h.fund(admin(), 1001), VestingError::AllowanceInsufficient);
    expect_err(h.register(key(1), Role::User, 100), VestingError::PoolNotFunded);
    assert_eq!(h.st.unallocated(), 0);
    assert!(!h.st.funded);

    let mut unapproved = Harness::new(0);
    unapproved.tokens.mint(admin(), 1000);
    expect_err(unapproved.fund(admin(), 1000), VestingError::AllowanceInsufficient);
}

#[test]
fn registration_rules() {
    let user = key(1);
    let mut h = Harness::funded(1000);

    h.register(user, Role::User, 100).unwrap();
    expect_err(h.register(user, Role::User, 100), VestingError::DuplicateBeneficiary);
    h.register(user, Role::Partner, 100).unwrap();
    h.register(user, Role::Team, 100).unwrap();
    expect_err(
        h.register(Pubkey::default(), Role::User, 100),
        VestingError::ZeroAddress,
    );
    expect_err(h.register(key(2), Role::Team, 151), VestingError::PoolExhausted);
    h.register(key(2), Role::Team, 150).unwrap();
    assert_eq!(h.st.team_pool, 0);
    h.assert_conserved();

    h.start(admin()).unwrap();
    for days in [0, 1, 365, 10_000] {
        h.advance_days(days);
        expect_err(h.register(key(3), Role::User, 1), VestingError::VestingAlreadyActive);
    }
    h.assert_conserved();
}

#[test]
fn start_rules() {
    let mut h = Harness::funded(1000);
    expect_err(h.start(key(1)), VestingError::Unauthorized);
    assert!(!h.st.active);
    h.start(admin()).unwrap();
    expect_err(h.start(admin()), VestingError::AlreadyActive);
}

#[test]
fn queries_before_start_and_for_strangers() {
    let user = key(1);
    let mut h = Harness::funded(1000);
    h.register(user, Role::User, 100).unwrap();

    expect_err(h.check(user, Role::User), VestingError::NotStarted);
    expect_err(h.claim(user, Role::User), VestingError::NotStarted);

    h.start(admin()).unwrap();
    h.advance_days(300);
    expect_err(h.check(admin(), Role::User), VestingError::BeneficiaryNotFound);
    expect_err(h.claim(admin(), Role::User), VestingError::BeneficiaryNotFound);
    expect_err(h.check(user, Role::Partner), VestingError::BeneficiaryNotFound);
}

#[test]
fn cliff_boundaries() {
    let user = key(1);
    let mut h = Harness::funded(1000);
    h.register(user, Role::User, 100).unwrap();
    h.register(key(2), Role::Partner, 100).unwrap();
    h.register(key(3), Role::Team, 100).unwrap();
    h.start(admin()).unwrap();

    h.advance_days(59);
    expect_err(h.check(key(2), Role::Partner), VestingError::NothingVestedYet);
    expect_err(h.check(key(3), Role::Team), VestingError::NothingVestedYet);
    h.advance_days(2);
    assert!(h.check(key(2), Role::Partner).unwrap() > 0);
    assert!(h.check(key(3), Role::Team).unwrap() > 0);

    h.advance_days(39);
    expect_err(h.claim(user, Role::User), VestingError::NothingVestedYet);
    h.advance_days(199);
    expect_err(h.check(user, Role::User), VestingError::NothingVestedYet);
    h.advance_days(2);
    assert_eq!(h.check(user, Role::User).unwrap(), 100);

    // Checking never consumes anything.
    assert_eq!(h.check(user, Role::User).unwrap(), 100);
    assert!(h.tokens.transfers.is_empty());
}

#[test]
fn claims_are_independent_across_beneficiaries() {
    let mut h = Harness::funded(1000);
    h.register(key(1), Role::Partner, 100).unwrap();
    h.register(key(2), Role::Partner, 100).unwrap();
    h.start(admin()).unwrap();
    h.advance_days(365);

    assert_eq!(h.claim(key(2), Role::Partner).unwrap(), 100);
    assert_eq!(h.claim(key(1), Role::Partner).unwrap(), 100);
    assert!(h.schedules.is_empty());
    h.assert_conserved();
}

#[test]
fn conservation_holds_over_a_mixed_history() {
    let mut h = Harness::funded(1_000_003);
    let mut seed: u64 = 0x5eed;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        seed >> 33
    };

    for i in 0..60u8 {
        let role = Role::ALL[(next() % 3) as usize];
        let amount = next() % 40_000;
        // Failures (zero grants, duplicates, exhausted pools) must not disturb anything.
        let _ = h.register(key(i % 20), role, amount);
        h.assert_conserved();
    }
    h.start(admin()).unwrap();

    let holders: Vec<(Pubkey, Role)> = h.schedules.keys().copied().collect();
    for _ in 0..40 {
        h.advance_days((next() % 30) as i64);
        for &(who, role) in &holders {
            let before = h.schedules.get(&(who, role)).map(|s| s.withdrawn);
            match h.claim(who, role) {
                Ok(amount) => {
                    assert!(amount > 0);
                    if let Some(s) = h.schedules.get(&(who, role)) {
                        assert_eq!(s.withdrawn, before.unwrap_or_default() + amount);
                    }
                }
                Err(_) => assert_eq!(h.schedules.get(&(who, role)).map(|s| s.withdrawn), before),
            }
            h.assert_conserved();
        }
    }

    h.advance_days(1_000);
    for &(who, role) in &holders {
        let _ = h.claim(who, role);
    }
    assert!(h.schedules.is_empty());
    assert_eq!(h.tokens.transferred_out(), h.st.total_granted);
    h.assert_conserved();
}
