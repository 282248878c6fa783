/// Lifecycle tests for the investment / withdrawal state machine
///
/// The harness drives the same state methods the instruction handlers call
/// (quote_investment, authorize_burn, InvestmentRecord::start, factory
/// open / release) against an in-memory token ledger. Every operation runs
/// through `Harness::atomic`, which restores the previous state on error the
/// way the runtime discards a failed transaction.
use std::collections::HashMap;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use investment_manager::{constants::*, errors::InvestmentError, state::*};

const DAY: i64 = SECONDS_PER_DAY;
const START: i64 = 1_700_000_000;

#[derive(Clone)]
struct Position {
    address: Pubkey,
    account: SmartAccount,
    record: Option<InvestmentRecord>,
    balance: u64,
}

#[derive(Clone)]
struct Harness {
    manager_key: Pubkey,
    manager: ManagerState,
    factory_key: Pubkey,
    factory: FactoryState,
    ledger: LedgerState,
    positions: HashMap<Pubkey, Position>,
    supply: u64,
    minted: u64,
    burned: u64,
    now: i64,
}

impl Harness {
    fn new() -> Self {
        let token_mint = Pubkey::new_unique();
        let manager_key = Pubkey::new_unique();
        let factory_key = Pubkey::new_unique();

        Harness {
            manager_key,
            manager: ManagerState {
                owner: Pubkey::new_unique(),
                ledger: Pubkey::new_unique(),
                token_mint,
                factory: factory_key,
                lock_period: DEFAULT_LOCK_PERIOD,
                conversion: Conversion::IDENTITY,
                paused: false,
                in_flight: false,
                bump: 255,
                factory_bump: 255,
                _reserved: [0; 64],
            },
            factory_key,
            factory: FactoryState {
                manager: manager_key,
                account_count: 0,
                bump: 255,
            },
            ledger: LedgerState {
                owner: Pubkey::new_unique(),
                minter: manager_key,
                mint: token_mint,
                bump: 255,
                _reserved: [0; 32],
            },
            positions: HashMap::new(),
            supply: 0,
            minted: 0,
            burned: 0,
            now: START,
        }
    }

    fn atomic<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let snapshot = self.clone();
        let result = op(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }

    fn warp(&mut self, seconds: i64) {
        self.now += seconds;
    }

    fn balance(&self, investor: &Pubkey) -> u64 {
        self.positions.get(investor).map_or(0, |p| p.balance)
    }

    fn get_account(&self, investor: &Pubkey) -> Option<Pubkey> {
        self.positions.get(investor).map(|p| p.address)
    }

    fn open_position(&mut self, investor: Pubkey) -> Result<()> {
        let (address, bump) = FactoryState::account_address(&self.factory_key, &investor);
        let position = self.positions.entry(investor).or_insert_with(|| Position {
            address,
            account: SmartAccount {
                owner: Pubkey::default(),
                token_mint: Pubkey::default(),
                manager: Pubkey::default(),
                factory: Pubkey::default(),
                created_at: 0,
                bump: 0,
            },
            record: None,
            balance: 0,
        });

        self.factory.open_account(
            self.factory_key,
            &mut position.account,
            investor,
            self.manager_key,
            self.manager.token_mint,
            bump,
            self.now,
        )?;
        Ok(())
    }

    fn invest(&mut self, investor: Pubkey, amount: u64) -> Result<u64> {
        self.atomic(|h| {
            let tokens = h.manager.quote_investment(&investor, amount)?;
            require!(
                h.ledger.is_minter(&h.manager_key),
                InvestmentError::NotMinter
            );
            h.manager.enter()?;

            h.open_position(investor)?;

            let now = h.now;
            let position = h
                .positions
                .get_mut(&investor)
                .ok_or(InvestmentError::NoInvestmentFound)?;
            let record = position.record.get_or_insert_with(|| InvestmentRecord {
                investor: Pubkey::default(),
                last_investment_timestamp: 0,
                total_invested: 0,
                total_tokens: 0,
                bump: 0,
            });
            record.start(investor, 255);
            record.record_investment(amount, tokens, now)?;

            position.balance = position
                .balance
                .checked_add(tokens)
                .ok_or(InvestmentError::MathOverflow)?;
            h.supply = h
                .supply
                .checked_add(tokens)
                .ok_or(InvestmentError::MathOverflow)?;
            h.minted += tokens;

            h.manager.exit();
            Ok(tokens)
        })
    }

    fn burn(&mut self, investor: Pubkey, tokens: u64) -> Result<u64> {
        let (account, record, balance) = match self.positions.get(&investor) {
            Some(p) => (Some(p.account.clone()), p.record.clone(), p.balance),
            None => (None, None, 0),
        };
        let fiat_amount = self.manager.authorize_burn(
            account.as_ref(),
            record.as_ref(),
            &self.manager.token_mint,
            balance,
            tokens,
            self.now,
        )?;

        self.manager.enter()?;
        let position = self
            .positions
            .get_mut(&investor)
            .ok_or(InvestmentError::NoInvestmentFound)?;
        position.balance -= tokens;
        self.supply -= tokens;
        self.burned += tokens;
        self.manager.exit();

        Ok(fiat_amount)
    }

    fn initiate_withdrawal(&mut self, investor: Pubkey, tokens: u64) -> Result<u64> {
        self.atomic(|h| h.burn(investor, tokens))
    }

    fn burn_tokens(&mut self, investor: Pubkey, tokens: u64) -> Result<()> {
        self.atomic(|h| h.burn(investor, tokens).map(|_| ()))
    }

    fn remove_account(&mut self, investor: Pubkey) -> Result<()> {
        self.atomic(|h| {
            let balance = h
                .positions
                .get(&investor)
                .ok_or(InvestmentError::NoInvestmentFound)?
                .balance;
            h.factory.release_account(balance)?;
            h.positions.remove(&investor);
            Ok(())
        })
    }

    fn assert_supply_invariant(&self) {
        let held: u64 = self.positions.values().map(|p| p.balance).sum();
        assert_eq!(self.supply, self.minted - self.burned);
        assert_eq!(self.supply, held, "Supply must equal tokens held by accounts");
    }
}

fn error_code(err: Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        Error::ProgramError(_) => u32::MAX,
    }
}

fn assert_fails<T: std::fmt::Debug>(result: Result<T>, expected: InvestmentError) {
    let err = result.expect_err("operation should fail");
    assert_eq!(error_code(err), u32::from(expected));
}

// =============================================================================
// Investment accounting
// =============================================================================

#[test]
fn test_balance_is_sum_of_converted_amounts() {
    let mut h = Harness::new();
    h.manager.conversion = Conversion::new(3, 2).unwrap();
    let investor = Pubkey::new_unique();

    let mut expected = 0;
    for amount in [1000u64, 333, 2] {
        let tokens = h.invest(investor, amount).unwrap();
        assert_eq!(tokens, h.manager.conversion.to_tokens(amount).unwrap());
        expected += tokens;
        h.warp(DAY);
    }

    // 1500 + 499 + 3
    assert_eq!(expected, 2002);
    assert_eq!(h.balance(&investor), expected);

    let record = h.positions[&investor].record.clone().unwrap();
    assert_eq!(record.total_invested, 1335);
    assert_eq!(record.total_tokens, 2002);
}

#[test]
fn test_one_account_per_investor() {
    let mut h = Harness::new();
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();

    h.invest(alice, 100).unwrap();
    let first_address = h.get_account(&alice).unwrap();
    h.invest(alice, 200).unwrap();
    h.invest(alice, 300).unwrap();
    h.invest(bob, 50).unwrap();

    assert_eq!(h.factory.account_count, 2);
    assert_eq!(h.get_account(&alice), Some(first_address));
    assert_ne!(h.get_account(&alice), h.get_account(&bob));

    let account = &h.positions[&alice].account;
    assert_eq!(account.owner, alice);
    assert_eq!(account.manager, h.manager_key);
    assert_eq!(account.created_at, START);
}

#[test]
fn test_invest_rejects_zero_amount_and_default_investor() {
    let mut h = Harness::new();

    assert_fails(h.invest(Pubkey::new_unique(), 0), InvestmentError::ZeroAmount);
    assert_fails(h.invest(Pubkey::default(), 10), InvestmentError::InvalidAddress);

    assert_eq!(h.factory.account_count, 0);
    assert_eq!(h.supply, 0);
}

#[test]
fn test_invest_requires_manager_to_be_minter() {
    let mut h = Harness::new();
    h.ledger.set_minter(Pubkey::new_unique()).unwrap();
    let investor = Pubkey::new_unique();

    assert_fails(h.invest(investor, 1000), InvestmentError::NotMinter);

    assert!(h.get_account(&investor).is_none(), "No account on failed invest");
    assert_eq!(h.supply, 0);
}

#[test]
fn test_reentrant_invest_rejected() {
    let mut h = Harness::new();
    let investor = Pubkey::new_unique();
    h.manager.in_flight = true;

    assert_fails(h.invest(investor, 1000), InvestmentError::ReentrantCall);
    assert_eq!(h.balance(&investor), 0);

    h.manager.in_flight = false;
    h.invest(investor, 1000).unwrap();
    assert!(!h.manager.in_flight, "Flag released after a completed call");
}

// =============================================================================
// Lock period
// =============================================================================

#[test]
fn test_lock_boundary_is_exclusive() {
    let mut h = Harness::new();
    let investor = Pubkey::new_unique();
    h.invest(investor, 1000).unwrap();

    h.warp(DEFAULT_LOCK_PERIOD);
    assert_fails(
        h.initiate_withdrawal(investor, 1000),
        InvestmentError::LockPeriodNotOver,
    );

    h.warp(1);
    h.initiate_withdrawal(investor, 1000).unwrap();
    assert_eq!(h.balance(&investor), 0);
}

#[test]
fn test_reinvesting_restarts_lock() {
    let mut h = Harness::new();
    let investor = Pubkey::new_unique();
    h.invest(investor, 1000).unwrap();

    // First deposit's lock is already over
    h.warp(DEFAULT_LOCK_PERIOD + 10);
    h.invest(investor, 500).unwrap();
    let reinvested_at = h.now;

    assert_fails(
        h.initiate_withdrawal(investor, 100),
        InvestmentError::LockPeriodNotOver,
    );

    h.now = reinvested_at + DEFAULT_LOCK_PERIOD;
    assert_fails(
        h.initiate_withdrawal(investor, 100),
        InvestmentError::LockPeriodNotOver,
    );

    h.warp(1);
    h.initiate_withdrawal(investor, 100).unwrap();
    assert_eq!(h.balance(&investor), 1400);
}

#[test]
fn test_lock_period_change_is_retroactive() {
    let mut h = Harness::new();
    let investor = Pubkey::new_unique();
    h.invest(investor, 1000).unwrap();
    h.warp(10 * DAY + 1);

    assert_fails(
        h.initiate_withdrawal(investor, 100),
        InvestmentError::LockPeriodNotOver,
    );

    // Shortening unlocks existing investments immediately
    assert_eq!(h.manager.set_lock_period(10 * DAY).unwrap(), DEFAULT_LOCK_PERIOD);
    h.initiate_withdrawal(investor, 100).unwrap();

    // Lengthening locks them again
    h.manager.set_lock_period(60 * DAY).unwrap();
    assert_fails(
        h.initiate_withdrawal(investor, 100),
        InvestmentError::LockPeriodNotOver,
    );
}

#[test]
fn test_zero_lock_period_still_needs_one_second() {
    let mut h = Harness::new();
    h.manager.set_lock_period(0).unwrap();
    let investor = Pubkey::new_unique();
    h.invest(investor, 10).unwrap();

    assert_fails(
        h.initiate_withdrawal(investor, 10),
        InvestmentError::LockPeriodNotOver,
    );
    h.warp(1);
    h.initiate_withdrawal(investor, 10).unwrap();
}

// =============================================================================
// Withdrawal
// =============================================================================

#[test]
fn test_withdraw_more_than_balance_fails() {
    let mut h = Harness::new();
    let investor = Pubkey::new_unique();
    h.invest(investor, 1000).unwrap();
    h.warp(DEFAULT_LOCK_PERIOD + 1);

    assert_fails(
        h.initiate_withdrawal(investor, 1001),
        InvestmentError::InsufficientBalance,
    );
    assert_eq!(h.balance(&investor), 1000);
    assert_eq!(h.supply, 1000);
}

#[test]
fn test_withdraw_without_investment() {
    let mut h = Harness::new();
    h.warp(DEFAULT_LOCK_PERIOD + 1);

    assert_fails(
        h.initiate_withdrawal(Pubkey::new_unique(), 1),
        InvestmentError::NoInvestmentFound,
    );
}

#[test]
fn test_withdraw_zero_tokens_fails() {
    let mut h = Harness::new();
    let investor = Pubkey::new_unique();
    h.invest(investor, 1000).unwrap();
    h.warp(DEFAULT_LOCK_PERIOD + 1);

    assert_fails(h.initiate_withdrawal(investor, 0), InvestmentError::ZeroAmount);
}

#[test]
fn test_withdrawal_pays_out_converted_value() {
    let mut h = Harness::new();
    h.manager.conversion = Conversion::new(2, 1).unwrap();
    let investor = Pubkey::new_unique();

    assert_eq!(h.invest(investor, 500).unwrap(), 1000);
    h.warp(DEFAULT_LOCK_PERIOD + 1);

    assert_eq!(h.initiate_withdrawal(investor, 400).unwrap(), 200);
    assert_eq!(h.balance(&investor), 600);
}

#[test]
fn test_emptied_account_keeps_stale_record() {
    let mut h = Harness::new();
    let investor = Pubkey::new_unique();
    h.invest(investor, 1000).unwrap();
    h.warp(DEFAULT_LOCK_PERIOD + 1);
    h.initiate_withdrawal(investor, 1000).unwrap();

    let record = h.positions[&investor].record.clone().unwrap();
    assert_eq!(record.last_investment_timestamp, START);

    assert_fails(
        h.initiate_withdrawal(investor, 1),
        InvestmentError::NoInvestmentFound,
    );
}

#[test]
fn test_supply_tracks_mints_and_burns() {
    let mut h = Harness::new();
    let investors: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();

    for (i, investor) in investors.iter().enumerate() {
        h.invest(*investor, 1000 * (i as u64 + 1)).unwrap();
        h.assert_supply_invariant();
    }

    h.warp(DEFAULT_LOCK_PERIOD + 1);
    for (i, investor) in investors.iter().enumerate() {
        h.initiate_withdrawal(*investor, 500 * (i as u64 + 1)).unwrap();
        h.assert_supply_invariant();

        let _ = h.initiate_withdrawal(*investor, u64::MAX);
        h.assert_supply_invariant();
    }

    assert_eq!(h.minted, 6000);
    assert_eq!(h.burned, 3000);
    assert_eq!(h.supply, 3000);
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_single_investment_lifecycle() {
    let mut h = Harness::new();
    let a = Pubkey::new_unique();

    h.invest(a, 1000).unwrap();

    h.warp(30 * DAY - 1);
    assert_fails(h.initiate_withdrawal(a, 1000), InvestmentError::LockPeriodNotOver);

    h.warp(2);
    h.initiate_withdrawal(a, 1000).unwrap();
    assert_eq!(h.balance(&a), 0);

    assert_fails(h.initiate_withdrawal(a, 1000), InvestmentError::NoInvestmentFound);
}

#[test]
fn test_scenario_partial_withdrawals() {
    let mut h = Harness::new();
    let a = Pubkey::new_unique();

    h.invest(a, 1000).unwrap();
    h.invest(a, 500).unwrap();
    h.invest(a, 750).unwrap();
    assert_eq!(h.balance(&a), 2250);

    h.warp(DEFAULT_LOCK_PERIOD + 1);

    h.initiate_withdrawal(a, 500).unwrap();
    assert_eq!(h.balance(&a), 1750);

    h.initiate_withdrawal(a, 750).unwrap();
    assert_eq!(h.balance(&a), 1000);

    h.initiate_withdrawal(a, 1000).unwrap();
    assert_eq!(h.balance(&a), 0);
    h.assert_supply_invariant();
}

#[test]
fn test_scenario_pause_blocks_invest_and_withdraw() {
    let mut h = Harness::new();
    let a = Pubkey::new_unique();
    h.invest(a, 1000).unwrap();
    h.warp(DEFAULT_LOCK_PERIOD + 1);

    h.manager.pause().unwrap();
    assert_fails(h.invest(a, 100), InvestmentError::Paused);
    assert_fails(h.initiate_withdrawal(a, 100), InvestmentError::Paused);
    assert_eq!(h.balance(&a), 1000);

    // Reads stay available while paused
    assert!(h.get_account(&a).is_some());

    h.manager.unpause().unwrap();
    h.initiate_withdrawal(a, 100).unwrap();
    h.invest(a, 100).unwrap();
    assert_eq!(h.balance(&a), 1000);
}

// =============================================================================
// Account lifecycle
// =============================================================================

#[test]
fn test_remove_account_requires_empty_balance() {
    let mut h = Harness::new();
    let a = Pubkey::new_unique();
    h.invest(a, 1000).unwrap();

    assert_fails(h.remove_account(a), InvestmentError::AccountNotEmpty);
    assert_eq!(h.factory.account_count, 1);

    h.warp(DEFAULT_LOCK_PERIOD + 1);
    h.initiate_withdrawal(a, 1000).unwrap();
    h.remove_account(a).unwrap();

    assert_eq!(h.factory.account_count, 0);
    assert!(h.get_account(&a).is_none());
    assert_fails(h.initiate_withdrawal(a, 1), InvestmentError::NoInvestmentFound);
}

#[test]
fn test_reinvest_after_removal_starts_fresh() {
    let mut h = Harness::new();
    let a = Pubkey::new_unique();
    h.invest(a, 1000).unwrap();
    h.warp(DEFAULT_LOCK_PERIOD + 1);
    h.initiate_withdrawal(a, 1000).unwrap();
    h.remove_account(a).unwrap();

    h.invest(a, 200).unwrap();
    let record = h.positions[&a].record.clone().unwrap();
    assert_eq!(record.last_investment_timestamp, h.now);
    assert_eq!(record.total_invested, 200);
    assert_eq!(h.factory.account_count, 1);

    assert_fails(h.initiate_withdrawal(a, 200), InvestmentError::LockPeriodNotOver);
}

#[test]
fn test_owner_withdraw_excludes_investment_token() {
    let mut h = Harness::new();
    let a = Pubkey::new_unique();
    h.invest(a, 1000).unwrap();
    let account = h.positions[&a].account.clone();

    let err = account
        .check_withdraw(&h.manager.token_mint, 1000, 1000)
        .unwrap_err();
    assert_eq!(error_code(err), u32::from(InvestmentError::InvestmentTokenLocked));

    let other_mint = Pubkey::new_unique();
    assert!(account.check_withdraw(&other_mint, 40, 50).is_ok());

    let err = account.check_withdraw(&other_mint, 60, 50).unwrap_err();
    assert_eq!(error_code(err), u32::from(InvestmentError::InsufficientBalance));
}

#[test]
fn test_burn_rejects_foreign_token() {
    let mut h = Harness::new();
    let a = Pubkey::new_unique();
    h.invest(a, 1000).unwrap();
    let account = &h.positions[&a].account;

    let err = account
        .check_burn(&Pubkey::new_unique(), 10, 1000)
        .unwrap_err();
    assert_eq!(error_code(err), u32::from(InvestmentError::InvalidMint));
    assert!(account.check_burn(&h.manager.token_mint, 1000, 1000).is_ok());
}

#[test]
fn test_burn_tokens_respects_pause_and_lock() {
    let mut h = Harness::new();
    let a = Pubkey::new_unique();
    h.invest(a, 1000).unwrap();

    h.warp(1);
    assert_fails(h.burn_tokens(a, 1000), InvestmentError::LockPeriodNotOver);

    h.warp(DEFAULT_LOCK_PERIOD);
    h.manager.pause().unwrap();
    assert_fails(h.burn_tokens(a, 1000), InvestmentError::Paused);
    assert_eq!(h.balance(&a), 1000);
    assert_eq!(h.supply, 1000);

    h.manager.unpause().unwrap();
    h.burn_tokens(a, 300).unwrap();
    assert_eq!(h.balance(&a), 700);
    h.assert_supply_invariant();
}

#[test]
fn test_reinvest_keeps_first_record_and_account() {
    let mut h = Harness::new();
    let a = Pubkey::new_unique();
    h.invest(a, 100).unwrap();
    h.warp(DAY);
    h.invest(a, 200).unwrap();

    let position = &h.positions[&a];
    let record = position.record.clone().unwrap();
    assert_eq!(record.investor, a);
    assert_eq!(record.last_investment_timestamp, START + DAY);
    assert_eq!(position.account.created_at, START);
    assert_eq!(h.factory.account_count, 1);
}
