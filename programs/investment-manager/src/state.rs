use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::InvestmentError;

/// Ledger configuration for the investment token
///
/// The PDA is the SPL mint authority; `minter` is the only key allowed to
/// request new supply through it.
#[account]
pub struct LedgerState {
    /// Owner allowed to rotate the minter
    pub owner: Pubkey,              // 32 bytes

    /// Designated minter (a wallet, or the manager state PDA)
    pub minter: Pubkey,             // 32 bytes

    /// Mint of the investment token
    pub mint: Pubkey,               // 32 bytes

    /// Bump seed for ledger state PDA
    pub bump: u8,                   // 1 byte

    pub _reserved: [u8; 32],        // 32 bytes
}

impl LedgerState {
    /// Replace the designated minter, returning the previous one
    pub fn set_minter(&mut self, minter: Pubkey) -> Result<Pubkey> {
        require_keys_neq!(minter, Pubkey::default(), InvestmentError::InvalidAddress);
        Ok(std::mem::replace(&mut self.minter, minter))
    }

    pub fn is_minter(&self, key: &Pubkey) -> bool {
        self.minter == *key
    }

    /// Validate a batch mint and return the total supply it adds
    pub fn check_batch(amounts: &[u64], recipients: usize) -> Result<u64> {
        require!(
            !amounts.is_empty() && amounts.len() <= MAX_BATCH_MINT,
            InvestmentError::InvalidBatchSize
        );
        require!(
            amounts.len() == recipients,
            InvestmentError::BatchLengthMismatch
        );

        amounts.iter().try_fold(0u64, |total, amount| {
            require!(*amount > 0, InvestmentError::ZeroAmount);
            total
                .checked_add(*amount)
                .ok_or(error!(InvestmentError::MathOverflow))
        })
    }
}

/// Rational conversion between deposited value and investment tokens
///
/// `tokens = amount * numerator / denominator`. Requiring
/// `numerator >= denominator` keeps the mapping injective and monotonic.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub numerator: u64,
    pub denominator: u64,
}

impl Default for Conversion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Conversion {
    pub const IDENTITY: Conversion = Conversion {
        numerator: 1,
        denominator: 1,
    };

    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        require!(
            denominator > 0 && numerator >= denominator,
            InvestmentError::InvalidConversion
        );
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Tokens minted for a deposit of `amount`
    pub fn to_tokens(&self, amount: u64) -> Result<u64> {
        Self::scale(amount, self.numerator, self.denominator)
    }

    /// External value paid out for `tokens` redeemed (rounds down)
    pub fn to_fiat(&self, tokens: u64) -> Result<u64> {
        Self::scale(tokens, self.denominator, self.numerator)
    }

    fn scale(value: u64, mul: u64, div: u64) -> Result<u64> {
        let scaled = (value as u128)
            .checked_mul(mul as u128)
            .ok_or(InvestmentError::MathOverflow)?
            .checked_div(div as u128)
            .ok_or(InvestmentError::InvalidConversion)?;

        u64::try_from(scaled).map_err(|_| error!(InvestmentError::MathOverflow))
    }
}

/// Manager policy and orchestration state
#[account]
pub struct ManagerState {
    /// Owner - the only caller of invest, withdrawal and policy instructions
    pub owner: Pubkey,              // 32 bytes

    /// Ledger state this manager mints through
    pub ledger: Pubkey,             // 32 bytes

    /// Investment token mint
    pub token_mint: Pubkey,         // 32 bytes

    /// Factory holding the investor -> smart account mapping
    pub factory: Pubkey,            // 32 bytes

    /// Seconds after the latest investment before withdrawal is allowed
    pub lock_period: i64,           // 8 bytes

    pub conversion: Conversion,     // 16 bytes

    pub paused: bool,               // 1 byte

    /// Set while invest / initiate_withdrawal is running
    pub in_flight: bool,            // 1 byte

    /// Bump seed for manager state PDA
    pub bump: u8,                   // 1 byte

    /// Bump seed for factory state PDA
    pub factory_bump: u8,           // 1 byte

    pub _reserved: [u8; 64],        // 64 bytes
}

impl ManagerState {
    pub fn ensure_active(&self) -> Result<()> {
        require!(!self.paused, InvestmentError::Paused);
        Ok(())
    }

    /// Claim the in-flight slot for an invest / withdrawal call.
    ///
    /// A failing instruction has all its account writes discarded, so the
    /// flag cannot stay set after an error exit.
    pub fn enter(&mut self) -> Result<()> {
        require!(!self.in_flight, InvestmentError::ReentrantCall);
        self.in_flight = true;
        Ok(())
    }

    pub fn exit(&mut self) {
        self.in_flight = false;
    }

    pub fn pause(&mut self) -> Result<()> {
        require!(!self.paused, InvestmentError::Paused);
        self.paused = true;
        Ok(())
    }

    pub fn unpause(&mut self) -> Result<()> {
        require!(self.paused, InvestmentError::NotPaused);
        self.paused = false;
        Ok(())
    }

    /// Replace the lock period for every investor, returning the old one
    pub fn set_lock_period(&mut self, period: i64) -> Result<i64> {
        require!(period >= 0, InvestmentError::InvalidLockPeriod);
        Ok(std::mem::replace(&mut self.lock_period, period))
    }

    pub fn transfer_ownership(&mut self, new_owner: Pubkey) -> Result<Pubkey> {
        require_keys_neq!(new_owner, Pubkey::default(), InvestmentError::InvalidAddress);
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }

    /// Validate an investment and return the tokens it mints
    pub fn quote_investment(&self, investor: &Pubkey, amount: u64) -> Result<u64> {
        self.ensure_active()?;
        require!(amount > 0, InvestmentError::ZeroAmount);
        require_keys_neq!(*investor, Pubkey::default(), InvestmentError::InvalidAddress);

        let tokens = self.conversion.to_tokens(amount)?;
        require!(tokens > 0, InvestmentError::ZeroAmount);
        Ok(tokens)
    }

    /// Last instant at which the lock is still in force; withdrawal opens one
    /// second later. Saturates, so an oversized period locks indefinitely.
    pub fn unlock_at(&self, record: &InvestmentRecord) -> i64 {
        record
            .last_investment_timestamp
            .saturating_add(self.lock_period)
    }

    pub fn is_unlocked(&self, record: &InvestmentRecord, now: i64) -> bool {
        now > self.unlock_at(record)
    }

    /// Validate a withdrawal of `tokens` against the investor's record and
    /// current smart account balance, returning the external value it pays out
    pub fn quote_withdrawal(
        &self,
        record: Option<&InvestmentRecord>,
        balance: u64,
        tokens: u64,
        now: i64,
    ) -> Result<u64> {
        self.ensure_active()?;

        let record = record.ok_or(InvestmentError::NoInvestmentFound)?;
        require!(
            self.is_unlocked(record, now),
            InvestmentError::LockPeriodNotOver
        );

        // The record outlives a full withdrawal; an emptied account no longer
        // counts as an investment.
        require!(balance > 0, InvestmentError::NoInvestmentFound);
        require!(tokens > 0, InvestmentError::ZeroAmount);
        require!(tokens <= balance, InvestmentError::InsufficientBalance);

        self.conversion.to_fiat(tokens)
    }

    /// Gate shared by every burn out of a smart account: the withdrawal rules
    /// (pause, record, lock, balance) and then the account's own mint check.
    /// Returns the external value of the burned tokens.
    pub fn authorize_burn(
        &self,
        account: Option<&SmartAccount>,
        record: Option<&InvestmentRecord>,
        mint: &Pubkey,
        balance: u64,
        tokens: u64,
        now: i64,
    ) -> Result<u64> {
        let fiat_amount = self.quote_withdrawal(record, balance, tokens, now)?;
        account
            .ok_or(InvestmentError::NoInvestmentFound)?
            .check_burn(mint, tokens, balance)?;
        Ok(fiat_amount)
    }
}

/// Factory state - owns the investor -> smart account mapping
#[account]
pub struct FactoryState {
    /// Manager allowed to create and remove accounts
    pub manager: Pubkey,            // 32 bytes

    /// Number of live smart accounts
    pub account_count: u64,         // 8 bytes

    pub bump: u8,                   // 1 byte
}

impl FactoryState {
    /// Address of the smart account for `investor` under `factory`
    pub fn account_address(factory: &Pubkey, investor: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[SMART_ACCOUNT_SEED, factory.as_ref(), investor.as_ref()],
            &crate::ID,
        )
    }

    pub fn register(&mut self) -> Result<()> {
        self.account_count = self
            .account_count
            .checked_add(1)
            .ok_or(InvestmentError::MathOverflow)?;
        Ok(())
    }

    pub fn unregister(&mut self) -> Result<()> {
        self.account_count = self
            .account_count
            .checked_sub(1)
            .ok_or(InvestmentError::MathOverflow)?;
        Ok(())
    }

    /// Bind `account` to `investor` and count it, unless it is already bound.
    /// Returns true when the account was opened by this call.
    #[allow(clippy::too_many_arguments)]
    pub fn open_account(
        &mut self,
        factory: Pubkey,
        account: &mut SmartAccount,
        investor: Pubkey,
        manager: Pubkey,
        token_mint: Pubkey,
        bump: u8,
        now: i64,
    ) -> Result<bool> {
        if account.is_bound() {
            return Ok(false);
        }
        account.bind(investor, token_mint, manager, factory, now, bump);
        self.register()?;
        Ok(true)
    }

    /// Drop an account from the count. Only an account whose investment
    /// token balance is zero may go.
    pub fn release_account(&mut self, balance: u64) -> Result<()> {
        SmartAccount::check_removable(balance)?;
        self.unregister()
    }

    /// Resolve the account stored at `info` for `investor`. A missing or
    /// closed account, or one bound to someone else, resolves to `None`.
    pub fn lookup(info: &AccountInfo, investor: &Pubkey) -> Result<Option<Pubkey>> {
        let account = load_initialized::<SmartAccount>(info)?;
        Ok(account.filter(|a| a.owner == *investor).map(|_| info.key()))
    }
}

/// Per-investor custodial account
#[account]
pub struct SmartAccount {
    /// Investor this account holds tokens for
    pub owner: Pubkey,              // 32 bytes

    /// Investment token mint
    pub token_mint: Pubkey,         // 32 bytes

    /// Manager allowed to burn investment tokens
    pub manager: Pubkey,            // 32 bytes

    /// Factory that created this account
    pub factory: Pubkey,            // 32 bytes

    pub created_at: i64,            // 8 bytes

    pub bump: u8,                   // 1 byte
}

impl SmartAccount {
    pub fn bind(
        &mut self,
        owner: Pubkey,
        token_mint: Pubkey,
        manager: Pubkey,
        factory: Pubkey,
        now: i64,
        bump: u8,
    ) {
        self.owner = owner;
        self.token_mint = token_mint;
        self.manager = manager;
        self.factory = factory;
        self.created_at = now;
        self.bump = bump;
    }

    /// False for an account freshly allocated by `init_if_needed`
    pub fn is_bound(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Validate a manager burn of `amount` tokens of `mint`
    pub fn check_burn(&self, mint: &Pubkey, amount: u64, balance: u64) -> Result<()> {
        require_keys_eq!(*mint, self.token_mint, InvestmentError::InvalidMint);
        require!(amount > 0, InvestmentError::ZeroAmount);
        require!(amount <= balance, InvestmentError::InsufficientBalance);
        Ok(())
    }

    /// Removal would strand any tokens still held
    pub fn check_removable(balance: u64) -> Result<()> {
        require!(balance == 0, InvestmentError::AccountNotEmpty);
        Ok(())
    }

    /// Validate an owner withdrawal of a held token. The investment token is
    /// excluded so the lock period cannot be bypassed.
    pub fn check_withdraw(&self, mint: &Pubkey, amount: u64, balance: u64) -> Result<()> {
        require_keys_neq!(*mint, self.token_mint, InvestmentError::InvestmentTokenLocked);
        require!(amount > 0, InvestmentError::ZeroAmount);
        require!(amount <= balance, InvestmentError::InsufficientBalance);
        Ok(())
    }
}

/// Latest investment bookkeeping for one investor
#[account]
pub struct InvestmentRecord {
    pub investor: Pubkey,                   // 32 bytes

    /// Unix timestamp of the most recent investment; the lock restarts here
    pub last_investment_timestamp: i64,     // 8 bytes

    /// Cumulative deposited value
    pub total_invested: u64,                // 8 bytes

    /// Cumulative tokens minted
    pub total_tokens: u64,                  // 8 bytes

    pub bump: u8,                           // 1 byte
}

impl InvestmentRecord {
    /// Claim a freshly allocated record for `investor`. A record that is
    /// already claimed is left untouched; returns true on first claim.
    pub fn start(&mut self, investor: Pubkey, bump: u8) -> bool {
        if self.investor != Pubkey::default() {
            return false;
        }
        self.investor = investor;
        self.bump = bump;
        true
    }

    /// Overwrite the timestamp and accumulate totals
    pub fn record_investment(&mut self, amount: u64, tokens: u64, now: i64) -> Result<()> {
        self.last_investment_timestamp = now;
        self.total_invested = self
            .total_invested
            .checked_add(amount)
            .ok_or(InvestmentError::MathOverflow)?;
        self.total_tokens = self
            .total_tokens
            .checked_add(tokens)
            .ok_or(InvestmentError::MathOverflow)?;
        Ok(())
    }
}

/// Deserialize a program-owned account that may not exist yet
///
/// Returns `None` for an address with no data or a foreign owner (never
/// created, or closed).
pub fn load_initialized<T>(info: &AccountInfo) -> Result<Option<T>>
where
    T: AccountDeserialize + Owner,
{
    if info.owner != &T::owner() || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    T::try_deserialize(&mut &data[..]).map(Some)
}
