// Investment Manager - lock-period investment bookkeeping on Solana
// Architecture: Manager + Factory + per-investor SmartAccount, minting through
// a ledger whose mint authority is a program PDA

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("9nvMgrCAND4Tp5bU9YbZhmJkKwmhEbyDGiMJhLdYGd8N");

#[program]
pub mod investment_manager {
    use super::*;

    /// Create the investment token mint with a ledger PDA as mint authority
    pub fn initialize_ledger(ctx: Context<InitializeLedger>, decimals: u8) -> Result<()> {
        instructions::initialize_ledger::handler(ctx, decimals)
    }

    /// Rotate the designated minter (ledger owner only)
    pub fn set_minter(ctx: Context<SetMinter>, minter: Pubkey) -> Result<()> {
        instructions::set_minter::handler(ctx, minter)
    }

    /// Mint to one recipient (designated minter only)
    pub fn mint_tokens(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
        instructions::mint_tokens::handler(ctx, amount)
    }

    /// Mint to the remaining accounts, one amount each (designated minter only)
    pub fn batch_mint<'info>(
        ctx: Context<'_, '_, 'info, 'info, BatchMint<'info>>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        instructions::mint_tokens::batch_handler(ctx, amounts)
    }

    /// Create the manager and its factory
    ///
    /// Security considerations:
    /// - Signer must own the ledger
    /// - `None` selects the default 30 day lock period
    pub fn initialize_manager(
        ctx: Context<InitializeManager>,
        lock_period: Option<i64>,
    ) -> Result<()> {
        instructions::initialize_manager::handler(ctx, lock_period)
    }

    /// Deposit `amount` on behalf of `investor`
    ///
    /// Security considerations:
    /// - Owner-only (has_one constraint), rejected while paused
    /// - Manager must be the ledger's designated minter
    /// - Creates the investor's smart account on first use
    /// - Restarts the investor's lock period
    pub fn invest(ctx: Context<Invest>, investor: Pubkey, amount: u64) -> Result<()> {
        instructions::invest::handler(ctx, investor, amount)
    }

    /// Burn `tokens` from the investor's smart account after the lock period
    ///
    /// Security considerations:
    /// - Owner-only, rejected while paused
    /// - Lock must be strictly over: `now > last_investment + lock_period`
    /// - Amount bounded by the smart account balance
    pub fn initiate_withdrawal(
        ctx: Context<InitiateWithdrawal>,
        investor: Pubkey,
        tokens: u64,
    ) -> Result<()> {
        instructions::initiate_withdrawal::handler(ctx, investor, tokens)
    }

    /// Replace the lock period applied to every investor
    ///
    /// Security considerations:
    /// - Owner-only (has_one constraint)
    /// - Negative periods are rejected
    /// - Takes effect immediately for existing investments
    pub fn set_lock_period(ctx: Context<ManagerAdmin>, period: i64) -> Result<()> {
        instructions::manager_admin::set_lock_period_handler(ctx, period)
    }

    /// Replace the deposit -> token conversion rate
    pub fn set_conversion(
        ctx: Context<ManagerAdmin>,
        numerator: u64,
        denominator: u64,
    ) -> Result<()> {
        instructions::manager_admin::set_conversion_handler(ctx, numerator, denominator)
    }

    /// Stop invest, initiate_withdrawal and burn_tokens
    ///
    /// Security considerations:
    /// - Owner-only; fails if already paused
    /// - Lookups and policy changes stay available
    pub fn pause(ctx: Context<ManagerAdmin>) -> Result<()> {
        instructions::manager_admin::pause_handler(ctx)
    }

    /// Resume a paused manager (owner only, fails if not paused)
    pub fn unpause(ctx: Context<ManagerAdmin>) -> Result<()> {
        instructions::manager_admin::unpause_handler(ctx)
    }

    /// Hand the manager to `new_owner`
    ///
    /// Security considerations:
    /// - Owner-only; the default key is rejected
    /// - Effective immediately, with no acceptance step
    pub fn transfer_ownership(ctx: Context<ManagerAdmin>, new_owner: Pubkey) -> Result<()> {
        instructions::manager_admin::transfer_ownership_handler(ctx, new_owner)
    }

    /// Create the smart account for `investor` (manager only, once per investor)
    pub fn create_account(ctx: Context<CreateAccount>, investor: Pubkey) -> Result<Pubkey> {
        instructions::create_account::handler(ctx, investor)
    }

    /// Look up the smart account for `investor`, if any
    pub fn get_account(ctx: Context<GetAccount>, investor: Pubkey) -> Result<Option<Pubkey>> {
        instructions::get_account::handler(ctx, investor)
    }

    /// Remove an empty smart account and its investment record (manager only)
    pub fn remove_account(ctx: Context<RemoveAccount>, investor: Pubkey) -> Result<()> {
        instructions::remove_account::handler(ctx, investor)
    }

    /// Burn investment tokens from a smart account
    ///
    /// Security considerations:
    /// - Owner of the bound manager only
    /// - Same pause and lock-period gate as `initiate_withdrawal`
    pub fn burn_tokens(ctx: Context<BurnTokens>, amount: u64) -> Result<()> {
        instructions::burn_tokens::handler(ctx, amount)
    }

    /// Move a non-investment token out of a smart account (account owner only)
    pub fn withdraw_tokens(ctx: Context<WithdrawTokens>, amount: u64) -> Result<()> {
        instructions::withdraw_tokens::handler(ctx, amount)
    }
}
