use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, state::*};

/// Create the manager, its factory and the manager custody token account
#[derive(Accounts)]
pub struct InitializeManager<'info> {
    /// Manager owner - must also own the ledger
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED, token_mint.key().as_ref()],
        bump = ledger_state.bump,
        constraint = ledger_state.owner == owner.key() @ InvestmentError::Unauthorized,
    )]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(address = ledger_state.mint @ InvestmentError::InvalidMint)]
    pub token_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = owner,
        space = MANAGER_STATE_SIZE,
        seeds = [MANAGER_SEED, token_mint.key().as_ref()],
        bump
    )]
    pub manager_state: Account<'info, ManagerState>,

    #[account(
        init,
        payer = owner,
        space = FACTORY_STATE_SIZE,
        seeds = [FACTORY_SEED, manager_state.key().as_ref()],
        bump
    )]
    pub factory_state: Account<'info, FactoryState>,

    /// Tokens are minted here first, then moved to the investor's smart account
    #[account(
        init,
        payer = owner,
        associated_token::mint = token_mint,
        associated_token::authority = manager_state,
    )]
    pub manager_custody: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeManager>, lock_period: Option<i64>) -> Result<()> {
    let lock_period = lock_period.unwrap_or(DEFAULT_LOCK_PERIOD);
    require!(lock_period >= 0, InvestmentError::InvalidLockPeriod);

    let manager_key = ctx.accounts.manager_state.key();
    let factory_key = ctx.accounts.factory_state.key();

    let manager_state = &mut ctx.accounts.manager_state;
    manager_state.owner = ctx.accounts.owner.key();
    manager_state.ledger = ctx.accounts.ledger_state.key();
    manager_state.token_mint = ctx.accounts.token_mint.key();
    manager_state.factory = factory_key;
    manager_state.lock_period = lock_period;
    manager_state.conversion = Conversion::IDENTITY;
    manager_state.paused = false;
    manager_state.in_flight = false;
    manager_state.bump = ctx.bumps.manager_state;
    manager_state.factory_bump = ctx.bumps.factory_state;
    manager_state._reserved = [0; 64];

    let factory_state = &mut ctx.accounts.factory_state;
    factory_state.manager = manager_key;
    factory_state.account_count = 0;
    factory_state.bump = ctx.bumps.factory_state;

    emit!(ManagerInitialized {
        manager: manager_key,
        owner: manager_state.owner,
        token_mint: manager_state.token_mint,
        factory: factory_key,
        lock_period,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
