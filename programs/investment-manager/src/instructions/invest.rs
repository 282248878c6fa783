use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use super::create_account::register_account;
use super::shared::{mint_tokens_signed, transfer_tokens_signed};
use crate::{constants::*, errors::*, events::*, state::*};

/// Record an investment for `investor` and credit tokens to their smart account
///
/// The smart account, its token account and the investment record are
/// created on the first investment.
#[derive(Accounts)]
#[instruction(investor: Pubkey)]
pub struct Invest<'info> {
    /// Manager owner - only they can invest on behalf of investors
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [MANAGER_SEED, manager_state.token_mint.as_ref()],
        bump = manager_state.bump,
        has_one = owner @ InvestmentError::Unauthorized,
    )]
    pub manager_state: Box<Account<'info, ManagerState>>,

    #[account(
        seeds = [LEDGER_SEED, token_mint.key().as_ref()],
        bump = ledger_state.bump,
        address = manager_state.ledger @ InvestmentError::InvalidAddress,
    )]
    pub ledger_state: Box<Account<'info, LedgerState>>,

    #[account(
        mut,
        address = manager_state.factory @ InvestmentError::InvalidAddress,
    )]
    pub factory_state: Box<Account<'info, FactoryState>>,

    #[account(
        mut,
        address = manager_state.token_mint @ InvestmentError::InvalidMint,
    )]
    pub token_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = manager_state,
    )]
    pub manager_custody: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = owner,
        space = SMART_ACCOUNT_SIZE,
        seeds = [SMART_ACCOUNT_SEED, factory_state.key().as_ref(), investor.as_ref()],
        bump
    )]
    pub smart_account: Box<Account<'info, SmartAccount>>,

    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = token_mint,
        associated_token::authority = smart_account,
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = owner,
        space = INVESTMENT_RECORD_SIZE,
        seeds = [INVESTMENT_SEED, manager_state.key().as_ref(), investor.as_ref()],
        bump
    )]
    pub investment_record: Box<Account<'info, InvestmentRecord>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(mut ctx: Context<Invest>, investor: Pubkey, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    // CHECKS
    let tokens = accounts.manager_state.quote_investment(&investor, amount)?;
    let manager_key = accounts.manager_state.key();
    require!(
        accounts.ledger_state.is_minter(&manager_key),
        InvestmentError::NotMinter
    );
    accounts.manager_state.enter()?;

    // EFFECTS
    register_account(
        &mut accounts.factory_state,
        &mut accounts.smart_account,
        investor,
        manager_key,
        accounts.manager_state.token_mint,
        ctx.bumps.smart_account,
        now,
    )?;

    let record = &mut accounts.investment_record;
    record.start(investor, ctx.bumps.investment_record);
    record.record_investment(amount, tokens, now)?;

    // INTERACTIONS: mint into manager custody, then move to the smart account
    let mint_key = accounts.token_mint.key();
    let ledger_seeds: &[&[u8]] = &[
        LEDGER_SEED,
        mint_key.as_ref(),
        &[accounts.ledger_state.bump],
    ];
    let manager_seeds: &[&[u8]] = &[
        MANAGER_SEED,
        mint_key.as_ref(),
        &[accounts.manager_state.bump],
    ];
    let token_program = accounts.token_program.to_account_info();

    mint_tokens_signed(
        &token_program,
        &accounts.token_mint.to_account_info(),
        &accounts.manager_custody.to_account_info(),
        &accounts.ledger_state.to_account_info(),
        ledger_seeds,
        tokens,
    )?;

    transfer_tokens_signed(
        &token_program,
        &accounts.manager_custody.to_account_info(),
        &accounts.vault_token_account.to_account_info(),
        &accounts.manager_state.to_account_info(),
        manager_seeds,
        tokens,
    )?;

    accounts.manager_state.exit(&crate::ID);

    emit!(InvestmentMade {
        investor,
        amount,
        tokens,
        timestamp: now,
    });

    Ok(())
}
