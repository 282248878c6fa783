use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use super::shared::{close_program_account, close_token_account_signed};
use crate::{constants::*, errors::*, events::*, state::*};

/// Remove an investor's smart account and investment record
///
/// Only an account with no investment tokens can be removed; otherwise its
/// tokens would become unreachable through the factory.
///
/// Token accounts of other mints held by the smart account are not checked.
/// Drain them with `withdraw_tokens` first: once the smart account is closed
/// they can only be reached again after the investor invests and the PDA is
/// recreated.
#[derive(Accounts)]
#[instruction(investor: Pubkey)]
pub struct RemoveAccount<'info> {
    /// Manager owner - receives the reclaimed rent
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [MANAGER_SEED, manager_state.token_mint.as_ref()],
        bump = manager_state.bump,
        has_one = owner @ InvestmentError::Unauthorized,
    )]
    pub manager_state: Box<Account<'info, ManagerState>>,

    #[account(
        mut,
        address = manager_state.factory @ InvestmentError::Unauthorized,
    )]
    pub factory_state: Box<Account<'info, FactoryState>>,

    #[account(address = manager_state.token_mint @ InvestmentError::InvalidMint)]
    pub token_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        close = owner,
        seeds = [SMART_ACCOUNT_SEED, factory_state.key().as_ref(), investor.as_ref()],
        bump = smart_account.bump,
        constraint = smart_account.manager == manager_state.key() @ InvestmentError::Unauthorized,
    )]
    pub smart_account: Box<Account<'info, SmartAccount>>,

    #[account(
        mut,
        associated_token::mint = token_mint,
        associated_token::authority = smart_account,
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: closed in the handler when it exists
    #[account(
        mut,
        seeds = [INVESTMENT_SEED, manager_state.key().as_ref(), investor.as_ref()],
        bump
    )]
    pub investment_record: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<RemoveAccount>, investor: Pubkey) -> Result<()> {
    let balance = ctx.accounts.vault_token_account.amount;
    ctx.accounts.factory_state.release_account(balance)?;

    let factory_key = ctx.accounts.factory_state.key();
    let smart_account_seeds: &[&[u8]] = &[
        SMART_ACCOUNT_SEED,
        factory_key.as_ref(),
        investor.as_ref(),
        &[ctx.accounts.smart_account.bump],
    ];

    close_token_account_signed(
        &ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.vault_token_account.to_account_info(),
        &ctx.accounts.owner.to_account_info(),
        &ctx.accounts.smart_account.to_account_info(),
        smart_account_seeds,
    )?;

    if load_initialized::<InvestmentRecord>(&ctx.accounts.investment_record)?.is_some() {
        close_program_account(
            &ctx.accounts.investment_record.to_account_info(),
            &ctx.accounts.owner.to_account_info(),
        )?;
    }

    let account = ctx.accounts.smart_account.key();
    msg!("Smart account {} removed for investor {}", account, investor);

    emit!(AccountRemoved {
        investor,
        account,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
