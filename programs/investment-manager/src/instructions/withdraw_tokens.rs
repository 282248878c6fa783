use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use super::shared::transfer_tokens_signed;
use crate::{constants::*, errors::*, events::*, state::*};

/// Let an investor pull a non-investment token out of their smart account
#[derive(Accounts)]
pub struct WithdrawTokens<'info> {
    /// Investor owning the smart account
    pub owner: Signer<'info>,

    #[account(
        seeds = [SMART_ACCOUNT_SEED, smart_account.factory.as_ref(), owner.key().as_ref()],
        bump = smart_account.bump,
        has_one = owner @ InvestmentError::Unauthorized,
    )]
    pub smart_account: Box<Account<'info, SmartAccount>>,

    pub mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        constraint = source.mint == mint.key() @ InvestmentError::InvalidMint,
        constraint = source.owner == smart_account.key() @ InvestmentError::InvalidOwner,
    )]
    pub source: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = destination.mint == mint.key() @ InvestmentError::InvalidMint,
        constraint = destination.owner == owner.key() @ InvestmentError::InvalidOwner,
    )]
    pub destination: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<WithdrawTokens>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let smart_account = &accounts.smart_account;
    smart_account.check_withdraw(&accounts.mint.key(), amount, accounts.source.amount)?;

    let seeds: &[&[u8]] = &[
        SMART_ACCOUNT_SEED,
        smart_account.factory.as_ref(),
        smart_account.owner.as_ref(),
        &[smart_account.bump],
    ];

    transfer_tokens_signed(
        &accounts.token_program.to_account_info(),
        &accounts.source.to_account_info(),
        &accounts.destination.to_account_info(),
        &smart_account.to_account_info(),
        seeds,
        amount,
    )?;

    emit!(TokensWithdrawn {
        account: smart_account.key(),
        owner: smart_account.owner,
        mint: accounts.mint.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
