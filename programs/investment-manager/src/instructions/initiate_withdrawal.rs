use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::get_associated_token_address,
    token::{Mint, Token, TokenAccount},
};

use super::burn_tokens::burn_as_smart_account;
use crate::{constants::*, errors::*, events::*, state::*};

/// Redeem an investor's tokens once their lock period is over
///
/// The record and smart account are loaded in the handler so that an
/// investor who never invested gets `NoInvestmentFound` instead of an
/// account deserialization error.
#[derive(Accounts)]
#[instruction(investor: Pubkey)]
pub struct InitiateWithdrawal<'info> {
    /// Manager owner - only they can initiate withdrawals
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [MANAGER_SEED, manager_state.token_mint.as_ref()],
        bump = manager_state.bump,
        has_one = owner @ InvestmentError::Unauthorized,
    )]
    pub manager_state: Box<Account<'info, ManagerState>>,

    #[account(
        mut,
        address = manager_state.token_mint @ InvestmentError::InvalidMint,
    )]
    pub token_mint: Box<Account<'info, Mint>>,

    /// CHECK: PDA validated by seeds, deserialized in the handler
    #[account(
        seeds = [INVESTMENT_SEED, manager_state.key().as_ref(), investor.as_ref()],
        bump
    )]
    pub investment_record: UncheckedAccount<'info>,

    /// CHECK: PDA validated by seeds, deserialized in the handler
    #[account(
        seeds = [SMART_ACCOUNT_SEED, manager_state.factory.as_ref(), investor.as_ref()],
        bump
    )]
    pub smart_account: UncheckedAccount<'info>,

    /// CHECK: must be the smart account's associated token account
    #[account(
        mut,
        address = get_associated_token_address(&smart_account.key(), &manager_state.token_mint)
            @ InvestmentError::InvalidOwner,
    )]
    pub vault_token_account: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(mut ctx: Context<InitiateWithdrawal>, investor: Pubkey, tokens: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    // CHECKS
    let record = load_initialized::<InvestmentRecord>(&accounts.investment_record)?;
    let balance = load_initialized::<TokenAccount>(&accounts.vault_token_account)?
        .map_or(0, |account| account.amount);

    let smart_account = load_initialized::<SmartAccount>(&accounts.smart_account)?;

    let fiat_amount = accounts.manager_state.authorize_burn(
        smart_account.as_ref(),
        record.as_ref(),
        &accounts.token_mint.key(),
        balance,
        tokens,
        now,
    )?;
    let smart_account = smart_account.ok_or(InvestmentError::NoInvestmentFound)?;
    require_keys_eq!(
        smart_account.manager,
        accounts.manager_state.key(),
        InvestmentError::Unauthorized
    );

    accounts.manager_state.enter()?;

    // INTERACTIONS
    burn_as_smart_account(
        &smart_account,
        &accounts.token_program.to_account_info(),
        &accounts.token_mint.to_account_info(),
        &accounts.vault_token_account.to_account_info(),
        &accounts.smart_account.to_account_info(),
        tokens,
        now,
    )?;

    accounts.manager_state.exit(&crate::ID);

    // No yield model yet: the payout is the plain conversion of the tokens
    msg!(
        "Withdrawal for {}: {} tokens redeemed for {} (profit 0)",
        investor,
        tokens,
        fiat_amount
    );

    emit!(WithdrawalInitiated {
        investor,
        fiat_amount,
        tokens,
        timestamp: now,
    });

    Ok(())
}
