use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use super::shared::burn_from_smart_account;
use crate::{constants::*, errors::*, events::*, state::*};

/// Destroy investment tokens held by a smart account
///
/// Goes through the same manager gate as `initiate_withdrawal` (pause, lock
/// period, in-flight guard) but records no withdrawal.
#[derive(Accounts)]
pub struct BurnTokens<'info> {
    /// Manager owner
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [MANAGER_SEED, manager_state.token_mint.as_ref()],
        bump = manager_state.bump,
        has_one = owner @ InvestmentError::Unauthorized,
    )]
    pub manager_state: Box<Account<'info, ManagerState>>,

    /// Only the manager bound at creation may burn
    #[account(
        seeds = [SMART_ACCOUNT_SEED, smart_account.factory.as_ref(), smart_account.owner.as_ref()],
        bump = smart_account.bump,
        constraint = smart_account.manager == manager_state.key() @ InvestmentError::Unauthorized,
    )]
    pub smart_account: Box<Account<'info, SmartAccount>>,

    /// CHECK: PDA validated by seeds, deserialized in the handler
    #[account(
        seeds = [INVESTMENT_SEED, manager_state.key().as_ref(), smart_account.owner.as_ref()],
        bump
    )]
    pub investment_record: UncheckedAccount<'info>,

    /// Token to burn; must be the bound investment token
    #[account(mut)]
    pub token_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        constraint = vault_token_account.mint == token_mint.key() @ InvestmentError::InvalidMint,
        constraint = vault_token_account.owner == smart_account.key() @ InvestmentError::InvalidOwner,
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(mut ctx: Context<BurnTokens>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    // CHECKS
    let record = load_initialized::<InvestmentRecord>(&accounts.investment_record)?;
    accounts.manager_state.authorize_burn(
        Some(&**accounts.smart_account),
        record.as_ref(),
        &accounts.token_mint.key(),
        accounts.vault_token_account.amount,
        amount,
        now,
    )?;

    accounts.manager_state.enter()?;

    // INTERACTIONS
    burn_as_smart_account(
        &accounts.smart_account,
        &accounts.token_program.to_account_info(),
        &accounts.token_mint.to_account_info(),
        &accounts.vault_token_account.to_account_info(),
        &accounts.smart_account.to_account_info(),
        amount,
        now,
    )?;

    accounts.manager_state.exit(&crate::ID);
    Ok(())
}

/// Burn signed by the smart account PDA. Callers validate with
/// `ManagerState::authorize_burn` first.
pub(crate) fn burn_as_smart_account<'info>(
    smart_account: &SmartAccount,
    token_program: &AccountInfo<'info>,
    mint: &AccountInfo<'info>,
    vault_token_account: &AccountInfo<'info>,
    smart_account_info: &AccountInfo<'info>,
    amount: u64,
    now: i64,
) -> Result<()> {
    let seeds: &[&[u8]] = &[
        SMART_ACCOUNT_SEED,
        smart_account.factory.as_ref(),
        smart_account.owner.as_ref(),
        &[smart_account.bump],
    ];

    burn_from_smart_account(
        token_program,
        mint,
        vault_token_account,
        smart_account_info,
        seeds,
        amount,
    )?;

    emit!(TokensBurned {
        account: smart_account_info.key(),
        amount,
        timestamp: now,
    });

    Ok(())
}
