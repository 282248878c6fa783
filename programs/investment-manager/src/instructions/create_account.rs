use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, state::*};

/// Create the smart account for an investor
///
/// `init` fails when the PDA already exists, which keeps the factory at one
/// account per investor.
#[derive(Accounts)]
#[instruction(investor: Pubkey)]
pub struct CreateAccount<'info> {
    /// Manager owner - the factory only answers to its manager
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
        seeds = [FACTORY_SEED, manager_state.key().as_ref()],
        bump = factory_state.bump,
        constraint = factory_state.manager == manager_state.key() @ InvestmentError::Unauthorized,
    )]
    pub factory_state: Box<Account<'info, FactoryState>>,

    #[account(address = manager_state.token_mint @ InvestmentError::InvalidMint)]
    pub token_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = owner,
        space = SMART_ACCOUNT_SIZE,
        seeds = [SMART_ACCOUNT_SEED, factory_state.key().as_ref(), investor.as_ref()],
        bump
    )]
    pub smart_account: Box<Account<'info, SmartAccount>>,

    #[account(
        init,
        payer = owner,
        associated_token::mint = token_mint,
        associated_token::authority = smart_account,
    )]
    pub vault_token_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(mut ctx: Context<CreateAccount>, investor: Pubkey) -> Result<Pubkey> {
    require_keys_neq!(investor, Pubkey::default(), InvestmentError::InvalidAddress);

    let accounts = &mut ctx.accounts;
    register_account(
        &mut accounts.factory_state,
        &mut accounts.smart_account,
        investor,
        accounts.manager_state.key(),
        accounts.manager_state.token_mint,
        ctx.bumps.smart_account,
        Clock::get()?.unix_timestamp,
    )
}

/// Bind a freshly allocated smart account to its investor and count it in
/// the factory. Shared with the lazy creation path in `invest`, where the
/// account may already be bound.
pub(crate) fn register_account(
    factory_state: &mut Account<FactoryState>,
    smart_account: &mut Account<SmartAccount>,
    investor: Pubkey,
    manager: Pubkey,
    token_mint: Pubkey,
    bump: u8,
    now: i64,
) -> Result<Pubkey> {
    let factory = factory_state.key();
    let account = smart_account.key();

    let opened = factory_state.open_account(
        factory,
        smart_account,
        investor,
        manager,
        token_mint,
        bump,
        now,
    )?;

    if opened {
        msg!("Smart account {} created for investor {}", account, investor);

        emit!(AccountCreated {
            investor,
            account,
            timestamp: now,
        });
    }

    Ok(account)
}
