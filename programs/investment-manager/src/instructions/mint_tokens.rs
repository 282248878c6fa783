use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use super::shared::mint_tokens_signed;
use crate::{constants::*, errors::*, state::*};

/// Mint investment tokens to a single recipient
#[derive(Accounts)]
pub struct MintTokens<'info> {
    /// Designated minter
    pub minter: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED, mint.key().as_ref()],
        bump = ledger_state.bump,
        has_one = mint @ InvestmentError::InvalidMint,
        constraint = ledger_state.is_minter(&minter.key()) @ InvestmentError::NotMinter,
    )]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(mut)]
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = recipient.mint == mint.key() @ InvestmentError::InvalidMint,
    )]
    pub recipient: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Mint to several recipients, passed as remaining accounts in the same
/// order as `amounts`
#[derive(Accounts)]
pub struct BatchMint<'info> {
    pub minter: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED, mint.key().as_ref()],
        bump = ledger_state.bump,
        has_one = mint @ InvestmentError::InvalidMint,
        constraint = ledger_state.is_minter(&minter.key()) @ InvestmentError::NotMinter,
    )]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(mut)]
    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
    require!(amount > 0, InvestmentError::ZeroAmount);

    let mint_key = ctx.accounts.mint.key();
    let ledger_seeds: &[&[u8]] = &[
        LEDGER_SEED,
        mint_key.as_ref(),
        &[ctx.accounts.ledger_state.bump],
    ];

    mint_tokens_signed(
        &ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.mint.to_account_info(),
        &ctx.accounts.recipient.to_account_info(),
        &ctx.accounts.ledger_state.to_account_info(),
        ledger_seeds,
        amount,
    )
}

pub fn batch_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, BatchMint<'info>>,
    amounts: Vec<u64>,
) -> Result<()> {
    let total = LedgerState::check_batch(&amounts, ctx.remaining_accounts.len())?;

    let mint_key = ctx.accounts.mint.key();
    let ledger_seeds: &[&[u8]] = &[
        LEDGER_SEED,
        mint_key.as_ref(),
        &[ctx.accounts.ledger_state.bump],
    ];

    let token_program = ctx.accounts.token_program.to_account_info();
    let mint = ctx.accounts.mint.to_account_info();
    let authority = ctx.accounts.ledger_state.to_account_info();

    for (recipient_info, amount) in ctx.remaining_accounts.iter().zip(amounts) {
        let recipient = Account::<TokenAccount>::try_from(recipient_info)?;
        require_keys_eq!(recipient.mint, mint_key, InvestmentError::InvalidMint);

        mint_tokens_signed(
            &token_program,
            &mint,
            recipient_info,
            &authority,
            ledger_seeds,
            amount,
        )?;
    }

    msg!("Batch minted {} tokens", total);

    Ok(())
}
