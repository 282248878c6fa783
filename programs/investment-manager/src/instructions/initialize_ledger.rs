use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token};

use crate::{constants::*, events::*, state::*};

/// Create the investment token mint and its ledger state
#[derive(Accounts)]
#[instruction(decimals: u8)]
pub struct InitializeLedger<'info> {
    /// Ledger owner - starts out as the designated minter
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Ledger state PDA, mint authority of `mint`
    #[account(
        init,
        payer = owner,
        space = LEDGER_STATE_SIZE,
        seeds = [LEDGER_SEED, mint.key().as_ref()],
        bump
    )]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        init,
        payer = owner,
        seeds = [LEDGER_MINT_SEED, owner.key().as_ref()],
        bump,
        mint::decimals = decimals,
        mint::authority = ledger_state,
    )]
    pub mint: Account<'info, Mint>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeLedger>, _decimals: u8) -> Result<()> {
    let ledger_state = &mut ctx.accounts.ledger_state;

    ledger_state.owner = ctx.accounts.owner.key();
    ledger_state.minter = ctx.accounts.owner.key();
    ledger_state.mint = ctx.accounts.mint.key();
    ledger_state.bump = ctx.bumps.ledger_state;
    ledger_state._reserved = [0; 32];

    emit!(LedgerInitialized {
        ledger: ledger_state.key(),
        owner: ledger_state.owner,
        mint: ledger_state.mint,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
