use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

/// Read-only lookup of an investor's smart account
#[derive(Accounts)]
#[instruction(investor: Pubkey)]
pub struct GetAccount<'info> {
    #[account(
        seeds = [FACTORY_SEED, factory_state.manager.as_ref()],
        bump = factory_state.bump,
    )]
    pub factory_state: Account<'info, FactoryState>,

    /// CHECK: derived from the factory and investor; may not exist
    #[account(
        seeds = [SMART_ACCOUNT_SEED, factory_state.key().as_ref(), investor.as_ref()],
        bump
    )]
    pub smart_account: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<GetAccount>, investor: Pubkey) -> Result<Option<Pubkey>> {
    FactoryState::lookup(&ctx.accounts.smart_account, &investor)
}
