use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Rotate the ledger's designated minter
#[derive(Accounts)]
pub struct SetMinter<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger_state.mint.as_ref()],
        bump = ledger_state.bump,
        has_one = owner @ InvestmentError::Unauthorized,
    )]
    pub ledger_state: Account<'info, LedgerState>,
}

pub fn handler(ctx: Context<SetMinter>, minter: Pubkey) -> Result<()> {
    let ledger_state = &mut ctx.accounts.ledger_state;
    let old_minter = ledger_state.set_minter(minter)?;

    msg!("Minter changed from {} to {}", old_minter, minter);

    emit!(MinterChanged {
        ledger: ledger_state.key(),
        old_minter,
        new_minter: minter,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
