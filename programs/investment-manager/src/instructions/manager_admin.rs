use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Owner-gated policy changes on the manager
#[derive(Accounts)]
pub struct ManagerAdmin<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [MANAGER_SEED, manager_state.token_mint.as_ref()],
        bump = manager_state.bump,
        has_one = owner @ InvestmentError::Unauthorized,
    )]
    pub manager_state: Account<'info, ManagerState>,
}

/// Applies to every investor immediately, including existing records
pub fn set_lock_period_handler(ctx: Context<ManagerAdmin>, period: i64) -> Result<()> {
    let manager_state = &mut ctx.accounts.manager_state;
    let old_period = manager_state.set_lock_period(period)?;

    emit!(LockPeriodChanged {
        manager: manager_state.key(),
        old_period,
        new_period: period,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn set_conversion_handler(
    ctx: Context<ManagerAdmin>,
    numerator: u64,
    denominator: u64,
) -> Result<()> {
    let manager_state = &mut ctx.accounts.manager_state;
    manager_state.conversion = Conversion::new(numerator, denominator)?;

    emit!(ConversionChanged {
        manager: manager_state.key(),
        numerator,
        denominator,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn pause_handler(ctx: Context<ManagerAdmin>) -> Result<()> {
    let manager_state = &mut ctx.accounts.manager_state;
    manager_state.pause()?;

    msg!("Manager paused");

    emit!(ManagerPaused {
        manager: manager_state.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn unpause_handler(ctx: Context<ManagerAdmin>) -> Result<()> {
    let manager_state = &mut ctx.accounts.manager_state;
    manager_state.unpause()?;

    msg!("Manager unpaused");

    emit!(ManagerUnpaused {
        manager: manager_state.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn transfer_ownership_handler(ctx: Context<ManagerAdmin>, new_owner: Pubkey) -> Result<()> {
    let manager_state = &mut ctx.accounts.manager_state;
    let previous_owner = manager_state.transfer_ownership(new_owner)?;

    emit!(OwnershipTransferred {
        manager: manager_state.key(),
        previous_owner,
        new_owner,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
