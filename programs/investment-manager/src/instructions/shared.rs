use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, CloseAccount, MintTo, Transfer};

use crate::errors::InvestmentError;

// Token CPIs signed by one of the program's PDAs. `signer_seeds` are the
// seeds (bump included) of the PDA acting as authority.

pub fn mint_tokens_signed<'info>(
    token_program: &AccountInfo<'info>,
    mint: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    mint_authority: &AccountInfo<'info>,
    signer_seeds: &[&[u8]],
    amount: u64,
) -> Result<()> {
    let signer = &[signer_seeds];
    let mint_ctx = CpiContext::new_with_signer(
        token_program.clone(),
        MintTo {
            mint: mint.clone(),
            to: to.clone(),
            authority: mint_authority.clone(),
        },
        signer,
    );
    token::mint_to(mint_ctx, amount)
}

pub fn transfer_tokens_signed<'info>(
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    signer_seeds: &[&[u8]],
    amount: u64,
) -> Result<()> {
    let signer = &[signer_seeds];
    let transfer_ctx = CpiContext::new_with_signer(
        token_program.clone(),
        Transfer {
            from: from.clone(),
            to: to.clone(),
            authority: authority.clone(),
        },
        signer,
    );
    token::transfer(transfer_ctx, amount)
}

/// Destroy `amount` tokens held by a smart account. Supply drops by the same
/// amount, so nothing can ever spend them again.
pub fn burn_from_smart_account<'info>(
    token_program: &AccountInfo<'info>,
    mint: &AccountInfo<'info>,
    vault_token_account: &AccountInfo<'info>,
    smart_account: &AccountInfo<'info>,
    signer_seeds: &[&[u8]],
    amount: u64,
) -> Result<()> {
    let signer = &[signer_seeds];
    let burn_ctx = CpiContext::new_with_signer(
        token_program.clone(),
        Burn {
            mint: mint.clone(),
            from: vault_token_account.clone(),
            authority: smart_account.clone(),
        },
        signer,
    );
    token::burn(burn_ctx, amount)
}

pub fn close_token_account_signed<'info>(
    token_program: &AccountInfo<'info>,
    account: &AccountInfo<'info>,
    destination: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    let signer = &[signer_seeds];
    let close_ctx = CpiContext::new_with_signer(
        token_program.clone(),
        CloseAccount {
            account: account.clone(),
            destination: destination.clone(),
            authority: authority.clone(),
        },
        signer,
    );
    token::close_account(close_ctx)
}

/// Close a program-owned account that was not loaded as a typed `Account`,
/// returning its rent to `destination`
pub fn close_program_account<'info>(
    account: &AccountInfo<'info>,
    destination: &AccountInfo<'info>,
) -> Result<()> {
    let reclaimed = account.lamports();
    let new_balance = destination
        .lamports()
        .checked_add(reclaimed)
        .ok_or(InvestmentError::MathOverflow)?;

    **destination.try_borrow_mut_lamports()? = new_balance;
    **account.try_borrow_mut_lamports()? = 0;

    account.assign(&anchor_lang::system_program::ID);
    account.realloc(0, false)?;
    Ok(())
}
