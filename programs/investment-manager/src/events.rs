use anchor_lang::prelude::*;

/// Event emitted when the ledger mint is created
#[event]
pub struct LedgerInitialized {
    pub ledger: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the ledger's designated minter changes
#[event]
pub struct MinterChanged {
    pub ledger: Pubkey,
    pub old_minter: Pubkey,
    pub new_minter: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ManagerInitialized {
    pub manager: Pubkey,
    pub owner: Pubkey,
    pub token_mint: Pubkey,
    pub factory: Pubkey,
    pub lock_period: i64,
    pub timestamp: i64,
}

/// Event emitted when an investor deposits value
#[event]
pub struct InvestmentMade {
    pub investor: Pubkey,
    pub amount: u64,
    pub tokens: u64,
    pub timestamp: i64,
}

/// Event emitted when investment tokens are redeemed and destroyed
#[event]
pub struct WithdrawalInitiated {
    pub investor: Pubkey,
    pub fiat_amount: u64,
    pub tokens: u64,
    pub timestamp: i64,
}

#[event]
pub struct LockPeriodChanged {
    pub manager: Pubkey,
    pub old_period: i64,
    pub new_period: i64,
    pub timestamp: i64,
}

#[event]
pub struct ConversionChanged {
    pub manager: Pubkey,
    pub numerator: u64,
    pub denominator: u64,
    pub timestamp: i64,
}

#[event]
pub struct ManagerPaused {
    pub manager: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ManagerUnpaused {
    pub manager: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct OwnershipTransferred {
    pub manager: Pubkey,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the factory creates a smart account for an investor
#[event]
pub struct AccountCreated {
    pub investor: Pubkey,
    pub account: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AccountRemoved {
    pub investor: Pubkey,
    pub account: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when a smart account destroys investment tokens
#[event]
pub struct TokensBurned {
    pub account: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct TokensWithdrawn {
    pub account: Pubkey,
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
