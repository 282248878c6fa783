use anchor_lang::prelude::*;

/// Custom error codes for the Investment Manager program
#[error_code]
pub enum InvestmentError {
    // Authorization
    #[msg("Unauthorized - caller is not the owner of this account")]
    Unauthorized,

    #[msg("Caller is not the designated minter")]
    NotMinter,

    // State
    #[msg("Manager is paused")]
    Paused,

    #[msg("Manager is not paused")]
    NotPaused,

    #[msg("Lock period is not over")]
    LockPeriodNotOver,

    #[msg("No investment found")]
    NoInvestmentFound,

    #[msg("Reentrant call - an investment operation is already in flight")]
    ReentrantCall,

    #[msg("Smart account still holds investment tokens")]
    AccountNotEmpty,

    // Value
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Lock period cannot be negative")]
    InvalidLockPeriod,

    #[msg("Invalid conversion rate - denominator must be non-zero and not exceed numerator")]
    InvalidConversion,

    #[msg("Batch mint recipients and amounts differ in length")]
    BatchLengthMismatch,

    #[msg("Batch mint is empty or exceeds the maximum batch size")]
    InvalidBatchSize,

    // Address
    #[msg("Invalid address - the default public key is not allowed")]
    InvalidAddress,

    #[msg("Invalid token mint - does not match the ledger mint")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,

    #[msg("Investment tokens can only leave a smart account through a manager withdrawal")]
    InvestmentTokenLocked,
}
