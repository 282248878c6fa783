// Constants for the Investment Manager program

/// Seed for ledger state PDA (also the mint authority of the ledger mint)
pub const LEDGER_SEED: &[u8] = b"ledger";

/// Seed for the ledger mint PDA
pub const LEDGER_MINT_SEED: &[u8] = b"ledger_mint";

/// Seed for manager state PDA
pub const MANAGER_SEED: &[u8] = b"manager";

/// Seed for factory state PDA
pub const FACTORY_SEED: &[u8] = b"factory";

/// Seed for per-investor smart account PDA
pub const SMART_ACCOUNT_SEED: &[u8] = b"smart_account";

/// Seed for per-investor investment record PDA
pub const INVESTMENT_SEED: &[u8] = b"investment";

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Lock period applied when the manager is initialized without one
pub const DEFAULT_LOCK_PERIOD: i64 = 30 * SECONDS_PER_DAY;

/// Upper bound on recipients in a single batch mint
pub const MAX_BATCH_MINT: usize = 16;

/// Space for LedgerState (8 discriminator + 32 owner + 32 minter + 32 mint + 1 bump
/// + 32 padding)
pub const LEDGER_STATE_SIZE: usize = 8 + 32 + 32 + 32 + 1 + 32;

/// Space for ManagerState (8 discriminator + 32 owner + 32 ledger + 32 token_mint +
/// 32 factory + 8 lock_period + 16 conversion + 1 paused + 1 in_flight + 1 bump +
/// 1 factory_bump + 64 padding)
pub const MANAGER_STATE_SIZE: usize = 8 + 32 + 32 + 32 + 32 + 8 + 16 + 1 + 1 + 1 + 1 + 64;

/// Space for FactoryState (8 discriminator + 32 manager + 8 account_count + 1 bump)
pub const FACTORY_STATE_SIZE: usize = 8 + 32 + 8 + 1;

/// Space for SmartAccount (8 discriminator + 32 owner + 32 token_mint + 32 manager +
/// 32 factory + 8 created_at + 1 bump)
pub const SMART_ACCOUNT_SIZE: usize = 8 + 32 + 32 + 32 + 32 + 8 + 1;

/// Space for InvestmentRecord (8 discriminator + 32 investor + 8 timestamp +
/// 8 total_invested + 8 total_tokens + 1 bump)
pub const INVESTMENT_RECORD_SIZE: usize = 8 + 32 + 8 + 8 + 8 + 1;
