pub mod burn_tokens;
pub mod create_account;
pub mod get_account;
pub mod initialize_ledger;
pub mod initialize_manager;
pub mod initiate_withdrawal;
pub mod invest;
pub mod manager_admin;
pub mod mint_tokens;
pub mod remove_account;
pub mod set_minter;
pub mod shared;
pub mod withdraw_tokens;

pub use burn_tokens::*;
pub use create_account::*;
pub use get_account::*;
pub use initialize_ledger::*;
pub use initialize_manager::*;
pub use initiate_withdrawal::*;
pub use invest::*;
pub use manager_admin::*;
pub use mint_tokens::*;
pub use remove_account::*;
pub use set_minter::*;
pub use withdraw_tokens::*;
