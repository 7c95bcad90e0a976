//! Manual ledger entries and the ledger listing.

pub mod service;
pub mod types;


pub use service::{TransactionService, TransactionStore};
pub use types::{CreateTransactionInput, TransactionFilter};
