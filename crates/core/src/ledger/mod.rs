//! Ledger entries and how they roll up into money figures.
//!
//! This module implements:
//! - Transaction types and the fixed sign table
//! - Aggregation of per-type sums into balance, income, expenses and payouts
//! - Reporting periods and date windows
//! - The ledger entries derived from stays and payouts

pub mod rules;
pub mod totals;
pub mod types;
pub mod window;

#[cfg(test)]
mod totals_props;

pub use rules::{StayCharges, payout_entry, stay_entries};
pub use totals::LedgerTotals;
pub use types::{Bucket, NewTransaction, TransactionRecord, TransactionType};
pub use window::{DateWindow, Period};
