//! Owner financial summaries.
//!
//! Totals are computed from ledger entries on every request; no balance is
//! ever stored.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::{LedgerStore, SummaryService};
pub use types::{LedgerQuery, OwnerSummary, SummaryRequest};
