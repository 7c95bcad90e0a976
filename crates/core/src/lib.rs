//! Core business rules for Rentdesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the store traits each module declares; the
//! db crate implements them and tests substitute an in-memory fake.
//!
//! # Modules
//!
//! - `auth` - Password hashing, opaque tokens, principals, sessions
//! - `scope` - Role-based row visibility
//! - `ledger` - Transaction types, sign table, aggregation, date windows
//! - `summary` - Owner financial summaries (dashboard)
//! - `stays`, `payouts`, `transactions` - Ledger-producing mutations
//! - `owners`, `properties`, `assignments`, `users` - Directory management

pub mod assignments;
pub mod auth;
pub mod clock;
pub mod ledger;
pub mod owners;
pub mod payouts;
pub mod properties;
pub mod scope;
pub mod stays;
pub mod summary;
pub mod transactions;
pub mod users;
mod validate;

#[cfg(test)]
mod testing;

pub use clock::{Clock, FixedClock, SystemClock};
