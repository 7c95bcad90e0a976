//! Common types used across the application.

pub mod date;
pub mod id;
pub mod money;
pub mod pagination;

pub use date::parse_timestamp;
pub use id::*;
pub use money::{MAX_MONEY, percent_of, round_money};
pub use pagination::{Listing, PageRequest, PageResponse};
