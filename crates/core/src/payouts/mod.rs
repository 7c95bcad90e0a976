//! Owner payouts.

pub mod service;
pub mod types;


pub use service::{PayoutService, PayoutStore};
pub use types::{CreatePayoutInput, NewPayout, PayoutDetail, PayoutFilter, PayoutRecord};
