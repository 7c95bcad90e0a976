//! Owner profiles and their balances.

pub mod service;
pub mod types;


pub use service::{OwnerService, OwnerStore};
pub use types::{OwnerDetail, OwnerRecord, OwnerRow, UpdateOwnerInput};
