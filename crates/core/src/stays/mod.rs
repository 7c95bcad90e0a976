//! Guest stays and the ledger entries they produce.

pub mod service;
pub mod types;


pub use service::{StayService, StayStore};
pub use types::{CreateStayInput, NewStay, StayDetail, StayFilter, StayRecord};
