//! Repository abstractions for data access.
//!
//! Each repository implements one of the persistence traits declared in
//! `rentdesk-core`, hiding the `SeaORM` details from the services.

pub mod assignment;
pub mod ledger;
mod names;
pub mod owner;
pub mod payout;
pub mod property;
pub mod session;
pub mod stay;
pub mod transaction;
pub mod user;

pub use assignment::AssignmentRepository;
pub use ledger::LedgerRepository;
pub use owner::OwnerRepository;
pub use payout::PayoutRepository;
pub use property::PropertyRepository;
pub use session::SessionRepository;
pub use stay::StayRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;
