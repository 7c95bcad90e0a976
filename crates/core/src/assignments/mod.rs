//! Manager-to-property assignments.

pub mod service;
pub mod types;


pub use service::{AssignmentService, AssignmentStore};
pub use types::{AssignInput, AssignmentFilter, AssignmentRecord, NewAssignment};
