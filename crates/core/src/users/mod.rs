//! Account administration: owner and manager accounts.

pub mod service;
pub mod types;


pub use service::{UserService, UserStore};
pub use types::{
    CreateManagerInput, CreateOwnerAccountInput, ManagerPermissions, ManagerRecord,
    NewOwnerProfile, NewUser,
};
