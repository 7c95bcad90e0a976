//! Property directory.

pub mod service;
pub mod types;


pub use service::{PropertyLookup, PropertyService, PropertyStore};
pub use types::{
    CreatePropertyInput, NewProperty, PropertyFilter, PropertyRecord, UpdatePropertyInput,
};
