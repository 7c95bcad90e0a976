//! `SeaORM` entity definitions.

pub mod manager_properties;
pub mod owners;
pub mod payouts;
pub mod properties;
pub mod refresh_tokens;
pub mod sea_orm_active_enums;
pub mod stays;
pub mod transactions;
pub mod users;
