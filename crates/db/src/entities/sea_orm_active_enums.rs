//! String-backed enums stored in `VARCHAR` columns with check constraints.

use rentdesk_core::auth::Role;
use rentdesk_core::ledger::TransactionType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `users.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UserRole {
    /// Administrator.
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    /// Manager.
    #[sea_orm(string_value = "MANAGER")]
    Manager,
    /// Property owner.
    #[sea_orm(string_value = "OWNER")]
    Owner,
}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Manager => Self::Manager,
            Role::Owner => Self::Owner,
        }
    }
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::Manager => Self::Manager,
            UserRole::Owner => Self::Owner,
        }
    }
}

/// `transactions.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionKind {
    /// Guest payment.
    #[sea_orm(string_value = "INCOME")]
    Income,
    /// Management commission.
    #[sea_orm(string_value = "COMMISSION")]
    Commission,
    /// Cleaning cost.
    #[sea_orm(string_value = "CLEANING")]
    Cleaning,
    /// Other cost.
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
    /// Owner payout.
    #[sea_orm(string_value = "PAYOUT")]
    Payout,
}

impl From<TransactionType> for TransactionKind {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Income => Self::Income,
            TransactionType::Commission => Self::Commission,
            TransactionType::Cleaning => Self::Cleaning,
            TransactionType::Expense => Self::Expense,
            TransactionType::Payout => Self::Payout,
        }
    }
}

impl From<TransactionKind> for TransactionType {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Commission => Self::Commission,
            TransactionKind::Cleaning => Self::Cleaning,
            TransactionKind::Expense => Self::Expense,
            TransactionKind::Payout => Self::Payout,
        }
    }
}
