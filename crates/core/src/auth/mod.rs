//! Authentication, identity and session management.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Opaque refresh-token generation and at-rest hashing
//! - Role and principal definitions
//! - The session manager (login, refresh rotation, logout)

mod password;
mod principal;
mod session;
mod token;


pub use password::{MIN_PASSWORD_LEN, PasswordError, hash_password, verify_password};
pub use principal::{Identity, Principal};
pub use session::{
    LoginOutcome, NewRefreshToken, SessionManager, SessionStore, StoredRefreshToken,
    UserCredentials,
};
pub use token::{generate_opaque_token, hash_token};

use rentdesk_shared::AppError;
use serde::{Deserialize, Serialize};

/// User roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Sees and manages everything.
    Admin,
    /// Works on the properties assigned to them.
    Manager,
    /// Sees their own properties and money.
    Owner,
}

impl Role {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Owner => "OWNER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "OWNER" => Ok(Self::Owner),
            other => Err(AppError::bad_request(format!("unknown role: {other}"))),
        }
    }
}
