//! Login, refresh-token rotation and logout.
//!
//! A user holds at most one live refresh token. Login replaces whatever
//! tokens exist; refresh consumes the presented token and issues a new one
//! inside one atomic store operation.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rentdesk_shared::{
    AppError, AppResult, JwtService, TokenPair,
    types::{RefreshTokenId, UserId},
};
use serde::Serialize;

use super::principal::{Identity, Principal};
use super::token::{generate_opaque_token, hash_token};
use super::verify_password;
use crate::clock::Clock;

/// A user's identity together with the stored password hash.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// Profile.
    pub identity: Identity,
    /// Argon2 PHC hash.
    pub password_hash: String,
}

/// Refresh-token record to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRefreshToken {
    /// Record ID.
    pub id: RefreshTokenId,
    /// Owning user.
    pub user_id: UserId,
    /// SHA-256 hex digest of the raw token.
    pub token_hash: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

/// A persisted refresh-token record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRefreshToken {
    /// Record ID.
    pub id: RefreshTokenId,
    /// Owning user.
    pub user_id: UserId,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Persistence required by the session manager.
pub trait SessionStore: Send + Sync {
    /// Finds a user and password hash by login email.
    fn find_credentials(
        &self,
        email: &str,
    ) -> impl Future<Output = AppResult<Option<UserCredentials>>> + Send;

    /// Loads the current profile of a user.
    fn find_identity(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = AppResult<Option<Identity>>> + Send;

    /// Atomically deletes every refresh token of `token.user_id` and stores `token`.
    fn replace_refresh_tokens(
        &self,
        token: NewRefreshToken,
    ) -> impl Future<Output = AppResult<()>> + Send;

    /// Looks up a refresh-token record by digest.
    fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = AppResult<Option<StoredRefreshToken>>> + Send;

    /// Deletes one refresh-token record, returning the number of rows removed.
    fn delete_refresh_token(
        &self,
        id: RefreshTokenId,
    ) -> impl Future<Output = AppResult<u64>> + Send;

    /// Atomically deletes record `old` and, only if exactly that row was
    /// removed, stores `replacement`. Returns `false` (and stores nothing)
    /// when `old` was already gone.
    fn rotate_refresh_token(
        &self,
        old: RefreshTokenId,
        replacement: NewRefreshToken,
    ) -> impl Future<Output = AppResult<bool>> + Send;

    /// Deletes every refresh token of a user, returning the number removed.
    fn delete_user_refresh_tokens(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = AppResult<u64>> + Send;
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    /// Signed access token.
    pub access_token: String,
    /// Raw refresh token (never stored).
    pub refresh_token: String,
    /// Profile of the logged-in user.
    pub user: Identity,
}

/// Session manager.
pub struct SessionManager<S: SessionStore> {
    store: Arc<S>,
    jwt: Arc<JwtService>,
    clock: Arc<dyn Clock>,
    refresh_ttl: Duration,
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password")
}

fn invalid_refresh_token() -> AppError {
    AppError::unauthorized("Invalid refresh token")
}

impl<S: SessionStore> SessionManager<S> {
    /// Creates a session manager issuing refresh tokens valid for `refresh_ttl_days`.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        jwt: Arc<JwtService>,
        clock: Arc<dyn Clock>,
        refresh_ttl_days: i64,
    ) -> Self {
        Self {
            store,
            jwt,
            clock,
            refresh_ttl: Duration::days(refresh_ttl_days),
        }
    }

    /// Authenticates with email and password, replacing every existing session.
    ///
    /// Unknown email and wrong password fail identically.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` on bad credentials.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let email = email.trim().to_lowercase();
        let creds = self
            .store
            .find_credentials(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(password, &creds.password_hash).unwrap_or(false) {
            return Err(invalid_credentials());
        }

        let now = self.clock.now();
        let (refresh_token, record) = self.new_refresh_token(creds.identity.id, now);
        self.store.replace_refresh_tokens(record).await?;
        let access_token = self.access_token(&creds.identity, now)?;

        Ok(LoginOutcome {
            access_token,
            refresh_token,
            user: creds.identity,
        })
    }

    /// Exchanges a refresh token for a new token pair, consuming it.
    ///
    /// An expired token is deleted. If a concurrent call consumed the same
    /// token first, this call fails rather than minting a second session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` for unknown, expired or already used tokens.
    pub async fn refresh(&self, raw_token: &str) -> AppResult<TokenPair> {
        let stored = self
            .store
            .find_refresh_token(&hash_token(raw_token))
            .await?
            .ok_or_else(invalid_refresh_token)?;

        let now = self.clock.now();
        if stored.expires_at < now {
            self.store.delete_refresh_token(stored.id).await?;
            return Err(invalid_refresh_token());
        }

        let identity = self
            .store
            .find_identity(stored.user_id)
            .await?
            .ok_or_else(invalid_refresh_token)?;

        let (refresh_token, record) = self.new_refresh_token(identity.id, now);
        if !self.store.rotate_refresh_token(stored.id, record).await? {
            return Err(invalid_refresh_token());
        }

        Ok(TokenPair {
            access_token: self.access_token(&identity, now)?,
            refresh_token,
        })
    }

    /// Ends every session of a user. Idempotent.
    ///
    /// # Errors
    ///
    /// Only persistence failures are reported.
    pub async fn logout(&self, user_id: UserId) -> AppResult<()> {
        self.store.delete_user_refresh_tokens(user_id).await?;
        Ok(())
    }

    /// Loads the current profile of a user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if the user no longer exists.
    pub async fn get_identity(&self, user_id: UserId) -> AppResult<Identity> {
        self.store
            .find_identity(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))
    }

    /// Resolves a bearer access token into the caller's identity and principal.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` for invalid or expired tokens and
    /// for tokens whose user has been deleted.
    pub async fn authenticate(&self, access_token: &str) -> AppResult<(Identity, Principal)> {
        let claims = self.jwt.validate_token(access_token, self.clock.now())?;
        let identity = self.get_identity(UserId::from_uuid(claims.user_id())).await?;
        let principal = Principal::from(&identity);
        Ok((identity, principal))
    }

    fn new_refresh_token(&self, user_id: UserId, now: DateTime<Utc>) -> (String, NewRefreshToken) {
        let raw = generate_opaque_token();
        let record = NewRefreshToken {
            id: RefreshTokenId::new(),
            user_id,
            token_hash: hash_token(&raw),
            expires_at: now + self.refresh_ttl,
            created_at: now,
        };
        (raw, record)
    }

    fn access_token(&self, identity: &Identity, now: DateTime<Utc>) -> AppResult<String> {
        Ok(self.jwt.generate_access_token(
            identity.id.into_inner(),
            &identity.email,
            identity.role.as_str(),
            now,
        )?)
    }
}
