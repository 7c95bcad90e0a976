//! Session repository: credentials, identities and refresh tokens.

use chrono::Utc;
use rentdesk_core::auth::{
    Identity, NewRefreshToken, SessionStore, StoredRefreshToken, UserCredentials,
};
use rentdesk_shared::{
    AppResult,
    types::{OwnerId, RefreshTokenId, UserId},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

use crate::entities::{owners, refresh_tokens, users};
use crate::error::db_err;

/// Session repository for authentication state.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    /// Creates a new session repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn identity_of(&self, user: users::Model) -> Result<Identity, DbErr> {
        let owner_id = owners::Entity::find()
            .filter(owners::Column::UserId.eq(user.id))
            .one(&self.db)
            .await?
            .map(|o| OwnerId::from_uuid(o.id));
        Ok(to_identity(user, owner_id))
    }
}

/// Builds an identity from a user row and its owner link.
pub(crate) fn to_identity(user: users::Model, owner_id: Option<OwnerId>) -> Identity {
    Identity {
        id: UserId::from_uuid(user.id),
        email: user.email,
        name: user.name,
        role: user.role.into(),
        owner_id,
        can_create_owners: user.can_create_owners,
        can_create_properties: user.can_create_properties,
    }
}

async fn insert_token<C: ConnectionTrait>(db: &C, token: NewRefreshToken) -> Result<(), DbErr> {
    refresh_tokens::ActiveModel {
        id: Set(token.id.into_inner()),
        user_id: Set(token.user_id.into_inner()),
        token_hash: Set(token.token_hash),
        expires_at: Set(token.expires_at.into()),
        created_at: Set(token.created_at.into()),
    }
    .insert(db)
    .await?;
    Ok(())
}

impl SessionStore for SessionRepository {
    async fn find_credentials(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        let Some(user) = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        let password_hash = user.password_hash.clone();
        let identity = self.identity_of(user).await.map_err(db_err)?;
        Ok(Some(UserCredentials {
            identity,
            password_hash,
        }))
    }

    async fn find_identity(&self, user_id: UserId) -> AppResult<Option<Identity>> {
        let Some(user) = users::Entity::find_by_id(user_id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        self.identity_of(user).await.map(Some).map_err(db_err)
    }

    async fn replace_refresh_tokens(&self, token: NewRefreshToken) -> AppResult<()> {
        let user_id = token.user_id;
        let txn = self.db.begin().await.map_err(db_err)?;

        let removed = refresh_tokens::Entity::delete_many()
            .filter(refresh_tokens::Column::UserId.eq(user_id.into_inner()))
            .exec(&txn)
            .await
            .map_err(db_err)?
            .rows_affected;
        insert_token(&txn, token).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        tracing::debug!(user_id = %user_id, removed, "refresh tokens replaced");
        Ok(())
    }

    async fn find_refresh_token(&self, token_hash: &str) -> AppResult<Option<StoredRefreshToken>> {
        let token = refresh_tokens::Entity::find()
            .filter(refresh_tokens::Column::TokenHash.eq(token_hash))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(token.map(|t| StoredRefreshToken {
            id: RefreshTokenId::from_uuid(t.id),
            user_id: UserId::from_uuid(t.user_id),
            expires_at: t.expires_at.with_timezone(&Utc),
        }))
    }

    async fn delete_refresh_token(&self, id: RefreshTokenId) -> AppResult<u64> {
        let result = refresh_tokens::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }

    async fn rotate_refresh_token(
        &self,
        old: RefreshTokenId,
        replacement: NewRefreshToken,
    ) -> AppResult<bool> {
        let txn = self.db.begin().await.map_err(db_err)?;

        // A concurrent rotation of the same row blocks on the row lock and
        // then sees zero affected rows.
        let removed = refresh_tokens::Entity::delete_by_id(old.into_inner())
            .exec(&txn)
            .await
            .map_err(db_err)?
            .rows_affected;
        if removed != 1 {
            txn.rollback().await.map_err(db_err)?;
            return Ok(false);
        }

        insert_token(&txn, replacement).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(true)
    }

    async fn delete_user_refresh_tokens(&self, user_id: UserId) -> AppResult<u64> {
        let result = refresh_tokens::Entity::delete_many()
            .filter(refresh_tokens::Column::UserId.eq(user_id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
