//! User account repository.

use std::collections::HashMap;

use chrono::Utc;
use rentdesk_core::users::{
    ManagerPermissions, ManagerRecord, NewOwnerProfile, NewUser, UserStore,
};
use rentdesk_shared::{AppResult, types::UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::UserRole;
use crate::entities::{manager_properties, owners, users};
use crate::error::db_err;

/// User repository for account administration.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    async fn managers(&self, id: Option<Uuid>) -> Result<Vec<ManagerRecord>, DbErr> {
        let rows = users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Manager))
            .apply_if(id, |q, id| q.filter(users::Column::Id.eq(id)))
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let counts: HashMap<Uuid, i64> = manager_properties::Entity::find()
            .select_only()
            .column(manager_properties::Column::UserId)
            .column_as(manager_properties::Column::Id.count(), "count")
            .filter(manager_properties::Column::UserId.is_in(rows.iter().map(|u| u.id)))
            .group_by(manager_properties::Column::UserId)
            .into_tuple::<(Uuid, i64)>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        Ok(rows
            .into_iter()
            .map(|u| ManagerRecord {
                id: UserId::from_uuid(u.id),
                assigned_properties: counts
                    .get(&u.id)
                    .map_or(0, |n| u64::try_from(*n).unwrap_or(0)),
                email: u.email,
                name: u.name,
                can_create_owners: u.can_create_owners,
                can_create_properties: u.can_create_properties,
                created_at: u.created_at.with_timezone(&Utc),
            })
            .collect())
    }
}

async fn insert_user_row<C: ConnectionTrait>(db: &C, user: NewUser) -> Result<(), DbErr> {
    let created_at = user.created_at;
    users::ActiveModel {
        id: Set(user.id.into_inner()),
        email: Set(user.email),
        name: Set(user.name),
        password_hash: Set(user.password_hash),
        role: Set(user.role.into()),
        can_create_owners: Set(user.can_create_owners),
        can_create_properties: Set(user.can_create_properties),
        created_at: Set(created_at.into()),
        updated_at: Set(created_at.into()),
    }
    .insert(db)
    .await?;
    Ok(())
}

impl UserStore for UserRepository {
    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn insert_owner_account(&self, user: NewUser, owner: NewOwnerProfile) -> AppResult<()> {
        let user_id = user.id;
        let txn = self.db.begin().await.map_err(db_err)?;

        insert_user_row(&txn, user).await.map_err(db_err)?;
        owners::ActiveModel {
            id: Set(owner.id.into_inner()),
            user_id: Set(owner.user_id.into_inner()),
            phone: Set(owner.phone),
            created_at: Set(owner.created_at.into()),
            updated_at: Set(owner.created_at.into()),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        tracing::info!(user_id = %user_id, owner_id = %owner.id, "owner account created");
        Ok(())
    }

    async fn insert_user(&self, user: NewUser) -> AppResult<()> {
        let user_id = user.id;
        insert_user_row(&self.db, user).await.map_err(db_err)?;
        tracing::info!(user_id = %user_id, "user created");
        Ok(())
    }

    async fn list_managers(&self) -> AppResult<Vec<ManagerRecord>> {
        self.managers(None).await.map_err(db_err)
    }

    async fn find_manager(&self, id: UserId) -> AppResult<Option<ManagerRecord>> {
        let mut managers = self
            .managers(Some(id.into_inner()))
            .await
            .map_err(db_err)?;
        Ok(managers.pop())
    }

    async fn update_manager_permissions(
        &self,
        id: UserId,
        permissions: ManagerPermissions,
    ) -> AppResult<bool> {
        let Some(user) = users::Entity::find_by_id(id.into_inner())
            .filter(users::Column::Role.eq(UserRole::Manager))
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(false);
        };

        let mut model: users::ActiveModel = user.into();
        if let Some(flag) = permissions.can_create_owners {
            model.can_create_owners = Set(flag);
        }
        if let Some(flag) = permissions.can_create_properties {
            model.can_create_properties = Set(flag);
        }
        model.updated_at = Set(Utc::now().into());
        model.update(&self.db).await.map_err(db_err)?;

        tracing::info!(user_id = %id, "manager permissions updated");
        Ok(true)
    }

    async fn delete_manager(&self, id: UserId) -> AppResult<bool> {
        let result = users::Entity::delete_many()
            .filter(users::Column::Id.eq(id.into_inner()))
            .filter(users::Column::Role.eq(UserRole::Manager))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(user_id = %id, "manager deleted");
        }
        Ok(deleted)
    }
}
