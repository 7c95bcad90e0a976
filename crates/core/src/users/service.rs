//! Account administration service.

use std::future::Future;
use std::sync::Arc;

use rentdesk_shared::{
    AppError, AppResult,
    types::{OwnerId, UserId},
};

use super::types::{
    CreateManagerInput, CreateOwnerAccountInput, ManagerPermissions, ManagerRecord,
    NewOwnerProfile, NewUser,
};
use crate::auth::{Identity, Principal, Role, hash_password};
use crate::clock::Clock;
use crate::validate;

/// Persistence for user accounts.
pub trait UserStore: Send + Sync {
    /// Whether an account with this (normalized) email exists.
    fn email_exists(&self, email: &str) -> impl Future<Output = AppResult<bool>> + Send;

    /// Atomically inserts an OWNER user and its owner profile.
    /// A duplicate email fails with `Conflict`.
    fn insert_owner_account(
        &self,
        user: NewUser,
        owner: NewOwnerProfile,
    ) -> impl Future<Output = AppResult<()>> + Send;

    /// Inserts a user. A duplicate email fails with `Conflict`.
    fn insert_user(&self, user: NewUser) -> impl Future<Output = AppResult<()>> + Send;

    /// Lists managers, newest first.
    fn list_managers(&self) -> impl Future<Output = AppResult<Vec<ManagerRecord>>> + Send;

    /// Finds a manager by user ID.
    fn find_manager(
        &self,
        id: UserId,
    ) -> impl Future<Output = AppResult<Option<ManagerRecord>>> + Send;

    /// Updates a manager's permission flags. Returns `false` if `id` is not a manager.
    fn update_manager_permissions(
        &self,
        id: UserId,
        permissions: ManagerPermissions,
    ) -> impl Future<Output = AppResult<bool>> + Send;

    /// Deletes a manager account. Returns `false` if `id` is not a manager.
    fn delete_manager(&self, id: UserId) -> impl Future<Output = AppResult<bool>> + Send;
}

/// Account administration service.
pub struct UserService<S: UserStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

fn manager_not_found() -> AppError {
    AppError::not_found("Manager not found")
}

impl<S: UserStore> UserService<S> {
    /// Creates a new user service.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Creates an OWNER account together with its owner profile.
    ///
    /// # Errors
    ///
    /// `Forbidden` unless the caller may create owners, `BadRequest` for
    /// invalid input, `Conflict` if the email is taken.
    pub async fn create_owner(
        &self,
        principal: &Principal,
        input: CreateOwnerAccountInput,
    ) -> AppResult<Identity> {
        if !principal.can_create_owners() {
            return Err(AppError::forbidden("Not allowed to create owners"));
        }

        let user = self
            .new_user(&input.email, &input.password, &input.name, Role::Owner, false, false)
            .await?;
        let owner = NewOwnerProfile {
            id: OwnerId::new(),
            user_id: user.id,
            phone: validate::optional_text(input.phone),
            created_at: user.created_at,
        };

        let identity = Identity {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: Role::Owner,
            owner_id: Some(owner.id),
            can_create_owners: false,
            can_create_properties: false,
        };
        self.store.insert_owner_account(user, owner).await?;
        Ok(identity)
    }

    /// Creates a MANAGER account. Administrators only.
    pub async fn create_manager(
        &self,
        principal: &Principal,
        input: CreateManagerInput,
    ) -> AppResult<ManagerRecord> {
        principal.require(&[Role::Admin])?;

        let user = self
            .new_user(
                &input.email,
                &input.password,
                &input.name,
                Role::Manager,
                input.can_create_owners,
                input.can_create_properties,
            )
            .await?;
        let record = ManagerRecord {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            can_create_owners: user.can_create_owners,
            can_create_properties: user.can_create_properties,
            assigned_properties: 0,
            created_at: user.created_at,
        };
        self.store.insert_user(user).await?;
        Ok(record)
    }

    /// Lists managers. Administrators only.
    pub async fn list_managers(&self, principal: &Principal) -> AppResult<Vec<ManagerRecord>> {
        principal.require(&[Role::Admin])?;
        self.store.list_managers().await
    }

    /// Changes a manager's permissions. Administrators only.
    pub async fn update_manager_permissions(
        &self,
        principal: &Principal,
        id: UserId,
        permissions: ManagerPermissions,
    ) -> AppResult<ManagerRecord> {
        principal.require(&[Role::Admin])?;
        if !self.store.update_manager_permissions(id, permissions).await? {
            return Err(manager_not_found());
        }
        self.store
            .find_manager(id)
            .await?
            .ok_or_else(manager_not_found)
    }

    /// Deletes a manager account, its assignments and sessions. Administrators only.
    pub async fn delete_manager(&self, principal: &Principal, id: UserId) -> AppResult<()> {
        principal.require(&[Role::Admin])?;
        if self.store.delete_manager(id).await? {
            Ok(())
        } else {
            Err(manager_not_found())
        }
    }

    async fn new_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
        can_create_owners: bool,
        can_create_properties: bool,
    ) -> AppResult<NewUser> {
        let email = validate::email(email)?;
        let name = validate::non_blank("name", name)?;
        if self.store.email_exists(&email).await? {
            return Err(AppError::conflict("Email is already registered"));
        }
        let password_hash = hash_password(password)?;

        Ok(NewUser {
            id: UserId::new(),
            email,
            name,
            password_hash,
            role,
            can_create_owners,
            can_create_properties,
            created_at: self.clock.now(),
        })
    }
}
