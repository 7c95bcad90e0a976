//! In-memory implementation of every store trait, for service tests.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, TimeZone, Utc};
use rentdesk_shared::{
    AppError, AppResult, JwtConfig, JwtService,
    types::{
        AssignmentId, OwnerId, PageRequest, PayoutId, PropertyId, RefreshTokenId, StayId,
        TransactionId, UserId,
    },
};
use rust_decimal::Decimal;

use crate::assignments::{AssignmentFilter, AssignmentRecord, AssignmentStore, NewAssignment};
use crate::auth::{
    Identity, NewRefreshToken, Principal, Role, SessionStore, StoredRefreshToken,
    UserCredentials, hash_password,
};
use crate::clock::{Clock, FixedClock};
use crate::ledger::{NewTransaction, TransactionRecord, TransactionType};
use crate::owners::{OwnerRow, OwnerStore, UpdateOwnerInput};
use crate::payouts::{NewPayout, PayoutFilter, PayoutRecord, PayoutStore};
use crate::properties::{
    NewProperty, PropertyFilter, PropertyLookup, PropertyRecord, PropertyStore,
    UpdatePropertyInput,
};
use crate::scope::{AssignmentLookup, OwnerScope, PropertyScope, ScopeResolver};
use crate::stays::{NewStay, StayDetail, StayFilter, StayRecord, StayStore};
use crate::summary::{LedgerQuery, LedgerStore};
use crate::transactions::{TransactionFilter, TransactionStore};
use crate::users::{ManagerPermissions, ManagerRecord, NewOwnerProfile, NewUser, UserStore};

/// Password of every account seeded through [`InMemoryStore::add_user`].
pub const PASSWORD: &str = "secret123";

/// Instant all fixed clocks in tests start at.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 15, 12, 0, 0).single().unwrap()
}

pub fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(now()))
}

pub fn jwt() -> Arc<JwtService> {
    Arc::new(JwtService::new(JwtConfig {
        secret: "test-secret-key-at-least-32-bytes-long!".to_string(),
        access_token_expires_minutes: 15,
    }))
}

#[derive(Debug, Default)]
pub struct State {
    pub users: Vec<NewUser>,
    pub owners: Vec<NewOwnerProfile>,
    pub properties: Vec<NewProperty>,
    pub assignments: Vec<NewAssignment>,
    pub stays: Vec<NewStay>,
    pub transactions: Vec<NewTransaction>,
    pub payouts: Vec<NewPayout>,
    pub refresh_tokens: Vec<NewRefreshToken>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn scopes(self: &Arc<Self>) -> ScopeResolver<Self> {
        ScopeResolver::new(Arc::clone(self))
    }

    pub fn add_user(&self, email: &str, role: Role) -> UserId {
        let user = NewUser {
            id: UserId::new(),
            email: email.to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            role,
            can_create_owners: false,
            can_create_properties: false,
            created_at: now(),
        };
        let id = user.id;
        self.state().users.push(user);
        id
    }

    pub fn add_owner(&self, name: &str) -> OwnerId {
        let user = NewUser {
            id: UserId::new(),
            email: format!("{}@owners.test", name.to_lowercase()),
            name: name.to_string(),
            password_hash: "unused".to_string(),
            role: Role::Owner,
            can_create_owners: false,
            can_create_properties: false,
            created_at: now(),
        };
        let owner = NewOwnerProfile {
            id: OwnerId::new(),
            user_id: user.id,
            phone: None,
            created_at: now(),
        };
        let id = owner.id;
        let mut state = self.state();
        state.users.push(user);
        state.owners.push(owner);
        id
    }

    pub fn add_manager(&self, can_create_owners: bool, can_create_properties: bool) -> UserId {
        let user = NewUser {
            id: UserId::new(),
            email: format!("manager-{}@rentdesk.test", UserId::new()),
            name: "Manager".to_string(),
            password_hash: "unused".to_string(),
            role: Role::Manager,
            can_create_owners,
            can_create_properties,
            created_at: now(),
        };
        let id = user.id;
        self.state().users.push(user);
        id
    }

    pub fn add_property(&self, owner_id: OwnerId, title: &str) -> PropertyId {
        let property = NewProperty {
            id: PropertyId::new(),
            title: title.to_string(),
            address: format!("{title} street 1"),
            owner_id,
            created_at: now(),
        };
        let id = property.id;
        self.state().properties.push(property);
        id
    }

    pub fn assign(&self, manager: UserId, property: PropertyId) {
        self.state().assignments.push(NewAssignment {
            id: AssignmentId::new(),
            user_id: manager,
            property_id: property,
            assigned_at: now(),
        });
    }

    pub fn add_transaction(
        &self,
        property_id: PropertyId,
        kind: TransactionType,
        amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> TransactionId {
        let mut state = self.state();
        let owner_id = state
            .properties
            .iter()
            .find(|p| p.id == property_id)
            .map(|p| p.owner_id)
            .unwrap();
        let entry = NewTransaction {
            id: TransactionId::new(),
            kind,
            amount,
            comment: None,
            owner_id,
            property_id,
            stay_id: None,
            payout_id: None,
            created_at,
        };
        let id = entry.id;
        state.transactions.push(entry);
        id
    }

    pub fn principal_of_owner(&self, owner: OwnerId) -> Principal {
        let user_id = self
            .state()
            .owners
            .iter()
            .find(|o| o.id == owner)
            .map(|o| o.user_id)
            .unwrap();
        Principal::Owner {
            user_id,
            owner: Some(owner),
        }
    }
}

pub fn admin() -> Principal {
    Principal::Admin {
        user_id: UserId::new(),
    }
}

pub fn manager(user_id: UserId) -> Principal {
    Principal::Manager {
        user_id,
        can_create_owners: false,
        can_create_properties: false,
    }
}

impl State {
    fn user(&self, id: UserId) -> Option<&NewUser> {
        self.users.iter().find(|u| u.id == id)
    }

    fn owner_name(&self, owner: OwnerId) -> Option<String> {
        let profile = self.owners.iter().find(|o| o.id == owner)?;
        self.user(profile.user_id).map(|u| u.name.clone())
    }

    fn property(&self, id: PropertyId) -> Option<&NewProperty> {
        self.properties.iter().find(|p| p.id == id)
    }

    fn property_visible(&self, id: PropertyId, scope: &PropertyScope) -> bool {
        self.property(id)
            .is_some_and(|p| scope.allows(p.id, p.owner_id))
    }

    fn property_record(&self, property: &NewProperty) -> PropertyRecord {
        PropertyRecord {
            id: property.id,
            title: property.title.clone(),
            address: property.address.clone(),
            owner_id: property.owner_id,
            owner_name: self.owner_name(property.owner_id).unwrap_or_default(),
            created_at: property.created_at,
        }
    }

    fn identity(&self, user: &NewUser) -> Identity {
        Identity {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            owner_id: self
                .owners
                .iter()
                .find(|o| o.user_id == user.id)
                .map(|o| o.id),
            can_create_owners: user.can_create_owners,
            can_create_properties: user.can_create_properties,
        }
    }

    fn transaction_record(&self, entry: &NewTransaction) -> TransactionRecord {
        let title = self
            .property(entry.property_id)
            .map(|p| p.title.clone())
            .unwrap_or_default();
        TransactionRecord::from_new(
            entry.clone(),
            self.owner_name(entry.owner_id).unwrap_or_default(),
            title,
        )
    }

    fn stay_record(&self, stay: &NewStay) -> StayRecord {
        let property = self.property(stay.property_id);
        let owner_id = property.map(|p| p.owner_id).unwrap_or_default();
        StayRecord {
            id: stay.id,
            property_id: stay.property_id,
            property_title: property.map(|p| p.title.clone()).unwrap_or_default(),
            owner_id,
            owner_name: self.owner_name(owner_id).unwrap_or_default(),
            guest_name: stay.guest_name.clone(),
            check_in: stay.check_in,
            check_out: stay.check_out,
            total_amount: stay.total_amount,
            created_at: stay.created_at,
        }
    }

    fn payout_record(&self, payout: &NewPayout) -> PayoutRecord {
        PayoutRecord {
            id: payout.id,
            owner_id: payout.owner_id,
            owner_name: self.owner_name(payout.owner_id).unwrap_or_default(),
            property_id: payout.property_id,
            property_title: self
                .property(payout.property_id)
                .map(|p| p.title.clone())
                .unwrap_or_default(),
            amount: payout.amount,
            comment: payout.comment.clone(),
            paid_at: payout.paid_at,
            created_at: payout.created_at,
        }
    }

    fn owner_row(&self, owner: &NewOwnerProfile, scope: &PropertyScope) -> OwnerRow {
        let user = self.user(owner.user_id);
        let ledger = TransactionType::ALL
            .into_iter()
            .map(|kind| {
                let sum = self
                    .transactions
                    .iter()
                    .filter(|t| t.owner_id == owner.id && t.kind == kind)
                    .map(|t| t.amount)
                    .sum::<Decimal>();
                (kind, sum)
            })
            .collect();
        OwnerRow {
            id: owner.id,
            user_id: owner.user_id,
            name: user.map(|u| u.name.clone()).unwrap_or_default(),
            email: user.map(|u| u.email.clone()).unwrap_or_default(),
            phone: owner.phone.clone(),
            created_at: owner.created_at,
            properties_count: self
                .properties
                .iter()
                .filter(|p| p.owner_id == owner.id && scope.allows(p.id, p.owner_id))
                .count() as u64,
            ledger,
        }
    }

    fn owner_allowed(&self, owner: OwnerId, scope: &OwnerScope) -> bool {
        let owned: Vec<_> = self
            .properties
            .iter()
            .filter(|p| p.owner_id == owner)
            .map(|p| p.id)
            .collect();
        self.owners.iter().any(|o| o.id == owner) && scope.allows(owner, &owned)
    }

    fn ledger_matches(&self, entry: &NewTransaction, query: &LedgerQuery) -> bool {
        entry.owner_id == query.owner_id
            && self.property_visible(entry.property_id, &query.scope)
            && query.window.contains(entry.created_at)
    }

    fn manager_record(&self, user: &NewUser) -> ManagerRecord {
        ManagerRecord {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            can_create_owners: user.can_create_owners,
            can_create_properties: user.can_create_properties,
            assigned_properties: self
                .assignments
                .iter()
                .filter(|a| a.user_id == user.id)
                .count() as u64,
            created_at: user.created_at,
        }
    }

    fn remove_property(&mut self, id: PropertyId) {
        self.properties.retain(|p| p.id != id);
        self.stays.retain(|s| s.property_id != id);
        self.transactions.retain(|t| t.property_id != id);
        self.payouts.retain(|p| p.property_id != id);
        self.assignments.retain(|a| a.property_id != id);
    }
}

fn page<T: Clone>(items: &[T], request: PageRequest) -> (Vec<T>, u64) {
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
    (
        items.iter().skip(offset).take(limit).cloned().collect(),
        items.len() as u64,
    )
}

impl SessionStore for InMemoryStore {
    async fn find_credentials(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        let state = self.state();
        Ok(state
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| UserCredentials {
                identity: state.identity(u),
                password_hash: u.password_hash.clone(),
            }))
    }

    async fn find_identity(&self, user_id: UserId) -> AppResult<Option<Identity>> {
        let state = self.state();
        Ok(state.user(user_id).map(|u| state.identity(u)))
    }

    async fn replace_refresh_tokens(&self, token: NewRefreshToken) -> AppResult<()> {
        let mut state = self.state();
        state.refresh_tokens.retain(|t| t.user_id != token.user_id);
        state.refresh_tokens.push(token);
        Ok(())
    }

    async fn find_refresh_token(&self, token_hash: &str) -> AppResult<Option<StoredRefreshToken>> {
        Ok(self
            .state()
            .refresh_tokens
            .iter()
            .find(|t| t.token_hash == token_hash)
            .map(|t| StoredRefreshToken {
                id: t.id,
                user_id: t.user_id,
                expires_at: t.expires_at,
            }))
    }

    async fn delete_refresh_token(&self, id: RefreshTokenId) -> AppResult<u64> {
        let mut state = self.state();
        let before = state.refresh_tokens.len();
        state.refresh_tokens.retain(|t| t.id != id);
        Ok((before - state.refresh_tokens.len()) as u64)
    }

    async fn rotate_refresh_token(
        &self,
        old: RefreshTokenId,
        replacement: NewRefreshToken,
    ) -> AppResult<bool> {
        let mut state = self.state();
        let before = state.refresh_tokens.len();
        state.refresh_tokens.retain(|t| t.id != old);
        if state.refresh_tokens.len() == before {
            return Ok(false);
        }
        state.refresh_tokens.push(replacement);
        Ok(true)
    }

    async fn delete_user_refresh_tokens(&self, user_id: UserId) -> AppResult<u64> {
        let mut state = self.state();
        let before = state.refresh_tokens.len();
        state.refresh_tokens.retain(|t| t.user_id != user_id);
        Ok((before - state.refresh_tokens.len()) as u64)
    }
}

impl AssignmentLookup for InMemoryStore {
    async fn assigned_property_ids(&self, manager: UserId) -> AppResult<Vec<PropertyId>> {
        Ok(self
            .state()
            .assignments
            .iter()
            .filter(|a| a.user_id == manager)
            .map(|a| a.property_id)
            .collect())
    }
}

impl AssignmentStore for InMemoryStore {
    async fn is_manager(&self, user: UserId) -> AppResult<bool> {
        Ok(self
            .state()
            .user(user)
            .is_some_and(|u| u.role == Role::Manager))
    }

    async fn property_exists(&self, property: PropertyId) -> AppResult<bool> {
        Ok(self.state().property(property).is_some())
    }

    async fn is_assigned(&self, user: UserId, property: PropertyId) -> AppResult<bool> {
        Ok(self
            .state()
            .assignments
            .iter()
            .any(|a| a.user_id == user && a.property_id == property))
    }

    async fn insert_assignment(&self, assignment: NewAssignment) -> AppResult<()> {
        self.state().assignments.push(assignment);
        Ok(())
    }

    async fn find_assignment(&self, id: AssignmentId) -> AppResult<Option<AssignmentRecord>> {
        let state = self.state();
        Ok(state.assignments.iter().find(|a| a.id == id).map(|a| {
            let property = state.property(a.property_id);
            AssignmentRecord {
                id: a.id,
                user_id: a.user_id,
                user_name: state.user(a.user_id).map(|u| u.name.clone()).unwrap_or_default(),
                property_id: a.property_id,
                property_title: property.map(|p| p.title.clone()).unwrap_or_default(),
                property_address: property.map(|p| p.address.clone()).unwrap_or_default(),
                assigned_at: a.assigned_at,
            }
        }))
    }

    async fn list_assignments(&self, filter: AssignmentFilter) -> AppResult<Vec<AssignmentRecord>> {
        let ids: Vec<_> = self
            .state()
            .assignments
            .iter()
            .rev()
            .filter(|a| filter.user_id.is_none_or(|u| a.user_id == u))
            .filter(|a| filter.property_id.is_none_or(|p| a.property_id == p))
            .map(|a| a.id)
            .collect();
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            records.extend(self.find_assignment(id).await?);
        }
        Ok(records)
    }

    async fn delete_assignment(&self, id: AssignmentId) -> AppResult<bool> {
        let mut state = self.state();
        let before = state.assignments.len();
        state.assignments.retain(|a| a.id != id);
        Ok(state.assignments.len() < before)
    }
}

impl PropertyLookup for InMemoryStore {
    async fn find_property(
        &self,
        id: PropertyId,
        scope: &PropertyScope,
    ) -> AppResult<Option<PropertyRecord>> {
        let state = self.state();
        Ok(state
            .property(id)
            .filter(|p| scope.allows(p.id, p.owner_id))
            .map(|p| state.property_record(p)))
    }
}

impl PropertyStore for InMemoryStore {
    async fn owner_name(&self, owner: OwnerId) -> AppResult<Option<String>> {
        Ok(self.state().owner_name(owner))
    }

    async fn insert_property(
        &self,
        property: NewProperty,
        assignment: Option<NewAssignment>,
    ) -> AppResult<()> {
        let mut state = self.state();
        state.properties.push(property);
        state.assignments.extend(assignment);
        Ok(())
    }

    async fn list_properties(
        &self,
        filter: &PropertyFilter,
        scope: &PropertyScope,
    ) -> AppResult<Vec<PropertyRecord>> {
        let state = self.state();
        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut records: Vec<_> = state
            .properties
            .iter()
            .filter(|p| scope.allows(p.id, p.owner_id))
            .filter(|p| filter.owner_id.is_none_or(|o| p.owner_id == o))
            .filter(|p| {
                search.as_ref().is_none_or(|s| {
                    p.title.to_lowercase().contains(s) || p.address.to_lowercase().contains(s)
                })
            })
            .map(|p| state.property_record(p))
            .collect();
        records.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(records)
    }

    async fn update_property(
        &self,
        id: PropertyId,
        changes: &UpdatePropertyInput,
    ) -> AppResult<bool> {
        let mut state = self.state();
        let Some(property) = state.properties.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        if let Some(title) = &changes.title {
            property.title.clone_from(title);
        }
        if let Some(address) = &changes.address {
            property.address.clone_from(address);
        }
        if let Some(owner_id) = changes.owner_id {
            property.owner_id = owner_id;
        }
        Ok(true)
    }

    async fn delete_property(&self, id: PropertyId) -> AppResult<bool> {
        let mut state = self.state();
        if state.property(id).is_none() {
            return Ok(false);
        }
        state.remove_property(id);
        Ok(true)
    }
}

impl OwnerStore for InMemoryStore {
    async fn list_owners(
        &self,
        owners: &OwnerScope,
        properties: &PropertyScope,
        search: Option<&str>,
    ) -> AppResult<Vec<OwnerRow>> {
        let state = self.state();
        let search = search.map(str::to_lowercase);
        let mut rows: Vec<_> = state
            .owners
            .iter()
            .filter(|o| state.owner_allowed(o.id, owners))
            .map(|o| state.owner_row(o, properties))
            .filter(|row| {
                search
                    .as_ref()
                    .is_none_or(|s| row.name.to_lowercase().contains(s))
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_owner(
        &self,
        id: OwnerId,
        owners: &OwnerScope,
        properties: &PropertyScope,
    ) -> AppResult<Option<OwnerRow>> {
        let state = self.state();
        Ok(state
            .owners
            .iter()
            .find(|o| o.id == id && state.owner_allowed(o.id, owners))
            .map(|o| state.owner_row(o, properties)))
    }

    async fn owner_properties(
        &self,
        filter: &PropertyFilter,
        properties: &PropertyScope,
    ) -> AppResult<Vec<PropertyRecord>> {
        self.list_properties(filter, properties).await
    }

    async fn update_owner(&self, id: OwnerId, changes: &UpdateOwnerInput) -> AppResult<bool> {
        let mut state = self.state();
        let Some(owner) = state.owners.iter_mut().find(|o| o.id == id) else {
            return Ok(false);
        };
        if let Some(phone) = &changes.phone {
            owner.phone = Some(phone.clone());
        }
        let user_id = owner.user_id;
        if let Some(name) = &changes.name
            && let Some(user) = state.users.iter_mut().find(|u| u.id == user_id)
        {
            user.name.clone_from(name);
        }
        Ok(true)
    }

    async fn delete_owner(&self, id: OwnerId) -> AppResult<bool> {
        let mut state = self.state();
        let Some(user_id) = state.owners.iter().find(|o| o.id == id).map(|o| o.user_id) else {
            return Ok(false);
        };
        let owned: Vec<_> = state
            .properties
            .iter()
            .filter(|p| p.owner_id == id)
            .map(|p| p.id)
            .collect();
        for property in owned {
            state.remove_property(property);
        }
        state.transactions.retain(|t| t.owner_id != id);
        state.payouts.retain(|p| p.owner_id != id);
        state.owners.retain(|o| o.id != id);
        state.users.retain(|u| u.id != user_id);
        state.refresh_tokens.retain(|t| t.user_id != user_id);
        Ok(true)
    }
}

impl UserStore for InMemoryStore {
    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.state().users.iter().any(|u| u.email == email))
    }

    async fn insert_owner_account(&self, user: NewUser, owner: NewOwnerProfile) -> AppResult<()> {
        let mut state = self.state();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::conflict("Email is already registered"));
        }
        state.users.push(user);
        state.owners.push(owner);
        Ok(())
    }

    async fn insert_user(&self, user: NewUser) -> AppResult<()> {
        let mut state = self.state();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::conflict("Email is already registered"));
        }
        state.users.push(user);
        Ok(())
    }

    async fn list_managers(&self) -> AppResult<Vec<ManagerRecord>> {
        let state = self.state();
        let mut managers: Vec<_> = state
            .users
            .iter()
            .filter(|u| u.role == Role::Manager)
            .map(|u| state.manager_record(u))
            .collect();
        managers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(managers)
    }

    async fn find_manager(&self, id: UserId) -> AppResult<Option<ManagerRecord>> {
        let state = self.state();
        Ok(state
            .user(id)
            .filter(|u| u.role == Role::Manager)
            .map(|u| state.manager_record(u)))
    }

    async fn update_manager_permissions(
        &self,
        id: UserId,
        permissions: ManagerPermissions,
    ) -> AppResult<bool> {
        let mut state = self.state();
        let Some(user) = state
            .users
            .iter_mut()
            .find(|u| u.id == id && u.role == Role::Manager)
        else {
            return Ok(false);
        };
        if let Some(flag) = permissions.can_create_owners {
            user.can_create_owners = flag;
        }
        if let Some(flag) = permissions.can_create_properties {
            user.can_create_properties = flag;
        }
        Ok(true)
    }

    async fn delete_manager(&self, id: UserId) -> AppResult<bool> {
        let mut state = self.state();
        let before = state.users.len();
        state.users.retain(|u| !(u.id == id && u.role == Role::Manager));
        if state.users.len() == before {
            return Ok(false);
        }
        state.assignments.retain(|a| a.user_id != id);
        state.refresh_tokens.retain(|t| t.user_id != id);
        Ok(true)
    }
}

impl StayStore for InMemoryStore {
    async fn insert_stay(&self, stay: NewStay, entries: Vec<NewTransaction>) -> AppResult<()> {
        let mut state = self.state();
        state.stays.push(stay);
        state.transactions.extend(entries);
        Ok(())
    }

    async fn list_stays(
        &self,
        filter: &StayFilter,
        scope: &PropertyScope,
    ) -> AppResult<Vec<StayRecord>> {
        let state = self.state();
        let guest = filter.guest_name.as_ref().map(|g| g.trim().to_lowercase());
        let mut records: Vec<_> = state
            .stays
            .iter()
            .filter(|s| state.property_visible(s.property_id, scope))
            .filter(|s| filter.property_id.is_none_or(|p| s.property_id == p))
            .filter(|s| {
                filter.owner_id.is_none_or(|o| {
                    state.property(s.property_id).is_some_and(|p| p.owner_id == o)
                })
            })
            .filter(|s| filter.window.from.is_none_or(|from| s.check_in >= from))
            .filter(|s| filter.window.to.is_none_or(|to| s.check_out <= to))
            .filter(|s| {
                guest
                    .as_ref()
                    .is_none_or(|g| s.guest_name.to_lowercase().contains(g))
            })
            .map(|s| state.stay_record(s))
            .collect();
        records.sort_by(|a, b| b.check_in.cmp(&a.check_in));
        Ok(records)
    }

    async fn find_stay(&self, id: StayId, scope: &PropertyScope) -> AppResult<Option<StayDetail>> {
        let state = self.state();
        Ok(state
            .stays
            .iter()
            .find(|s| s.id == id && state.property_visible(s.property_id, scope))
            .map(|s| StayDetail {
                stay: state.stay_record(s),
                transactions: state
                    .transactions
                    .iter()
                    .filter(|t| t.stay_id == Some(s.id))
                    .map(|t| state.transaction_record(t))
                    .collect(),
            }))
    }

    async fn delete_stay(&self, id: StayId) -> AppResult<bool> {
        let mut state = self.state();
        let before = state.stays.len();
        state.stays.retain(|s| s.id != id);
        if state.stays.len() == before {
            return Ok(false);
        }
        for entry in &mut state.transactions {
            if entry.stay_id == Some(id) {
                entry.stay_id = None;
            }
        }
        Ok(true)
    }
}

impl TransactionStore for InMemoryStore {
    async fn insert_transaction(&self, entry: NewTransaction) -> AppResult<()> {
        self.state().transactions.push(entry);
        Ok(())
    }

    async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        scope: &PropertyScope,
        request: PageRequest,
    ) -> AppResult<(Vec<TransactionRecord>, u64)> {
        let state = self.state();
        let mut records: Vec<_> = state
            .transactions
            .iter()
            .filter(|t| state.property_visible(t.property_id, scope))
            .filter(|t| filter.property_id.is_none_or(|p| t.property_id == p))
            .filter(|t| filter.owner_id.is_none_or(|o| t.owner_id == o))
            .filter(|t| filter.kind.is_none_or(|k| t.kind == k))
            .filter(|t| filter.window.contains(t.created_at))
            .map(|t| state.transaction_record(t))
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page(&records, request))
    }

    async fn find_transaction(
        &self,
        id: TransactionId,
        scope: &PropertyScope,
    ) -> AppResult<Option<TransactionRecord>> {
        let state = self.state();
        Ok(state
            .transactions
            .iter()
            .find(|t| t.id == id && state.property_visible(t.property_id, scope))
            .map(|t| state.transaction_record(t)))
    }

    async fn delete_transaction(&self, id: TransactionId) -> AppResult<bool> {
        let mut state = self.state();
        let before = state.transactions.len();
        state.transactions.retain(|t| t.id != id);
        Ok(state.transactions.len() < before)
    }
}

impl PayoutStore for InMemoryStore {
    async fn insert_payout(&self, payout: NewPayout, entry: NewTransaction) -> AppResult<()> {
        let mut state = self.state();
        state.payouts.push(payout);
        state.transactions.push(entry);
        Ok(())
    }

    async fn list_payouts(
        &self,
        filter: &PayoutFilter,
        scope: &PropertyScope,
        request: PageRequest,
    ) -> AppResult<(Vec<PayoutRecord>, u64)> {
        let state = self.state();
        let mut records: Vec<_> = state
            .payouts
            .iter()
            .filter(|p| state.property_visible(p.property_id, scope))
            .filter(|p| filter.property_id.is_none_or(|id| p.property_id == id))
            .filter(|p| filter.owner_id.is_none_or(|o| p.owner_id == o))
            .filter(|p| filter.window.contains(p.paid_at))
            .map(|p| state.payout_record(p))
            .collect();
        records.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
        Ok(page(&records, request))
    }

    async fn find_payout(
        &self,
        id: PayoutId,
        scope: &PropertyScope,
    ) -> AppResult<Option<PayoutRecord>> {
        let state = self.state();
        Ok(state
            .payouts
            .iter()
            .find(|p| p.id == id && state.property_visible(p.property_id, scope))
            .map(|p| state.payout_record(p)))
    }

    async fn delete_payout(&self, id: PayoutId) -> AppResult<bool> {
        let mut state = self.state();
        let before = state.payouts.len();
        state.payouts.retain(|p| p.id != id);
        if state.payouts.len() == before {
            return Ok(false);
        }
        for entry in &mut state.transactions {
            if entry.payout_id == Some(id) {
                entry.payout_id = None;
            }
        }
        Ok(true)
    }
}

impl LedgerStore for InMemoryStore {
    async fn owner_visible(&self, owner: OwnerId, scope: &OwnerScope) -> AppResult<bool> {
        Ok(self.state().owner_allowed(owner, scope))
    }

    async fn sum_by_type(&self, query: &LedgerQuery) -> AppResult<Vec<(TransactionType, Decimal)>> {
        let state = self.state();
        Ok(TransactionType::ALL
            .into_iter()
            .filter_map(|kind| {
                let amounts: Vec<_> = state
                    .transactions
                    .iter()
                    .filter(|t| t.kind == kind && state.ledger_matches(t, query))
                    .map(|t| t.amount)
                    .collect();
                (!amounts.is_empty()).then(|| (kind, amounts.into_iter().sum()))
            })
            .collect())
    }

    async fn recent_transactions(
        &self,
        query: &LedgerQuery,
        limit: u64,
    ) -> AppResult<Vec<TransactionRecord>> {
        let state = self.state();
        let mut records: Vec<_> = state
            .transactions
            .iter()
            .filter(|t| state.ledger_matches(t, query))
            .map(|t| state.transaction_record(t))
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(records)
    }

    async fn count_properties(&self, owner: OwnerId, scope: &PropertyScope) -> AppResult<u64> {
        Ok(self
            .state()
            .properties
            .iter()
            .filter(|p| p.owner_id == owner && scope.allows(p.id, p.owner_id))
            .count() as u64)
    }

    async fn count_active_stays(
        &self,
        owner: OwnerId,
        scope: &PropertyScope,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let state = self.state();
        Ok(state
            .stays
            .iter()
            .filter(|s| s.check_in <= at && at <= s.check_out)
            .filter(|s| {
                state
                    .property(s.property_id)
                    .is_some_and(|p| p.owner_id == owner && scope.allows(p.id, p.owner_id))
            })
            .count() as u64)
    }
}
