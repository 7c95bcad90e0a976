//! Property tests for scope resolution.

use proptest::prelude::*;
use rentdesk_shared::types::{OwnerId, PropertyId, UserId};
use uuid::Uuid;

use super::{OwnerScope, PropertyScope};
use crate::auth::Principal;

fn property_id() -> impl Strategy<Value = PropertyId> {
    any::<u128>().prop_map(|n| PropertyId::from_uuid(Uuid::from_u128(n)))
}

fn owner_id() -> impl Strategy<Value = OwnerId> {
    any::<u128>().prop_map(|n| OwnerId::from_uuid(Uuid::from_u128(n)))
}

proptest! {
    #[test]
    fn prop_manager_without_assignments_matches_no_row(
        property in property_id(),
        owner in owner_id(),
        owned in prop::collection::vec(property_id(), 0..5),
    ) {
        let principal = Principal::Manager {
            user_id: UserId::new(),
            can_create_owners: true,
            can_create_properties: true,
        };
        let scope = PropertyScope::for_principal(&principal, Vec::new());

        prop_assert!(!scope.allows(property, owner));
        prop_assert!(!OwnerScope::from_property_scope(&scope).allows(owner, &owned));
    }

    #[test]
    fn prop_manager_scope_is_exactly_the_assignment_set(
        assigned in prop::collection::vec(property_id(), 1..8),
        other in property_id(),
        owner in owner_id(),
    ) {
        let principal = Principal::Manager {
            user_id: UserId::new(),
            can_create_owners: false,
            can_create_properties: false,
        };
        let scope = PropertyScope::for_principal(&principal, assigned.clone());

        for id in &assigned {
            prop_assert!(scope.allows(*id, owner));
        }
        prop_assert_eq!(scope.allows(other, owner), assigned.contains(&other));
    }

    #[test]
    fn prop_owner_scope_follows_property_scope(
        assigned in prop::collection::vec(property_id(), 0..5),
        owned in prop::collection::vec(property_id(), 0..5),
        owner in owner_id(),
    ) {
        let scope = PropertyScope::of_properties(assigned);
        let owners = OwnerScope::from_property_scope(&scope);
        let visible_property = owned.iter().any(|p| scope.allows(*p, owner));

        prop_assert_eq!(owners.allows(owner, &owned), visible_property);
    }
}
