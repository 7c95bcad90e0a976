//! Summary service tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rentdesk_shared::types::{OwnerId, StayId};
use rust_decimal_macros::dec;

use super::service::SummaryService;
use super::types::SummaryRequest;
use crate::ledger::{Period, TransactionType};
use crate::stays::NewStay;
use crate::testing::{self, InMemoryStore, admin, manager};

fn service(store: &Arc<InMemoryStore>) -> SummaryService<InMemoryStore, InMemoryStore> {
    SummaryService::new(store.scopes(), Arc::clone(store), testing::clock())
}

fn seed_scenario(store: &InMemoryStore) -> OwnerId {
    let owner = store.add_owner("Ivan");
    let property = store.add_property(owner, "Flat");
    for (kind, amount) in [
        (TransactionType::Income, dec!(50000)),
        (TransactionType::Commission, dec!(5000)),
        (TransactionType::Cleaning, dec!(2000)),
        (TransactionType::Expense, dec!(3000)),
        (TransactionType::Payout, dec!(10000)),
    ] {
        store.add_transaction(property, kind, amount, testing::now());
    }
    owner
}

#[tokio::test]
async fn test_owner_summary_totals() {
    let store = InMemoryStore::new();
    let owner = seed_scenario(&store);

    let summary = service(&store)
        .get_owner_summary(&admin(), owner, &SummaryRequest::default())
        .await
        .unwrap();

    assert_eq!(summary.totals.balance, dec!(30000));
    assert_eq!(summary.totals.income, dec!(50000));
    assert_eq!(summary.totals.expenses, dec!(10000));
    assert_eq!(summary.totals.payouts, dec!(10000));
    assert_eq!(summary.properties_count, 1);
    assert_eq!(summary.recent_transactions.len(), 5);
    assert_eq!(summary.period, Period::All);
}

#[tokio::test]
async fn test_period_all_applies_no_date_filter() {
    let store = InMemoryStore::new();
    let owner = store.add_owner("Ivan");
    let property = store.add_property(owner, "Flat");
    let years_ago = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
    store.add_transaction(property, TransactionType::Income, dec!(700), years_ago);
    store.add_transaction(property, TransactionType::Income, dec!(300), testing::now());

    let all = service(&store)
        .get_owner_summary(
            &admin(),
            owner,
            &SummaryRequest {
                period: Some(Period::All),
                ..SummaryRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(all.totals.income, dec!(1000));

    let month = service(&store)
        .get_owner_summary(
            &admin(),
            owner,
            &SummaryRequest {
                period: Some(Period::Month),
                ..SummaryRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(month.totals.income, dec!(300));
}

#[tokio::test]
async fn test_explicit_dates_override_period() {
    let store = InMemoryStore::new();
    let owner = store.add_owner("Ivan");
    let property = store.add_property(owner, "Flat");
    let march = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
    store.add_transaction(property, TransactionType::Expense, dec!(40), march);
    store.add_transaction(property, TransactionType::Expense, dec!(60), testing::now());

    let summary = service(&store)
        .get_owner_summary(
            &admin(),
            owner,
            &SummaryRequest {
                period: Some(Period::Month),
                from: Some("2025-03-01".to_string()),
                to: Some("2025-03-31".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(summary.totals.expenses, dec!(40));
    assert_eq!(summary.totals.balance, dec!(-40));

    let err = service(&store)
        .get_owner_summary(
            &admin(),
            owner,
            &SummaryRequest {
                from: Some("03/01/2025".to_string()),
                ..SummaryRequest::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_out_of_scope_owner_is_not_found() {
    let store = InMemoryStore::new();
    let ivan = seed_scenario(&store);
    let olga = store.add_owner("Olga");
    let manager_id = store.add_manager(false, false);

    let err = service(&store)
        .get_owner_summary(&manager(manager_id), ivan, &SummaryRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    let err = service(&store)
        .get_owner_summary(
            &store.principal_of_owner(olga),
            ivan,
            &SummaryRequest::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    let malformed = SummaryRequest {
        from: Some("not-a-date".to_string()),
        ..SummaryRequest::default()
    };
    let err = service(&store)
        .get_owner_summary(&manager(manager_id), ivan, &malformed)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    let err = service(&store)
        .get_owner_summary(&admin(), ivan, &malformed)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_manager_sees_only_assigned_part_of_ledger() {
    let store = InMemoryStore::new();
    let owner = store.add_owner("Ivan");
    let flat = store.add_property(owner, "Flat");
    let house = store.add_property(owner, "House");
    store.add_transaction(flat, TransactionType::Income, dec!(100), testing::now());
    store.add_transaction(house, TransactionType::Income, dec!(900), testing::now());
    let manager_id = store.add_manager(false, false);
    store.assign(manager_id, flat);

    let summary = service(&store)
        .get_owner_summary(&manager(manager_id), owner, &SummaryRequest::default())
        .await
        .unwrap();

    assert_eq!(summary.totals.income, dec!(100));
    assert_eq!(summary.properties_count, 1);
}

#[tokio::test]
async fn test_recent_feed_and_active_stays() {
    let store = InMemoryStore::new();
    let owner = store.add_owner("Ivan");
    let property = store.add_property(owner, "Flat");
    for hours in 0..7 {
        store.add_transaction(
            property,
            TransactionType::Income,
            dec!(1),
            testing::now() - Duration::hours(hours),
        );
    }
    let stay = |check_in: DateTime<Utc>, check_out: DateTime<Utc>| NewStay {
        id: StayId::new(),
        property_id: property,
        guest_name: "Guest".to_string(),
        check_in,
        check_out,
        total_amount: dec!(1),
        created_at: testing::now(),
    };
    {
        let mut state = store.state();
        state.stays.push(stay(
            testing::now() - Duration::days(1),
            testing::now() + Duration::days(1),
        ));
        state.stays.push(stay(
            testing::now() - Duration::days(10),
            testing::now() - Duration::days(5),
        ));
    }

    let summary = service(&store)
        .get_owner_summary(&admin(), owner, &SummaryRequest::default())
        .await
        .unwrap();

    assert_eq!(summary.recent_transactions.len(), 5);
    assert_eq!(summary.recent_transactions[0].created_at, testing::now());
    assert_eq!(summary.recent_transactions[0].property_title, "Flat");
    assert_eq!(summary.active_stays_count, 1);
}

#[tokio::test]
async fn test_current_user_summary() {
    let store = InMemoryStore::new();
    let owner = seed_scenario(&store);

    let summary = service(&store)
        .get_for_current_user(&store.principal_of_owner(owner), &SummaryRequest::default())
        .await
        .unwrap();
    assert_eq!(summary.owner_id, owner);
    assert_eq!(summary.totals.balance, dec!(30000));

    let err = service(&store)
        .get_for_current_user(&admin(), &SummaryRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_reassigned_property_history_stays_with_previous_owner() {
    let store = InMemoryStore::new();
    let ivan = store.add_owner("Ivan");
    let olga = store.add_owner("Olga");
    let property = store.add_property(ivan, "Flat");
    store.add_transaction(property, TransactionType::Income, dec!(500), testing::now());

    store
        .state()
        .properties
        .iter_mut()
        .for_each(|p| p.owner_id = olga);

    let olga_summary = service(&store)
        .get_owner_summary(&admin(), olga, &SummaryRequest::default())
        .await
        .unwrap();
    assert_eq!(olga_summary.totals.income, dec!(0));
    assert_eq!(olga_summary.properties_count, 1);

    let ivan_summary = service(&store)
        .get_owner_summary(&admin(), ivan, &SummaryRequest::default())
        .await
        .unwrap();
    assert_eq!(ivan_summary.totals.income, dec!(500));
}
