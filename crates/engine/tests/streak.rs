//! Streak service behavior over the in-memory store.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;

use arta_core::clock::FixedClock;
use arta_core::ledger::{EntryDraft, EntryKind};
use arta_core::streak::{DEFAULT_FREEZES, StreakStatus};
use arta_engine::{EngineError, StreakService};
use arta_store::MemoryStore;
use arta_store::traits::{EntryStore, StreakStore};

fn clock_at(y: i32, m: u32, d: u32) -> FixedClock {
    FixedClock::at(Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn add_entry(store: &MemoryStore, y: i32, m: u32, d: u32) {
    store
        .create_entry(EntryDraft {
            amount: dec!(5),
            kind: EntryKind::Expense,
            occurred_at: Utc.with_ymd_and_hms(y, m, d, 15, 30, 0).unwrap(),
            description: "coffee".to_string(),
            category: None,
            account_id: None,
            payment_method: None,
        })
        .await
        .unwrap();
}

/// Activity on three consecutive days ending today is a hot streak of 3.
#[tokio::test]
async fn three_days_ending_today_is_hot() {
    let store = Arc::new(MemoryStore::new());
    add_entry(&store, 2024, 3, 1).await;
    add_entry(&store, 2024, 3, 2).await;
    add_entry(&store, 2024, 3, 3).await;

    let service = StreakService::new(Arc::clone(&store), clock_at(2024, 3, 3));
    let info = service.current().await.unwrap();
    assert_eq!(info.count, 3);
    assert_eq!(info.status, StreakStatus::Hot);
}

/// The same activity seen the next morning is pending, still 3.
#[tokio::test]
async fn streak_is_pending_the_morning_after() {
    let store = Arc::new(MemoryStore::new());
    add_entry(&store, 2024, 3, 1).await;
    add_entry(&store, 2024, 3, 2).await;
    add_entry(&store, 2024, 3, 3).await;

    let service = StreakService::new(Arc::clone(&store), clock_at(2024, 3, 4));
    let info = service.current().await.unwrap();
    assert_eq!(info.count, 3);
    assert_eq!(info.status, StreakStatus::Pending);
}

/// A two-week-old last entry is cold, counting days of staleness.
#[tokio::test]
async fn stale_ledger_is_cold_with_elapsed_days() {
    let store = Arc::new(MemoryStore::new());
    add_entry(&store, 2024, 2, 20).await;

    let service = StreakService::new(Arc::clone(&store), clock_at(2024, 3, 4));
    let info = service.current().await.unwrap();
    assert_eq!(info.status, StreakStatus::Cold);
    assert_eq!(info.count, 13);
}

#[tokio::test]
async fn empty_ledger_is_cold_zero() {
    let store = Arc::new(MemoryStore::new());
    let service = StreakService::new(Arc::clone(&store), clock_at(2024, 3, 4));
    let info = service.current().await.unwrap();
    assert_eq!(info.count, 0);
    assert_eq!(info.status, StreakStatus::Cold);
}

#[tokio::test]
async fn several_entries_one_day_count_once() {
    let store = Arc::new(MemoryStore::new());
    add_entry(&store, 2024, 3, 3).await;
    add_entry(&store, 2024, 3, 3).await;
    add_entry(&store, 2024, 3, 3).await;

    let service = StreakService::new(Arc::clone(&store), clock_at(2024, 3, 3));
    let info = service.current().await.unwrap();
    assert_eq!(info.count, 1);
    assert_eq!(info.status, StreakStatus::Hot);
}

#[tokio::test]
async fn repaired_day_bridges_a_gap() {
    let store = Arc::new(MemoryStore::new());
    add_entry(&store, 2024, 3, 1).await;
    add_entry(&store, 2024, 3, 3).await;

    let service = StreakService::new(Arc::clone(&store), clock_at(2024, 3, 3));
    assert_eq!(service.current().await.unwrap().count, 1);

    let ledger = service.repair_day(date(2024, 3, 2)).await.unwrap();
    assert_eq!(ledger.freezes_remaining, DEFAULT_FREEZES - 1);

    let info = service.current().await.unwrap();
    assert_eq!(info.count, 3);
    assert_eq!(info.status, StreakStatus::Hot);
}

#[tokio::test]
async fn repair_fails_once_freezes_run_out() {
    let store = Arc::new(MemoryStore::new());
    let service = StreakService::new(Arc::clone(&store), clock_at(2024, 3, 10));

    for day in 1..=DEFAULT_FREEZES {
        service.repair_day(date(2024, 3, day)).await.unwrap();
    }

    let err = service.repair_day(date(2024, 3, 9)).await.unwrap_err();
    assert!(matches!(err, EngineError::Streak(_)));

    // The failed repair persisted nothing.
    let ledger = store.load_streak_ledger().await.unwrap();
    assert_eq!(ledger.freezes_remaining, 0);
    assert_eq!(ledger.repaired_days.len(), DEFAULT_FREEZES as usize);
}
