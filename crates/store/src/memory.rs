//! In-memory store implementation.
//!
//! Backs the engine's integration tests and offline experimentation. Mints
//! opaque string IDs the way the remote store would, and mimics its
//! not-found/default semantics.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use arta_core::ledger::{Account, AccountDraft, EntryDraft, LedgerEntry};
use arta_core::schedule::{BudgetConfig, PeriodKey, Subscription, SubscriptionDraft};
use arta_core::streak::StreakLedger;
use arta_shared::types::{AccountId, EntryId, SubscriptionId};

use crate::error::StoreError;
use crate::traits::{AccountStore, BudgetStore, EntryStore, StreakStore, SubscriptionStore};

#[derive(Debug, Default)]
struct State {
    entries: BTreeMap<EntryId, LedgerEntry>,
    accounts: BTreeMap<AccountId, Account>,
    subscriptions: BTreeMap<SubscriptionId, Subscription>,
    budget: Option<BudgetConfig>,
    streak: Option<StreakLedger>,
}

/// An in-memory store holding every aggregate behind one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn create_entry(&self, draft: EntryDraft) -> Result<LedgerEntry, StoreError> {
        let mut state = self.state.write().await;
        let entry = draft.into_entry(EntryId::new(Self::mint_id()));
        state.entries.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    async fn get_entry(&self, id: &EntryId) -> Result<Option<LedgerEntry>, StoreError> {
        Ok(self.state.read().await.entries.get(id).cloned())
    }

    async fn list_entries(&self) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(self.state.read().await.entries.values().cloned().collect())
    }

    async fn update_entry(&self, id: &EntryId, draft: EntryDraft) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.entries.contains_key(id) {
            return Err(StoreError::NotFound(format!("entry {id}")));
        }
        let entry = draft.into_entry(id.clone());
        state.entries.insert(id.clone(), entry);
        Ok(())
    }

    async fn delete_entry(&self, id: &EntryId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state
            .entries
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("entry {id}")))
    }

    async fn delete_entries(&self, ids: &[EntryId]) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        for id in ids {
            state.entries.remove(id);
        }
        Ok(())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create_account(&self, draft: AccountDraft) -> Result<Account, StoreError> {
        let mut state = self.state.write().await;
        let account = Account {
            id: AccountId::new(Self::mint_id()),
            name: draft.name,
            kind: draft.kind,
            amount: draft.amount,
            category: draft.category,
            created_at: Utc::now(),
        };
        state.accounts.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.state.read().await.accounts.get(id).cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.state.read().await.accounts.values().cloned().collect())
    }

    async fn update_account_amount(
        &self,
        id: &AccountId,
        amount: Decimal,
    ) -> Result<Account, StoreError> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("account {id}")))?;
        account.amount = amount;
        Ok(account.clone())
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        // Entries referencing the account are left in place (no cascade).
        state
            .accounts
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("account {id}")))
    }
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn load_budget(&self) -> Result<BudgetConfig, StoreError> {
        Ok(self.state.read().await.budget.clone().unwrap_or_default())
    }

    async fn save_budget(&self, config: &BudgetConfig) -> Result<(), StoreError> {
        self.state.write().await.budget = Some(config.clone());
        Ok(())
    }

    async fn reset_budget(&self) -> Result<(), StoreError> {
        self.state.write().await.budget = None;
        Ok(())
    }

    async fn set_last_processed(&self, period: PeriodKey) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let mut config = state.budget.clone().unwrap_or_default();
        config.last_processed = Some(period);
        state.budget = Some(config);
        Ok(())
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn create_subscription(
        &self,
        draft: SubscriptionDraft,
    ) -> Result<Subscription, StoreError> {
        let mut state = self.state.write().await;
        let subscription = draft.into_subscription(SubscriptionId::new(Self::mint_id()));
        state
            .subscriptions
            .insert(subscription.id.clone(), subscription.clone());
        Ok(subscription)
    }

    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .subscriptions
            .values()
            .cloned()
            .collect())
    }

    async fn update_subscription(&self, subscription: &Subscription) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.subscriptions.contains_key(&subscription.id) {
            return Err(StoreError::NotFound(format!(
                "subscription {}",
                subscription.id
            )));
        }
        state
            .subscriptions
            .insert(subscription.id.clone(), subscription.clone());
        Ok(())
    }

    async fn delete_subscription(&self, id: &SubscriptionId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state
            .subscriptions
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("subscription {id}")))
    }

    async fn set_next_payment_date(
        &self,
        id: &SubscriptionId,
        date: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let subscription = state
            .subscriptions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("subscription {id}")))?;
        subscription.next_payment_date = date;
        Ok(())
    }
}

#[async_trait]
impl StreakStore for MemoryStore {
    async fn load_streak_ledger(&self) -> Result<StreakLedger, StoreError> {
        Ok(self.state.read().await.streak.clone().unwrap_or_default())
    }

    async fn save_streak_ledger(&self, ledger: &StreakLedger) -> Result<(), StoreError> {
        self.state.write().await.streak = Some(ledger.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arta_core::ledger::{AccountKind, EntryKind};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn draft(amount: Decimal, account: Option<&str>) -> EntryDraft {
        EntryDraft {
            amount,
            kind: EntryKind::Expense,
            occurred_at: Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap(),
            description: "test".to_string(),
            category: None,
            account_id: account.map(AccountId::from),
            payment_method: None,
        }
    }

    #[tokio::test]
    async fn test_entry_crud_roundtrip() {
        let store = MemoryStore::new();

        let entry = store.create_entry(draft(dec!(10), None)).await.unwrap();
        assert!(!entry.id.as_str().is_empty());

        let fetched = store.get_entry(&entry.id).await.unwrap().unwrap();
        assert_eq!(fetched.amount, dec!(10));

        store
            .update_entry(&entry.id, draft(dec!(25), None))
            .await
            .unwrap();
        let fetched = store.get_entry(&entry.id).await.unwrap().unwrap();
        assert_eq!(fetched.amount, dec!(25));

        store.delete_entry(&entry.id).await.unwrap();
        assert!(store.get_entry(&entry.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_entry_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_entry(&"ghost".into(), draft(dec!(1), None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_bulk_delete_ignores_missing_ids() {
        let store = MemoryStore::new();
        let entry = store.create_entry(draft(dec!(10), None)).await.unwrap();
        store
            .delete_entries(&[entry.id.clone(), "ghost".into()])
            .await
            .unwrap();
        assert!(store.list_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_account_delete_leaves_entries_orphaned() {
        let store = MemoryStore::new();
        let account = store
            .create_account(AccountDraft {
                name: "Checking".to_string(),
                kind: AccountKind::Asset,
                amount: dec!(1000),
                category: None,
            })
            .await
            .unwrap();

        let entry = store
            .create_entry(draft(dec!(10), Some(account.id.as_str())))
            .await
            .unwrap();

        store.delete_account(&account.id).await.unwrap();
        assert!(store.get_account(&account.id).await.unwrap().is_none());
        // The entry survives with its dangling reference.
        let orphan = store.get_entry(&entry.id).await.unwrap().unwrap();
        assert_eq!(orphan.account_id, Some(account.id));
    }

    #[tokio::test]
    async fn test_budget_defaults_then_persists() {
        let store = MemoryStore::new();
        let config = store.load_budget().await.unwrap();
        assert!(!config.is_setup);

        store
            .set_last_processed("2024-04".parse().unwrap())
            .await
            .unwrap();
        let config = store.load_budget().await.unwrap();
        assert_eq!(config.last_processed, Some("2024-04".parse().unwrap()));

        store.reset_budget().await.unwrap();
        assert!(store.load_budget().await.unwrap().last_processed.is_none());
    }

    #[tokio::test]
    async fn test_streak_ledger_defaults() {
        let store = MemoryStore::new();
        let ledger = store.load_streak_ledger().await.unwrap();
        assert_eq!(ledger.freezes_remaining, arta_core::streak::DEFAULT_FREEZES);
    }
}
