//! Store traits the engine is written against.
//!
//! Each aggregate gets its own narrow trait; implementations decide where the
//! data lives (the remote API in production, memory in tests). Every call is
//! assumed to cross a network boundary that can fail transiently.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use arta_core::ledger::{Account, AccountDraft, EntryDraft, LedgerEntry};
use arta_core::schedule::{BudgetConfig, PeriodKey, Subscription, SubscriptionDraft};
use arta_core::streak::StreakLedger;
use arta_shared::types::{AccountId, EntryId, SubscriptionId};

use crate::error::StoreError;

/// CRUD over ledger entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Creates an entry; the store assigns the ID.
    async fn create_entry(&self, draft: EntryDraft) -> Result<LedgerEntry, StoreError>;

    /// Fetches one entry, or `None` when it does not exist.
    async fn get_entry(&self, id: &EntryId) -> Result<Option<LedgerEntry>, StoreError>;

    /// Lists all entries.
    async fn list_entries(&self) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Fully replaces an entry's user-editable fields.
    async fn update_entry(&self, id: &EntryId, draft: EntryDraft) -> Result<(), StoreError>;

    /// Deletes one entry.
    async fn delete_entry(&self, id: &EntryId) -> Result<(), StoreError>;

    /// Deletes a batch of entries in one call.
    async fn delete_entries(&self, ids: &[EntryId]) -> Result<(), StoreError>;
}

/// CRUD over asset/liability accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Creates an account; the store assigns the ID.
    async fn create_account(&self, draft: AccountDraft) -> Result<Account, StoreError>;

    /// Fetches one account, or `None` when it does not exist (deleted
    /// accounts referenced by old entries land here).
    async fn get_account(&self, id: &AccountId) -> Result<Option<Account>, StoreError>;

    /// Lists all accounts.
    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError>;

    /// Sets an account's running balance to the given value.
    async fn update_account_amount(
        &self,
        id: &AccountId,
        amount: Decimal,
    ) -> Result<Account, StoreError>;

    /// Deletes an account. Entries referencing it are NOT cascaded.
    async fn delete_account(&self, id: &AccountId) -> Result<(), StoreError>;
}

/// The user's budget configuration.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Loads the budget config; a never-configured user gets the default.
    async fn load_budget(&self) -> Result<BudgetConfig, StoreError>;

    /// Saves the budget config (income, fixed expenses, setup flag).
    async fn save_budget(&self, config: &BudgetConfig) -> Result<(), StoreError>;

    /// Deletes the budget config entirely.
    async fn reset_budget(&self) -> Result<(), StoreError>;

    /// Advances the posting cursor. Called only after a cycle's postings
    /// completed.
    async fn set_last_processed(&self, period: PeriodKey) -> Result<(), StoreError>;
}

/// CRUD over subscriptions.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Creates a subscription; the store assigns the ID.
    async fn create_subscription(
        &self,
        draft: SubscriptionDraft,
    ) -> Result<Subscription, StoreError>;

    /// Lists all subscriptions.
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, StoreError>;

    /// Fully replaces a subscription.
    async fn update_subscription(&self, subscription: &Subscription) -> Result<(), StoreError>;

    /// Deletes a subscription.
    async fn delete_subscription(&self, id: &SubscriptionId) -> Result<(), StoreError>;

    /// Persists a new due date for one subscription. Called immediately
    /// after each posting, never batched.
    async fn set_next_payment_date(
        &self,
        id: &SubscriptionId,
        date: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

/// The user's streak repair state.
#[async_trait]
pub trait StreakStore: Send + Sync {
    /// Loads the streak ledger; a new user gets the default freezes.
    async fn load_streak_ledger(&self) -> Result<StreakLedger, StoreError>;

    /// Persists the streak ledger (freezes and repaired days together).
    async fn save_streak_ledger(&self, ledger: &StreakLedger) -> Result<(), StoreError>;
}
