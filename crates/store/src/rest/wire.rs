//! Wire DTOs for the remote wallet API.
//!
//! Field names and shapes follow the backend's serializers: `type` for the
//! entry/account kind, `related_entity_id` for the account reference, decimal
//! amounts as strings.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use arta_core::ledger::{Account, AccountDraft, AccountKind, EntryDraft, EntryKind, LedgerEntry, PaymentMethod};
use arta_core::schedule::{BudgetConfig, FixedExpense, Frequency, PeriodKey, Subscription, SubscriptionDraft};
use arta_core::streak::StreakLedger;
use arta_shared::types::AccountId;

/// A ledger entry as the API returns it.
#[derive(Debug, Deserialize)]
pub struct EntryRecord {
    pub id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub date: DateTime<Utc>,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub related_entity_id: Option<String>,
    #[serde(default)]
    pub payment_type: Option<PaymentMethod>,
}

impl From<EntryRecord> for LedgerEntry {
    fn from(record: EntryRecord) -> Self {
        Self {
            id: record.id.into(),
            amount: record.amount,
            kind: record.kind,
            occurred_at: record.date,
            description: record.description,
            category: record.category,
            account_id: record.related_entity_id.map(AccountId::from),
            payment_method: record.payment_type,
        }
    }
}

/// A ledger entry as the API accepts it (create and full replace).
#[derive(Debug, Serialize)]
pub struct EntryPayload {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub date: DateTime<Utc>,
    pub description: String,
    pub category: Option<String>,
    pub related_entity_id: Option<String>,
    pub payment_type: Option<PaymentMethod>,
}

impl From<&EntryDraft> for EntryPayload {
    fn from(draft: &EntryDraft) -> Self {
        Self {
            amount: draft.amount,
            kind: draft.kind,
            date: draft.occurred_at,
            description: draft.description.clone(),
            category: draft.category.clone(),
            related_entity_id: draft.account_id.as_ref().map(|id| id.as_str().to_string()),
            payment_type: draft.payment_method,
        }
    }
}

/// Batch-delete request body.
#[derive(Debug, Serialize)]
pub struct BulkDeletePayload {
    pub ids: Vec<String>,
}

/// An asset/liability account as the API returns it.
#[derive(Debug, Deserialize)]
pub struct AccountRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Self {
            id: record.id.into(),
            name: record.name,
            kind: record.kind,
            amount: record.amount,
            category: record.category,
            created_at: record.created_at,
        }
    }
}

/// An account as the API accepts it on creation.
#[derive(Debug, Serialize)]
pub struct AccountPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub category: Option<String>,
}

impl From<&AccountDraft> for AccountPayload {
    fn from(draft: &AccountDraft) -> Self {
        Self {
            name: draft.name.clone(),
            kind: draft.kind,
            amount: draft.amount,
            category: draft.category.clone(),
        }
    }
}

/// Balance-only account patch.
#[derive(Debug, Serialize)]
pub struct AccountAmountPatch {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// A subscription as the API returns it.
#[derive(Debug, Deserialize)]
pub struct SubscriptionRecord {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub category: String,
    pub frequency: Frequency,
    pub next_payment_date: DateTime<Utc>,
    #[serde(default)]
    pub related_entity_id: Option<String>,
    #[serde(default)]
    pub reminder_enabled: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<SubscriptionRecord> for Subscription {
    fn from(record: SubscriptionRecord) -> Self {
        Self {
            id: record.id.into(),
            name: record.name,
            amount: record.amount,
            category: record.category,
            frequency: record.frequency,
            next_payment_date: record.next_payment_date,
            account_id: record.related_entity_id.map(AccountId::from),
            reminder_enabled: record.reminder_enabled,
            description: record.description,
        }
    }
}

/// A subscription as the API accepts it (create and full replace).
#[derive(Debug, Serialize)]
pub struct SubscriptionPayload {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub category: String,
    pub frequency: Frequency,
    pub next_payment_date: DateTime<Utc>,
    pub related_entity_id: Option<String>,
    pub reminder_enabled: bool,
    pub description: Option<String>,
}

impl From<&SubscriptionDraft> for SubscriptionPayload {
    fn from(draft: &SubscriptionDraft) -> Self {
        Self {
            name: draft.name.clone(),
            amount: draft.amount,
            category: draft.category.clone(),
            frequency: draft.frequency,
            next_payment_date: draft.next_payment_date,
            related_entity_id: draft.account_id.as_ref().map(|id| id.as_str().to_string()),
            reminder_enabled: draft.reminder_enabled,
            description: draft.description.clone(),
        }
    }
}

impl From<&Subscription> for SubscriptionPayload {
    fn from(subscription: &Subscription) -> Self {
        Self {
            name: subscription.name.clone(),
            amount: subscription.amount,
            category: subscription.category.clone(),
            frequency: subscription.frequency,
            next_payment_date: subscription.next_payment_date,
            related_entity_id: subscription
                .account_id
                .as_ref()
                .map(|id| id.as_str().to_string()),
            reminder_enabled: subscription.reminder_enabled,
            description: subscription.description.clone(),
        }
    }
}

/// Due-date-only subscription patch.
#[derive(Debug, Serialize)]
pub struct NextPaymentPatch {
    pub next_payment_date: DateTime<Utc>,
}

/// The budget config as the API stores it.
#[derive(Debug, Serialize, Deserialize)]
pub struct BudgetRecord {
    #[serde(with = "rust_decimal::serde::str")]
    pub monthly_income: Decimal,
    pub fixed_expenses: Vec<FixedExpenseRecord>,
    #[serde(default)]
    pub is_setup: bool,
    #[serde(default)]
    pub last_processed: Option<PeriodKey>,
}

/// One fixed expense line within the budget config.
#[derive(Debug, Serialize, Deserialize)]
pub struct FixedExpenseRecord {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub category: String,
}

impl From<BudgetRecord> for BudgetConfig {
    fn from(record: BudgetRecord) -> Self {
        Self {
            monthly_income: record.monthly_income,
            fixed_expenses: record
                .fixed_expenses
                .into_iter()
                .map(|line| FixedExpense {
                    name: line.name,
                    amount: line.amount,
                    category: line.category,
                })
                .collect(),
            is_setup: record.is_setup,
            last_processed: record.last_processed,
        }
    }
}

impl From<&BudgetConfig> for BudgetRecord {
    fn from(config: &BudgetConfig) -> Self {
        Self {
            monthly_income: config.monthly_income,
            fixed_expenses: config
                .fixed_expenses
                .iter()
                .map(|line| FixedExpenseRecord {
                    name: line.name.clone(),
                    amount: line.amount,
                    category: line.category.clone(),
                })
                .collect(),
            is_setup: config.is_setup,
            last_processed: config.last_processed,
        }
    }
}

/// Cursor-only budget patch.
#[derive(Debug, Serialize)]
pub struct LastProcessedPatch {
    pub last_processed: PeriodKey,
}

/// The streak ledger as the API stores it.
#[derive(Debug, Serialize, Deserialize)]
pub struct StreakRecord {
    pub streak_freezes: u32,
    pub repaired_days: Vec<NaiveDate>,
}

impl From<StreakRecord> for StreakLedger {
    fn from(record: StreakRecord) -> Self {
        Self {
            freezes_remaining: record.streak_freezes,
            repaired_days: record.repaired_days.into_iter().collect(),
        }
    }
}

impl From<&StreakLedger> for StreakRecord {
    fn from(ledger: &StreakLedger) -> Self {
        Self {
            streak_freezes: ledger.freezes_remaining,
            repaired_days: ledger.repaired_days.iter().copied().collect(),
        }
    }
}
