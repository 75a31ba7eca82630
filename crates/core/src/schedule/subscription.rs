//! Recurring subscriptions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use arta_shared::types::{AccountId, SubscriptionId};

use super::recurrence::Frequency;

/// A recurring charge (streaming service, rent, gym, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Identifier assigned by the store.
    pub id: SubscriptionId,
    /// Display name.
    pub name: String,
    /// Positive charge amount.
    pub amount: Decimal,
    /// Category label for posted entries.
    pub category: String,
    /// How often the subscription charges.
    pub frequency: Frequency,
    /// When the next payment is due. Advanced by exactly one period after
    /// each posting.
    pub next_payment_date: DateTime<Utc>,
    /// The account the charge draws from, if any.
    pub account_id: Option<AccountId>,
    /// Whether the user wants a reminder before the charge.
    pub reminder_enabled: bool,
    /// Optional free-form notes.
    pub description: Option<String>,
}

/// A subscription being created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionDraft {
    /// Display name.
    pub name: String,
    /// Positive charge amount.
    pub amount: Decimal,
    /// Category label for posted entries.
    pub category: String,
    /// How often the subscription charges.
    pub frequency: Frequency,
    /// When the first payment is due.
    pub next_payment_date: DateTime<Utc>,
    /// The account the charge draws from, if any.
    pub account_id: Option<AccountId>,
    /// Whether the user wants a reminder before the charge.
    pub reminder_enabled: bool,
    /// Optional free-form notes.
    pub description: Option<String>,
}

impl SubscriptionDraft {
    /// Attaches a store-assigned ID, producing the committed subscription.
    #[must_use]
    pub fn into_subscription(self, id: SubscriptionId) -> Subscription {
        Subscription {
            id,
            name: self.name,
            amount: self.amount,
            category: self.category,
            frequency: self.frequency,
            next_payment_date: self.next_payment_date,
            account_id: self.account_id,
            reminder_enabled: self.reminder_enabled,
            description: self.description,
        }
    }
}
