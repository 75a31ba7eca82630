//! Ledger domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use arta_shared::types::{AccountId, EntryId};

/// Direction of a ledger entry. The amount itself is always a positive
/// magnitude; the sign of its balance effect comes from this kind combined
/// with the referenced account's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

/// Kind of a balance-carrying account. Fixed at creation, never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Something owned (cash, savings, investments).
    Asset,
    /// Something owed (credit card, loan).
    Liability,
}

/// How an entry was paid. Display metadata only; no effect on reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit card.
    CreditCard,
    /// Debit card.
    DebitCard,
    /// Cash.
    Cash,
    /// Bank transfer.
    Transfer,
    /// Payroll deposit.
    Payroll,
}

/// One committed financial movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Identifier assigned by the store on creation.
    pub id: EntryId,
    /// Positive magnitude; direction is carried by `kind`.
    pub amount: Decimal,
    /// Income or expense.
    pub kind: EntryKind,
    /// When the movement occurred. User-editable, may be backdated.
    pub occurred_at: DateTime<Utc>,
    /// Human-readable description.
    pub description: String,
    /// Optional category label (e.g. "🍔 Food").
    pub category: Option<String>,
    /// The associated account, if any. `None` means no balance effect.
    pub account_id: Option<AccountId>,
    /// How the entry was paid, if recorded.
    pub payment_method: Option<PaymentMethod>,
}

/// An entry being created or fully replacing an existing one.
///
/// Edits are full replaces: amount, kind, date, and account reference can all
/// change in one edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Positive magnitude.
    pub amount: Decimal,
    /// Income or expense.
    pub kind: EntryKind,
    /// When the movement occurred.
    pub occurred_at: DateTime<Utc>,
    /// Human-readable description.
    pub description: String,
    /// Optional category label.
    pub category: Option<String>,
    /// The associated account, if any.
    pub account_id: Option<AccountId>,
    /// How the entry was paid.
    pub payment_method: Option<PaymentMethod>,
}

impl EntryDraft {
    /// Attaches a store-assigned ID, producing the committed entry.
    #[must_use]
    pub fn into_entry(self, id: EntryId) -> LedgerEntry {
        LedgerEntry {
            id,
            amount: self.amount,
            kind: self.kind,
            occurred_at: self.occurred_at,
            description: self.description,
            category: self.category,
            account_id: self.account_id,
            payment_method: self.payment_method,
        }
    }
}

/// An asset or liability account with a running balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Identifier assigned by the store.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Asset or liability. Immutable once created.
    pub kind: AccountKind,
    /// Running balance, maintained incrementally by the reconciliation engine.
    pub amount: Decimal,
    /// Optional category label.
    pub category: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// An account being created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDraft {
    /// Display name.
    pub name: String,
    /// Asset or liability.
    pub kind: AccountKind,
    /// Opening balance.
    pub amount: Decimal,
    /// Optional category label.
    pub category: Option<String>,
}

/// A transfer between two accounts, expressed as two linked entries: an
/// expense on the source and an income on the destination. Each entry still
/// references exactly one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferDraft {
    /// Positive magnitude moved.
    pub amount: Decimal,
    /// When the transfer occurred.
    pub occurred_at: DateTime<Utc>,
    /// Human-readable description, shared by both entries.
    pub description: String,
    /// Optional category label.
    pub category: Option<String>,
    /// The account money leaves.
    pub source_account: AccountId,
    /// The account money arrives at.
    pub destination_account: AccountId,
}

/// Net worth across all accounts: assets minus liabilities.
#[must_use]
pub fn net_worth(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .map(|account| match account.kind {
            AccountKind::Asset => account.amount,
            AccountKind::Liability => -account.amount,
        })
        .sum()
}
