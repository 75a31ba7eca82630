//! Monthly budget cycle.
//!
//! A budget config holds the user's recurring monthly income and fixed
//! expenses plus the last period for which postings were generated. The
//! cursor check here is the idempotence guarantee; the engine advances the
//! cursor only after the posting loop finishes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::types::{EntryDraft, EntryKind};

use super::period::PeriodKey;

/// A recurring fixed expense within the monthly budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedExpense {
    /// Display name, used as the posted entry's description.
    pub name: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Category label for the posted entry.
    pub category: String,
}

/// The user's monthly budget configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Recurring monthly income.
    pub monthly_income: Decimal,
    /// Fixed expenses posted every month.
    pub fixed_expenses: Vec<FixedExpense>,
    /// Whether the user completed budget setup.
    pub is_setup: bool,
    /// Last period for which postings were generated.
    pub last_processed: Option<PeriodKey>,
}

impl BudgetConfig {
    /// Whether postings for the given period were already generated.
    #[must_use]
    pub fn is_processed_for(&self, period: PeriodKey) -> bool {
        self.last_processed == Some(period)
    }

    /// The entries one budget cycle posts: the income entry first, then one
    /// expense per fixed expense. Non-positive amounts are skipped rather
    /// than failing draft validation.
    #[must_use]
    pub fn cycle_postings(&self, occurred_at: DateTime<Utc>) -> Vec<EntryDraft> {
        let mut drafts = Vec::with_capacity(1 + self.fixed_expenses.len());

        if self.monthly_income > Decimal::ZERO {
            drafts.push(EntryDraft {
                amount: self.monthly_income,
                kind: EntryKind::Income,
                occurred_at,
                description: "Recurring monthly income".to_string(),
                category: Some("💰 Salary".to_string()),
                account_id: None,
                payment_method: None,
            });
        }

        for expense in &self.fixed_expenses {
            if expense.amount <= Decimal::ZERO {
                continue;
            }
            drafts.push(EntryDraft {
                amount: expense.amount,
                kind: EntryKind::Expense,
                occurred_at,
                description: expense.name.clone(),
                category: Some(expense.category.clone()),
                account_id: None,
                payment_method: None,
            });
        }

        drafts
    }
}
