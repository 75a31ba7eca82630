//! The balance effect rule.
//!
//! The effect of an entry on its account is a pure function of
//! `(account.kind, entry.kind)`:
//!
//! | account   | income | expense |
//! |-----------|--------|---------|
//! | asset     | `+a`   | `-a`    |
//! | liability | `-a`   | `+a`    |
//!
//! Income against an asset increases cash held; against a liability it is a
//! payment that reduces debt. An expense draws an asset down; against a
//! liability it accrues more debt.

use rust_decimal::Decimal;

use super::types::{AccountKind, EntryKind};

/// Signed balance change the entry applies to its account.
#[must_use]
pub fn balance_effect(account: AccountKind, entry: EntryKind, amount: Decimal) -> Decimal {
    match (account, entry) {
        (AccountKind::Asset, EntryKind::Income) | (AccountKind::Liability, EntryKind::Expense) => {
            amount
        }
        (AccountKind::Asset, EntryKind::Expense) | (AccountKind::Liability, EntryKind::Income) => {
            -amount
        }
    }
}

/// The exact negation of the creation effect, applied when an entry is
/// removed or its old state reverted.
#[must_use]
pub fn reversal_effect(account: AccountKind, entry: EntryKind, amount: Decimal) -> Decimal {
    -balance_effect(account, entry, amount)
}
