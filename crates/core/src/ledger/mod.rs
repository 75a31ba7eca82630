//! Ledger domain: entries, accounts, and balance reconciliation rules.
//!
//! An entry records one financial movement (income or expense) and may
//! reference at most one asset/liability account. The reconciliation rules in
//! this module are pure: they plan balance adjustments, and the engine crate
//! executes the plans against the store.

pub mod effect;
pub mod reconcile;
pub mod suggest;
pub mod types;
pub mod validation;

pub use effect::balance_effect;
pub use reconcile::{Adjustment, EntrySnapshot};
pub use types::{
    Account, AccountDraft, AccountKind, EntryDraft, EntryKind, LedgerEntry, PaymentMethod,
    TransferDraft, net_worth,
};
pub use validation::{EntryValidationError, validate_draft};
