//! Balance adjustment planning.
//!
//! These planners translate ledger mutations into per-account balance deltas.
//! They are pure: account kinds are resolved through an injected lookup, so
//! the caller decides where the accounts come from (a prefetched map in the
//! engine, a literal in tests). A lookup returning `None` models a deleted or
//! missing account; its adjustment is skipped, never an error.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use arta_shared::types::AccountId;

use super::effect::{balance_effect, reversal_effect};
use super::types::{AccountKind, EntryDraft, EntryKind, LedgerEntry};

/// The reconciliation-relevant fields of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySnapshot {
    /// Positive magnitude.
    pub amount: Decimal,
    /// Income or expense.
    pub kind: EntryKind,
    /// The associated account, if any.
    pub account_id: Option<AccountId>,
}

impl From<&LedgerEntry> for EntrySnapshot {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            amount: entry.amount,
            kind: entry.kind,
            account_id: entry.account_id.clone(),
        }
    }
}

impl From<&EntryDraft> for EntrySnapshot {
    fn from(draft: &EntryDraft) -> Self {
        Self {
            amount: draft.amount,
            kind: draft.kind,
            account_id: draft.account_id.clone(),
        }
    }
}

/// A single balance adjustment against one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    /// The account to adjust.
    pub account_id: AccountId,
    /// Signed delta to add to the account's running balance.
    pub delta: Decimal,
}

/// Plans the adjustment for a newly created entry.
///
/// Returns `None` when the entry references no account or the account cannot
/// be resolved (orphaned reference, tolerated).
pub fn creation_plan<F>(entry: &EntrySnapshot, kind_of: F) -> Option<Adjustment>
where
    F: Fn(&AccountId) -> Option<AccountKind>,
{
    let account_id = entry.account_id.clone()?;
    let kind = kind_of(&account_id)?;
    Some(Adjustment {
        account_id,
        delta: balance_effect(kind, entry.kind, entry.amount),
    })
}

/// Plans the adjustment for a deleted entry: the exact negation of its
/// creation effect, with the account kind looked up at delete time.
pub fn deletion_plan<F>(entry: &EntrySnapshot, kind_of: F) -> Option<Adjustment>
where
    F: Fn(&AccountId) -> Option<AccountKind>,
{
    let account_id = entry.account_id.clone()?;
    let kind = kind_of(&account_id)?;
    Some(Adjustment {
        account_id,
        delta: reversal_effect(kind, entry.kind, entry.amount),
    })
}

/// Plans the adjustments for an edit (full replace).
///
/// Reverts the old snapshot and applies the new one, netted per account:
/// - same account, changed amount or kind -> one netted update;
/// - account moved (A->B, A->none, none->B) -> up to two independent updates;
/// - nothing reconciliation-relevant changed -> empty plan.
pub fn amend_plan<F>(old: &EntrySnapshot, new: &EntrySnapshot, kind_of: F) -> Vec<Adjustment>
where
    F: Fn(&AccountId) -> Option<AccountKind>,
{
    let mut deltas: BTreeMap<AccountId, Decimal> = BTreeMap::new();

    if let Some(reverted) = deletion_plan(old, &kind_of) {
        *deltas.entry(reverted.account_id).or_default() += reverted.delta;
    }
    if let Some(applied) = creation_plan(new, &kind_of) {
        *deltas.entry(applied.account_id).or_default() += applied.delta;
    }

    deltas
        .into_iter()
        .filter(|(_, delta)| !delta.is_zero())
        .map(|(account_id, delta)| Adjustment { account_id, delta })
        .collect()
}

/// Plans the net reversal for a batch of deleted entries, grouped by account.
///
/// Summing the reversal effects before writing avoids lost updates when two
/// deleted entries share an account: each affected account receives exactly
/// one delta regardless of batch size or ordering.
pub fn batch_reversal_plan<'a, I, F>(entries: I, kind_of: F) -> Vec<Adjustment>
where
    I: IntoIterator<Item = &'a EntrySnapshot>,
    F: Fn(&AccountId) -> Option<AccountKind>,
{
    let mut deltas: BTreeMap<AccountId, Decimal> = BTreeMap::new();

    for entry in entries {
        if let Some(reverted) = deletion_plan(entry, &kind_of) {
            *deltas.entry(reverted.account_id).or_default() += reverted.delta;
        }
    }

    deltas
        .into_iter()
        .filter(|(_, delta)| !delta.is_zero())
        .map(|(account_id, delta)| Adjustment { account_id, delta })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn asset_lookup(id: &AccountId) -> Option<AccountKind> {
        (id.as_str() != "missing").then_some(AccountKind::Asset)
    }

    fn snapshot(amount: Decimal, kind: EntryKind, account: Option<&str>) -> EntrySnapshot {
        EntrySnapshot {
            amount,
            kind,
            account_id: account.map(AccountId::from),
        }
    }

    #[test]
    fn test_creation_plan_expense_against_asset() {
        let entry = snapshot(dec!(200), EntryKind::Expense, Some("A1"));
        let plan = creation_plan(&entry, asset_lookup).unwrap();
        assert_eq!(plan.account_id.as_str(), "A1");
        assert_eq!(plan.delta, dec!(-200));
    }

    #[test]
    fn test_creation_plan_without_account_is_empty() {
        let entry = snapshot(dec!(200), EntryKind::Expense, None);
        assert!(creation_plan(&entry, asset_lookup).is_none());
    }

    #[test]
    fn test_creation_plan_orphaned_reference_is_skipped() {
        let entry = snapshot(dec!(200), EntryKind::Expense, Some("missing"));
        assert!(creation_plan(&entry, asset_lookup).is_none());
    }

    #[test]
    fn test_deletion_negates_creation() {
        let entry = snapshot(dec!(75), EntryKind::Income, Some("A1"));
        let created = creation_plan(&entry, asset_lookup).unwrap();
        let deleted = deletion_plan(&entry, asset_lookup).unwrap();
        assert_eq!(created.delta, -deleted.delta);
    }

    #[test]
    fn test_amend_same_account_amount_change_nets_single_update() {
        let old = snapshot(dec!(200), EntryKind::Expense, Some("A1"));
        let new = snapshot(dec!(50), EntryKind::Expense, Some("A1"));
        let plan = amend_plan(&old, &new, asset_lookup);
        // Revert -(-200), apply -50 => net +150 on the one account.
        assert_eq!(
            plan,
            vec![Adjustment {
                account_id: "A1".into(),
                delta: dec!(150),
            }]
        );
    }

    #[test]
    fn test_amend_unchanged_entry_is_noop() {
        let old = snapshot(dec!(200), EntryKind::Expense, Some("A1"));
        let plan = amend_plan(&old, &old.clone(), asset_lookup);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_amend_kind_flip_recombines_effects() {
        let old = snapshot(dec!(100), EntryKind::Expense, Some("A1"));
        let new = snapshot(dec!(100), EntryKind::Income, Some("A1"));
        let plan = amend_plan(&old, &new, asset_lookup);
        // Revert +100, apply +100 => +200 on an asset.
        assert_eq!(plan[0].delta, dec!(200));
    }

    #[test]
    fn test_amend_account_move_is_two_independent_updates() {
        let old = snapshot(dec!(100), EntryKind::Expense, Some("A"));
        let new = snapshot(dec!(100), EntryKind::Expense, Some("B"));
        let mut plan = amend_plan(&old, &new, asset_lookup);
        plan.sort_by(|a, b| a.account_id.cmp(&b.account_id));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].account_id.as_str(), "A");
        assert_eq!(plan[0].delta, dec!(100));
        assert_eq!(plan[1].account_id.as_str(), "B");
        assert_eq!(plan[1].delta, dec!(-100));
    }

    #[test]
    fn test_amend_detach_reverts_only() {
        let old = snapshot(dec!(100), EntryKind::Expense, Some("A"));
        let new = snapshot(dec!(100), EntryKind::Expense, None);
        let plan = amend_plan(&old, &new, asset_lookup);
        assert_eq!(
            plan,
            vec![Adjustment {
                account_id: "A".into(),
                delta: dec!(100),
            }]
        );
    }

    #[test]
    fn test_batch_reversal_nets_shared_account() {
        let entries = vec![
            snapshot(dec!(10), EntryKind::Expense, Some("A1")),
            snapshot(dec!(15), EntryKind::Expense, Some("A1")),
            snapshot(dec!(5), EntryKind::Income, Some("B2")),
            snapshot(dec!(99), EntryKind::Expense, None),
        ];
        let mut plan = batch_reversal_plan(&entries, asset_lookup);
        plan.sort_by(|a, b| a.account_id.cmp(&b.account_id));
        // Two expenses of 10 and 15 against the asset revert to +25 in one write.
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].account_id.as_str(), "A1");
        assert_eq!(plan[0].delta, dec!(25));
        assert_eq!(plan[1].account_id.as_str(), "B2");
        assert_eq!(plan[1].delta, dec!(-5));
    }

    fn snapshot_strategy() -> impl Strategy<Value = EntrySnapshot> {
        (
            1i64..1_000_000i64,
            prop_oneof![Just(EntryKind::Income), Just(EntryKind::Expense)],
            prop_oneof![Just(None), Just(Some("A1")), Just(Some("B2")), Just(Some("C3"))],
        )
            .prop_map(|(n, kind, account)| EntrySnapshot {
                amount: Decimal::new(n, 2),
                kind,
                account_id: account.map(AccountId::from),
            })
    }

    proptest! {
        /// The batch plan equals the per-account sum of individual deletion
        /// plans, independent of batch ordering.
        #[test]
        fn prop_batch_reversal_equals_summed_singles(
            mut entries in prop::collection::vec(snapshot_strategy(), 1..20),
        ) {
            let batch = batch_reversal_plan(&entries, asset_lookup);

            let mut expected: BTreeMap<AccountId, Decimal> = BTreeMap::new();
            for entry in &entries {
                if let Some(adj) = deletion_plan(entry, asset_lookup) {
                    *expected.entry(adj.account_id).or_default() += adj.delta;
                }
            }
            expected.retain(|_, delta| !delta.is_zero());

            let got: BTreeMap<AccountId, Decimal> = batch
                .iter()
                .map(|adj| (adj.account_id.clone(), adj.delta))
                .collect();
            prop_assert_eq!(&got, &expected);

            // Ordering does not matter.
            entries.reverse();
            let reversed: BTreeMap<AccountId, Decimal> = batch_reversal_plan(&entries, asset_lookup)
                .into_iter()
                .map(|adj| (adj.account_id, adj.delta))
                .collect();
            prop_assert_eq!(&reversed, &expected);
        }

        /// An amend plan is equivalent to delete-then-create.
        #[test]
        fn prop_amend_equals_delete_then_create(
            old in snapshot_strategy(),
            new in snapshot_strategy(),
        ) {
            let amended = amend_plan(&old, &new, asset_lookup);

            let mut expected: BTreeMap<AccountId, Decimal> = BTreeMap::new();
            if let Some(adj) = deletion_plan(&old, asset_lookup) {
                *expected.entry(adj.account_id).or_default() += adj.delta;
            }
            if let Some(adj) = creation_plan(&new, asset_lookup) {
                *expected.entry(adj.account_id).or_default() += adj.delta;
            }
            expected.retain(|_, delta| !delta.is_zero());

            let got: BTreeMap<AccountId, Decimal> = amended
                .into_iter()
                .map(|adj| (adj.account_id, adj.delta))
                .collect();
            prop_assert_eq!(got, expected);
        }
    }
}
