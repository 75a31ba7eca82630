//! The balance reconciliation engine.
//!
//! Translates every ledger mutation into the correct adjustment of the
//! affected account balances. The ledger write always happens first; balance
//! adjustments follow, each against the account state read at apply time.
//! The two steps are not atomic; see [`EngineError::PartialReconciliation`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use arta_core::ledger::reconcile::{
    Adjustment, EntrySnapshot, amend_plan, batch_reversal_plan, creation_plan, deletion_plan,
};
use arta_core::ledger::{Account, EntryDraft, EntryKind, LedgerEntry, PaymentMethod, TransferDraft};
use arta_core::ledger::validation::validate_draft;
use arta_shared::types::{AccountId, EntryId};
use arta_store::traits::{AccountStore, EntryStore};

use crate::error::EngineError;

/// Applies ledger mutations and keeps account balances consistent with them.
pub struct Reconciler<S> {
    store: Arc<S>,
}

impl<S> Clone for Reconciler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> Reconciler<S>
where
    S: EntryStore + AccountStore,
{
    /// Creates a reconciler over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Records a new entry and applies its balance effect.
    ///
    /// The entry write commits first; if the subsequent balance update fails
    /// the entry is kept and [`EngineError::PartialReconciliation`] is
    /// returned. An entry referencing a missing account commits with no
    /// balance effect (orphaned references are a tolerated degraded state).
    pub async fn record(&self, draft: EntryDraft) -> Result<LedgerEntry, EngineError> {
        validate_draft(&draft)?;

        let snapshot = EntrySnapshot::from(&draft);
        let entry = self
            .store
            .create_entry(draft)
            .await
            .map_err(EngineError::RemoteWrite)?;
        info!(entry = %entry.id, amount = %entry.amount, "ledger entry recorded");

        let accounts = self
            .resolve_accounts([&snapshot.account_id], Some(&entry.id))
            .await?;
        let plan = creation_plan(&snapshot, lookup(&accounts));
        self.apply(plan, Some(&entry.id), &accounts).await?;

        Ok(entry)
    }

    /// Records a transfer as two linked entries: an expense on the source
    /// account, then an income on the destination account. The legs are
    /// recorded sequentially; a failure between them leaves the first leg
    /// committed.
    pub async fn record_transfer(
        &self,
        transfer: TransferDraft,
    ) -> Result<(LedgerEntry, LedgerEntry), EngineError> {
        let outgoing = EntryDraft {
            amount: transfer.amount,
            kind: EntryKind::Expense,
            occurred_at: transfer.occurred_at,
            description: transfer.description.clone(),
            category: transfer.category.clone(),
            account_id: Some(transfer.source_account),
            payment_method: Some(PaymentMethod::Transfer),
        };
        let incoming = EntryDraft {
            amount: transfer.amount,
            kind: EntryKind::Income,
            occurred_at: transfer.occurred_at,
            description: transfer.description,
            category: transfer.category,
            account_id: Some(transfer.destination_account),
            payment_method: Some(PaymentMethod::Transfer),
        };

        let out_entry = self.record(outgoing).await?;
        let in_entry = self.record(incoming).await?;
        Ok((out_entry, in_entry))
    }

    /// Fully replaces an entry and reconciles the difference.
    ///
    /// Reverts the old snapshot and applies the new one, netted per account:
    /// an amount change on the same account is one update, a move between
    /// accounts is two independent updates (never a transfer).
    pub async fn amend(&self, id: &EntryId, draft: EntryDraft) -> Result<LedgerEntry, EngineError> {
        validate_draft(&draft)?;

        let old = self
            .store
            .get_entry(id)
            .await?
            .ok_or_else(|| EngineError::EntryNotFound(id.clone()))?;
        let old_snapshot = EntrySnapshot::from(&old);
        let new_snapshot = EntrySnapshot::from(&draft);

        self.store
            .update_entry(id, draft.clone())
            .await
            .map_err(EngineError::RemoteWrite)?;
        info!(entry = %id, "ledger entry replaced");

        let accounts = self
            .resolve_accounts(
                [&old_snapshot.account_id, &new_snapshot.account_id],
                Some(id),
            )
            .await?;
        let plan = amend_plan(&old_snapshot, &new_snapshot, lookup(&accounts));
        self.apply(plan, Some(id), &accounts).await?;

        Ok(draft.into_entry(id.clone()))
    }

    /// Deletes an entry and reverts its balance effect, with the account
    /// kind looked up at delete time.
    pub async fn remove(&self, id: &EntryId) -> Result<(), EngineError> {
        let entry = self
            .store
            .get_entry(id)
            .await?
            .ok_or_else(|| EngineError::EntryNotFound(id.clone()))?;
        let snapshot = EntrySnapshot::from(&entry);

        self.store
            .delete_entry(id)
            .await
            .map_err(EngineError::RemoteWrite)?;
        info!(entry = %id, "ledger entry deleted");

        let accounts = self
            .resolve_accounts([&snapshot.account_id], Some(id))
            .await?;
        let plan = deletion_plan(&snapshot, lookup(&accounts));
        self.apply(plan, Some(id), &accounts).await
    }

    /// Deletes a batch of entries and applies one net reversal per affected
    /// account.
    ///
    /// Netting before writing avoids lost updates when deleted entries share
    /// an account; adjustments to different accounts are issued concurrently.
    pub async fn remove_batch(&self, ids: &[EntryId]) -> Result<(), EngineError> {
        if ids.is_empty() {
            return Ok(());
        }

        let mut snapshots = Vec::with_capacity(ids.len());
        for id in ids {
            // Entries already gone from the store simply drop out of the plan.
            if let Some(entry) = self.store.get_entry(id).await? {
                snapshots.push(EntrySnapshot::from(&entry));
            }
        }

        self.store
            .delete_entries(ids)
            .await
            .map_err(EngineError::RemoteWrite)?;
        info!(count = ids.len(), "ledger entries bulk-deleted");

        let referenced: BTreeSet<&Option<AccountId>> =
            snapshots.iter().map(|s| &s.account_id).collect();
        let accounts = self.resolve_accounts(referenced, None).await?;
        let plan = batch_reversal_plan(&snapshots, lookup(&accounts));

        let results = join_all(plan.iter().map(|adjustment| {
            let accounts = &accounts;
            async move {
                self.write_adjustment(adjustment, accounts)
                    .await
                    .map_err(|source| (adjustment.account_id.clone(), source))
            }
        }))
        .await;

        for result in results {
            result.map_err(|(account_id, source)| EngineError::PartialReconciliation {
                entry_id: None,
                account_id,
                source,
            })?;
        }

        Ok(())
    }

    /// Fetches every referenced account once. Missing accounts are skipped
    /// with a warning; a read failure after the ledger write already
    /// committed is a partial reconciliation.
    async fn resolve_accounts<'a, I>(
        &self,
        references: I,
        entry_id: Option<&EntryId>,
    ) -> Result<BTreeMap<AccountId, Account>, EngineError>
    where
        I: IntoIterator<Item = &'a Option<AccountId>>,
    {
        let distinct: BTreeSet<&AccountId> =
            references.into_iter().filter_map(Option::as_ref).collect();

        let mut accounts = BTreeMap::new();
        for account_id in distinct {
            match self.store.get_account(account_id).await {
                Ok(Some(account)) => {
                    accounts.insert(account_id.clone(), account);
                }
                Ok(None) => {
                    warn!(
                        account = %account_id,
                        "entry references a missing account; skipping balance adjustment"
                    );
                }
                Err(source) => {
                    return Err(EngineError::PartialReconciliation {
                        entry_id: entry_id.cloned(),
                        account_id: account_id.clone(),
                        source,
                    });
                }
            }
        }
        Ok(accounts)
    }

    /// Applies planned adjustments sequentially against one entry's context.
    async fn apply(
        &self,
        plan: impl IntoIterator<Item = Adjustment>,
        entry_id: Option<&EntryId>,
        accounts: &BTreeMap<AccountId, Account>,
    ) -> Result<(), EngineError> {
        for adjustment in plan {
            self.write_adjustment(&adjustment, accounts)
                .await
                .map_err(|source| EngineError::PartialReconciliation {
                    entry_id: entry_id.cloned(),
                    account_id: adjustment.account_id.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    async fn write_adjustment(
        &self,
        adjustment: &Adjustment,
        accounts: &BTreeMap<AccountId, Account>,
    ) -> Result<(), arta_store::StoreError> {
        // Accounts not in the map were already skipped during planning.
        let Some(account) = accounts.get(&adjustment.account_id) else {
            return Ok(());
        };
        let new_amount = account.amount + adjustment.delta;
        self.store
            .update_account_amount(&adjustment.account_id, new_amount)
            .await?;
        info!(
            account = %adjustment.account_id,
            delta = %adjustment.delta,
            balance = %new_amount,
            "account balance reconciled"
        );
        Ok(())
    }
}

/// Adapts a prefetched account map to the planner's kind lookup.
fn lookup(
    accounts: &BTreeMap<AccountId, Account>,
) -> impl Fn(&AccountId) -> Option<arta_core::ledger::AccountKind> + '_ {
    |id| accounts.get(id).map(|account| account.kind)
}
