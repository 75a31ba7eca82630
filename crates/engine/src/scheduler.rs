//! Recurring posting scheduler.
//!
//! Decides, once per relevant period, whether to synthesize ledger entries
//! from a recurrence rule, and advances the cursor so the same period is
//! never posted twice. The clock is injected so idempotence is testable
//! without real time passing.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use arta_core::clock::Clock;
use arta_core::ledger::{EntryDraft, EntryKind, PaymentMethod};
use arta_core::schedule::{PeriodKey, is_due, next_occurrence};
use arta_shared::types::SubscriptionId;
use arta_store::StoreError;
use arta_store::traits::{AccountStore, BudgetStore, EntryStore, SubscriptionStore};

use crate::error::EngineError;
use crate::reconcile::Reconciler;

/// Errors from recurring posting runs.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A budget posting failed mid-cycle. The cursor was NOT advanced, so a
    /// retry re-runs the cycle; postings that already committed will be
    /// duplicated.
    #[error("Budget posting failed: {0}")]
    BudgetPosting(#[source] EngineError),

    /// A subscription posting or its cursor advance failed. Subscriptions
    /// processed before this one already persisted their new due dates and
    /// will not re-post on retry.
    #[error("Subscription {id} processing failed: {source}")]
    Subscription {
        /// The subscription that failed.
        id: SubscriptionId,
        /// What went wrong.
        #[source]
        source: EngineError,
    },

    /// Reading scheduler state failed before any posting happened.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Generates recurring ledger postings with an at-most-once-per-period
/// guarantee.
pub struct PostingScheduler<S, C> {
    store: Arc<S>,
    reconciler: Reconciler<S>,
    clock: C,
}

impl<S, C> PostingScheduler<S, C>
where
    S: EntryStore + AccountStore + BudgetStore + SubscriptionStore,
    C: Clock,
{
    /// Creates a scheduler over the given store and clock.
    pub fn new(store: Arc<S>, clock: C) -> Self {
        let reconciler = Reconciler::new(Arc::clone(&store));
        Self {
            store,
            reconciler,
            clock,
        }
    }

    /// Runs the monthly budget cycle for the current period.
    ///
    /// Posts the configured income entry and one expense per fixed expense,
    /// then advances the cursor. Returns the processed period, or `None`
    /// when the cycle was already processed (or the budget is not set up).
    ///
    /// The cursor advances only after every posting attempted; a crash
    /// mid-list means a retry can duplicate already-posted entries. That gap
    /// is documented behavior, not a guarantee to fix silently.
    pub async fn run_budget_cycle(&self) -> Result<Option<PeriodKey>, ScheduleError> {
        let config = self.store.load_budget().await?;
        if !config.is_setup {
            return Ok(None);
        }

        let current = PeriodKey::of(self.clock.today());
        if config.is_processed_for(current) {
            info!(period = %current, "budget cycle already processed");
            return Ok(None);
        }

        let drafts = config.cycle_postings(self.clock.now());
        let count = drafts.len();
        for draft in drafts {
            self.reconciler
                .record(draft)
                .await
                .map_err(ScheduleError::BudgetPosting)?;
        }

        self.store.set_last_processed(current).await?;
        info!(period = %current, postings = count, "budget cycle processed");
        Ok(Some(current))
    }

    /// Posts an expense for every due subscription and advances each due
    /// date by exactly one period.
    ///
    /// A subscription is due when its payment date is in the past or falls
    /// on today's calendar date. Each subscription's new due date persists
    /// immediately after its posting, so a crash after processing k of n
    /// does not re-post 1..k on retry. A long-overdue subscription posts
    /// once and skips forward one period; missed periods are not
    /// back-filled.
    pub async fn process_due_subscriptions(&self) -> Result<usize, ScheduleError> {
        let now = self.clock.now();
        let subscriptions = self.store.list_subscriptions().await?;

        let mut processed = 0;
        for subscription in subscriptions
            .into_iter()
            .filter(|s| is_due(s.next_payment_date, now))
        {
            let draft = EntryDraft {
                amount: subscription.amount,
                kind: EntryKind::Expense,
                occurred_at: now,
                description: format!("Subscription: {}", subscription.name),
                category: Some(subscription.category.clone()),
                account_id: subscription.account_id.clone(),
                payment_method: Some(PaymentMethod::DebitCard),
            };

            self.reconciler
                .record(draft)
                .await
                .map_err(|source| ScheduleError::Subscription {
                    id: subscription.id.clone(),
                    source,
                })?;

            let next = next_occurrence(subscription.next_payment_date, subscription.frequency);
            self.store
                .set_next_payment_date(&subscription.id, next)
                .await
                .map_err(|source| ScheduleError::Subscription {
                    id: subscription.id.clone(),
                    source: EngineError::Store(source),
                })?;

            info!(
                subscription = %subscription.id,
                next_payment = %next,
                "subscription posted and advanced"
            );
            processed += 1;
        }

        Ok(processed)
    }
}
