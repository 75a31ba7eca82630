//! Streak service.
//!
//! Derives the consecutive-activity streak from the ledger and applies
//! streak-freeze repairs.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use arta_core::clock::Clock;
use arta_core::streak::{StreakInfo, StreakLedger, activity_days, streak};
use arta_store::traits::{EntryStore, StreakStore};

use crate::error::EngineError;

/// Computes streaks and spends streak freezes.
pub struct StreakService<S, C> {
    store: Arc<S>,
    clock: C,
}

impl<S, C> StreakService<S, C>
where
    S: EntryStore + StreakStore,
    C: Clock,
{
    /// Creates a streak service over the given store and clock.
    pub fn new(store: Arc<S>, clock: C) -> Self {
        Self { store, clock }
    }

    /// The current streak: distinct entry days plus repaired days, walked
    /// back from today.
    pub async fn current(&self) -> Result<StreakInfo, EngineError> {
        let entries = self.store.list_entries().await?;
        let ledger = self.store.load_streak_ledger().await?;

        let days = activity_days(
            entries.iter().map(|entry| entry.occurred_at.date_naive()),
            &ledger.repaired_days,
        );
        Ok(streak(&days, self.clock.today()))
    }

    /// Spends one streak freeze to mark the given day as active.
    ///
    /// The decrement and the repaired day persist together; running out of
    /// freezes fails before any store write.
    pub async fn repair_day(&self, day: NaiveDate) -> Result<StreakLedger, EngineError> {
        let mut ledger = self.store.load_streak_ledger().await?;
        ledger.consume_freeze(day)?;
        self.store.save_streak_ledger(&ledger).await?;
        info!(%day, freezes_remaining = ledger.freezes_remaining, "streak day repaired");
        Ok(ledger)
    }
}
