//! Consecutive-activity streaks.
//!
//! A day counts as active when at least one ledger entry occurred on it or
//! the user repaired it with a streak freeze. The calculation is a pure
//! function of the active-day set and "today".

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Streak state relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakStatus {
    /// Active today; the streak is extended.
    Hot,
    /// Active yesterday but not yet today; the streak is alive but at risk.
    Pending,
    /// Neither today nor yesterday; the streak is broken.
    Cold,
}

/// A computed streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    /// For `Hot`/`Pending`: length of the maximal run of consecutive active
    /// days ending at the last active day. For `Cold`: days elapsed since
    /// the last active day (a staleness indicator, not a streak).
    pub count: u32,
    /// Streak state.
    pub status: StreakStatus,
}

/// Errors from streak repair.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreakError {
    /// All streak freezes have been used.
    #[error("No streak freezes remaining")]
    NoFreezesLeft,
}

/// Number of streak freezes a new user starts with.
pub const DEFAULT_FREEZES: u32 = 3;

/// The user's repair state: remaining freezes and the days bought back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakLedger {
    /// Freezes left to spend.
    pub freezes_remaining: u32,
    /// Days repaired with a freeze; they count as active.
    pub repaired_days: BTreeSet<NaiveDate>,
}

impl Default for StreakLedger {
    fn default() -> Self {
        Self {
            freezes_remaining: DEFAULT_FREEZES,
            repaired_days: BTreeSet::new(),
        }
    }
}

impl StreakLedger {
    /// Spends one freeze to mark the given day as active.
    ///
    /// # Errors
    ///
    /// Returns `StreakError::NoFreezesLeft` when no freezes remain; the
    /// ledger is unchanged in that case.
    pub fn consume_freeze(&mut self, day: NaiveDate) -> Result<(), StreakError> {
        if self.freezes_remaining == 0 {
            return Err(StreakError::NoFreezesLeft);
        }
        self.freezes_remaining -= 1;
        self.repaired_days.insert(day);
        Ok(())
    }
}

/// Reduces entry dates and repaired days to the distinct active-day set.
pub fn activity_days(
    entry_days: impl IntoIterator<Item = NaiveDate>,
    repaired_days: &BTreeSet<NaiveDate>,
) -> BTreeSet<NaiveDate> {
    let mut days: BTreeSet<NaiveDate> = entry_days.into_iter().collect();
    days.extend(repaired_days.iter().copied());
    days
}

/// Computes the streak for the given active-day set.
///
/// Multiple entries on the same day contribute one active day; the set input
/// makes that structural.
#[must_use]
pub fn streak(active_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> StreakInfo {
    let Some(&last) = active_days.iter().next_back() else {
        return StreakInfo {
            count: 0,
            status: StreakStatus::Cold,
        };
    };

    let yesterday = today.pred_opt();

    if last == today {
        return StreakInfo {
            count: run_ending_at(active_days, today),
            status: StreakStatus::Hot,
        };
    }

    if yesterday == Some(last) {
        return StreakInfo {
            count: run_ending_at(active_days, last),
            status: StreakStatus::Pending,
        };
    }

    let elapsed = (today - last).num_days().unsigned_abs();
    StreakInfo {
        count: u32::try_from(elapsed).unwrap_or(u32::MAX),
        status: StreakStatus::Cold,
    }
}

/// Length of the run of consecutive active days ending at `end`.
fn run_ending_at(active_days: &BTreeSet<NaiveDate>, end: NaiveDate) -> u32 {
    let mut count = 1;
    let mut cursor = end;
    while let Some(prev) = cursor.pred_opt() {
        if !active_days.contains(&prev) {
            break;
        }
        count += 1;
        cursor = prev;
    }
    count
}
