//! Orchestration layer for Arta.
//!
//! Glues the pure rules in `arta-core` to the store traits in `arta-store`:
//!
//! - [`Reconciler`] applies every ledger mutation's balance adjustments
//! - [`PostingScheduler`] generates recurring postings at most once per period
//! - [`StreakService`] computes streaks and spends streak freezes
//!
//! Every operation here writes the ledger first and adjusts balances second;
//! the two are NOT atomic. A failure between them surfaces as
//! [`EngineError::PartialReconciliation`] so the caller can retry or refresh.

pub mod error;
pub mod reconcile;
pub mod scheduler;
pub mod streak;

pub use error::EngineError;
pub use reconcile::Reconciler;
pub use scheduler::{PostingScheduler, ScheduleError};
pub use streak::StreakService;
