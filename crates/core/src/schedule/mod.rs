//! Recurring posting rules.
//!
//! Two recurrence shapes exist: the monthly budget cycle (income plus fixed
//! expenses, keyed by a `"YYYY-MM"` period) and per-subscription due dates
//! (weekly/monthly/yearly). Both guarantee at-most-once posting per period by
//! advancing their cursor only after posting.

pub mod budget;
pub mod period;
pub mod recurrence;
pub mod subscription;

pub use budget::{BudgetConfig, FixedExpense};
pub use period::PeriodKey;
pub use recurrence::{Frequency, is_due, next_occurrence};
pub use subscription::{Subscription, SubscriptionDraft};
