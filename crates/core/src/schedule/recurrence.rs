//! Subscription recurrence rules.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// How often a subscription charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every 7 days.
    Weekly,
    /// Every calendar month (end-of-month dates clamp).
    Monthly,
    /// Every calendar year.
    Yearly,
}

/// Whether a subscription payment is due.
///
/// Due when the payment date is in the past, or when it falls on today's
/// calendar date even if the stored time-of-day has not been reached yet.
#[must_use]
pub fn is_due(next_payment: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    next_payment <= now || next_payment.date_naive() == now.date_naive()
}

/// The payment date one period after the given one.
///
/// Always advances from the stored date, never from the processing time, so
/// a payment due on the 5th and processed on the 10th stays anchored to the
/// 5th. A long-overdue date advances by exactly one period; missed periods
/// are not back-filled.
#[must_use]
pub fn next_occurrence(after: DateTime<Utc>, frequency: Frequency) -> DateTime<Utc> {
    match frequency {
        Frequency::Weekly => after + Duration::days(7),
        // checked_add_months clamps Jan 31 -> Feb 28/29; the None arm is
        // unreachable for representable dates.
        Frequency::Monthly => after.checked_add_months(Months::new(1)).unwrap_or(after),
        Frequency::Yearly => after.checked_add_months(Months::new(12)).unwrap_or(after),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_due_when_in_past() {
        assert!(is_due(at(2024, 1, 5, 9), at(2024, 1, 10, 9)));
    }

    #[test]
    fn test_due_on_same_calendar_day_before_stored_time() {
        // Stored 18:00, checked 09:00 the same day: still due today.
        assert!(is_due(at(2024, 1, 5, 18), at(2024, 1, 5, 9)));
    }

    #[test]
    fn test_not_due_in_future() {
        assert!(!is_due(at(2024, 1, 6, 0), at(2024, 1, 5, 23)));
    }

    #[rstest]
    #[case(Frequency::Weekly, at(2024, 1, 5, 12), at(2024, 1, 12, 12))]
    #[case(Frequency::Monthly, at(2024, 1, 5, 12), at(2024, 2, 5, 12))]
    #[case(Frequency::Yearly, at(2024, 1, 5, 12), at(2025, 1, 5, 12))]
    fn test_next_occurrence(
        #[case] frequency: Frequency,
        #[case] from: DateTime<Utc>,
        #[case] expected: DateTime<Utc>,
    ) {
        assert_eq!(next_occurrence(from, frequency), expected);
    }

    #[test]
    fn test_monthly_clamps_end_of_month() {
        assert_eq!(
            next_occurrence(at(2024, 1, 31, 12), Frequency::Monthly),
            at(2024, 2, 29, 12)
        );
    }

    #[test]
    fn test_yearly_clamps_leap_day() {
        assert_eq!(
            next_occurrence(at(2024, 2, 29, 12), Frequency::Yearly),
            at(2025, 2, 28, 12)
        );
    }

    #[test]
    fn test_advance_is_anchored_to_stored_date() {
        // Due 2024-01-05, processed on 2024-01-10: next is 2024-02-05.
        let stored = at(2024, 1, 5, 12);
        assert_eq!(
            next_occurrence(stored, Frequency::Monthly),
            at(2024, 2, 5, 12)
        );
    }
}
