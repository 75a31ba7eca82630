//! Payment-method suggestion.
//!
//! Looks at the ten most recent entries of the same kind and suggests the
//! payment method used most often among them. Entries without a recorded
//! method are ignored; if none of the ten carries one, there is no
//! suggestion.

use super::types::{EntryKind, LedgerEntry, PaymentMethod};

/// Number of recent entries considered for the suggestion.
const SAMPLE_SIZE: usize = 10;

/// Suggests a default payment method for a new entry of the given kind.
#[must_use]
pub fn suggest_payment_method(
    entries: &[LedgerEntry],
    kind: EntryKind,
) -> Option<PaymentMethod> {
    let mut recent: Vec<&LedgerEntry> = entries.iter().filter(|e| e.kind == kind).collect();
    recent.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

    // Count methods in first-seen order so ties resolve to the most recent.
    let mut counts: Vec<(PaymentMethod, usize)> = Vec::new();
    for entry in recent.iter().take(SAMPLE_SIZE) {
        let Some(method) = entry.payment_method else {
            continue;
        };
        match counts.iter_mut().find(|(m, _)| *m == method) {
            Some((_, count)) => *count += 1,
            None => counts.push((method, 1)),
        }
    }

    let mut best: Option<(PaymentMethod, usize)> = None;
    for (method, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((method, count));
        }
    }
    best.map(|(method, _)| method)
}
