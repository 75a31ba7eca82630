//! Draft validation for ledger operations.
//!
//! Runs before any network call; a draft that fails here is never partially
//! applied.

use thiserror::Error;

use super::types::EntryDraft;

/// Validation errors for entry drafts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Entry amount is zero or negative.
    #[error("Entry amount must be positive")]
    NonPositiveAmount,

    /// Entry description is empty.
    #[error("Entry description must not be empty")]
    EmptyDescription,
}

/// Validates an entry draft before it is sent to the store.
///
/// # Errors
///
/// Returns an error if the amount is not positive or the description is
/// blank.
pub fn validate_draft(draft: &EntryDraft) -> Result<(), EntryValidationError> {
    if draft.amount.is_sign_negative() || draft.amount.is_zero() {
        return Err(EntryValidationError::NonPositiveAmount);
    }

    if draft.description.trim().is_empty() {
        return Err(EntryValidationError::EmptyDescription);
    }

    Ok(())
}
