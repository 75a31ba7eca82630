//! Engine error taxonomy.

use thiserror::Error;

use arta_core::ledger::EntryValidationError;
use arta_core::streak::StreakError;
use arta_shared::types::{AccountId, EntryId};
use arta_store::StoreError;

/// Errors surfaced by engine operations.
///
/// None of these are fatal; the caller owns the retry affordance.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The draft failed validation. Caught before any network call; nothing
    /// was applied.
    #[error("Validation error: {0}")]
    Validation(#[from] EntryValidationError),

    /// The referenced entry does not exist.
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    /// The ledger write itself failed. No balance mutation was attempted;
    /// nothing is left inconsistent.
    #[error("Ledger write failed: {0}")]
    RemoteWrite(#[source] StoreError),

    /// The ledger write succeeded but the subsequent balance update failed.
    ///
    /// The ledger and the account balance are now inconsistent. The entry is
    /// NOT rolled back; the next full data refresh reveals the drift.
    #[error("Ledger write committed but balance update for account {account_id} failed: {source}")]
    PartialReconciliation {
        /// The entry whose mutation committed, when the operation concerned
        /// a single entry (`None` for bulk deletes).
        entry_id: Option<EntryId>,
        /// The account left un-adjusted.
        account_id: AccountId,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },

    /// A streak-repair rule was violated.
    #[error(transparent)]
    Streak(#[from] StreakError),

    /// A read failed before any write happened; fully recoverable.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Returns the error code for client surfaces.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::RemoteWrite(_) => "REMOTE_WRITE_ERROR",
            Self::PartialReconciliation { .. } => "PARTIAL_RECONCILIATION",
            Self::Streak(_) => "STREAK_ERROR",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns true if retrying the operation cannot make state worse.
    ///
    /// A partial reconciliation is NOT safely retryable: the ledger write
    /// already committed, so repeating it would double-post.
    #[must_use]
    pub fn is_safely_retryable(&self) -> bool {
        match self {
            Self::RemoteWrite(source) | Self::Store(source) => source.is_retryable(),
            Self::Validation(_)
            | Self::EntryNotFound(_)
            | Self::PartialReconciliation { .. }
            | Self::Streak(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> StoreError {
        StoreError::Transport {
            endpoint: "wallet/vision/A1/".to_string(),
            message: "connection reset".to_string(),
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            EngineError::EntryNotFound("tx-1".into()).error_code(),
            "ENTRY_NOT_FOUND"
        );
        assert_eq!(
            EngineError::RemoteWrite(transport()).error_code(),
            "REMOTE_WRITE_ERROR"
        );
        assert_eq!(
            EngineError::PartialReconciliation {
                entry_id: Some("tx-1".into()),
                account_id: "A1".into(),
                source: transport(),
            }
            .error_code(),
            "PARTIAL_RECONCILIATION"
        );
    }

    #[test]
    fn test_partial_reconciliation_is_never_safely_retryable() {
        let err = EngineError::PartialReconciliation {
            entry_id: None,
            account_id: "A1".into(),
            source: transport(),
        };
        assert!(!err.is_safely_retryable());
    }

    #[test]
    fn test_remote_write_transport_failure_is_retryable() {
        assert!(EngineError::RemoteWrite(transport()).is_safely_retryable());
    }

    #[test]
    fn test_display_names_account() {
        let err = EngineError::PartialReconciliation {
            entry_id: Some("tx-1".into()),
            account_id: "A1".into(),
            source: transport(),
        };
        assert!(err.to_string().contains("account A1"));
    }
}
