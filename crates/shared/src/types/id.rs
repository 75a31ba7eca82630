//! Typed IDs for type-safe references between aggregates.
//!
//! The remote store assigns every record an opaque string identifier; these
//! newtypes prevent accidentally passing an `AccountId` where an `EntryId`
//! is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers over opaque store-assigned strings.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wraps an identifier assigned by the store.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

typed_id!(EntryId, "Unique identifier for a ledger entry.");
typed_id!(AccountId, "Unique identifier for an asset or liability account.");
typed_id!(
    SubscriptionId,
    "Unique identifier for a recurring subscription."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_id_roundtrip() {
        let id = EntryId::new("tx-001");
        assert_eq!(id.as_str(), "tx-001");
        assert_eq!(id.clone().into_inner(), "tx-001");
        assert_eq!(id.to_string(), "tx-001");
    }

    #[test]
    fn test_typed_id_from_str() {
        let id: AccountId = "acc-9".into();
        assert_eq!(id, AccountId::new(String::from("acc-9")));
    }

    #[test]
    fn test_typed_id_serde_transparent() {
        let id = SubscriptionId::new("sub-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"sub-1\"");
        let back: SubscriptionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_typed_ids_are_distinct_types() {
        // Compile-time property: EntryId and AccountId do not unify.
        fn takes_entry(_: &EntryId) {}
        takes_entry(&EntryId::new("e"));
    }
}
