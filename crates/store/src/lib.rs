//! Remote store access for Arta.
//!
//! The persistence layer is an external collaborator: a remote CRUD API
//! returning JSON, keyed by opaque string IDs. This crate provides:
//! - The store traits the engine is written against
//! - `RestStore`, the HTTP implementation of those traits
//! - `MemoryStore`, an in-memory implementation for tests and offline use

pub mod error;
pub mod memory;
pub mod rest;
pub mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use rest::RestStore;
pub use traits::{AccountStore, BudgetStore, EntryStore, StreakStore, SubscriptionStore};
