//! Core business logic for Arta.
//!
//! This crate contains pure business logic with ZERO network or store
//! dependencies. All domain types, balance rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Entries, accounts, and the balance reconciliation rules
//! - `schedule` - Recurring posting rules (budget cycle, subscriptions)
//! - `streak` - Consecutive-activity calculation and repair ledger
//! - `clock` - Injected time source so scheduling is deterministic in tests

pub mod clock;
pub mod ledger;
pub mod schedule;
pub mod streak;
