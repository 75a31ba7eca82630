//! Shared types and configuration for Arta.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs wrapping the opaque string identifiers the remote store assigns
//! - Configuration management for the remote ledger API

pub mod config;
pub mod types;

pub use config::AppConfig;
