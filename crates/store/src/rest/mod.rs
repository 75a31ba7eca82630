//! REST implementation of the store traits.
//!
//! Talks to the remote wallet API (JSON over HTTP). The wire format is the
//! backend's: snake_case fields, decimal amounts as strings, RFC 3339
//! timestamps.

mod client;
mod wire;

pub use client::RestStore;
