//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern: the ledger is abstracted
//! behind traits and this crate provides a test-friendly implementation that
//! keeps state in memory, can be told to fail, and never touches the
//! filesystem.

pub mod store;

pub use store::{NullLedger, NullTxn};
