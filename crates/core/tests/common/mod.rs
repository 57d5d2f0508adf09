//! Shared helpers for the paging tests.

/// Simulator harness addressing frames directly instead of byte addresses.
pub mod harness;
