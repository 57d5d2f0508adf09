//! Virtual-memory paging simulator library.
//!
//! This crate replays a recorded memory-access trace against a fixed set of processes that
//! share a bounded pool of physical frames, and counts the page swaps a replacement policy
//! incurs. It provides:
//! 1. **Page tables:** Per-process frame residency, access stamps, and the residency queue.
//! 2. **Policies:** FIFO, LRU, and Clock (second-chance) victim selection.
//! 3. **Swapping:** Demand paging and pre-paging strategies built on the policies.
//! 4. **Simulation:** The shared logical clock, event dispatch, and capacity enforcement.
//! 5. **Loading and statistics:** Process-list/trace parsing and run reporting.

/// Common types and constants (errors, memory defaults).
pub mod common;
/// Simulator configuration (page size, algorithm, swap mode, memory size).
pub mod config;
/// Paging core (page tables, replacement policies, swap strategies).
pub mod core;
/// Input loading and the simulation engine.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Error type shared by every fallible operation in the crate.
pub use crate::common::error::{Result, SimError};
/// Root configuration type; use `Config::new` or deserialize from JSON.
pub use crate::config::Config;
/// Top-level simulation engine; construct with `Simulator::new`.
pub use crate::sim::Simulator;
