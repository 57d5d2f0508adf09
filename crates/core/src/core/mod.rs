//! Paging core.
//!
//! This module contains the per-process page table, the interchangeable replacement policies,
//! and the swap strategies that combine them on a page miss.

/// Per-process page table and residency queue.
pub mod page_table;

/// Replacement policy implementations (FIFO, LRU, Clock).
pub mod policies;

/// Swap strategy implementations (demand, pre-paging).
pub mod swap;

pub use self::page_table::{Frame, PageTable, QueueEntry, ResidencyQueue};
pub use self::policies::ReplacementPolicy;
pub use self::swap::{SwapOutcome, SwapStrategy};
