//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the resident frame that was loaded earliest, regardless of how recently
//! it was accessed. Load order is kept in the table's residency queue: loads append to the tail
//! and victims are taken from the head.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_load()`: O(1) amortized
//!   - `on_hit()`: O(1)
//!   - `select_victim()`: O(1)
//! - **Best Case:** Streaming accesses where all frames have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used frames)

use super::ReplacementPolicy;
use crate::common::error::Result;
use crate::config::Algorithm;
use crate::core::page_table::PageTable;

/// FIFO policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    /// Appends the frame to the tail of the queue.
    fn on_load(&self, table: &mut PageTable, frame: usize, _cycle: u64) -> Result<()> {
        table.queue_mut().push(frame)
    }

    /// Arrival order is immutable: hits change nothing.
    fn on_hit(&self, _table: &mut PageTable, _frame: usize, _cycle: u64) {}

    /// Dequeues the head, the earliest-loaded resident frame.
    fn select_victim(&self, table: &mut PageTable) -> Option<usize> {
        table.queue_mut().pop().map(|entry| entry.frame)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Fifo
    }
}
