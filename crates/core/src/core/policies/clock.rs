//! Clock (Second-Chance) Replacement Policy.
//!
//! This policy is FIFO with one pass of forgiveness. Every queued frame carries a second-chance
//! bit, set on load and on every hit. The hand sits at the head of the residency queue: a frame
//! under the hand with its bit set has the bit cleared and moves to the tail, and the hand moves
//! on to the new head. The first frame found with a clear bit is evicted.
//!
//! The queue rotation is kept between misses, so the hand resumes where the previous search
//! stopped.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_load()`: O(1) amortized
//!   - `on_hit()`: O(R) where R is the number of resident frames
//!   - `select_victim()`: O(R), at most two passes over the queue

use super::ReplacementPolicy;
use crate::common::error::Result;
use crate::config::Algorithm;
use crate::core::page_table::PageTable;

/// Clock policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockPolicy;

impl ReplacementPolicy for ClockPolicy {
    /// Appends the frame to the tail with its second-chance bit set.
    fn on_load(&self, table: &mut PageTable, frame: usize, _cycle: u64) -> Result<()> {
        table.queue_mut().push(frame)
    }

    /// Sets the frame's second-chance bit without moving it.
    fn on_hit(&self, table: &mut PageTable, frame: usize, _cycle: u64) {
        let _found = table.queue_mut().mark_referenced(frame);
    }

    fn select_victim(&self, table: &mut PageTable) -> Option<usize> {
        let queue = table.queue_mut();
        // Terminates: each rotation clears a bit, so within one full pass a clear bit reaches
        // the head.
        while let Some(head) = queue.head() {
            if head.referenced {
                queue.rotate();
            } else {
                return queue.pop().map(|entry| entry.frame);
            }
        }
        None
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Clock
    }
}
