//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the resident frame whose last access is oldest. Recency comes from the
//! shared simulation clock: each load and each hit stamps the frame with the current cycle, and
//! victim selection scans the table for the smallest stamp.
//!
//! Frames loaded during warm start carry cycle 0 until first hit, so they are evicted before
//! any frame that has been touched since. Equal stamps resolve to the lowest frame index.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_load()`: O(1)
//!   - `on_hit()`: O(1)
//!   - `select_victim()`: O(P) where P is the number of pages in the table
//! - **Worst Case:** Scanning patterns larger than the frame budget (thrashing)

use super::ReplacementPolicy;
use crate::common::error::Result;
use crate::config::Algorithm;
use crate::core::page_table::PageTable;

/// LRU policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn on_load(&self, table: &mut PageTable, frame: usize, cycle: u64) -> Result<()> {
        table.touch(frame, cycle);
        Ok(())
    }

    fn on_hit(&self, table: &mut PageTable, frame: usize, cycle: u64) {
        table.touch(frame, cycle);
    }

    /// Returns the resident frame with the smallest access cycle.
    ///
    /// Does not modify the table; the caller evicts the returned frame.
    fn select_victim(&self, table: &mut PageTable) -> Option<usize> {
        let mut oldest: Option<(u64, usize)> = None;
        for frame in table.frames().iter().filter(|f| f.resident) {
            // Strict comparison keeps the lowest index on ties.
            if oldest.is_none_or(|(cycle, _)| frame.last_access_cycle < cycle) {
                oldest = Some((frame.last_access_cycle, frame.index));
            }
        }
        oldest.map(|(_, index)| index)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Lru
    }
}
