//! Pre-Paging.
//!
//! A miss frees up to two slots, loads the requested frame, and then speculatively loads the
//! next non-resident frame found by scanning circularly from the frame after the requested one.
//! Both loads respect the process's budget, so at most two frames are evicted and at most two
//! loaded per miss.
//!
//! Under LRU the prefetched frame is stamped with the same cycle as the requested frame; the
//! lower index wins the tie when one of them is later chosen as victim.

use super::{SwapOutcome, SwapStrategy, evict_one, load_if_room};
use crate::common::error::Result;
use crate::config::SwapMode;
use crate::core::page_table::PageTable;
use crate::core::policies::ReplacementPolicy;

/// Number of victims freed per miss.
const EVICTIONS_PER_MISS: usize = 2;

/// Pre-paging swap strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrePagingSwap;

impl SwapStrategy for PrePagingSwap {
    fn swap(
        &self,
        policy: &dyn ReplacementPolicy,
        table: &mut PageTable,
        frame: usize,
        cycle: u64,
    ) -> Result<SwapOutcome> {
        let mut outcome = SwapOutcome::default();
        for _ in 0..EVICTIONS_PER_MISS {
            evict_one(policy, table, &mut outcome);
        }

        load_if_room(policy, table, frame, cycle, &mut outcome)?;

        let start = (frame + 1) % table.num_pages();
        if let Some(prefetch) = table.next_non_resident(start) {
            load_if_room(policy, table, prefetch, cycle, &mut outcome)?;
        }
        Ok(outcome)
    }

    fn mode(&self) -> SwapMode {
        SwapMode::PrePaging
    }
}
