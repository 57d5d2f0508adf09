//! Demand Paging.
//!
//! Every miss frees exactly one slot, even when the process is below its budget, and then loads
//! only the requested frame.

use super::{SwapOutcome, SwapStrategy, evict_one, load_if_room};
use crate::common::error::Result;
use crate::config::SwapMode;
use crate::core::page_table::PageTable;
use crate::core::policies::ReplacementPolicy;

/// Demand swap strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct DemandSwap;

impl SwapStrategy for DemandSwap {
    fn swap(
        &self,
        policy: &dyn ReplacementPolicy,
        table: &mut PageTable,
        frame: usize,
        cycle: u64,
    ) -> Result<SwapOutcome> {
        let mut outcome = SwapOutcome::default();
        evict_one(policy, table, &mut outcome);
        load_if_room(policy, table, frame, cycle, &mut outcome)?;
        Ok(outcome)
    }

    fn mode(&self) -> SwapMode {
        SwapMode::Demand
    }
}
