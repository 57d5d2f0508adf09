//! Swap Strategy implementations.
//!
//! A swap strategy runs on every page miss. It asks the active replacement policy for victims,
//! evicts them, then loads the requested frame (and possibly a speculative one) as long as the
//! process stays within its frame budget.

/// Demand paging: one eviction, one load.
pub mod demand;

/// Pre-paging: up to two evictions, the requested load, and one prefetch.
pub mod prepaging;

pub use self::demand::DemandSwap;
pub use self::prepaging::PrePagingSwap;

use std::fmt;

use crate::common::error::Result;
use crate::config::SwapMode;
use crate::core::page_table::PageTable;
use crate::core::policies::ReplacementPolicy;

/// Frames touched by one swap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwapOutcome {
    /// Frames evicted, in eviction order.
    pub evicted: Vec<usize>,
    /// Frames loaded, in load order. The requested frame comes first when it was loaded.
    pub loaded: Vec<usize>,
}

/// Trait for swap strategies.
pub trait SwapStrategy: fmt::Debug + Send + Sync {
    /// Services a miss on `frame`.
    ///
    /// # Arguments
    ///
    /// * `policy` - The replacement policy shared by the run.
    /// * `table` - The page table of the process that missed.
    /// * `frame` - The requested, non-resident frame.
    /// * `cycle` - Current simulation cycle.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::SimError::Allocation`] from the policy's `on_load`.
    fn swap(
        &self,
        policy: &dyn ReplacementPolicy,
        table: &mut PageTable,
        frame: usize,
        cycle: u64,
    ) -> Result<SwapOutcome>;

    /// Mode this strategy implements.
    fn mode(&self) -> SwapMode;
}

/// Builds the strategy object for `mode`.
pub fn build(mode: SwapMode) -> Box<dyn SwapStrategy> {
    match mode {
        SwapMode::Demand => Box::new(DemandSwap),
        SwapMode::PrePaging => Box::new(PrePagingSwap),
    }
}

/// Asks the policy for one victim and evicts it.
fn evict_one(
    policy: &dyn ReplacementPolicy,
    table: &mut PageTable,
    outcome: &mut SwapOutcome,
) {
    if let Some(victim) = policy.select_victim(table) {
        table.mark_evicted(victim);
        outcome.evicted.push(victim);
    }
}

/// Loads `frame` if the table has room, registering it with the policy.
fn load_if_room(
    policy: &dyn ReplacementPolicy,
    table: &mut PageTable,
    frame: usize,
    cycle: u64,
    outcome: &mut SwapOutcome,
) -> Result<()> {
    if table.has_room() {
        table.mark_resident(frame, cycle);
        policy.on_load(table, frame, cycle)?;
        outcome.loaded.push(frame);
    }
    Ok(())
}
