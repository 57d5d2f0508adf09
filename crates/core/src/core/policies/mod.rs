//! Page Replacement Policies.
//!
//! Implements the algorithms for selecting victim frames in a process's page table.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out.
//! - `Lru`: Least Recently Used.
//! - `Clock`: Second-chance FIFO.
//!
//! A policy object holds no per-process state. Everything it needs lives in the
//! [`PageTable`] it is handed, so one policy is shared by every process of a run.

/// Second-chance (Clock) replacement policy.
pub mod clock;

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

pub use clock::ClockPolicy;
pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use std::fmt;

use crate::common::error::Result;
use crate::config::Algorithm;
use crate::core::page_table::PageTable;

/// Trait for page replacement policies.
///
/// Defines the hooks the simulator and swap strategies call when a frame is loaded, hit, or
/// needs to be evicted.
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// Registers a frame that just became resident.
    ///
    /// # Arguments
    ///
    /// * `table` - The process's page table; `frame` is already marked resident.
    /// * `frame` - Index of the loaded frame.
    /// * `cycle` - Current simulation cycle.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimError::Allocation`] if the policy's bookkeeping cannot grow.
    fn on_load(&self, table: &mut PageTable, frame: usize, cycle: u64) -> Result<()>;

    /// Updates bookkeeping for an access that found `frame` resident.
    fn on_hit(&self, table: &mut PageTable, frame: usize, cycle: u64);

    /// Selects a victim among the resident frames.
    ///
    /// Queue-based policies dequeue the victim; the caller marks it evicted.
    ///
    /// # Returns
    ///
    /// The index of the frame to evict, or `None` if nothing is resident.
    fn select_victim(&self, table: &mut PageTable) -> Option<usize>;

    /// Algorithm this policy implements.
    fn algorithm(&self) -> Algorithm;
}

/// Builds the policy object for `algorithm`.
pub fn build(algorithm: Algorithm) -> Box<dyn ReplacementPolicy> {
    match algorithm {
        Algorithm::Fifo => Box::new(FifoPolicy),
        Algorithm::Lru => Box::new(LruPolicy),
        Algorithm::Clock => Box::new(ClockPolicy),
    }
}
