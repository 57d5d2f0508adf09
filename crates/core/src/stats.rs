//! Simulation statistics collection and reporting.
//!
//! This module tracks what happened during a run. It provides:
//! 1. **Totals:** Events processed, hits, and page swaps (one per miss).
//! 2. **Traffic:** Frames evicted, frames loaded on demand, and frames prefetched.
//! 3. **Per process:** The same counters broken down by process, plus table geometry.

use serde::Serialize;

use crate::core::swap::SwapOutcome;

/// Counters for one process.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    /// Process index.
    pub pid: usize,
    /// Pages in the process's table.
    pub num_pages: usize,
    /// Frame budget of the process.
    pub capacity: usize,
    /// Accesses that found their frame resident.
    pub hits: u64,
    /// Accesses that required a swap.
    pub misses: u64,
    /// Frames evicted by swaps.
    pub evictions: u64,
    /// Requested frames loaded by swaps.
    pub loads: u64,
    /// Speculative frames loaded by pre-paging.
    pub prefetches: u64,
    /// Resident frames when the statistics were taken.
    pub resident: usize,
}

/// Simulation statistics for a whole run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Trace events processed.
    pub events: u64,
    /// Events that hit.
    pub hits: u64,
    /// Events that missed; each miss is one page swap.
    pub swaps: u64,
    /// Frames evicted across all processes.
    pub evictions: u64,
    /// Requested frames loaded across all processes.
    pub loads: u64,
    /// Prefetched frames loaded across all processes.
    pub prefetches: u64,
    /// Per-process breakdown, indexed by process index.
    pub processes: Vec<ProcessStats>,
}

impl SimStats {
    /// Creates empty statistics for the given per-process geometry `(num_pages, capacity)`.
    pub fn new(geometry: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            processes: geometry
                .into_iter()
                .enumerate()
                .map(|(pid, (num_pages, capacity))| ProcessStats {
                    pid,
                    num_pages,
                    capacity,
                    ..ProcessStats::default()
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Records an access of `pid` that found its frame resident.
    pub fn record_hit(&mut self, pid: usize) {
        self.events += 1;
        self.hits += 1;
        if let Some(process) = self.processes.get_mut(pid) {
            process.hits += 1;
        }
    }

    /// Records a miss of `pid` on `frame` and the swap that served it.
    pub fn record_swap(&mut self, pid: usize, frame: usize, outcome: &SwapOutcome) {
        let evicted = outcome.evicted.len() as u64;
        let loads = outcome.loaded.iter().filter(|&&f| f == frame).count() as u64;
        let prefetches = outcome.loaded.len() as u64 - loads;

        self.events += 1;
        self.swaps += 1;
        self.evictions += evicted;
        self.loads += loads;
        self.prefetches += prefetches;
        if let Some(process) = self.processes.get_mut(pid) {
            process.misses += 1;
            process.evictions += evicted;
            process.loads += loads;
            process.prefetches += prefetches;
        }
    }

    /// Stores the final resident count of `pid`.
    pub fn set_resident(&mut self, pid: usize, resident: usize) {
        if let Some(process) = self.processes.get_mut(pid) {
            process.resident = resident;
        }
    }

    /// Fraction of events that hit, or 0 when no events were processed.
    pub fn hit_ratio(&self) -> f64 {
        if self.events == 0 {
            0.0
        } else {
            self.hits as f64 / self.events as f64
        }
    }

    /// Prints all statistics to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("PAGING SIMULATION STATISTICS");
        println!("==========================================================");
        println!("sim_events               {}", self.events);
        println!("sim_hits                 {}", self.hits);
        println!("sim_swaps                {}", self.swaps);
        println!("sim_hit_ratio            {:.4}", self.hit_ratio());
        println!("----------------------------------------------------------");
        println!("FRAME TRAFFIC");
        println!("  frames.evicted         {}", self.evictions);
        println!("  frames.loaded          {}", self.loads);
        println!("  frames.prefetched      {}", self.prefetches);
        println!("----------------------------------------------------------");
        println!("PER PROCESS");
        for p in &self.processes {
            let total = p.hits + p.misses;
            let ratio = if total > 0 {
                100.0 * (p.hits as f64 / total as f64)
            } else {
                0.0
            };
            println!(
                "  proc{:<4} pages={:<5} cap={:<4} hits={:<8} swaps={:<8} ({:.2}% hit) resident={}",
                p.pid, p.num_pages, p.capacity, p.hits, p.misses, ratio, p.resident
            );
        }
        println!("==========================================================");
    }
}
