//! Simulator: owns the page tables, the replacement policy, and the shared clock.
//!
//! Events are processed one at a time, strictly in trace order. The clock advances once per
//! event regardless of which process it belongs to; that single global order is what LRU
//! reads as recency and what FIFO reads as arrival order.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::common::constants::{FIRST_EVENT_CYCLE, WARM_START_CYCLE};
use crate::common::error::{Result, SimError};
use crate::config::Config;
use crate::core::page_table::PageTable;
use crate::core::policies::{self, ReplacementPolicy};
use crate::core::swap::{self, SwapOutcome, SwapStrategy};
use crate::sim::loader::{ProcessSpec, TraceEvent};
use crate::stats::SimStats;

/// Result of processing a single trace event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    /// The frame was resident.
    Hit {
        /// Frame index derived from the event's address.
        frame: usize,
    },
    /// The frame was not resident and a swap ran.
    Miss {
        /// Frame index derived from the event's address.
        frame: usize,
        /// Frames the swap evicted and loaded.
        outcome: SwapOutcome,
    },
}

impl Access {
    /// Whether the access hit.
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }
}

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimulationResult {
    /// Configuration the run used.
    pub config: Config,
    /// Total page swaps (equal to the number of misses).
    pub swaps: u64,
    /// Value of the clock when the run ended.
    pub final_cycle: u64,
    /// Detailed counters.
    pub stats: SimStats,
}

/// Top-level simulation engine.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    tables: Vec<PageTable>,
    policy: Box<dyn ReplacementPolicy>,
    swapper: Box<dyn SwapStrategy>,
    cycle: u64,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator and warm-loads each process with its first `capacity` frames.
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`] if `config` is invalid.
    /// - [`SimError::Allocation`] if a page table cannot be built.
    /// - [`SimError::CapacityExceeded`] if warm start overfills a table.
    pub fn new(config: &Config, processes: &[ProcessSpec]) -> Result<Self> {
        Self::with_warm_start(config, processes, config.capacity_for(processes.len()))
    }

    /// Creates a simulator, warm-loading frames `0..warm_frames` of every process.
    ///
    /// The count is clamped to each table's page count. After loading, every table is checked
    /// against its capacity before any event can be processed.
    ///
    /// # Errors
    ///
    /// Same as [`Simulator::new`].
    pub fn with_warm_start(
        config: &Config,
        processes: &[ProcessSpec],
        warm_frames: usize,
    ) -> Result<Self> {
        config.validate()?;

        let capacity = config.capacity_for(processes.len());
        let policy = policies::build(config.algorithm);
        let swapper = swap::build(config.swap_mode);

        let mut tables = Vec::new();
        tables.try_reserve_exact(processes.len()).map_err(|e| {
            SimError::allocation(None, format!("{} page tables: {e}", processes.len()))
        })?;

        for (pid, process) in processes.iter().enumerate() {
            let num_pages = config.pages_for(process.total_memory);
            let mut table =
                PageTable::new(num_pages, capacity).map_err(|e| attribute(e, pid))?;
            for frame in 0..warm_frames.min(num_pages) {
                table.mark_resident(frame, WARM_START_CYCLE);
                policy
                    .on_load(&mut table, frame, WARM_START_CYCLE)
                    .map_err(|e| attribute(e, pid))?;
            }
            debug!(
                pid,
                label = %process.label,
                num_pages,
                capacity,
                resident = table.resident_count(),
                "page table warm-loaded"
            );
            tables.push(table);
        }

        let stats = SimStats::new(tables.iter().map(|t| (t.num_pages(), t.capacity())));
        let sim = Self {
            config: *config,
            tables,
            policy,
            swapper,
            cycle: FIRST_EVENT_CYCLE,
            stats,
        };
        for pid in 0..sim.tables.len() {
            sim.check_capacity(pid, WARM_START_CYCLE)?;
        }
        Ok(sim)
    }

    /// Processes one trace event.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidReference`] if the process or derived frame is out of range.
    /// - [`SimError::Allocation`] if the swap cannot register a loaded frame.
    /// - [`SimError::CapacityExceeded`] if the process ends the event over budget.
    pub fn step(&mut self, event: TraceEvent) -> Result<Access> {
        let cycle = self.cycle;
        let TraceEvent {
            pid: raw_pid,
            address,
        } = event;
        let processes = self.tables.len();

        let Some((pid, table)) = usize::try_from(raw_pid)
            .ok()
            .and_then(|pid| self.tables.get_mut(pid).map(|table| (pid, table)))
        else {
            return Err(SimError::InvalidReference {
                pid: raw_pid,
                address,
                cycle,
                reason: format!("process index out of range (0..{processes})"),
            });
        };
        let num_pages = table.num_pages();
        let frame = u64::try_from(address)
            .ok()
            .and_then(|address| self.config.frame_for(address))
            .filter(|&frame| frame < num_pages)
            .ok_or_else(|| SimError::InvalidReference {
                pid: raw_pid,
                address,
                cycle,
                reason: format!("address maps outside frames 0..{num_pages}"),
            })?;

        let access = if table.is_resident(frame) {
            self.policy.on_hit(table, frame, cycle);
            self.stats.record_hit(pid);
            trace!(pid, frame, cycle, "hit");
            Access::Hit { frame }
        } else {
            let outcome = self
                .swapper
                .swap(self.policy.as_ref(), table, frame, cycle)
                .map_err(|e| attribute(e, pid))?;
            self.stats.record_swap(pid, frame, &outcome);
            debug!(
                pid,
                frame,
                cycle,
                evicted = ?outcome.evicted,
                loaded = ?outcome.loaded,
                "page swap"
            );
            Access::Miss { frame, outcome }
        };

        self.cycle += 1;
        self.check_capacity(pid, cycle)?;
        Ok(access)
    }

    /// Runs every event in order and returns the result.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Simulator::step`]; no partial result is produced.
    pub fn run<I>(self, events: I) -> Result<SimulationResult>
    where
        I: IntoIterator<Item = TraceEvent>,
    {
        self.run_stream(events.into_iter().map(Ok))
    }

    /// Runs a fallible event stream, such as a [`crate::sim::loader::TraceReader`].
    ///
    /// A run with no processes performs no simulation and does not consume the stream.
    ///
    /// # Errors
    ///
    /// Returns the first error from the stream or from [`Simulator::step`].
    pub fn run_stream<I>(mut self, events: I) -> Result<SimulationResult>
    where
        I: IntoIterator<Item = Result<TraceEvent>>,
    {
        if self.tables.is_empty() {
            warn!("process list is empty, skipping simulation");
            return Ok(self.finish());
        }
        for event in events {
            let _ = self.step(event?)?;
        }
        Ok(self.finish())
    }

    /// Consumes the simulator and returns its result.
    pub fn finish(mut self) -> SimulationResult {
        for (pid, table) in self.tables.iter().enumerate() {
            self.stats.set_resident(pid, table.resident_count());
        }
        debug!(
            swaps = self.stats.swaps,
            events = self.stats.events,
            "simulation finished"
        );
        SimulationResult {
            config: self.config,
            swaps: self.stats.swaps,
            final_cycle: self.cycle,
            stats: self.stats,
        }
    }

    /// Fails if `pid` holds more resident frames than its capacity.
    fn check_capacity(&self, pid: usize, cycle: u64) -> Result<()> {
        match self.tables.get(pid) {
            Some(table) if table.resident_count() > table.capacity() => {
                Err(SimError::CapacityExceeded {
                    pid,
                    cycle,
                    resident: table.resident_count(),
                    capacity: table.capacity(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Cycle at which the next event will be processed.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Total page swaps so far.
    pub const fn swaps(&self) -> u64 {
        self.stats.swaps
    }

    /// Configuration of the run.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Page table of process `pid`.
    pub fn table(&self, pid: usize) -> Option<&PageTable> {
        self.tables.get(pid)
    }

    /// All page tables, indexed by process.
    pub fn tables(&self) -> &[PageTable] {
        &self.tables
    }

    /// Active replacement policy.
    pub fn policy(&self) -> &dyn ReplacementPolicy {
        self.policy.as_ref()
    }

    /// Statistics accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }
}

/// Attaches a process index to allocation errors that lack one.
fn attribute(err: SimError, pid: usize) -> SimError {
    match err {
        SimError::Allocation { pid: None, reason } => SimError::Allocation {
            pid: Some(pid),
            reason,
        },
        other => other,
    }
}
