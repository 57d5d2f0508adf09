//! Simulation engine and input loading.
//!
//! Provides the process-list/trace loaders and the [`Simulator`] that replays a trace against
//! per-process page tables.

pub mod loader;

pub mod simulator;

use std::path::Path;

pub use self::loader::{ProcessSpec, TraceEvent, TraceReader};
pub use self::simulator::{Access, SimulationResult, Simulator};

use crate::common::error::Result;
use crate::config::Config;

/// Runs a complete in-memory simulation.
///
/// # Errors
///
/// Returns any configuration, allocation, reference, or capacity error raised by the run.
pub fn simulate(
    config: &Config,
    processes: &[ProcessSpec],
    events: impl IntoIterator<Item = TraceEvent>,
) -> Result<SimulationResult> {
    Simulator::new(config, processes)?.run(events)
}

/// Loads the process list and trace from disk and runs them.
///
/// The configuration is validated before either file is opened. The trace is parsed lazily,
/// one line per event.
///
/// # Errors
///
/// Returns I/O and format errors from loading as well as every error [`simulate`] can raise.
pub fn run_files(config: &Config, plist: &Path, ptrace: &Path) -> Result<SimulationResult> {
    config.validate()?;
    let processes = loader::load_process_list(plist)?;
    let trace = TraceReader::open(ptrace)?;
    Simulator::new(config, &processes)?.run_stream(trace)
}
