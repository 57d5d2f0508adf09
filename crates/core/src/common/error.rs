//! Simulation error definitions.
//!
//! Every failure in the simulator is fatal: errors are never retried, they propagate to the
//! caller and abort the run. Each variant carries enough context (process, cycle, frame or
//! line number) to diagnose the failure.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised while configuring, loading, or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid configuration (page size, algorithm name, mode flag, memory size).
    ///
    /// Raised before the simulation starts.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A malformed line in the process list or trace.
    #[error("{source_name}:{line}: {reason}")]
    Format {
        /// Which input the line came from (`plist`, `ptrace`, or a path).
        source_name: String,
        /// 1-based line number within that input.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A page table, frame array, or residency queue could not be sized or extended.
    #[error(
        "allocation failed{}: {reason}",
        .pid.map_or_else(String::new, |p| format!(" for process {p}"))
    )]
    Allocation {
        /// Process whose table was being built or extended, when known.
        pid: Option<usize>,
        /// Description of the failed allocation.
        reason: String,
    },

    /// A trace event names a process or an address outside the simulated range.
    #[error("invalid reference at cycle {cycle}: process {pid}, address {address}: {reason}")]
    InvalidReference {
        /// Process index from the trace event.
        pid: i64,
        /// Byte address from the trace event.
        address: i64,
        /// Cycle at which the event was processed.
        cycle: u64,
        /// Which part of the reference was out of range.
        reason: String,
    },

    /// A process holds more resident frames than its capacity allows.
    #[error(
        "process {pid} exceeded memory available at cycle {cycle}: {resident} resident frames, capacity {capacity}"
    )]
    CapacityExceeded {
        /// Offending process index.
        pid: usize,
        /// Cycle at which the violation was detected (0 for warm start).
        cycle: u64,
        /// Resident frame count after the event.
        resident: usize,
        /// Per-process frame budget.
        capacity: usize,
    },

    /// An input file could not be opened or read.
    #[error("could not read '{}': {source}", path.display())]
    Io {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl SimError {
    /// Builds an allocation error, optionally attributed to a process.
    pub(crate) fn allocation(pid: Option<usize>, reason: impl Into<String>) -> Self {
        Self::Allocation {
            pid,
            reason: reason.into(),
        }
    }

    /// Builds a format error for a given input and line.
    pub(crate) fn format(source_name: &str, line: usize, reason: impl Into<String>) -> Self {
        Self::Format {
            source_name: source_name.to_owned(),
            line,
            reason: reason.into(),
        }
    }

    /// Short machine-readable name of the error kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "ConfigError",
            Self::Format { .. } => "FormatError",
            Self::Allocation { .. } => "AllocationError",
            Self::InvalidReference { .. } => "InvalidReference",
            Self::CapacityExceeded { .. } => "CapacityExceeded",
            Self::Io { .. } => "IoError",
        }
    }
}
