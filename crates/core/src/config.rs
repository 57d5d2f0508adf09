//! Configuration system for the paging simulator.
//!
//! This module defines the configuration structure and enums used to parameterize a run. It
//! provides:
//! 1. **Defaults:** Baseline memory size and page size.
//! 2. **Enums:** Replacement algorithm and swap mode, parsed from their command-line spellings.
//! 3. **Validation:** Page size and memory size checks performed before a simulation starts.
//!
//! Configuration is built from command-line arguments by the CLI, or deserialized from JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::constants::{MAX_PAGE_SIZE, MEMORY_SIZE, MIN_PAGE_SIZE};
use crate::common::error::{Result, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Default page size in bytes.
    pub const PAGE_SIZE: u64 = 2;

    /// Default physical memory shared by all processes, in bytes.
    pub const MEMORY_SIZE: u64 = super::MEMORY_SIZE;
}

/// Page replacement algorithms.
///
/// Specifies how a victim frame is chosen when a process must free a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Algorithm {
    /// First In First Out: evicts the frame loaded earliest.
    #[default]
    #[serde(rename = "FIFO", alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Least Recently Used: evicts the frame with the oldest access cycle.
    #[serde(rename = "LRU", alias = "Lru", alias = "lru")]
    Lru,
    /// Second-chance clock: FIFO order, but referenced frames are skipped once.
    #[serde(rename = "Clock", alias = "CLOCK", alias = "clock")]
    Clock,
}

impl Algorithm {
    /// All algorithms, in the order they are listed in usage messages.
    pub const ALL: [Self; 3] = [Self::Fifo, Self::Lru, Self::Clock];

    /// Canonical command-line spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fifo => "FIFO",
            Self::Lru => "LRU",
            Self::Clock => "Clock",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts only the exact command-line spellings `FIFO`, `LRU` and `Clock`.
impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|algo| algo.as_str() == s)
            .ok_or_else(|| {
                SimError::Config(format!(
                    "unknown algorithm '{s}', use one of the following: LRU FIFO Clock"
                ))
            })
    }
}

/// Swap strategy applied on a page miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum SwapMode {
    /// Free one slot and load only the requested frame.
    #[default]
    #[serde(alias = "-")]
    Demand,
    /// Free up to two slots, load the requested frame and prefetch the next non-resident one.
    #[serde(alias = "+", alias = "Prepaging")]
    PrePaging,
}

impl SwapMode {
    /// Command-line flag for this mode (`+` or `-`).
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Demand => "-",
            Self::PrePaging => "+",
        }
    }
}

impl fmt::Display for SwapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Demand => f.write_str("demand"),
            Self::PrePaging => f.write_str("pre-paging"),
        }
    }
}

impl FromStr for SwapMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(Self::PrePaging),
            "-" => Ok(Self::Demand),
            other => Err(SimError::Config(format!(
                "invalid paging mode '{other}', use one of the following: + -> pre-paging; - -> demand"
            ))),
        }
    }
}

/// Root configuration for a simulation run.
///
/// # Examples
///
/// ```
/// use vmsim_core::config::{Algorithm, Config, SwapMode};
///
/// let config = Config::new(8, Algorithm::Lru, SwapMode::PrePaging);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.memory_size, 512);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use vmsim_core::config::{Algorithm, Config, SwapMode};
///
/// let json = r#"{ "page_size": 4, "algorithm": "Clock", "swap_mode": "+" }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.algorithm, Algorithm::Clock);
/// assert_eq!(config.swap_mode, SwapMode::PrePaging);
/// assert_eq!(config.memory_size, 512);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Page size in bytes; a power of two within `MIN_PAGE_SIZE..=MAX_PAGE_SIZE`.
    #[serde(default = "Config::default_page_size")]
    pub page_size: u64,
    /// Replacement algorithm shared by every process.
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Swap strategy applied on every miss.
    #[serde(default)]
    pub swap_mode: SwapMode,
    /// Physical memory divided among the processes, in bytes.
    #[serde(default = "Config::default_memory_size")]
    pub memory_size: u64,
}

impl Config {
    /// Creates a configuration with the default memory size.
    pub const fn new(page_size: u64, algorithm: Algorithm, swap_mode: SwapMode) -> Self {
        Self {
            page_size,
            algorithm,
            swap_mode,
            memory_size: defaults::MEMORY_SIZE,
        }
    }

    /// Returns a copy with a different physical memory size.
    #[must_use]
    pub const fn with_memory_size(mut self, memory_size: u64) -> Self {
        self.memory_size = memory_size;
        self
    }

    /// Checks the page size and memory size.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the page size is not a power of two between
    /// `MIN_PAGE_SIZE` and `MAX_PAGE_SIZE`, or if the memory size is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.page_size.is_power_of_two()
            || !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size)
        {
            return Err(SimError::Config(format!(
                "page size must be from {MIN_PAGE_SIZE}->{MAX_PAGE_SIZE} and a power of 2, got {}",
                self.page_size
            )));
        }
        if self.memory_size == 0 {
            return Err(SimError::Config("memory size must be non-zero".to_owned()));
        }
        Ok(())
    }

    /// Per-process frame budget: memory divided evenly among `processes` processes.
    ///
    /// Returns 0 when there are no processes.
    pub const fn capacity_for(&self, processes: usize) -> usize {
        let share = (processes as u64).saturating_mul(self.page_size);
        if share == 0 {
            0
        } else {
            (self.memory_size / share) as usize
        }
    }

    /// Number of pages needed to cover `total_memory` bytes.
    pub const fn pages_for(&self, total_memory: u64) -> usize {
        total_memory.div_ceil(self.page_size) as usize
    }

    /// Converts a 1-based byte address into a 0-based frame index.
    ///
    /// Address 0 maps to no frame.
    pub const fn frame_for(&self, address: u64) -> Option<usize> {
        match address.div_ceil(self.page_size).checked_sub(1) {
            Some(frame) => Some(frame as usize),
            None => None,
        }
    }

    /// Returns the default page size.
    const fn default_page_size() -> u64 {
        defaults::PAGE_SIZE
    }

    /// Returns the default memory size.
    const fn default_memory_size() -> u64 {
        defaults::MEMORY_SIZE
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(defaults::PAGE_SIZE, Algorithm::default(), SwapMode::default())
    }
}
