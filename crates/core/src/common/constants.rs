//! Global System Constants.
//!
//! Physical memory and page-size limits shared by configuration and the engine.

/// Total physical memory shared by all processes, in bytes.
pub const MEMORY_SIZE: u64 = 512;

/// Smallest accepted page size in bytes.
pub const MIN_PAGE_SIZE: u64 = 2;

/// Largest accepted page size in bytes.
pub const MAX_PAGE_SIZE: u64 = 32;

/// Cycle stamped on frames loaded during warm start.
pub const WARM_START_CYCLE: u64 = 0;

/// Cycle at which the first trace event is processed.
pub const FIRST_EVENT_CYCLE: u64 = 1;
