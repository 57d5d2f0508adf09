//! Common utilities and types used throughout the paging simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Constants:** Physical memory size and page-size limits.
//! 2. **Error Handling:** The crate-wide `SimError` type and `Result` alias.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for configuration, input, and simulation failures.
pub mod error;

pub use constants::{MAX_PAGE_SIZE, MEMORY_SIZE, MIN_PAGE_SIZE};
pub use error::{Result, SimError};
