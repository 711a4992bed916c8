//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

/// Main loop poll interval. Short enough that a delayed tick on the 100 ms
/// grid is never delivered more than a few milliseconds late.
pub const POLL_TIME: Duration = Duration::from_millis(5);
