//! Scheduler core.
//!
//! This module contains the Tomasulo pipeline and the execution units it
//! dispatches finished stations to.

/// Dynamic scheduling pipeline (stations, renaming, CDB, stages).
pub mod pipeline;

/// Execution units (integer ALU, FPU, branch resolution).
pub mod units;

pub use self::pipeline::{Engine, SimState};
