//! Simulation driver, program loading and reporting.
//!
//! Provides the top-level `Simulator`, the assembly loader and text
//! renderings of the instruction-status and station tables.

/// Assembly program loading.
pub mod loader;

/// Instruction-status and station table rendering.
pub mod report;

/// Top-level simulator and cycle driver.
pub mod simulator;

pub use simulator::{RunSummary, Simulator};
