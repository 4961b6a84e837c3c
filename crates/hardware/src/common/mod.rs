//! Common types shared throughout the scheduling simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Error Handling:** Simulation, configuration, parse and load errors.
//! 2. **Register Names:** The `Reg` identifier for the integer and FP files.

/// Error types.
pub mod error;

/// Architectural register names.
pub mod reg;

pub use error::{ConfigError, LoadError, ParseError, SimError};
pub use reg::Reg;
