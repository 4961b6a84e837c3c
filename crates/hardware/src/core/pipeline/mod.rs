//! Tomasulo scheduling pipeline.
//!
//! This module contains the dynamic scheduler. It includes the following
//! components:
//! 1. **Stations:** Tagged reservation stations and load/store buffers, grouped into pools.
//! 2. **Renaming:** The register status table mapping registers to values or producers.
//! 3. **Hazards:** Memory-ordering checks applied at issue.
//! 4. **Common Data Bus:** Single-winner arbitration and result broadcast.
//! 5. **Stages:** Write-Result, Execute and Issue, driven by the engine.

/// Common data bus arbitration and broadcast.
pub mod cdb;

/// Engine state and the per-cycle driver.
pub mod engine;

/// Memory-ordering hazard detection.
pub mod hazards;

/// Station pools sized per functional-unit kind.
pub mod pool;

/// Register status table.
pub mod rename;

/// Scheduler stage implementations (write-result, execute, issue).
pub mod stages;

/// Reservation stations, operands and station tags.
pub mod station;

pub use self::engine::{Engine, SimState};
pub use self::station::StationTag;
