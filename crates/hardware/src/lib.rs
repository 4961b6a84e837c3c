//! Cycle-accurate Tomasulo scheduling simulator library.
//!
//! This crate models dynamic instruction scheduling with register renaming.
//! It provides the following:
//! 1. **Core:** Reservation stations and load/store buffers, the register status table,
//!    memory-ordering checks at issue and a single-winner common data bus.
//! 2. **ISA:** A small MIPS-style integer/FP instruction set and its assembly parser.
//! 3. **Memory:** Flat little-endian data memory with typed word and double access.
//! 4. **Simulation:** Program loader, the cycle driver, reports, configuration and statistics.
//!
//! # Examples
//!
//! ```
//! use tomasulo_core::{Config, Simulator};
//! use tomasulo_core::sim::loader::parse_program;
//!
//! let program = parse_program("ADD.D F6, F8, F2\nMUL.D F0, F6, F4").unwrap();
//! let mut sim = Simulator::new(program, Config::default()).unwrap();
//! let summary = sim.run().unwrap();
//!
//! assert_eq!(summary.cycles, 15);
//! assert_eq!(sim.instructions()[1].timing().as_row(), [2, 5, 14, 15]);
//! ```

/// Common types (errors, register names).
pub mod common;
/// Simulator configuration (defaults, pool sizes, latencies).
pub mod config;
/// Scheduler core (pipeline, stations, CDB, execution units).
pub mod core;
/// Instruction set (opcodes, instructions, parser).
pub mod isa;
/// Flat data memory.
pub mod memory;
/// Simulation driver, loader and reports.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Error raised by construction or a run.
pub use crate::common::error::SimError;
/// Architectural register name.
pub use crate::common::reg::Reg;
/// Instruction record with its timing milestones.
pub use crate::isa::instruction::{Instruction, Timing};
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::simulator::{RunSummary, Simulator};
