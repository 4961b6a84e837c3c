//! Scheduling engine.
//!
//! Owns the microarchitectural state of a run and drives the three stages
//! once per cycle. It provides:
//! 1. **State:** Station pools, the register status table, data memory and statistics.
//! 2. **Cycle Order:** Write-Result, then Execute, then Issue.
//! 3. **Completion:** The engine is idle once no station holds an instruction.
//!
//! Stage order is load-bearing. A station that retires this cycle is free
//! before Issue runs, and a broadcast is visible to Execute's readiness check
//! in the same cycle while the start-cycle arithmetic still delays execution
//! by one cycle.

use crate::common::error::SimError;
use crate::config::{Config, LatencyTable};
use crate::core::pipeline::pool::StationPool;
use crate::core::pipeline::rename::RegisterStatusTable;
use crate::core::pipeline::stages::{execute_stage, issue_stage, writeback_stage};
use crate::isa::instruction::Instruction;
use crate::memory::Memory;
use crate::stats::SimStats;

/// Program-order position and clock of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimState {
    /// Current cycle; 0 before the first tick.
    pub cycle: u64,
    /// Index of the next instruction to issue.
    pub pc: usize,
}

/// Microarchitectural state plus the per-cycle driver.
#[derive(Clone, Debug)]
pub struct Engine {
    /// Reservation stations and load/store buffers.
    pub stations: StationPool,
    /// Register values and pending producers.
    pub regs: RegisterStatusTable,
    /// Data memory.
    pub memory: Memory,
    /// Execution latency per opcode.
    pub latencies: LatencyTable,
    /// Run statistics.
    pub stats: SimStats,
}

impl Engine {
    /// Builds idle pools, zeroed registers and zeroed memory from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            stations: StationPool::new(&config.units),
            regs: RegisterStatusTable::new(),
            memory: Memory::new(config.memory.size_bytes),
            latencies: config.latencies.clone(),
            stats: SimStats::default(),
        }
    }

    /// Runs one cycle of every stage at `state.cycle`.
    ///
    /// The caller advances `state.cycle` before each call. Issue may advance
    /// `state.pc`.
    ///
    /// # Errors
    ///
    /// Propagates fatal conditions from the stages: an out-of-range memory
    /// access or an opcode that can never be scheduled.
    pub fn tick(
        &mut self,
        state: &mut SimState,
        program: &mut [Instruction],
    ) -> Result<(), SimError> {
        self.stats.cycles = state.cycle;
        writeback_stage(state.cycle, program, self);
        execute_stage(state.cycle, program, self)?;
        issue_stage(state, program, self)
    }

    /// True once no station holds an instruction.
    pub fn is_idle(&self) -> bool {
        self.stations.all_idle()
    }
}
