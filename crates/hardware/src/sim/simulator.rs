//! Simulator: owns the program list and the scheduling engine side by side.
//!
//! The program list is the sole owner of every instruction record; stations
//! refer to instructions by index, so timing stamps made by any stage are
//! visible here without copies.

use tracing::{info, warn};

use crate::common::error::SimError;
use crate::common::reg::Reg;
use crate::config::Config;
use crate::core::pipeline::engine::{Engine, SimState};
use crate::core::pipeline::stages::issue::check_schedulable;
use crate::isa::instruction::Instruction;
use crate::sim::report::StationSnapshot;
use crate::stats::SimStats;

/// Outcome of a run that retired every instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycle on which the last instruction retired (0 for an empty program).
    pub cycles: u64,
}

/// Top-level simulator: program, configuration and engine state.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    program: Vec<Instruction>,
    engine: Engine,
    state: SimState,
}

impl Simulator {
    /// Creates a simulator for `program` under `config`.
    ///
    /// # Errors
    ///
    /// `SimError::Config` if the configuration is out of range, and
    /// `SimError::Unschedulable` if any instruction has no latency or targets
    /// an empty pool. Both are reported before the first cycle runs.
    pub fn new(program: Vec<Instruction>, config: Config) -> Result<Self, SimError> {
        config.validate()?;
        let engine = Engine::new(&config);
        for inst in &program {
            let _latency = check_schedulable(&engine, inst.opcode())?;
        }
        Ok(Self {
            config,
            program,
            engine,
            state: SimState::default(),
        })
    }

    /// Advances exactly one cycle.
    ///
    /// # Errors
    ///
    /// Fatal conditions raised by the stages, such as an out-of-range memory
    /// access.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.state.cycle += 1;
        self.engine.tick(&mut self.state, &mut self.program)
    }

    /// Runs until every instruction has retired.
    ///
    /// # Errors
    ///
    /// `SimError::CycleLimitExceeded` if the configured ceiling is reached
    /// first, or any fatal condition raised while ticking.
    pub fn run(&mut self) -> Result<RunSummary, SimError> {
        self.run_with(|_| {})
    }

    /// Runs to completion, calling `on_cycle` after every cycle.
    ///
    /// # Errors
    ///
    /// Same as [`Simulator::run`].
    pub fn run_with<F>(&mut self, mut on_cycle: F) -> Result<RunSummary, SimError>
    where
        F: FnMut(&Self),
    {
        let limit = self.config.general.max_cycles;
        while !self.is_complete() {
            if self.state.cycle >= limit {
                warn!(
                    limit,
                    pc = self.state.pc,
                    retired = self.engine.stats.instructions_retired,
                    "cycle limit reached before completion"
                );
                return Err(SimError::CycleLimitExceeded { limit });
            }
            self.tick()?;
            on_cycle(self);
        }
        info!(
            cycles = self.state.cycle,
            instructions = self.program.len(),
            "simulation complete"
        );
        Ok(RunSummary {
            cycles: self.state.cycle,
        })
    }

    /// True once every instruction has issued and no station is busy.
    pub fn is_complete(&self) -> bool {
        self.state.pc >= self.program.len() && self.engine.is_idle()
    }

    /// Current cycle (0 before the first tick).
    pub const fn cycle(&self) -> u64 {
        self.state.cycle
    }

    /// Index of the next instruction to issue.
    pub const fn pc(&self) -> usize {
        self.state.pc
    }

    /// The program with its timing milestones.
    pub fn instructions(&self) -> &[Instruction] {
        &self.program
    }

    /// The configuration in effect.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Last committed value of `reg`.
    pub const fn register(&self, reg: Reg) -> f64 {
        self.engine.regs.read(reg)
    }

    /// Seeds a register value.
    pub const fn set_register(&mut self, reg: Reg, value: f64) {
        self.engine.regs.set_value(reg, value);
    }

    /// Reads an 8-byte double from data memory.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryOutOfRange` if the access does not fit.
    pub fn read_double(&self, addr: i64) -> Result<f64, SimError> {
        self.engine.memory.read_double(addr)
    }

    /// Reads a 4-byte signed word from data memory.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryOutOfRange` if the access does not fit.
    pub fn read_word(&self, addr: i64) -> Result<i32, SimError> {
        self.engine.memory.read_word(addr)
    }

    /// Seeds an 8-byte double in data memory.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryOutOfRange` if the access does not fit.
    pub fn write_double(&mut self, addr: i64, value: f64) -> Result<(), SimError> {
        self.engine.memory.write_double(addr, value)
    }

    /// Seeds a 4-byte signed word in data memory.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryOutOfRange` if the access does not fit.
    pub fn write_word(&mut self, addr: i64, value: i32) -> Result<(), SimError> {
        self.engine.memory.write_word(addr, value)
    }

    /// Every station in stable pool order.
    pub fn station_snapshots(&self) -> Vec<StationSnapshot> {
        self.engine
            .stations
            .iter()
            .map(StationSnapshot::of)
            .collect()
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &SimStats {
        &self.engine.stats
    }
}
