//! Text reports.
//!
//! Renders the instruction-status table (one row of timing milestones per
//! instruction) and the station table (one row per reservation station or
//! buffer). Unreached milestones and idle fields print as `-`.

use std::fmt;

use crate::core::pipeline::station::{Operand, Station, StationTag};
use crate::isa::instruction::Instruction;
use crate::isa::opcode::Opcode;

/// Point-in-time view of one station.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StationSnapshot {
    /// Station name.
    pub tag: StationTag,
    /// Index of the bound instruction, if busy.
    pub inst: Option<usize>,
    /// Opcode of the bound instruction, if busy.
    pub opcode: Option<Opcode>,
    /// First source operand.
    pub j: Option<Operand>,
    /// Second source operand.
    pub k: Option<Operand>,
    /// Store data operand.
    pub data: Option<Operand>,
    /// Effective address, once fixed.
    pub address: Option<i64>,
    /// Execution cycles still to run, if busy.
    pub remaining: Option<u64>,
}

impl StationSnapshot {
    /// Captures the current state of `station`.
    pub fn of(station: &Station) -> Self {
        let entry = station.entry();
        Self {
            tag: station.tag(),
            inst: entry.map(|e| e.inst),
            opcode: entry.map(|e| e.opcode),
            j: entry.and_then(|e| e.j),
            k: entry.and_then(|e| e.k),
            data: entry.and_then(|e| e.data),
            address: entry.and_then(|e| e.address),
            remaining: entry.map(|e| e.remaining),
        }
    }

    /// True while an instruction is bound.
    pub const fn is_busy(&self) -> bool {
        self.opcode.is_some()
    }
}

/// Renders the instruction-status table.
pub fn format_timing_table(program: &[Instruction]) -> String {
    TimingTable(program).to_string()
}

/// Renders the station table.
pub fn format_stations(stations: &[StationSnapshot]) -> String {
    StationTable(stations).to_string()
}

struct TimingTable<'a>(&'a [Instruction]);

impl fmt::Display for TimingTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const HEADER: &str = "Instruction";
        let w = self
            .0
            .iter()
            .map(|inst| inst.text().len())
            .max()
            .unwrap_or(0)
            .max(HEADER.len());

        writeln!(
            f,
            "{HEADER:<w$}  {:>5}  {:>5}  {:>5}  {:>5}",
            "Issue", "Start", "End", "Write"
        )?;
        for inst in self.0 {
            let t = inst.timing();
            writeln!(
                f,
                "{:<w$}  {:>5}  {:>5}  {:>5}  {:>5}",
                inst.text(),
                cell(t.issue),
                cell(t.exec_start),
                cell(t.exec_end),
                cell(t.write_result)
            )?;
        }
        Ok(())
    }
}

struct StationTable<'a>(&'a [StationSnapshot]);

impl fmt::Display for StationTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<7} {:<4} {:<6} {:<10} {:<10} {:<10} {:>6} {:>4}",
            "Name", "Busy", "Op", "Vj/Qj", "Vk/Qk", "Data", "Addr", "Left"
        )?;
        for s in self.0 {
            writeln!(
                f,
                "{:<7} {:<4} {:<6} {:<10} {:<10} {:<10} {:>6} {:>4}",
                s.tag.to_string(),
                if s.is_busy() { "yes" } else { "no" },
                cell(s.opcode),
                cell(s.j),
                cell(s.k),
                cell(s.data),
                cell(s.address),
                cell(s.remaining)
            )?;
        }
        Ok(())
    }
}

fn cell<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
