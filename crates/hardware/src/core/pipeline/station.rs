//! Reservation stations and load/store buffers.
//!
//! A station is a fixed, pre-allocated slot identified by a [`StationTag`]
//! such as `Add1` or `Load2`. While busy it holds exactly one in-flight
//! instruction; each operand is either a resolved value or the tag of the
//! station that will produce it, never both.

use std::fmt;

use crate::common::reg::Reg;
use crate::core::pipeline::rename::RegisterStatusTable;
use crate::isa::opcode::{Opcode, UnitKind};

/// Name of a station: its pool kind plus a 0-based position in that pool.
///
/// Displayed 1-based (`Add1` is position 0 of the FP add pool).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationTag {
    kind: UnitKind,
    index: usize,
}

impl StationTag {
    /// Tag of station `index` (0-based) in the `kind` pool.
    pub const fn new(kind: UnitKind, index: usize) -> Self {
        Self { kind, index }
    }

    /// Pool the station belongs to.
    pub const fn kind(self) -> UnitKind {
        self.kind
    }

    /// 0-based position within the pool.
    pub const fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for StationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.index + 1)
    }
}

/// A source operand: a concrete value or the producer it is waiting on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    /// Value is available.
    Ready(f64),
    /// Waiting for the named station to broadcast.
    Pending(StationTag),
}

impl Operand {
    /// Captures `reg` from the register status table at this instant.
    pub fn capture(regs: &RegisterStatusTable, reg: Reg) -> Self {
        regs.tag(reg)
            .map_or_else(|| Self::Ready(regs.read(reg)), Self::Pending)
    }

    /// The value, if resolved.
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Pending(_) => None,
        }
    }

    /// True once the value is available.
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Resolves the operand if it is waiting on `tag`. Returns true if it was.
    pub fn resolve(&mut self, tag: StationTag, value: f64) -> bool {
        if *self == Self::Pending(tag) {
            *self = Self::Ready(value);
            true
        } else {
            false
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(v) => write!(f, "{v}"),
            Self::Pending(tag) => write!(f, "<{tag}>"),
        }
    }
}

/// State of a busy station.
#[derive(Clone, Debug, PartialEq)]
pub struct StationEntry {
    /// Index of the bound instruction in the program list.
    pub inst: usize,
    /// Opcode of the bound instruction.
    pub opcode: Opcode,
    /// Destination register renamed to this station, if any.
    pub dest: Option<Reg>,
    /// Immediate, or memory/branch offset.
    pub imm: i64,
    /// Cycle the instruction issued.
    pub issue_cycle: u64,
    /// First source (`Vj`/`Qj`); the base register for loads and stores.
    pub j: Option<Operand>,
    /// Second source (`Vk`/`Qk`).
    pub k: Option<Operand>,
    /// Value to store (store buffers only).
    pub data: Option<Operand>,
    /// Execution cycles still to run.
    pub remaining: u64,
    /// Last cycle a pending operand was resolved by a broadcast (0 = never).
    pub last_dep_clear: u64,
    /// First execution cycle, fixed once every operand is ready.
    pub start_cycle: Option<u64>,
    /// Effective address, fixed when a load/store starts executing.
    pub address: Option<i64>,
    /// Value read by a load when its latency expires.
    pub loaded: Option<f64>,
}

impl StationEntry {
    /// True once every operand the instruction uses holds a value.
    pub fn operands_ready(&self) -> bool {
        [self.j, self.k, self.data]
            .into_iter()
            .flatten()
            .all(Operand::is_ready)
    }

    /// True once execution has run to completion and the result awaits the bus.
    pub const fn is_finished(&self) -> bool {
        self.start_cycle.is_some() && self.remaining == 0
    }

    /// Effective address, if it can be determined yet.
    ///
    /// Known once the instruction started executing, or earlier when its base
    /// register value has already been captured.
    pub fn known_address(&self) -> Option<i64> {
        if !self.opcode.is_memory() {
            return None;
        }
        self.address.or_else(|| {
            self.j
                .and_then(Operand::value)
                .map(|base| effective_address(base, self.imm))
        })
    }

    /// Resolves every operand waiting on `tag`. Returns how many were woken.
    pub fn wake(&mut self, tag: StationTag, value: f64, cycle: u64) -> usize {
        let woken = [&mut self.j, &mut self.k, &mut self.data]
            .into_iter()
            .flatten()
            .filter_map(|op| op.resolve(tag, value).then_some(()))
            .count();
        if woken > 0 {
            self.last_dep_clear = cycle;
        }
        woken
    }
}

/// `base + offset`, with the base register value truncated to an integer.
pub fn effective_address(base: f64, offset: i64) -> i64 {
    (base as i64).wrapping_add(offset)
}

/// A reservation station or load/store buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    tag: StationTag,
    entry: Option<StationEntry>,
}

impl Station {
    /// An idle station.
    pub const fn new(tag: StationTag) -> Self {
        Self { tag, entry: None }
    }

    /// The station's name.
    pub const fn tag(&self) -> StationTag {
        self.tag
    }

    /// True while an instruction is bound.
    pub const fn is_busy(&self) -> bool {
        self.entry.is_some()
    }

    /// The bound instruction's state, if busy.
    pub const fn entry(&self) -> Option<&StationEntry> {
        self.entry.as_ref()
    }

    /// Mutable access to the bound instruction's state, if busy.
    pub fn entry_mut(&mut self) -> Option<&mut StationEntry> {
        self.entry.as_mut()
    }

    /// Binds an instruction, replacing any stale state.
    pub fn bind(&mut self, entry: StationEntry) {
        debug_assert!(self.entry.is_none(), "binding a busy station");
        self.entry = Some(entry);
    }

    /// Clears the station to idle, returning what it held.
    pub fn clear(&mut self) -> Option<StationEntry> {
        self.entry.take()
    }
}
