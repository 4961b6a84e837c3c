//! Register status table.
//!
//! Maps each architectural register to its current value and, when an
//! in-flight instruction will redefine it, the tag of the producing station.
//! A register with no tag holds an architecturally valid value.
//!
//! Renaming overwrites any existing tag: the last issued writer owns the
//! register, and an older producer's commit is suppressed by
//! [`RegisterStatusTable::commit`].

use crate::common::reg::{Reg, TOTAL_REGS};
use crate::core::pipeline::station::{Operand, StationTag};

/// One register's value and pending producer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RegisterEntry {
    /// Last committed value.
    pub value: f64,
    /// Station that will produce the next value, if any.
    pub tag: Option<StationTag>,
}

/// Value/tag table for the integer and floating-point register files.
#[derive(Clone, Debug, PartialEq)]
pub struct RegisterStatusTable {
    entries: [RegisterEntry; TOTAL_REGS],
}

impl Default for RegisterStatusTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterStatusTable {
    /// Every register zero, no producers pending.
    pub fn new() -> Self {
        Self {
            entries: [RegisterEntry::default(); TOTAL_REGS],
        }
    }

    /// Last committed value of `reg`.
    pub const fn read(&self, reg: Reg) -> f64 {
        self.entries[reg.slot()].value
    }

    /// Pending producer of `reg`, if any.
    pub const fn tag(&self, reg: Reg) -> Option<StationTag> {
        self.entries[reg.slot()].tag
    }

    /// Full entry for `reg`.
    pub const fn entry(&self, reg: Reg) -> RegisterEntry {
        self.entries[reg.slot()]
    }

    /// Overwrites the committed value of `reg`, leaving its tag untouched.
    pub const fn set_value(&mut self, reg: Reg, value: f64) {
        self.entries[reg.slot()].value = value;
    }

    /// Makes `tag` the producer of `reg`, forgetting any earlier producer.
    pub const fn rename(&mut self, reg: Reg, tag: StationTag) {
        self.entries[reg.slot()].tag = Some(tag);
    }

    /// Source operand for `reg` as seen right now.
    pub fn operand(&self, reg: Reg) -> Operand {
        Operand::capture(self, reg)
    }

    /// Commits `value` into `reg` if `tag` is still its producer.
    ///
    /// Returns false, leaving the register untouched, when a later
    /// instruction has since renamed `reg` (write-after-write).
    pub fn commit(&mut self, reg: Reg, tag: StationTag, value: f64) -> bool {
        let entry = &mut self.entries[reg.slot()];
        if entry.tag == Some(tag) {
            entry.value = value;
            entry.tag = None;
            true
        } else {
            false
        }
    }

    /// Iterates over every register with its entry, integer file first.
    pub fn iter(&self) -> impl Iterator<Item = (Reg, RegisterEntry)> + '_ {
        Reg::all().map(move |reg| (reg, self.entry(reg)))
    }
}
