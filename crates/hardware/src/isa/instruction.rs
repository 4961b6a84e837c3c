//! Instruction records and their timing milestones.
//!
//! An `Instruction` is immutable after construction except for its `Timing`,
//! which the scheduler stamps as the instruction moves through issue,
//! execution and write-result. The program list is the sole owner of every
//! record; stations refer to them by index.

use std::fmt;

use crate::common::reg::Reg;
use crate::isa::opcode::{Format, Opcode};

/// Cycle stamps for the four scheduling milestones.
///
/// Each field is set exactly once and never reset; `None` means the milestone
/// has not been reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timing {
    /// Cycle the instruction was bound to a station.
    pub issue: Option<u64>,
    /// First cycle of execution.
    pub exec_start: Option<u64>,
    /// Last cycle of execution.
    pub exec_end: Option<u64>,
    /// Cycle the result was granted the common data bus.
    pub write_result: Option<u64>,
}

impl Timing {
    /// The four milestones with `0` standing in for "never reached".
    pub fn as_row(&self) -> [u64; 4] {
        [
            self.issue.unwrap_or(0),
            self.exec_start.unwrap_or(0),
            self.exec_end.unwrap_or(0),
            self.write_result.unwrap_or(0),
        ]
    }

    /// True once the result has been written.
    pub const fn is_retired(&self) -> bool {
        self.write_result.is_some()
    }
}

/// Records a milestone. A milestone that is already set keeps its first value.
pub(crate) fn stamp(field: &mut Option<u64>, cycle: u64) {
    debug_assert!(field.is_none(), "timing milestone stamped twice");
    if field.is_none() {
        *field = Some(cycle);
    }
}

/// A decoded instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    opcode: Opcode,
    dest: Option<Reg>,
    src1: Option<Reg>,
    src2: Option<Reg>,
    imm: i64,
    text: String,
    /// Scheduling milestones.
    pub(crate) timing: Timing,
}

impl Instruction {
    /// Builds an instruction from its fields; `text` is rendered from them.
    pub fn new(
        opcode: Opcode,
        dest: Option<Reg>,
        src1: Option<Reg>,
        src2: Option<Reg>,
        imm: i64,
    ) -> Self {
        let mut inst = Self {
            opcode,
            dest,
            src1,
            src2,
            imm,
            text: String::new(),
            timing: Timing::default(),
        };
        inst.text = inst.render();
        inst
    }

    /// `op rd, rs, rt`
    pub fn three_reg(opcode: Opcode, rd: Reg, rs: Reg, rt: Reg) -> Self {
        Self::new(opcode, Some(rd), Some(rs), Some(rt), 0)
    }

    /// `op rd, rs, #imm`
    pub fn reg_imm(opcode: Opcode, rd: Reg, rs: Reg, imm: i64) -> Self {
        Self::new(opcode, Some(rd), Some(rs), None, imm)
    }

    /// `L.x rd, offset(base)`
    pub fn load(opcode: Opcode, rd: Reg, offset: i64, base: Reg) -> Self {
        Self::new(opcode, Some(rd), Some(base), None, offset)
    }

    /// `S.x rs, offset(base)`: `rs` is the value stored.
    pub fn store(opcode: Opcode, value: Reg, offset: i64, base: Reg) -> Self {
        Self::new(opcode, None, Some(base), Some(value), offset)
    }

    /// `Bxx rs, rt, offset`
    pub fn branch(opcode: Opcode, rs: Reg, rt: Reg, offset: i64) -> Self {
        Self::new(opcode, None, Some(rs), Some(rt), offset)
    }

    /// Replaces the display text with the original source line.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// The opcode.
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Destination register, if the instruction produces one.
    pub const fn dest(&self) -> Option<Reg> {
        self.dest
    }

    /// First source: `rs` for ALU ops, the base register for loads/stores.
    pub const fn src1(&self) -> Option<Reg> {
        self.src1
    }

    /// Second source: `rt` for ALU ops, the stored value for stores.
    pub const fn src2(&self) -> Option<Reg> {
        self.src2
    }

    /// Immediate operand or memory/branch offset.
    pub const fn imm(&self) -> i64 {
        self.imm
    }

    /// Source text of the instruction.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Timing milestones recorded so far.
    pub const fn timing(&self) -> &Timing {
        &self.timing
    }

    fn render(&self) -> String {
        let reg = |r: Option<Reg>| r.map_or_else(|| "?".to_string(), |r| r.to_string());
        let op = self.opcode.mnemonic();
        match self.opcode.format() {
            Format::ThreeReg => format!(
                "{op} {}, {}, {}",
                reg(self.dest),
                reg(self.src1),
                reg(self.src2)
            ),
            Format::RegImm => format!("{op} {}, {}, #{}", reg(self.dest), reg(self.src1), self.imm),
            Format::Memory => {
                let data = if self.opcode.writes_register() {
                    self.dest
                } else {
                    self.src2
                };
                format!("{op} {}, {}({})", reg(data), self.imm, reg(self.src1))
            }
            Format::Branch => format!("{op} {}, {}, {}", reg(self.src1), reg(self.src2), self.imm),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
