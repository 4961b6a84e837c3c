//! Opcodes, opcode classes and functional-unit kinds.
//!
//! Every mnemonic is mapped once, when an instruction is built, onto a closed
//! `OpClass`. The scheduler selects pools and behaviour from the class and the
//! `UnitKind` it maps to, never from the mnemonic text.

use std::fmt;
use std::str::FromStr;

use crate::common::error::ParseError;

/// Supported instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Opcode {
    /// `DADD Rd, Rs, Rt`
    Dadd,
    /// `DADDI Rd, Rs, #imm`
    Daddi,
    /// `DSUB Rd, Rs, Rt`
    Dsub,
    /// `ADD.D Fd, Fs, Ft`
    AddD,
    /// `SUB.D Fd, Fs, Ft`
    SubD,
    /// `MUL.D Fd, Fs, Ft`
    MulD,
    /// `DIV.D Fd, Fs, Ft`
    DivD,
    /// `L.D Fd, off(Rb)`
    LoadD,
    /// `L.W Rd, off(Rb)`
    LoadW,
    /// `S.D Fs, off(Rb)`
    StoreD,
    /// `S.W Rs, off(Rb)`
    StoreW,
    /// `BEQ Rs, Rt, off`
    Beq,
    /// `BNE Rs, Rt, off`
    Bne,
}

/// Behavioural class of an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpClass {
    /// Integer ALU operation.
    Integer,
    /// FP add/subtract.
    FpAdd,
    /// FP multiply/divide.
    FpMul,
    /// Memory load.
    Load,
    /// Memory store.
    Store,
    /// Conditional branch (resolved, never redirected).
    Branch,
}

/// Kind of station pool an instruction is issued into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    /// Integer reservation stations (also used by branches).
    Int,
    /// FP add/sub reservation stations.
    FpAdd,
    /// FP mul/div reservation stations.
    FpMul,
    /// Load buffers.
    Load,
    /// Store buffers.
    Store,
}

/// Width of a memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemWidth {
    /// 4-byte signed word.
    Word,
    /// 8-byte IEEE double.
    Double,
}

/// Operand layout of an instruction in assembly text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `rd, rs, rt`
    ThreeReg,
    /// `rd, rs, imm`
    RegImm,
    /// `r, off(base)`
    Memory,
    /// `rs, rt, off`
    Branch,
}

impl Opcode {
    /// Every opcode, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Dadd,
        Self::Daddi,
        Self::Dsub,
        Self::AddD,
        Self::SubD,
        Self::MulD,
        Self::DivD,
        Self::LoadD,
        Self::LoadW,
        Self::StoreD,
        Self::StoreW,
        Self::Beq,
        Self::Bne,
    ];

    /// Assembly mnemonic; also the key of the latency table.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Dadd => "DADD",
            Self::Daddi => "DADDI",
            Self::Dsub => "DSUB",
            Self::AddD => "ADD.D",
            Self::SubD => "SUB.D",
            Self::MulD => "MUL.D",
            Self::DivD => "DIV.D",
            Self::LoadD => "L.D",
            Self::LoadW => "L.W",
            Self::StoreD => "S.D",
            Self::StoreW => "S.W",
            Self::Beq => "BEQ",
            Self::Bne => "BNE",
        }
    }

    /// Behavioural class.
    pub const fn class(self) -> OpClass {
        match self {
            Self::Dadd | Self::Daddi | Self::Dsub => OpClass::Integer,
            Self::AddD | Self::SubD => OpClass::FpAdd,
            Self::MulD | Self::DivD => OpClass::FpMul,
            Self::LoadD | Self::LoadW => OpClass::Load,
            Self::StoreD | Self::StoreW => OpClass::Store,
            Self::Beq | Self::Bne => OpClass::Branch,
        }
    }

    /// Station pool this opcode issues into.
    pub const fn unit(self) -> UnitKind {
        self.class().unit()
    }

    /// Operand layout in assembly text.
    pub const fn format(self) -> Format {
        match self {
            Self::Daddi => Format::RegImm,
            Self::LoadD | Self::LoadW | Self::StoreD | Self::StoreW => Format::Memory,
            Self::Beq | Self::Bne => Format::Branch,
            _ => Format::ThreeReg,
        }
    }

    /// Whether the opcode renames and writes a destination register.
    pub const fn writes_register(self) -> bool {
        !matches!(self.class(), OpClass::Store | OpClass::Branch)
    }

    /// Whether the opcode touches memory.
    pub const fn is_memory(self) -> bool {
        matches!(self.class(), OpClass::Load | OpClass::Store)
    }

    /// Access width for loads and stores.
    pub const fn mem_width(self) -> Option<MemWidth> {
        match self {
            Self::LoadD | Self::StoreD => Some(MemWidth::Double),
            Self::LoadW | Self::StoreW => Some(MemWidth::Word),
            _ => None,
        }
    }
}

impl OpClass {
    /// Pool that serves this class.
    pub const fn unit(self) -> UnitKind {
        match self {
            Self::Integer | Self::Branch => UnitKind::Int,
            Self::FpAdd => UnitKind::FpAdd,
            Self::FpMul => UnitKind::FpMul,
            Self::Load => UnitKind::Load,
            Self::Store => UnitKind::Store,
        }
    }
}

impl UnitKind {
    /// Every pool kind, in the fixed scan order used for station listings.
    pub const ALL: [Self; 5] = [Self::Int, Self::FpAdd, Self::FpMul, Self::Load, Self::Store];

    /// Position of this kind in [`UnitKind::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Int => 0,
            Self::FpAdd => 1,
            Self::FpMul => 2,
            Self::Load => 3,
            Self::Store => 4,
        }
    }

    /// Prefix of station names in this pool (`Add1`, `Load2`, ...).
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::FpAdd => "Add",
            Self::FpMul => "Mul",
            Self::Load => "Load",
            Self::Store => "Store",
        }
    }
}

impl MemWidth {
    /// Access size in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Word => 4,
            Self::Double => 8,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Opcode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic() == upper)
            .ok_or_else(|| ParseError::UnknownOpcode(s.to_string()))
    }
}
