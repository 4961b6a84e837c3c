//! Architectural register names.
//!
//! This module defines the `Reg` identifier shared by the parser, the register
//! status table and the reservation stations. It provides:
//! 1. **Register Classes:** Integer (`R0`-`R31`) and floating-point (`F0`-`F31`) files.
//! 2. **Parsing:** Case-insensitive conversion from assembly text (`r2`, `F6`).
//! 3. **Indexing:** A dense index used to address the fixed-size register table.

use std::fmt;
use std::str::FromStr;

use crate::common::error::ParseError;

/// Number of registers in each architectural register file.
pub const REGS_PER_FILE: usize = 32;

/// Total number of architectural registers (integer plus floating-point).
pub const TOTAL_REGS: usize = REGS_PER_FILE * 2;

/// An architectural register name.
///
/// The index is always below [`REGS_PER_FILE`]; the constructors enforce it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reg {
    /// Integer register `Rn`.
    Int(u8),
    /// Floating-point register `Fn`.
    Fp(u8),
}

impl Reg {
    /// Integer register `R{idx}`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not a valid register index.
    pub const fn int(idx: u8) -> Self {
        assert!(
            (idx as usize) < REGS_PER_FILE,
            "integer register out of range"
        );
        Self::Int(idx)
    }

    /// Floating-point register `F{idx}`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not a valid register index.
    pub const fn fp(idx: u8) -> Self {
        assert!((idx as usize) < REGS_PER_FILE, "fp register out of range");
        Self::Fp(idx)
    }

    /// Returns true for floating-point registers.
    pub const fn is_fp(self) -> bool {
        matches!(self, Self::Fp(_))
    }

    /// Dense index into a table of [`TOTAL_REGS`] entries (integer file first).
    pub const fn slot(self) -> usize {
        match self {
            Self::Int(i) => i as usize,
            Self::Fp(i) => REGS_PER_FILE + i as usize,
        }
    }

    /// Inverse of [`Reg::slot`].
    pub(crate) const fn from_slot(slot: usize) -> Self {
        if slot < REGS_PER_FILE {
            Self::Int(slot as u8)
        } else {
            Self::Fp((slot - REGS_PER_FILE) as u8)
        }
    }

    /// Iterates over every architectural register, integer file first.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..TOTAL_REGS).map(Self::from_slot)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "R{i}"),
            Self::Fp(i) => write!(f, "F{i}"),
        }
    }
}

impl FromStr for Reg {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseError::BadRegister(s.to_string());
        let mut chars = s.chars();
        let file = chars.next().ok_or_else(bad)?;
        let idx: u8 = chars.as_str().parse().map_err(|_| bad())?;
        if idx as usize >= REGS_PER_FILE {
            return Err(bad());
        }
        match file.to_ascii_uppercase() {
            'R' => Ok(Self::Int(idx)),
            'F' => Ok(Self::Fp(idx)),
            _ => Err(bad()),
        }
    }
}
