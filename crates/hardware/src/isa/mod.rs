//! Instruction set definitions.
//!
//! This module covers everything the scheduler needs to know about
//! instructions:
//! 1. **Opcodes:** Mnemonics, their closed behavioural class and unit pool.
//! 2. **Instructions:** Immutable operand records plus timing milestones.
//! 3. **Parsing:** Conversion from assembly text.

/// Instruction records and timing milestones.
pub mod instruction;

/// Opcodes, classes and unit kinds.
pub mod opcode;

/// Assembly text parser.
pub mod parse;

pub use instruction::{Instruction, Timing};
pub use opcode::{MemWidth, OpClass, Opcode, UnitKind};
pub use parse::parse_instruction;
