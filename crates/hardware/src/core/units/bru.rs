//! Branch resolution unit.
//!
//! Branches are evaluated for statistics only. Issue is strictly in program
//! order and a taken branch never redirects it.

use crate::isa::opcode::Opcode;

/// Evaluates branch conditions.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Whether the branch condition holds for source values `a` and `b`.
    ///
    /// Both values are compared as 64-bit integers.
    pub fn taken(op: Opcode, a: f64, b: f64) -> bool {
        let equal = (a as i64) == (b as i64);
        match op {
            Opcode::Beq => equal,
            Opcode::Bne => !equal,
            _ => false,
        }
    }
}
