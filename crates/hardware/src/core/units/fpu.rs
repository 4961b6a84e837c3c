//! Floating-point unit.

use crate::isa::opcode::Opcode;

/// Double-precision add/subtract/multiply/divide.
#[derive(Debug)]
pub struct Fpu;

impl Fpu {
    /// Executes a floating-point operation on two doubles.
    ///
    /// Division by zero follows IEEE 754 (infinity or NaN) and is not an
    /// error.
    pub fn execute(op: Opcode, a: f64, b: f64) -> f64 {
        match op {
            Opcode::AddD => a + b,
            Opcode::SubD => a - b,
            Opcode::MulD => a * b,
            Opcode::DivD => a / b,
            _ => 0.0,
        }
    }
}
