//! Execution units.
//!
//! Pure value computation for the instructions a station executes. Timing
//! lives in the execute stage; these functions only turn operand values
//! into results.

/// Integer arithmetic unit.
pub mod alu;

/// Branch resolution unit.
pub mod bru;

/// Floating-point add/multiply unit.
pub mod fpu;

pub use self::alu::Alu;
pub use self::bru::Bru;
pub use self::fpu::Fpu;

use crate::isa::opcode::{OpClass, Opcode};

/// Computes the result of an arithmetic opcode.
///
/// `j` and `k` are the station's source values (`k` absent for immediate
/// forms) and `imm` the encoded immediate. Returns `None` for memory and
/// branch opcodes, which produce no arithmetic result.
pub fn compute(opcode: Opcode, j: f64, k: Option<f64>, imm: i64) -> Option<f64> {
    match opcode.class() {
        OpClass::Integer => Some(Alu::execute(opcode, j, k, imm)),
        OpClass::FpAdd | OpClass::FpMul => k.map(|k| Fpu::execute(opcode, j, k)),
        OpClass::Load | OpClass::Store | OpClass::Branch => None,
    }
}
