//! Integer ALU.
//!
//! Register values are stored as doubles; integer operations truncate their
//! operands to 64-bit signed integers and wrap on overflow, like the
//! hardware adders they model.

use crate::isa::opcode::Opcode;

/// Integer arithmetic unit.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer operation.
    ///
    /// # Arguments
    ///
    /// * `op`  - `DADD`, `DADDI` or `DSUB`
    /// * `a`   - First source value
    /// * `b`   - Second source value (absent for `DADDI`)
    /// * `imm` - Immediate for `DADDI`
    ///
    /// # Returns
    ///
    /// The wrapped 64-bit result, widened back to a register value.
    ///
    /// # Examples
    ///
    /// ```
    /// use tomasulo_core::core::units::alu::Alu;
    /// use tomasulo_core::isa::Opcode;
    ///
    /// assert_eq!(Alu::execute(Opcode::Dadd, 40.0, Some(2.0), 0), 42.0);
    /// assert_eq!(Alu::execute(Opcode::Daddi, 5.9, None, -1), 4.0);
    /// ```
    pub fn execute(op: Opcode, a: f64, b: Option<f64>, imm: i64) -> f64 {
        let a = a as i64;
        let b = b.map_or(0, |b| b as i64);
        let result = match op {
            Opcode::Dadd => a.wrapping_add(b),
            Opcode::Daddi => a.wrapping_add(imm),
            Opcode::Dsub => a.wrapping_sub(b),
            _ => 0,
        };
        result as f64
    }
}
