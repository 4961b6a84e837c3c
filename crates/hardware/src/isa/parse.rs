//! Assembly text parser.
//!
//! Turns one line such as `L.D F6, 32(R2)` into an [`Instruction`]. Tokens are
//! separated by whitespace, commas and parentheses; immediates may carry a `#`
//! prefix and may be decimal or `0x` hexadecimal.

use crate::common::error::ParseError;
use crate::common::reg::Reg;
use crate::isa::instruction::Instruction;
use crate::isa::opcode::{Format, MemWidth, OpClass, Opcode};

/// Parses a single instruction line (comments must already be stripped).
///
/// # Errors
///
/// Returns a [`ParseError`] for an unknown mnemonic, a wrong operand count, a
/// malformed or wrong-file register, or an immediate that does not fit `i64`.
pub fn parse_instruction(line: &str) -> Result<Instruction, ParseError> {
    let trimmed = line.trim();
    let mut tokens = trimmed
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')'))
        .filter(|t| !t.is_empty());

    let opcode: Opcode = tokens.next().ok_or(ParseError::Empty)?.parse()?;
    let operands: Vec<&str> = tokens.collect();
    let expected = 3;
    if operands.len() != expected {
        return Err(ParseError::OperandCount {
            opcode: opcode.mnemonic().to_string(),
            expected,
            found: operands.len(),
        });
    }

    let inst = match opcode.format() {
        Format::ThreeReg => {
            let want_fp = opcode.class() != OpClass::Integer;
            Instruction::three_reg(
                opcode,
                reg_in_file(opcode, operands[0], want_fp)?,
                reg_in_file(opcode, operands[1], want_fp)?,
                reg_in_file(opcode, operands[2], want_fp)?,
            )
        }
        Format::RegImm => Instruction::reg_imm(
            opcode,
            reg_in_file(opcode, operands[0], false)?,
            reg_in_file(opcode, operands[1], false)?,
            parse_imm(operands[2])?,
        ),
        Format::Memory => {
            let want_fp = opcode.mem_width() == Some(MemWidth::Double);
            let data = reg_in_file(opcode, operands[0], want_fp)?;
            let offset = parse_imm(operands[1])?;
            let base = reg_in_file(opcode, operands[2], false)?;
            if opcode.writes_register() {
                Instruction::load(opcode, data, offset, base)
            } else {
                Instruction::store(opcode, data, offset, base)
            }
        }
        Format::Branch => Instruction::branch(
            opcode,
            reg_in_file(opcode, operands[0], false)?,
            reg_in_file(opcode, operands[1], false)?,
            parse_imm(operands[2])?,
        ),
    };
    Ok(inst.with_text(trimmed))
}

fn reg_in_file(opcode: Opcode, text: &str, want_fp: bool) -> Result<Reg, ParseError> {
    let reg: Reg = text.parse()?;
    if reg.is_fp() == want_fp {
        Ok(reg)
    } else {
        Err(ParseError::WrongRegisterFile {
            opcode: opcode.mnemonic().to_string(),
            reg: text.to_string(),
        })
    }
}

/// Parses `#imm`, `imm`, `-imm` or `0x..` into a signed integer.
///
/// At most one sign is accepted and the result must fit in an `i64`.
fn parse_imm(text: &str) -> Result<i64, ParseError> {
    let bad = || ParseError::BadImmediate(text.to_string());
    let body = text.strip_prefix('#').unwrap_or(text);
    let (negative, digits) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body.strip_prefix('+').unwrap_or(body)),
    };
    if digits.starts_with(['+', '-']) {
        return Err(bad());
    }
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        if hex.starts_with(['+', '-']) {
            return Err(bad());
        }
        i128::from_str_radix(hex, 16).map_err(|_| bad())?
    } else {
        digits.parse::<i128>().map_err(|_| bad())?
    };
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| bad())
}
