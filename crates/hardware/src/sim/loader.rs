//! Program loader.
//!
//! This module turns assembly source into a program list. It performs:
//! 1. **Line filtering:** Blank lines and lines starting with `#` or `;` are skipped.
//! 2. **Comment stripping:** Trailing `;` and `#` comments are removed.
//! 3. **Parsing:** Each remaining line becomes one instruction; failures carry the 1-based line number.
//!
//! `#` also prefixes immediates (`DADDI R1, R2, #4`), so a `#` directly
//! followed by a digit or sign is kept as part of the instruction.

use std::fs;
use std::path::Path;

use crate::common::error::LoadError;
use crate::isa::instruction::Instruction;
use crate::isa::parse::parse_instruction;

/// Parses a whole program.
///
/// # Arguments
///
/// * `text` - Assembly source, one instruction per line.
///
/// # Returns
///
/// The instructions in program order, or the first parse failure.
///
/// # Errors
///
/// `LoadError::Parse` with the 1-based source line of the first instruction
/// that fails to parse.
///
/// # Examples
///
/// ```
/// use tomasulo_core::sim::loader::parse_program;
///
/// let program = parse_program("
///     ; compute F0
///     ADD.D F6, F8, F2
///     MUL.D F0, F6, F4   ; depends on F6
/// ").unwrap();
/// assert_eq!(program.len(), 2);
/// assert_eq!(program[1].text(), "MUL.D F0, F6, F4");
/// ```
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, LoadError> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let code = strip_comment(line).trim();
            (!code.is_empty()).then_some((i + 1, code))
        })
        .map(|(line, code)| {
            let parsed = parse_instruction(code);
            parsed.map_err(|source| LoadError::Parse { line, source })
        })
        .collect()
}

/// Reads and parses a program file.
///
/// # Arguments
///
/// * `path` - Path to the assembly source.
///
/// # Errors
///
/// `LoadError::Io` when the file cannot be read, otherwise any error from
/// [`parse_program`].
pub fn load_program(path: impl AsRef<Path>) -> Result<Vec<Instruction>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_program(&text)
}

fn strip_comment(line: &str) -> &str {
    let code = line.find(';').map_or(line, |i| &line[..i]);
    let end = code
        .char_indices()
        .find(|&(i, c)| c == '#' && !starts_number(&code[i + 1..]))
        .map_or(code.len(), |(i, _)| i);
    &code[..end]
}

fn starts_number(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+'))
}
