//! Error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Simulation Errors:** Fatal conditions raised by the scheduling core.
//! 2. **Configuration Errors:** Malformed or inconsistent configuration.
//! 3. **Parse and Load Errors:** Problems turning program text into instructions.
//!
//! Issue-time stalls (no free station, memory ordering) are backpressure, not
//! errors, and never appear here.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions raised while building or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// An instruction can never be scheduled with the current configuration.
    #[error("opcode {opcode} cannot be scheduled: {reason}")]
    Unschedulable {
        /// Mnemonic of the offending instruction.
        opcode: String,
        /// Why no station will ever accept it.
        reason: String,
    },

    /// A load or store touched bytes outside the configured memory.
    #[error("memory access out of range: {width}-byte access at address {addr} (memory size {size})")]
    MemoryOutOfRange {
        /// Effective address of the access.
        addr: i64,
        /// Access width in bytes.
        width: usize,
        /// Configured memory size in bytes.
        size: usize,
    },

    /// The cycle ceiling was reached before every instruction retired.
    #[error("simulation did not converge within {limit} cycles")]
    CycleLimitExceeded {
        /// The configured ceiling.
        limit: u64,
    },

    /// The configuration itself is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be deserialized.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range or a latency key names no opcode.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Problems parsing a single line of assembly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line is empty after comment stripping.
    #[error("empty instruction")]
    Empty,

    /// The mnemonic is not part of the supported instruction set.
    #[error("unknown opcode `{0}`")]
    UnknownOpcode(String),

    /// The mnemonic was given the wrong number of operands.
    #[error("`{opcode}` expects {expected} operands, found {found}")]
    OperandCount {
        /// Mnemonic being parsed.
        opcode: String,
        /// Operand count the mnemonic requires.
        expected: usize,
        /// Operand count present on the line.
        found: usize,
    },

    /// A register operand is malformed or out of range.
    #[error("bad register `{0}`")]
    BadRegister(String),

    /// A register from the wrong file was used (e.g. `F2` as a base address).
    #[error("`{opcode}` cannot use register {reg} here")]
    WrongRegisterFile {
        /// Mnemonic being parsed.
        opcode: String,
        /// The offending register text.
        reg: String,
    },

    /// An immediate or offset is not a valid integer.
    #[error("bad immediate `{0}`")]
    BadImmediate(String),
}

/// Problems reading a program into an instruction list.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("could not read program {}: {source}", path.display())]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A line failed to parse.
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based source line number.
        line: usize,
        /// Underlying parse failure.
        #[source]
        source: ParseError,
    },
}
