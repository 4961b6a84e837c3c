//! Flat data memory.
//!
//! A byte-addressable little-endian store with typed word and double
//! accessors. It provides:
//! 1. **Typed Access:** 4-byte signed words and 8-byte IEEE doubles.
//! 2. **Range Checking:** Any access that does not fit inside the configured
//!    size is a fatal `SimError::MemoryOutOfRange`.
//!
//! Only the execute stage touches memory: loads read and stores write on the
//! cycle their latency counter reaches zero.

use crate::common::error::SimError;
use crate::isa::opcode::MemWidth;

/// Byte-addressable data memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Creates a zero-filled memory of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true for a zero-sized memory.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reads an 8-byte double.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryOutOfRange` when any byte of the access lies outside
    /// memory.
    pub fn read_double(&self, addr: i64) -> Result<f64, SimError> {
        let range = self.range(addr, MemWidth::Double)?;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.data[range]);
        Ok(f64::from_le_bytes(bytes))
    }

    /// Writes an 8-byte double.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryOutOfRange` when any byte of the access lies outside
    /// memory.
    pub fn write_double(&mut self, addr: i64, value: f64) -> Result<(), SimError> {
        let range = self.range(addr, MemWidth::Double)?;
        self.data[range].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Reads a 4-byte signed word.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryOutOfRange` when any byte of the access lies outside
    /// memory.
    pub fn read_word(&self, addr: i64) -> Result<i32, SimError> {
        let range = self.range(addr, MemWidth::Word)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.data[range]);
        Ok(i32::from_le_bytes(bytes))
    }

    /// Writes a 4-byte signed word.
    ///
    /// # Errors
    ///
    /// `SimError::MemoryOutOfRange` when any byte of the access lies outside
    /// memory.
    pub fn write_word(&mut self, addr: i64, value: i32) -> Result<(), SimError> {
        let range = self.range(addr, MemWidth::Word)?;
        self.data[range].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Reads a value of the given width as a register value.
    ///
    /// Words are sign-extended.
    ///
    /// # Errors
    ///
    /// As for [`Memory::read_double`].
    pub fn load(&self, addr: i64, width: MemWidth) -> Result<f64, SimError> {
        match width {
            MemWidth::Double => self.read_double(addr),
            MemWidth::Word => self.read_word(addr).map(f64::from),
        }
    }

    /// Writes a register value with the given width.
    ///
    /// Words store the low 32 bits of the value truncated to an integer.
    ///
    /// # Errors
    ///
    /// As for [`Memory::write_double`].
    pub fn store(&mut self, addr: i64, width: MemWidth, value: f64) -> Result<(), SimError> {
        match width {
            MemWidth::Double => self.write_double(addr, value),
            MemWidth::Word => self.write_word(addr, value as i64 as i32),
        }
    }

    fn range(&self, addr: i64, width: MemWidth) -> Result<std::ops::Range<usize>, SimError> {
        let bytes = width.bytes();
        let out_of_range = || SimError::MemoryOutOfRange {
            addr,
            width: bytes,
            size: self.data.len(),
        };
        let start = usize::try_from(addr).map_err(|_| out_of_range())?;
        let end = start.checked_add(bytes).ok_or_else(out_of_range)?;
        if end > self.data.len() {
            return Err(out_of_range());
        }
        Ok(start..end)
    }
}
