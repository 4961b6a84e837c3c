//! Memory-ordering hazard detection.
//!
//! Loads and stores may complete out of order with respect to each other, so
//! issue refuses a memory instruction whose access could alias an older one
//! still in flight. It provides:
//! 1. **Load vs. Store:** A load waits behind every busy store buffer it may alias.
//! 2. **Store vs. Load/Store:** A store waits behind every busy load or store buffer it may alias.
//! 3. **Unknown Addresses:** An address that cannot be computed yet is assumed to alias.
//!
//! Register hazards are handled by renaming and never stall issue.

use std::fmt;

use crate::core::pipeline::pool::StationPool;
use crate::core::pipeline::station::StationTag;
use crate::isa::opcode::{MemWidth, OpClass, Opcode, UnitKind};

/// Why a memory instruction cannot issue yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryHazard {
    /// One side's address is not known yet.
    UnresolvedAddress(StationTag),
    /// Both addresses are known and their byte ranges overlap.
    Alias(StationTag),
}

impl MemoryHazard {
    /// Station the new instruction is ordered behind.
    pub const fn blocker(self) -> StationTag {
        match self {
            Self::UnresolvedAddress(tag) | Self::Alias(tag) => tag,
        }
    }
}

impl fmt::Display for MemoryHazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedAddress(tag) => write!(f, "address unresolved against {tag}"),
            Self::Alias(tag) => write!(f, "address aliases {tag}"),
        }
    }
}

/// Checks whether a memory instruction may issue against the buffers in flight.
///
/// # Arguments
///
/// * `pool`   - Current station state
/// * `opcode` - Opcode about to issue
/// * `addr`   - Its effective address, if the base register value is already known
///
/// # Returns
///
/// The first conflicting buffer in scan order, or `None` if issue may proceed.
/// Non-memory opcodes never conflict.
pub fn memory_order_conflict(
    pool: &StationPool,
    opcode: Opcode,
    addr: Option<i64>,
) -> Option<MemoryHazard> {
    let width = opcode.mem_width()?.bytes();
    let against: &[UnitKind] = match opcode.class() {
        OpClass::Load => &[UnitKind::Store],
        OpClass::Store => &[UnitKind::Load, UnitKind::Store],
        _ => return None,
    };

    for &kind in against {
        for station in pool.of_kind(kind) {
            let Some(entry) = station.entry() else {
                continue;
            };
            let tag = station.tag();
            let (Some(mine), Some(theirs)) = (addr, entry.known_address()) else {
                return Some(MemoryHazard::UnresolvedAddress(tag));
            };
            let their_width = entry.opcode.mem_width().map_or(0, MemWidth::bytes);
            if overlaps(mine, width, theirs, their_width) {
                return Some(MemoryHazard::Alias(tag));
            }
        }
    }
    None
}

/// True when `[a, a + a_len)` and `[b, b + b_len)` share a byte.
fn overlaps(a: i64, a_len: usize, b: i64, b_len: usize) -> bool {
    let a_end = i128::from(a) + a_len as i128;
    let b_end = i128::from(b) + b_len as i128;
    i128::from(a) < b_end && i128::from(b) < a_end
}
