//! Execute stage.
//!
//! Every busy station advances independently. It performs the following:
//! 1. **Start Cycle:** Fixed once, the first cycle every operand is ready, as
//!    `max(issue, last dependency clear) + 1`.
//! 2. **Countdown:** From the start cycle on, the latency counter drops by one per cycle.
//! 3. **Memory Access:** Loads and stores fix their effective address on the start
//!    cycle and touch memory on the cycle the counter reaches zero.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::pipeline::engine::Engine;
use crate::core::pipeline::station::{Operand, effective_address};
use crate::isa::instruction::{Instruction, stamp};
use crate::isa::opcode::OpClass;

/// Executes the execute stage for `cycle`.
///
/// # Arguments
///
/// * `cycle`   - Current cycle
/// * `program` - Instruction list; execution start and end cycles are stamped
/// * `engine`  - Stations and data memory
///
/// # Errors
///
/// `SimError::MemoryOutOfRange` when a load or store reaches the end of its
/// latency with an effective address outside memory.
pub fn execute_stage(
    cycle: u64,
    program: &mut [Instruction],
    engine: &mut Engine,
) -> Result<(), SimError> {
    let Engine { stations, memory, .. } = engine;

    for station in stations.iter_mut() {
        let tag = station.tag();
        let Some(entry) = station.entry_mut() else {
            continue;
        };
        if entry.remaining == 0 {
            continue;
        }

        let start = match entry.start_cycle {
            Some(start) => start,
            None if entry.operands_ready() => {
                let start = entry.issue_cycle.max(entry.last_dep_clear) + 1;
                entry.start_cycle = Some(start);
                trace!(cycle, station = %tag, start, "operands ready");
                start
            }
            None => continue,
        };
        if cycle < start {
            continue;
        }

        let timing = &mut program[entry.inst].timing;
        if timing.exec_start.is_none() {
            stamp(&mut timing.exec_start, cycle);
            if entry.opcode.is_memory() {
                let base = entry.j.and_then(Operand::value).unwrap_or_default();
                entry.address = Some(effective_address(base, entry.imm));
            }
        }

        entry.remaining -= 1;
        trace!(cycle, station = %tag, remaining = entry.remaining, "executing");
        if entry.remaining > 0 {
            continue;
        }

        stamp(&mut timing.exec_end, cycle);
        if let (Some(addr), Some(width)) = (entry.address, entry.opcode.mem_width()) {
            match entry.opcode.class() {
                OpClass::Load => {
                    let value = memory.load(addr, width)?;
                    entry.loaded = Some(value);
                    trace!(cycle, station = %tag, addr, value, "load complete");
                }
                OpClass::Store => {
                    let value = entry.data.and_then(Operand::value).unwrap_or_default();
                    memory.store(addr, width, value)?;
                    trace!(cycle, station = %tag, addr, value, "store complete");
                }
                _ => {}
            }
        }
    }
    Ok(())
}
