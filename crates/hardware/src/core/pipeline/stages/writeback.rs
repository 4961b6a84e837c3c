//! Write-Result stage.
//!
//! Retires at most one instruction per cycle through the common data bus.
//! It performs the following:
//! 1. **Arbitration:** The finished station with the oldest issue cycle wins the bus.
//! 2. **Broadcast:** Result-producing instructions wake every operand waiting on the winner.
//! 3. **Commit:** The destination register takes the value only if the winner is still
//!    its producer; a younger writer keeps ownership otherwise.
//! 4. **Release:** The station returns to idle and the write-result cycle is stamped.

use tracing::debug;

use crate::core::pipeline::cdb;
use crate::core::pipeline::engine::Engine;
use crate::core::pipeline::station::{Operand, Station, StationEntry};
use crate::core::units::{self, Bru};
use crate::isa::instruction::{Instruction, stamp};
use crate::isa::opcode::OpClass;

/// Executes the write-result stage for `cycle`.
///
/// # Arguments
///
/// * `cycle`   - Current cycle
/// * `program` - Instruction list; the retiring instruction's write-result cycle is stamped
/// * `engine`  - Stations, registers and statistics
pub fn writeback_stage(cycle: u64, program: &mut [Instruction], engine: &mut Engine) {
    let Some(grant) = cdb::arbitrate(&engine.stations) else {
        return;
    };
    let losers = grant.contenders.saturating_sub(1) as u64;
    engine.stats.cdb_conflicts += losers;
    if losers > 0 {
        debug!(cycle, winner = %grant.tag, losers, "cdb contention");
    }

    let Some(entry) = engine.stations.get_mut(grant.tag).and_then(Station::clear) else {
        return;
    };
    let class = entry.opcode.class();

    match class {
        OpClass::Store => {}
        OpClass::Branch => {
            let (a, b) = (source(entry.j), source(entry.k));
            if Bru::taken(entry.opcode, a, b) {
                engine.stats.branches_taken += 1;
            }
        }
        _ => {
            let value = result(&entry);
            let woken = cdb::broadcast(&mut engine.stations, grant.tag, value, cycle);
            engine.stats.cdb_broadcasts += 1;
            engine.stats.operands_woken += woken as u64;
            debug!(cycle, station = %grant.tag, value, woken, "cdb broadcast");

            match entry.dest {
                Some(reg) if !engine.regs.commit(reg, grant.tag, value) => {
                    engine.stats.waw_suppressed += 1;
                    debug!(cycle, station = %grant.tag, %reg, "commit suppressed by younger writer");
                }
                _ => {}
            }
        }
    }

    if let Some(inst) = program.get_mut(entry.inst) {
        stamp(&mut inst.timing.write_result, cycle);
    }
    engine.stats.record_retire(class);
}

/// Value a finished station puts on the bus.
fn result(entry: &StationEntry) -> f64 {
    if entry.opcode.class() == OpClass::Load {
        return entry.loaded.unwrap_or_default();
    }
    units::compute(
        entry.opcode,
        source(entry.j),
        entry.k.and_then(Operand::value),
        entry.imm,
    )
    .unwrap_or_default()
}

fn source(operand: Option<Operand>) -> f64 {
    operand.and_then(Operand::value).unwrap_or_default()
}
