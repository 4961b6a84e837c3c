//! Issue stage.
//!
//! Binds at most one instruction per cycle, strictly in program order, to a
//! free station of its pool. It performs the following:
//! 1. **Allocation:** Claims the lowest-indexed free station, or stalls.
//! 2. **Memory Ordering:** Stalls a load or store that may alias an older buffer.
//! 3. **Operand Capture:** Copies ready values or records producer tags.
//! 4. **Renaming:** Points the destination register at the new station.
//!
//! Stalls are backpressure: the program counter stays put and the same
//! instruction is retried next cycle.

use tracing::debug;

use crate::common::error::SimError;
use crate::common::reg::Reg;
use crate::core::pipeline::engine::{Engine, SimState};
use crate::core::pipeline::hazards::memory_order_conflict;
use crate::core::pipeline::station::{Operand, StationEntry, effective_address};
use crate::isa::instruction::{Instruction, stamp};
use crate::isa::opcode::{OpClass, Opcode};

/// Executes the issue stage for `state.cycle`.
///
/// # Arguments
///
/// * `state`   - Clock and program counter; the counter advances on success
/// * `program` - Instruction list; the issued instruction's issue cycle is stamped
/// * `engine`  - Stations, registers and statistics
///
/// # Errors
///
/// `SimError::Unschedulable` if the next opcode has no latency configured or
/// its pool has no stations at all, since it would otherwise stall forever.
pub fn issue_stage(
    state: &mut SimState,
    program: &mut [Instruction],
    engine: &mut Engine,
) -> Result<(), SimError> {
    let Some(inst) = program.get_mut(state.pc) else {
        return Ok(());
    };
    let opcode = inst.opcode();
    let kind = opcode.unit();

    let latency = check_schedulable(engine, opcode)?;

    let Some(tag) = engine.stations.find_free(kind) else {
        engine.stats.stalls_structural += 1;
        debug!(
            cycle = state.cycle,
            inst = %inst,
            pool = %kind,
            "issue stalled: no free station"
        );
        return Ok(());
    };

    let operand = |reg: Reg| Operand::capture(&engine.regs, reg);
    let j = inst.src1().map(operand);
    let (k, data) = if opcode.class() == OpClass::Store {
        (None, inst.src2().map(operand))
    } else {
        (inst.src2().map(operand), None)
    };

    if opcode.is_memory() {
        let addr = j
            .and_then(Operand::value)
            .map(|base| effective_address(base, inst.imm()));
        if let Some(hazard) = memory_order_conflict(&engine.stations, opcode, addr) {
            engine.stats.stalls_memory_order += 1;
            debug!(
                cycle = state.cycle,
                inst = %inst,
                blocker = %hazard.blocker(),
                "issue stalled: {hazard}"
            );
            return Ok(());
        }
    }

    let dest = inst.dest().filter(|_| opcode.writes_register());
    let entry = StationEntry {
        inst: state.pc,
        opcode,
        dest,
        imm: inst.imm(),
        issue_cycle: state.cycle,
        j,
        k,
        data,
        remaining: latency,
        last_dep_clear: 0,
        start_cycle: None,
        address: None,
        loaded: None,
    };
    if let Some(station) = engine.stations.get_mut(tag) {
        station.bind(entry);
    }
    if let Some(reg) = dest {
        engine.regs.rename(reg, tag);
    }

    stamp(&mut inst.timing.issue, state.cycle);
    engine.stats.instructions_issued += 1;
    debug!(cycle = state.cycle, inst = %inst, station = %tag, "issued");
    state.pc += 1;
    Ok(())
}

/// Latency of `opcode`, provided it can ever be issued.
///
/// # Errors
///
/// `SimError::Unschedulable` when the latency is missing or the pool is empty.
pub fn check_schedulable(engine: &Engine, opcode: Opcode) -> Result<u64, SimError> {
    let unschedulable = |reason: String| SimError::Unschedulable {
        opcode: opcode.mnemonic().to_string(),
        reason,
    };
    let latency = engine
        .latencies
        .of(opcode)
        .ok_or_else(|| unschedulable("no latency configured".into()))?;
    if engine.stations.len(opcode.unit()) == 0 {
        return Err(unschedulable(format!(
            "the {} pool has no stations",
            opcode.unit()
        )));
    }
    Ok(latency)
}
