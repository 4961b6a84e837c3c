//! # Common Data Bus
//!
//! At most one station writes its result per cycle; among finished stations
//! the oldest issue wins and the others retry the next cycle.

use std::collections::HashSet;

use pretty_assertions::assert_eq;

use crate::common::{TestContext, reg, rows};

#[test]
fn simultaneous_finishers_write_oldest_first() {
    let source = "ADD.D F0, F2, F4\nDADD R1, R2, R3\nADD.D F6, F0, F2";
    let sim = TestContext::new(source).run();

    // ADD.D and DADD both end on cycle 3; DADD loses and writes on 5.
    assert_eq!(rows(&sim), vec![[1, 2, 3, 4], [2, 3, 3, 5], [3, 5, 6, 7]]);
    assert_eq!(sim.stats().cdb_conflicts, 1);
}

#[test]
fn losing_store_still_retires_one_cycle_late() {
    let sim = TestContext::new("L.D F2, 0(R1)\nS.D F4, 8(R1)")
        .reg("R1", 16.0)
        .reg("F4", 9.0)
        .run();

    assert_eq!(rows(&sim), vec![[1, 2, 3, 4], [2, 3, 3, 5]]);
    // The store wrote memory on its last execute cycle, not at retirement.
    assert_eq!(sim.read_double(24).unwrap(), 9.0);
}

#[test]
fn one_write_per_cycle_over_a_busy_program() {
    let source = "\
        ADD.D F0, F2, F4
        SUB.D F6, F2, F4
        DADD R1, R2, R3
        DSUB R4, R2, R3
        L.D F8, 0(R5)
        ADD.D F10, F2, F4
        DADDI R6, R2, #1
        BNE R1, R2, #4";
    let sim = TestContext::new(source).reg("F2", 1.0).reg("F4", 2.0).run();

    let writes: Vec<u64> = rows(&sim).iter().map(|row| row[3]).collect();
    let distinct: HashSet<u64> = writes.iter().copied().collect();
    assert_eq!(
        distinct.len(),
        writes.len(),
        "two writes shared a cycle: {writes:?}"
    );
    assert_eq!(sim.stats().cdb_broadcasts, 7);
    assert_eq!(reg(&sim, "F10"), 3.0);
}

#[test]
fn broadcast_wakes_every_waiting_operand() {
    let sim = TestContext::new("ADD.D F2, F4, F4\nMUL.D F0, F2, F2\nSUB.D F6, F2, F4")
        .reg("F4", 1.5)
        .run();

    // Two operands of MUL.D and one of SUB.D wait on the first ADD.D.
    assert_eq!(sim.stats().operands_woken, 3);
    assert_eq!(reg(&sim, "F0"), 9.0);
    assert_eq!(reg(&sim, "F6"), 1.5);
}
