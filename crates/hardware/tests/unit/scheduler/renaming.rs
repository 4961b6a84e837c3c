//! # Register Renaming
//!
//! Operands capture either a value or the producing station at issue, so
//! write-after-read and write-after-write never stall; only the youngest
//! writer of a register commits to the architectural file.

use pretty_assertions::assert_eq;

use crate::common::{TestContext, reg, rows};

#[test]
fn waw_older_writer_does_not_overwrite_younger() {
    let sim = TestContext::new("MUL.D F0, F2, F4\nADD.D F0, F2, F4\nADD.D F6, F0, F0")
        .reg("F2", 3.0)
        .reg("F4", 4.0)
        .run();

    assert_eq!(rows(&sim), vec![[1, 2, 11, 12], [2, 3, 4, 5], [3, 6, 7, 8]]);
    // MUL.D broadcasts last but F0 keeps the ADD.D result.
    assert_eq!(reg(&sim, "F0"), 7.0);
    assert_eq!(reg(&sim, "F6"), 14.0);
    assert_eq!(sim.stats().waw_suppressed, 1);
}

#[test]
fn war_reader_keeps_value_captured_at_issue() {
    let sim = TestContext::new("MUL.D F0, F2, F4\nADD.D F2, F8, F8")
        .reg("F2", 6.0)
        .reg("F4", 3.0)
        .reg("F8", 1.0)
        .run();

    // ADD.D overwrites F2 long before MUL.D starts using it.
    assert_eq!(rows(&sim), vec![[1, 2, 11, 12], [2, 3, 4, 5]]);
    assert_eq!(reg(&sim, "F0"), 18.0);
    assert_eq!(reg(&sim, "F2"), 2.0);
}

#[test]
fn war_reader_waiting_on_tag_still_gets_old_producer() {
    let sim = TestContext::new("ADD.D F2, F4, F4\nMUL.D F0, F2, F4\nADD.D F2, F8, F8")
        .reg("F4", 3.0)
        .reg("F8", 1.0)
        .run();

    assert_eq!(rows(&sim), vec![[1, 2, 3, 4], [2, 5, 14, 15], [3, 4, 5, 6]]);
    assert_eq!(reg(&sim, "F0"), 18.0);
    assert_eq!(reg(&sim, "F2"), 2.0);
    assert_eq!(sim.stats().waw_suppressed, 1);
}

#[test]
fn self_dependency_reads_previous_value() {
    let sim = TestContext::new("ADD.D F2, F2, F2\nADD.D F2, F2, F2")
        .reg("F2", 1.5)
        .run();

    assert_eq!(rows(&sim), vec![[1, 2, 3, 4], [2, 5, 6, 7]]);
    assert_eq!(reg(&sim, "F2"), 6.0);
}

#[test]
fn integer_and_fp_files_are_separate() {
    let sim = TestContext::new("DADDI R2, R0, #7\nADD.D F2, F4, F4")
        .reg("F4", 0.5)
        .run();

    // R2 and F2 share an index but never a dependency.
    assert_eq!(rows(&sim), vec![[1, 2, 2, 3], [2, 3, 4, 5]]);
    assert_eq!(reg(&sim, "R2"), 7.0);
    assert_eq!(reg(&sim, "F2"), 1.0);
}

#[test]
fn unwritten_registers_read_zero() {
    let sim = TestContext::new("ADD.D F0, F2, F4\nDSUB R1, R2, R3").run();

    assert_eq!(reg(&sim, "F0"), 0.0);
    assert_eq!(reg(&sim, "R1"), 0.0);
}
