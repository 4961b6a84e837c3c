//! # Timing Scenarios
//!
//! Cycle-exact instruction-status tables for small programs under the default
//! configuration, plus completion detection.

use pretty_assertions::assert_eq;

use tomasulo_core::sim::loader::load_program;
use tomasulo_core::{Config, Simulator};

use crate::common::{TestContext, reg, rows};

// ══════════════════════════════════════════════════════════
// 1. Dependent Chains
// ══════════════════════════════════════════════════════════

#[test]
fn add_then_dependent_mul() {
    let sim = TestContext::new("ADD.D F6, F8, F2\nMUL.D F0, F6, F4").run();

    assert_eq!(rows(&sim), vec![[1, 2, 3, 4], [2, 5, 14, 15]]);
    assert_eq!(sim.cycle(), 15);
}

#[test]
fn dependent_starts_the_cycle_after_the_broadcast() {
    let sim = TestContext::new("ADD.D F6, F8, F2\nMUL.D F0, F6, F4").run();

    let producer = sim.instructions()[0].timing();
    let consumer = sim.instructions()[1].timing();
    assert_eq!(consumer.exec_start, producer.write_result.map(|c| c + 1));
}

#[test]
fn independent_instructions_overlap() {
    let source = "ADD.D F0, F2, F4\nSUB.D F6, F8, F10\nMUL.D F12, F14, F16";
    let sim = TestContext::new(source).run();

    assert_eq!(rows(&sim), vec![[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 13, 14]]);
}

#[test]
fn integer_results_feed_a_load_address() {
    let sim = TestContext::new("DADDI R1, R0, #24\nL.D F2, 0(R1)")
        .mem(24, 1.5)
        .run();

    assert_eq!(rows(&sim), vec![[1, 2, 2, 3], [2, 4, 5, 6]]);
    assert_eq!(reg(&sim, "R1"), 24.0);
    assert_eq!(reg(&sim, "F2"), 1.5);
}

// ══════════════════════════════════════════════════════════
// 2. Structural Stalls
// ══════════════════════════════════════════════════════════

#[test]
fn full_pool_stalls_issue_until_a_station_frees() {
    let sim = TestContext::new("MUL.D F0, F2, F4\nMUL.D F6, F2, F4")
        .units(|u| u.fp_mul = 1)
        .run();

    // The second MUL.D issues on the cycle the first one frees its station.
    assert_eq!(rows(&sim), vec![[1, 2, 11, 12], [12, 13, 22, 23]]);
    assert_eq!(sim.stats().stalls_structural, 10);
}

#[test]
fn stalled_instruction_blocks_later_issue() {
    let sim = TestContext::new("MUL.D F0, F2, F4\nMUL.D F6, F2, F4\nADD.D F8, F2, F4")
        .units(|u| u.fp_mul = 1)
        .run();

    // In-order issue: ADD.D waits behind the stalled MUL.D even though an
    // add station is free.
    let add = sim.instructions()[2].timing();
    assert_eq!(add.issue, Some(13));
}

// ══════════════════════════════════════════════════════════
// 3. Branches
// ══════════════════════════════════════════════════════════

#[test]
fn branch_occupies_an_int_station_and_never_redirects() {
    let sim = TestContext::new("BEQ R1, R2, #8\nADD.D F0, F2, F4")
        .reg("F2", 1.0)
        .reg("F4", 2.0)
        .run();

    assert_eq!(rows(&sim), vec![[1, 2, 2, 3], [2, 3, 4, 5]]);
    assert_eq!(reg(&sim, "F0"), 3.0);
    assert_eq!(sim.stats().inst_branch, 1);
    assert_eq!(sim.stats().branches_taken, 1);
}

// ══════════════════════════════════════════════════════════
// 4. Multi-instruction Programs
// ══════════════════════════════════════════════════════════

#[test]
fn daxpy_demo_program() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/daxpy.s");
    let program = load_program(path).unwrap();
    let mut sim = Simulator::new(program, Config::default()).unwrap();
    sim.set_register("R2".parse().unwrap(), 64.0);
    sim.set_register("R3".parse().unwrap(), 128.0);
    sim.set_register("F0".parse().unwrap(), 2.0);
    for (addr, value) in [(64, 1.0), (72, 2.0), (128, 10.0), (136, 20.0)] {
        sim.write_double(addr, value).unwrap();
    }

    let summary = sim.run().unwrap();

    assert_eq!(summary.cycles, 28);
    assert_eq!(
        rows(&sim),
        vec![
            [1, 2, 3, 4],
            [2, 5, 14, 15],
            [3, 4, 5, 6],
            [4, 16, 17, 18],
            [6, 19, 19, 20],
            [7, 8, 8, 9],
            [8, 9, 9, 10],
            [9, 10, 11, 12],
            [10, 13, 22, 23],
            [11, 12, 13, 14],
            [12, 24, 25, 26],
            [14, 27, 27, 28],
        ]
    );
    assert_eq!(sim.read_double(128).unwrap(), 12.0);
    assert_eq!(sim.read_double(136).unwrap(), 24.0);
    assert_eq!(reg(&sim, "R2"), 72.0);
    assert_eq!(reg(&sim, "R3"), 136.0);
    assert_eq!(reg(&sim, "F6"), 24.0);
}

// ══════════════════════════════════════════════════════════
// 5. Completion
// ══════════════════════════════════════════════════════════

#[test]
fn empty_program_completes_at_cycle_zero() {
    let sim = TestContext::new("").run();

    assert_eq!(sim.cycle(), 0);
    assert!(sim.instructions().is_empty());
}

#[test]
fn incomplete_until_last_write() {
    let mut sim = TestContext::new("ADD.D F6, F8, F2\nMUL.D F0, F6, F4")
        .build()
        .unwrap();

    for _ in 0..14 {
        sim.tick().unwrap();
        assert!(!sim.is_complete(), "complete early at {}", sim.cycle());
    }
    sim.tick().unwrap();
    assert!(sim.is_complete());
    assert_eq!(sim.cycle(), 15);
}

#[test]
fn every_milestone_is_stamped_once_retired() {
    let source = "L.D F2, 0(R1)\nMUL.D F4, F2, F0\nS.D F4, 8(R1)";
    let sim = TestContext::new(source).run();

    for inst in sim.instructions() {
        let t = inst.timing();
        assert!(t.is_retired(), "{} never retired", inst.text());
        for milestone in [t.issue, t.exec_start, t.exec_end] {
            assert!(milestone.is_some(), "{}: {t:?}", inst.text());
        }
    }
}
