//! # Statistics
//!
//! Counters accumulated over complete runs.

use pretty_assertions::assert_eq;

use tomasulo_core::stats::STATS_SECTIONS;

use crate::common::TestContext;

#[test]
fn add_mul_counters() {
    let sim = TestContext::new("ADD.D F6, F8, F2\nMUL.D F0, F6, F4").run();
    let stats = sim.stats();

    assert_eq!(stats.cycles, 15);
    assert_eq!(stats.instructions_issued, 2);
    assert_eq!(stats.instructions_retired, 2);
    assert_eq!(stats.inst_fp_add, 1);
    assert_eq!(stats.inst_fp_mul, 1);
    assert_eq!(stats.cdb_broadcasts, 2);
    assert_eq!(stats.operands_woken, 1);
    assert_eq!(stats.cdb_conflicts, 0);
    assert!((stats.ipc() - 2.0 / 15.0).abs() < 1e-12);
}

#[test]
fn instruction_mix_covers_every_class() {
    let source = "\
        DADD R1, R2, R3
        ADD.D F0, F2, F4
        MUL.D F6, F2, F4
        L.D F8, 0(R4)
        S.D F8, 8(R4)
        BNE R2, R3, #4";
    let sim = TestContext::new(source).run();
    let stats = sim.stats();

    assert_eq!(
        [
            stats.inst_int,
            stats.inst_fp_add,
            stats.inst_fp_mul,
            stats.inst_load,
            stats.inst_store,
            stats.inst_branch
        ],
        [1, 1, 1, 1, 1, 1]
    );
    assert_eq!(stats.instructions_retired, 6);
    // BNE compares equal registers.
    assert_eq!(stats.branches_taken, 0);
    // Stores and branches take the bus without broadcasting.
    assert_eq!(stats.cdb_broadcasts, 4);
}

#[test]
fn empty_run_has_zero_ipc() {
    let sim = TestContext::new("").run();

    assert_eq!(sim.stats().cycles, 0);
    assert_eq!(sim.stats().ipc(), 0.0);
}

#[test]
fn every_section_prints() {
    let sim = TestContext::new("ADD.D F0, F2, F4").run();

    for section in STATS_SECTIONS {
        sim.stats().print_sections(&[section.to_string()]);
    }
    sim.stats().print();
}
