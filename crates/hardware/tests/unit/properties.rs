//! # Scheduling Properties
//!
//! Randomized programs over every opcode, checked for:
//! - **Equivalence:** Final registers and memory match in-order execution.
//! - **Timing Order:** `issue < start <= end < write`, execution spans the
//!   latency, issue is in program order and no two results share a cycle.
//! - **Determinism:** Identical inputs give identical timing tables.

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use tomasulo_core::config::UnitConfig;
use tomasulo_core::core::pipeline::station::effective_address;
use tomasulo_core::core::units::compute;
use tomasulo_core::isa::opcode::OpClass;
use tomasulo_core::memory::Memory;
use tomasulo_core::{Instruction, Reg, Simulator};

use crate::common::TestContext;

const MEMORY_SIZE: usize = 4096;
const SEEDED_BYTES: i64 = 256;

// ══════════════════════════════════════════════════════════
// Program Generation
// ══════════════════════════════════════════════════════════

fn fp_reg() -> impl Strategy<Value = String> {
    (0u8..8).prop_map(|i| format!("F{i}"))
}

/// R4-R7 hold data; R1-R3 are only ever written with in-range addresses.
fn int_reg() -> impl Strategy<Value = String> {
    (4u8..8).prop_map(|i| format!("R{i}"))
}

fn base_reg() -> impl Strategy<Value = String> {
    (1u8..4).prop_map(|i| format!("R{i}"))
}

fn offset() -> impl Strategy<Value = i64> {
    (0i64..8).prop_map(|i| i * 8)
}

fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        (
            prop::sample::select(vec!["ADD.D", "SUB.D", "MUL.D", "DIV.D"]),
            fp_reg(),
            fp_reg(),
            fp_reg()
        )
            .prop_map(|(op, d, a, b)| format!("{op} {d}, {a}, {b}")),
        (
            prop::sample::select(vec!["DADD", "DSUB"]),
            int_reg(),
            int_reg(),
            int_reg()
        )
            .prop_map(|(op, d, a, b)| format!("{op} {d}, {a}, {b}")),
        (int_reg(), int_reg(), -8i64..=8)
            .prop_map(|(d, a, imm)| format!("DADDI {d}, {a}, #{imm}")),
        (base_reg(), 0i64..=24)
            .prop_map(|(b, k)| format!("DADDI {b}, R0, #{}", k * 8)),
        (fp_reg(), offset(), base_reg())
            .prop_map(|(d, o, b)| format!("L.D {d}, {o}({b})")),
        (fp_reg(), offset(), base_reg())
            .prop_map(|(s, o, b)| format!("S.D {s}, {o}({b})")),
        (int_reg(), offset(), base_reg())
            .prop_map(|(d, o, b)| format!("L.W {d}, {}({b})", o + 4)),
        (int_reg(), offset(), base_reg())
            .prop_map(|(s, o, b)| format!("S.W {s}, {o}({b})")),
        (prop::sample::select(vec!["BEQ", "BNE"]), int_reg(), int_reg())
            .prop_map(|(op, a, b)| format!("{op} {a}, {b}, #4")),
    ]
}

fn program() -> impl Strategy<Value = String> {
    let lines = prop::collection::vec(line(), 0..24);
    lines.prop_map(|lines| lines.join("\n"))
}

fn pool_sizes() -> impl Strategy<Value = UnitConfig> {
    (1usize..=3, 1usize..=3, 1usize..=3, 1usize..=3, 1usize..=3).prop_map(
        |(int, fp_add, fp_mul, load, store)| UnitConfig {
            int,
            fp_add,
            fp_mul,
            load,
            store,
        },
    )
}

// ══════════════════════════════════════════════════════════
// Fixtures
// ══════════════════════════════════════════════════════════

fn initial_registers() -> Vec<(Reg, f64)> {
    let mut regs: Vec<(Reg, f64)> = (0..8u8)
        .map(|i| (Reg::fp(i), f64::from(i) * 0.75 - 2.0))
        .collect();
    regs.extend([
        (Reg::int(1), 0.0),
        (Reg::int(2), 64.0),
        (Reg::int(3), 128.0),
        (Reg::int(4), 3.0),
        (Reg::int(5), -2.0),
        (Reg::int(6), 7.0),
    ]);
    regs
}

fn initial_memory() -> impl Iterator<Item = (i64, f64)> {
    (0..SEEDED_BYTES)
        .step_by(8)
        .map(|addr| (addr, addr as f64 / 8.0 + 0.5))
}

fn simulate(source: &str, pools: UnitConfig, latencies: &[(&str, u64)]) -> Simulator {
    let mut ctx = TestContext::new(source)
        .units(|u| *u = pools)
        .memory_size(MEMORY_SIZE)
        .max_cycles(100_000);
    for &(mnemonic, cycles) in latencies {
        ctx = ctx.latency(mnemonic, cycles);
    }
    let mut sim = ctx.build().unwrap();
    for (reg, value) in initial_registers() {
        sim.set_register(reg, value);
    }
    for (addr, value) in initial_memory() {
        sim.write_double(addr, value).unwrap();
    }
    let _summary = sim.run().unwrap();
    sim
}

/// Executes `program` one instruction at a time with no overlap.
fn run_in_order(program: &[Instruction]) -> (Vec<f64>, Memory) {
    let mut regs = vec![0.0; Reg::all().count()];
    for (reg, value) in initial_registers() {
        regs[reg.slot()] = value;
    }
    let mut memory = Memory::new(MEMORY_SIZE);
    for (addr, value) in initial_memory() {
        memory.write_double(addr, value).unwrap();
    }

    for inst in program {
        let op = inst.opcode();
        let j = inst.src1().map_or(0.0, |r| regs[r.slot()]);
        let k = inst.src2().map(|r| regs[r.slot()]);
        let result = match op.class() {
            OpClass::Load => {
                let width = op.mem_width().unwrap();
                let addr = effective_address(j, inst.imm());
                Some(memory.load(addr, width).unwrap())
            }
            OpClass::Store => {
                let width = op.mem_width().unwrap();
                let value = k.unwrap();
                memory
                    .store(effective_address(j, inst.imm()), width, value)
                    .unwrap();
                None
            }
            OpClass::Branch => None,
            _ => compute(op, j, k, inst.imm()),
        };
        if let (Some(dest), Some(value)) = (inst.dest(), result) {
            regs[dest.slot()] = value;
        }
    }
    (regs, memory)
}

fn check_timing(sim: &Simulator) -> Result<(), TestCaseError> {
    let mut last_issue = 0;
    let mut writes = HashSet::new();
    for inst in sim.instructions() {
        let [issue, start, end, write] = inst.timing().as_row();
        let latency = sim.config().latencies.of(inst.opcode()).unwrap();

        prop_assert!(issue > last_issue, "{} issued out of order", inst.text());
        prop_assert!(issue < start, "{}: {:?}", inst.text(), inst.timing());
        prop_assert!(start <= end, "{}: {:?}", inst.text(), inst.timing());
        prop_assert!(end < write, "{}: {:?}", inst.text(), inst.timing());
        prop_assert_eq!(end - start + 1, latency);
        prop_assert!(writes.insert(write), "two results on cycle {}", write);
        last_issue = issue;
    }
    prop_assert_eq!(sim.cycle(), writes.iter().copied().max().unwrap_or(0));
    Ok(())
}

// ══════════════════════════════════════════════════════════
// Properties
// ══════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn matches_in_order_execution(source in program(), pools in pool_sizes()) {
        let sim = simulate(&source, pools, &[]);
        let (regs, memory) = run_in_order(sim.instructions());

        for reg in Reg::all() {
            prop_assert_eq!(
                sim.register(reg).to_bits(),
                regs[reg.slot()].to_bits(),
                "{} differs", reg
            );
        }
        for addr in (0..SEEDED_BYTES + 64).step_by(8) {
            prop_assert_eq!(
                sim.read_double(addr).unwrap().to_bits(),
                memory.read_double(addr).unwrap().to_bits(),
                "memory at {} differs", addr
            );
        }
    }

    #[test]
    fn timing_milestones_are_ordered(
        source in program(),
        pools in pool_sizes(),
        add in 1u64..=6,
        mul in 1u64..=12,
        load in 1u64..=4
    ) {
        let latencies = [("ADD.D", add), ("MUL.D", mul), ("L.D", load)];
        let sim = simulate(&source, pools, &latencies);
        check_timing(&sim)?;
    }

    #[test]
    fn runs_are_deterministic(source in program(), pools in pool_sizes()) {
        let first = simulate(&source, pools, &[]);
        let second = simulate(&source, pools, &[]);

        prop_assert_eq!(first.cycle(), second.cycle());
        prop_assert_eq!(first.instructions(), second.instructions());
        prop_assert_eq!(first.stats().cdb_conflicts, second.stats().cdb_conflicts);
    }
}
