//! Simulation statistics collection and reporting.
//!
//! This module tracks scheduling metrics for a run. It provides:
//! 1. **Cycles and IPC:** Total cycles, issued and retired instructions, and derived metrics.
//! 2. **Instruction mix:** Retired counts by class (integer, FP add, FP mul, load, store, branch).
//! 3. **Stalls:** Issue cycles lost to full pools and to memory ordering.
//! 4. **Common data bus:** Broadcasts, arbitration losses, woken operands and suppressed commits.

use std::time::Instant;

use crate::isa::opcode::OpClass;

/// Simulation statistics for one run.
///
/// Counters only ever increase; none of them influence scheduling.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Instructions placed into a station.
    pub instructions_issued: u64,
    /// Instructions that completed write-result.
    pub instructions_retired: u64,

    /// Retired integer ALU instructions.
    pub inst_int: u64,
    /// Retired FP add/subtract instructions.
    pub inst_fp_add: u64,
    /// Retired FP multiply/divide instructions.
    pub inst_fp_mul: u64,
    /// Retired loads.
    pub inst_load: u64,
    /// Retired stores.
    pub inst_store: u64,
    /// Retired branches.
    pub inst_branch: u64,
    /// Retired branches whose condition held.
    pub branches_taken: u64,

    /// Issue cycles stalled because the target pool was full.
    pub stalls_structural: u64,
    /// Issue cycles stalled behind an older load or store that may alias.
    pub stalls_memory_order: u64,

    /// Results placed on the common data bus.
    pub cdb_broadcasts: u64,
    /// Finished stations that lost bus arbitration, summed over cycles.
    pub cdb_conflicts: u64,
    /// Source operands resolved by a broadcast.
    pub operands_woken: u64,
    /// Register commits skipped because a younger writer renamed the register.
    pub waw_suppressed: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_issued: 0,
            instructions_retired: 0,
            inst_int: 0,
            inst_fp_add: 0,
            inst_fp_mul: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            branches_taken: 0,
            stalls_structural: 0,
            stalls_memory_order: 0,
            cdb_broadcasts: 0,
            cdb_conflicts: 0,
            operands_woken: 0,
            waw_suppressed: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"stalls"`, `"instruction_mix"`, `"cdb"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "stalls", "instruction_mix", "cdb"];

impl SimStats {
    /// Counts one retired instruction of the given class.
    pub const fn record_retire(&mut self, class: OpClass) {
        self.instructions_retired += 1;
        match class {
            OpClass::Integer => self.inst_int += 1,
            OpClass::FpAdd => self.inst_fp_add += 1,
            OpClass::FpMul => self.inst_fp_mul += 1,
            OpClass::Load => self.inst_load += 1,
            OpClass::Store => self.inst_store += 1,
            OpClass::Branch => self.inst_branch += 1,
        }
    }

    /// Retired instructions per cycle, or 0 before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        if want("summary") {
            println!("\n==========================================================");
            println!("TOMASULO SCHEDULER STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_issued               {}", self.instructions_issued);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", cyc / instr);
            println!("----------------------------------------------------------");
        }
        if want("stalls") {
            println!("ISSUE STALLS");
            println!(
                "  stalls.structural      {} ({:.2}%)",
                self.stalls_structural,
                pct(self.stalls_structural, cyc)
            );
            println!(
                "  stalls.memory_order    {} ({:.2}%)",
                self.stalls_memory_order,
                pct(self.stalls_memory_order, cyc)
            );
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, count) in [
                ("op.int", self.inst_int),
                ("op.fp_add", self.inst_fp_add),
                ("op.fp_mul", self.inst_fp_mul),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
            ] {
                println!("  {name:<22} {count} ({:.2}%)", pct(count, instr));
            }
            println!("  branch.taken           {}", self.branches_taken);
            println!("----------------------------------------------------------");
        }
        if want("cdb") {
            println!("COMMON DATA BUS");
            println!(
                "  cdb.broadcasts         {} ({:.2}% of cycles)",
                self.cdb_broadcasts,
                pct(self.cdb_broadcasts, cyc)
            );
            println!("  cdb.conflicts          {}", self.cdb_conflicts);
            println!("  cdb.operands_woken     {}", self.operands_woken);
            println!("  cdb.waw_suppressed     {}", self.waw_suppressed);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
