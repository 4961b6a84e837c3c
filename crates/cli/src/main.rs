//! Tomasulo scheduling simulator CLI.
//!
//! This binary runs an assembly program through the scheduler. It performs:
//! 1. **Setup:** Loads the program and an optional JSON configuration, then seeds registers and memory.
//! 2. **Run:** Drives the simulator to completion, optionally printing the station table every cycle.
//! 3. **Report:** Prints the instruction-status table, non-zero registers and optional statistics.
//!
//! Log events go to stderr and are filtered with `RUST_LOG` (e.g. `RUST_LOG=tomasulo_core=debug`).

use std::path::PathBuf;
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tomasulo_core::config::Config;
use tomasulo_core::sim::loader;
use tomasulo_core::sim::report::{format_stations, format_timing_table};
use tomasulo_core::stats::STATS_SECTIONS;
use tomasulo_core::{Reg, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "tomasim",
    author,
    version,
    about = "Cycle-accurate Tomasulo scheduling simulator",
    long_about = "Run an assembly program through a Tomasulo scheduler and print its instruction-status table.\n\nExamples:\n  tomasim run -f demos/daxpy.s\n  tomasim run -f demos/daxpy.s --reg R2=64 --mem 64=1.5 --trace\n  tomasim run -f prog.s -c config.json --stats summary --stats cdb"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion.
    Run {
        /// Assembly program, one instruction per line.
        #[arg(short, long)]
        file: PathBuf,

        /// JSON configuration (pool sizes, latencies, memory size, cycle ceiling).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Initial register value, e.g. `R2=100` or `F4=2.5`. Repeatable.
        #[arg(long = "reg", value_name = "REG=VALUE", value_parser = parse_reg_seed)]
        regs: Vec<(Reg, f64)>,

        /// Initial memory double, e.g. `32=3.5`. Repeatable.
        #[arg(long = "mem", value_name = "ADDR=VALUE", value_parser = parse_mem_seed)]
        mems: Vec<(i64, f64)>,

        /// Print the station table after every cycle.
        #[arg(long)]
        trace: bool,

        /// Print statistics; optionally restrict to named sections. Repeatable.
        #[arg(long, value_name = "SECTION", num_args = 0..=1, default_missing_value = "all")]
        stats: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            file,
            config,
            regs,
            mems,
            trace,
            stats,
        }) => {
            let opts = RunOptions {
                file,
                config,
                regs,
                mems,
                trace,
                stats,
            };
            if let Err(e) = cmd_run(opts) {
                eprintln!("\n[!] FATAL: {e}");
                process::exit(1);
            }
        }
        None => {
            eprintln!("Tomasulo Simulator: pass a subcommand");
            eprintln!();
            eprintln!("  tomasim run -f <program.s>                 Run a program");
            eprintln!("  tomasim run -f <program.s> -c <cfg.json>   Run with a configuration");
            eprintln!();
            eprintln!("  tomasim --help  for full options");
            process::exit(1);
        }
    }
}

struct RunOptions {
    file: PathBuf,
    config: Option<PathBuf>,
    regs: Vec<(Reg, f64)>,
    mems: Vec<(i64, f64)>,
    trace: bool,
    stats: Vec<String>,
}

/// Loads, seeds and runs a program, then prints its reports.
fn cmd_run(opts: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &opts.config {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            Config::from_json(&fs::read_to_string(path)?)?
        }
        None => Config::default(),
    };
    let trace = opts.trace || config.general.trace;
    let program = loader::load_program(&opts.file)?;

    println!(
        "[*] Program: {} ({} instructions)",
        opts.file.display(),
        program.len()
    );
    println!(
        "    Stations: int={} add={} mul={} load={} store={}  Memory: {} bytes  Max cycles: {}",
        config.units.int,
        config.units.fp_add,
        config.units.fp_mul,
        config.units.load,
        config.units.store,
        config.memory.size_bytes,
        config.general.max_cycles
    );
    println!();

    let mut sim = Simulator::new(program, config)?;
    for &(reg, value) in &opts.regs {
        sim.set_register(reg, value);
    }
    for &(addr, value) in &opts.mems {
        sim.write_double(addr, value)?;
    }

    let summary = sim.run_with(|s| {
        if trace {
            println!("--- cycle {} ---", s.cycle());
            print!("{}", format_stations(&s.station_snapshots()));
        }
    })?;

    println!("{}", format_timing_table(sim.instructions()));
    println!("[*] Completed in {} cycles", summary.cycles);

    let live: Vec<String> = Reg::all()
        .filter(|&reg| sim.register(reg) != 0.0)
        .map(|reg| format!("{reg}={}", sim.register(reg)))
        .collect();
    if !live.is_empty() {
        println!("[*] Registers: {}", live.join(" "));
    }

    if !opts.stats.is_empty() {
        let sections: Vec<String> = opts
            .stats
            .into_iter()
            .filter(|s| s != "all")
            .collect();
        if let Some(bad) = sections
            .iter()
            .find(|s| !STATS_SECTIONS.contains(&s.as_str()))
        {
            return Err(format!(
                "unknown stats section `{bad}` (expected one of: {})",
                STATS_SECTIONS.join(", ")
            )
            .into());
        }
        sim.stats().print_sections(&sections);
    }
    Ok(())
}

fn parse_reg_seed(text: &str) -> Result<(Reg, f64), String> {
    let (name, value) = split_seed(text)?;
    let reg = name.parse::<Reg>().map_err(|e| e.to_string())?;
    let value = value
        .parse::<f64>()
        .map_err(|e| format!("bad value `{value}`: {e}"))?;
    Ok((reg, value))
}

fn parse_mem_seed(text: &str) -> Result<(i64, f64), String> {
    let (addr, value) = split_seed(text)?;
    let addr = addr
        .parse::<i64>()
        .map_err(|e| format!("bad address `{addr}`: {e}"))?;
    let value = value
        .parse::<f64>()
        .map_err(|e| format!("bad value `{value}`: {e}"))?;
    Ok((addr, value))
}

fn split_seed(text: &str) -> Result<(&str, &str), String> {
    text.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{text}`"))
}
