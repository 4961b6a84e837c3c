//! Configuration system for the scheduling simulator.
//!
//! This module defines the structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline pool sizes, latencies, memory size and cycle ceiling.
//! 2. **Structures:** Hierarchical config for general, memory, unit-pool and latency settings.
//! 3. **Validation:** Range checks applied before a simulator is built.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built from `Config::default()`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::isa::opcode::{Opcode, UnitKind};

/// Default configuration constants for the simulator.
mod defaults {
    /// Cycle ceiling after which a run is reported as non-converging.
    pub const MAX_CYCLES: u64 = 1000;

    /// Size of the flat data memory in bytes.
    pub const MEMORY_SIZE: usize = 4096;

    /// Integer reservation stations.
    pub const INT_STATIONS: usize = 2;

    /// FP add/sub reservation stations.
    pub const FP_ADD_STATIONS: usize = 3;

    /// FP mul/div reservation stations.
    pub const FP_MUL_STATIONS: usize = 2;

    /// Load buffers.
    pub const LOAD_BUFFERS: usize = 3;

    /// Store buffers.
    pub const STORE_BUFFERS: usize = 2;

    /// Default execution latency per mnemonic, in cycles.
    pub const LATENCIES: &[(&str, u64)] = &[
        ("DADD", 1),
        ("DADDI", 1),
        ("DSUB", 1),
        ("ADD.D", 2),
        ("SUB.D", 2),
        ("MUL.D", 10),
        ("DIV.D", 40),
        ("L.D", 2),
        ("L.W", 2),
        ("S.D", 1),
        ("S.W", 1),
        ("BEQ", 1),
        ("BNE", 1),
    ];
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use tomasulo_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_cycles": 500 },
///     "units": { "fp_mul": 1 },
///     "latencies": { "MUL.D": 4 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, 500);
/// assert_eq!(config.units.fp_mul, 1);
/// assert_eq!(config.units.fp_add, 3);
/// assert_eq!(config.latencies.get("MUL.D"), Some(4));
/// assert_eq!(config.latencies.get("ADD.D"), Some(2));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Data memory settings
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Station pool sizes
    #[serde(default)]
    pub units: UnitConfig,
    /// Execution latency per mnemonic
    #[serde(default)]
    pub latencies: LatencyTable,
}

impl Config {
    /// Deserializes and validates a JSON configuration document.
    ///
    /// Missing sections and fields take their default values. Latency
    /// entries override the defaults one mnemonic at a time.
    ///
    /// # Errors
    ///
    /// `ConfigError::Json` for malformed JSON, otherwise any error from
    /// [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges and latency keys.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` for a zero cycle ceiling, zero memory size, a
    /// latency key that names no opcode, or a zero latency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.max_cycles == 0 {
            return Err(ConfigError::Invalid("max_cycles must be at least 1".into()));
        }
        if self.memory.size_bytes == 0 {
            return Err(ConfigError::Invalid("memory size must be non-zero".into()));
        }
        if let Some((name, _)) = self
            .latencies
            .iter()
            .find(|(name, _)| name.parse::<Opcode>().is_err())
        {
            return Err(ConfigError::Invalid(format!(
                "unknown opcode {name} in latency table"
            )));
        }
        if let Some((name, _)) = self.latencies.iter().find(|&(_, cycles)| cycles == 0) {
            return Err(ConfigError::Invalid(format!(
                "latency of {name} must be at least 1 cycle"
            )));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Cycle ceiling; reaching it is a non-convergence error
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Print the station table every cycle (CLI)
    #[serde(default)]
    pub trace: bool,
}

impl GeneralConfig {
    /// Returns the default cycle ceiling.
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
            trace: false,
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Memory size in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    /// Returns the default memory size in bytes.
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::MEMORY_SIZE,
        }
    }
}

/// Number of stations in each pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UnitConfig {
    /// Integer reservation stations (integer ops and branches)
    #[serde(default = "UnitConfig::default_int")]
    pub int: usize,

    /// FP add/sub reservation stations
    #[serde(default = "UnitConfig::default_fp_add")]
    pub fp_add: usize,

    /// FP mul/div reservation stations
    #[serde(default = "UnitConfig::default_fp_mul")]
    pub fp_mul: usize,

    /// Load buffers
    #[serde(default = "UnitConfig::default_load")]
    pub load: usize,

    /// Store buffers
    #[serde(default = "UnitConfig::default_store")]
    pub store: usize,
}

impl UnitConfig {
    /// Returns the number of stations configured for `kind`.
    pub const fn count(&self, kind: UnitKind) -> usize {
        match kind {
            UnitKind::Int => self.int,
            UnitKind::FpAdd => self.fp_add,
            UnitKind::FpMul => self.fp_mul,
            UnitKind::Load => self.load,
            UnitKind::Store => self.store,
        }
    }

    fn default_int() -> usize {
        defaults::INT_STATIONS
    }

    fn default_fp_add() -> usize {
        defaults::FP_ADD_STATIONS
    }

    fn default_fp_mul() -> usize {
        defaults::FP_MUL_STATIONS
    }

    fn default_load() -> usize {
        defaults::LOAD_BUFFERS
    }

    fn default_store() -> usize {
        defaults::STORE_BUFFERS
    }
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            int: defaults::INT_STATIONS,
            fp_add: defaults::FP_ADD_STATIONS,
            fp_mul: defaults::FP_MUL_STATIONS,
            load: defaults::LOAD_BUFFERS,
            store: defaults::STORE_BUFFERS,
        }
    }
}

/// Execution latency per mnemonic.
///
/// Deserialized entries are merged over the defaults, so a document only
/// needs to list the latencies it changes. Keys are upper-cased mnemonics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyTable(BTreeMap<String, u64>);

impl LatencyTable {
    /// Latency for a mnemonic, if configured.
    pub fn get(&self, mnemonic: &str) -> Option<u64> {
        self.0.get(&mnemonic.to_ascii_uppercase()).copied()
    }

    /// Latency for an opcode, if configured.
    pub fn of(&self, opcode: Opcode) -> Option<u64> {
        self.0.get(opcode.mnemonic()).copied()
    }

    /// Sets (or overrides) the latency of a mnemonic.
    pub fn set(&mut self, mnemonic: &str, cycles: u64) {
        let _previous = self.0.insert(mnemonic.to_ascii_uppercase(), cycles);
    }

    /// Removes a mnemonic from the table.
    pub fn remove(&mut self, mnemonic: &str) {
        let _previous = self.0.remove(&mnemonic.to_ascii_uppercase());
    }

    /// Iterates over `(mnemonic, cycles)` pairs in mnemonic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl Default for LatencyTable {
    fn default() -> Self {
        Self(
            defaults::LATENCIES
                .iter()
                .map(|&(name, cycles)| (name.to_string(), cycles))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for LatencyTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let overrides = BTreeMap::<String, u64>::deserialize(deserializer)?;
        let mut table = Self::default();
        for (name, cycles) in overrides {
            table.set(&name, cycles);
        }
        Ok(table)
    }
}
