//! # Unit Components
//!
//! This module organizes the tests by area: the scheduling core, its
//! configuration, program loading, reports and statistics.





/// Statistics gathered over complete runs.
pub mod stats;

/// Randomized checks of scheduling invariants.
pub mod properties;
