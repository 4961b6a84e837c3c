//! Scheduler stage implementations.
//!
//! This module contains the three stages the engine runs every cycle, in
//! this order:
//! 1. **Write-Result:** Grants the common data bus to one finished station and retires it.
//! 2. **Execute:** Starts ready stations and counts down their latencies.
//! 3. **Issue:** Binds the next instruction in program order to a free station.

/// Execute stage implementation.
pub mod execute;

/// Issue stage implementation.
pub mod issue;

/// Write-result stage implementation.
pub mod writeback;

/// Execute stage entry point.
pub use execute::execute_stage;
/// Issue stage entry point.
pub use issue::issue_stage;
/// Write-result stage entry point.
pub use writeback::writeback_stage;
