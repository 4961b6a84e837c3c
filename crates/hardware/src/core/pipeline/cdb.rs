//! Common data bus.
//!
//! A single bus carries at most one result per cycle. Arbitration grants it
//! to the finished station whose instruction issued first; the result is then
//! broadcast to every station still waiting on the winner's tag.

use crate::core::pipeline::pool::StationPool;
use crate::core::pipeline::station::StationTag;

/// Outcome of one cycle's bus arbitration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CdbGrant {
    /// Station that owns the bus this cycle.
    pub tag: StationTag,
    /// Finished stations that asked for the bus, the winner included.
    pub contenders: usize,
}

/// Picks the finished station with the oldest issue cycle.
///
/// Ties cannot occur with single issue; station scan order breaks them
/// anyway so the choice stays deterministic.
pub fn arbitrate(pool: &StationPool) -> Option<CdbGrant> {
    let mut contenders = 0;
    let mut winner: Option<(u64, StationTag)> = None;
    for station in pool.iter() {
        let Some(entry) = station.entry() else {
            continue;
        };
        if !entry.is_finished() {
            continue;
        }
        contenders += 1;
        if winner.is_none_or(|(issued, _)| entry.issue_cycle < issued) {
            winner = Some((entry.issue_cycle, station.tag()));
        }
    }
    winner.map(|(_, tag)| CdbGrant { tag, contenders })
}

/// Delivers `value` from `tag` to every waiting operand.
///
/// Stations woken this way record `cycle` as their last dependency clear,
/// which delays their execution start to the following cycle. Returns the
/// number of operands resolved.
pub fn broadcast(pool: &mut StationPool, tag: StationTag, value: f64, cycle: u64) -> usize {
    pool.iter_mut()
        .filter_map(|station| station.entry_mut())
        .map(|entry| entry.wake(tag, value, cycle))
        .sum()
}
