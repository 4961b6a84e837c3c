//! Functional-unit station pools.
//!
//! One fixed-size pool per [`UnitKind`], sized from [`UnitConfig`]. Stations
//! are never created or destroyed after construction; issue claims the
//! lowest-indexed idle station and write-result returns it to idle.

use crate::config::UnitConfig;
use crate::core::pipeline::station::{Station, StationTag};
use crate::isa::opcode::UnitKind;

/// All reservation stations and load/store buffers.
#[derive(Clone, Debug, PartialEq)]
pub struct StationPool {
    pools: [Vec<Station>; UnitKind::ALL.len()],
}

impl StationPool {
    /// Builds every pool with the configured number of idle stations.
    pub fn new(units: &UnitConfig) -> Self {
        Self {
            pools: UnitKind::ALL.map(|kind| {
                (0..units.count(kind))
                    .map(|i| Station::new(StationTag::new(kind, i)))
                    .collect()
            }),
        }
    }

    /// Lowest-indexed idle station of `kind`, if any.
    pub fn find_free(&self, kind: UnitKind) -> Option<StationTag> {
        self.pools[kind.index()]
            .iter()
            .find(|s| !s.is_busy())
            .map(Station::tag)
    }

    /// The station named by `tag`.
    pub fn get(&self, tag: StationTag) -> Option<&Station> {
        self.pools[tag.kind().index()].get(tag.index())
    }

    /// Mutable access to the station named by `tag`.
    pub fn get_mut(&mut self, tag: StationTag) -> Option<&mut Station> {
        self.pools[tag.kind().index()].get_mut(tag.index())
    }

    /// Stations of one kind, in index order.
    pub fn of_kind(&self, kind: UnitKind) -> &[Station] {
        &self.pools[kind.index()]
    }

    /// Every station, pool by pool in [`UnitKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.pools.iter().flatten()
    }

    /// Mutable iteration in the same order as [`StationPool::iter`].
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Station> {
        self.pools.iter_mut().flatten()
    }

    /// Number of stations configured for `kind`.
    pub fn len(&self, kind: UnitKind) -> usize {
        self.pools[kind.index()].len()
    }

    /// Number of busy stations of `kind`.
    pub fn busy(&self, kind: UnitKind) -> usize {
        self.pools[kind.index()]
            .iter()
            .filter(|s| s.is_busy())
            .count()
    }

    /// True when no station in any pool holds an instruction.
    pub fn all_idle(&self) -> bool {
        self.iter().all(|s| !s.is_busy())
    }
}
