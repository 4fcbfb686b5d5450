use std::fmt::Debug;

use crate::fleet::VehicleFleet;
use crate::primitives::{Cost, Distance, TieBreak, UNREACHED};

/// Handle of a station slot inside the `StationIndex` arena.
/// Only stable while the index is not mutated.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationIdx(pub u32);
impl Debug for StationIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("st#{}", self.0))
    }
}

/// Per-query state written by the route search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    pub best_cost: Cost,
    pub tie_break_sum: TieBreak,
    pub predecessor: Option<StationIdx>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            best_cost: UNREACHED,
            tie_break_sum: 0,
            predecessor: None,
        }
    }
}

impl SearchState {
    pub fn is_reached(&self) -> bool {
        self.best_cost != UNREACHED
    }
}

#[derive(Debug)]
pub struct Station {
    pub distance: Distance,
    pub fleet: VehicleFleet,
    pub search: SearchState,
}

impl Station {
    pub fn new(distance: Distance, fleet: VehicleFleet) -> Self {
        Self {
            distance,
            fleet,
            search: SearchState::default(),
        }
    }
}
