/// Position of a station, measured from the origin of the highway.
pub type Distance = i64;

/// Maximum single hop a vehicle can cover.
pub type Range = i64;

/// Cumulative hop length along a candidate path.
pub type Cost = u64;

/// Cumulative sum of the distances of the stations visited by a candidate path.
pub type TieBreak = i64;

/// Cost of a station the search has not reached (yet).
pub const UNREACHED: Cost = Cost::MAX;
