use std::fmt::Display;

use itertools::Itertools;
use log::debug;

use crate::{
    frontier::Frontier,
    index::StationIndex,
    primitives::{Cost, Distance, Range},
    station::StationIdx,
};

/// Stations to stop at, in the order the caller travels them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stops: Vec<Distance>,
}

impl Route {
    pub fn stops(&self) -> &[Distance] {
        &self.stops
    }

    pub fn hops(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stops().iter().join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The station the search starts from does not exist.
    #[error("no station at distance {0}")]
    UnknownStation(Distance),

    /// The search never reached the other end, or the other end does not exist.
    #[error("no route from {from} to {to}")]
    Unreachable { from: Distance, to: Distance },
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SearchStats {
    pub expanded: usize,
    pub improved: usize,
    pub peak_frontier: usize,
}

/// Whether a vehicle of range `range` covers a hop of length `hop`.
fn covers(range: Range, hop: Cost) -> bool {
    Cost::try_from(range).is_ok_and(|range| hop <= range)
}

/// Plans a route from the station at `source` to the station at `destination`.
///
/// The search always runs from the lower distance (the seed) up to the higher one
/// (the goal) and relaxes a hop C -> N with the best vehicle at C. Paths are ranked
/// by total hop length, then by the sum of the distances of the stations visited
/// after the seed. The returned stops are ordered from `source` to `destination`.
pub fn plan_route(
    index: &mut StationIndex,
    source: Distance,
    destination: Distance,
) -> Result<Route, RouteError> {
    if source == destination {
        return match index.find(source) {
            Some(_) => Ok(Route {
                stops: vec![source],
            }),
            None => Err(RouteError::UnknownStation(source)),
        };
    }

    let forward = destination > source;
    let (seed, goal) = if forward {
        (source, destination)
    } else {
        (destination, source)
    };

    index.reset_search_state();
    let seed_idx = index
        .find(seed)
        .ok_or(RouteError::UnknownStation(seed))?;
    let stats = search(index, seed_idx, seed, goal);

    let reached = index
        .find(goal)
        .filter(|&idx| index.station(idx).search.is_reached());
    let Some(goal_idx) = reached else {
        debug!(
            "No route {} -> {} ({} stations expanded)",
            source, destination, stats.expanded
        );
        return Err(RouteError::Unreachable {
            from: source,
            to: destination,
        });
    };

    let mut stops = predecessor_chain(index, goal_idx);
    if forward {
        stops.reverse();
    }
    let route = Route { stops };
    debug!(
        "Route {} -> {}: {} hops, {} stations expanded, {} improvements, frontier peaked at {}",
        source,
        destination,
        route.hops(),
        stats.expanded,
        stats.improved,
        stats.peak_frontier
    );
    Ok(route)
}

/// Dijkstra over the implicit graph: every station inside `[seed, goal]` is a
/// potential neighbour of the station being expanded.
fn search(
    index: &mut StationIndex,
    seed_idx: StationIdx,
    seed: Distance,
    goal: Distance,
) -> SearchStats {
    let mut stats = SearchStats::default();
    // The tree does not change during a query.
    let candidates = index.preorder();

    let seed_state = &mut index.station_mut(seed_idx).search;
    seed_state.best_cost = 0;
    seed_state.tie_break_sum = 0;

    let mut frontier = Frontier::new();
    frontier.insert(seed_idx, 0, 0);

    while let Some(entry) = frontier.extract_min() {
        let current = index.station(entry.station);
        if current.distance == goal {
            break;
        }
        stats.expanded += 1;

        let Some(max_range) = current.fleet.peek_max() else {
            continue;
        };
        let current_distance = current.distance;
        let current_cost = current.search.best_cost;
        let current_tie_break = current.search.tie_break_sum;

        for &candidate in &candidates {
            if candidate == entry.station {
                continue;
            }
            let neighbour = index.station_mut(candidate);
            if neighbour.distance < seed || neighbour.distance > goal {
                continue;
            }
            let hop = current_distance.abs_diff(neighbour.distance);
            if !covers(max_range, hop) {
                continue;
            }

            let cost = current_cost.saturating_add(hop);
            let tie_break = current_tie_break.saturating_add(neighbour.distance);
            let state = &mut neighbour.search;
            if cost < state.best_cost
                || (cost == state.best_cost && tie_break < state.tie_break_sum)
            {
                state.best_cost = cost;
                state.tie_break_sum = tie_break;
                state.predecessor = Some(entry.station);
                stats.improved += 1;

                if frontier.contains(candidate) {
                    frontier.decrease_key(candidate, cost, tie_break);
                } else {
                    frontier.insert(candidate, cost, tie_break);
                }
            }
        }
        stats.peak_frontier = stats.peak_frontier.max(frontier.len());
    }
    stats
}

/// Distances from `from` back to the seed, following predecessors.
fn predecessor_chain(index: &StationIndex, from: StationIdx) -> Vec<Distance> {
    let mut chain = Vec::new();
    let mut next = Some(from);
    while let Some(idx) = next {
        let station = index.station(idx);
        chain.push(station.distance);
        next = station.search.predecessor;
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::sample::{index_with, three_evenly_spaced};

    #[test]
    fn forward_and_backward_over_even_spacing() {
        let mut index = three_evenly_spaced();
        let route = plan_route(&mut index, 0, 400).unwrap();
        assert_eq!(route.stops(), &[0, 200, 400]);
        assert_eq!(route.to_string(), "0 200 400");
        assert_eq!(route.hops(), 2);

        let route = plan_route(&mut index, 400, 0).unwrap();
        assert_eq!(route.stops(), &[400, 200, 0]);
    }

    #[test]
    fn gap_longer_than_range_is_unreachable() {
        let mut index = index_with(&[(0, &[50]), (400, &[50])]);
        assert_eq!(
            plan_route(&mut index, 0, 400),
            Err(RouteError::Unreachable { from: 0, to: 400 })
        );
    }

    #[test]
    fn errors_name_both_ends() {
        let mut index = index_with(&[(0, &[50]), (400, &[50])]);
        let err = plan_route(&mut index, 400, 0).unwrap_err();
        assert_eq!(err, RouteError::Unreachable { from: 400, to: 0 });
        assert_eq!(err.to_string(), "no route from 400 to 0");
        assert!(std::error::Error::source(&err).is_none());
        assert_eq!(
            RouteError::UnknownStation(7).to_string(),
            "no station at distance 7"
        );
    }

    #[test]
    fn trivial_route() {
        let mut index = index_with(&[(100, &[])]);
        assert_eq!(plan_route(&mut index, 100, 100).unwrap().stops(), &[100]);
        assert_eq!(
            plan_route(&mut index, 50, 50),
            Err(RouteError::UnknownStation(50))
        );
    }

    #[test]
    fn missing_endpoints() {
        let mut index = index_with(&[(0, &[500]), (400, &[500])]);
        // lower endpoint missing: nothing to start from
        assert_eq!(
            plan_route(&mut index, 10, 400),
            Err(RouteError::UnknownStation(10))
        );
        assert_eq!(
            plan_route(&mut index, 400, 10),
            Err(RouteError::UnknownStation(10))
        );
        // upper endpoint missing: searched but never reached
        assert_eq!(
            plan_route(&mut index, 0, 300),
            Err(RouteError::Unreachable { from: 0, to: 300 })
        );
        // both missing
        assert_eq!(
            plan_route(&mut index, 20, 30),
            Err(RouteError::UnknownStation(20))
        );
    }

    #[test]
    fn equal_length_routes_prefer_smaller_distance_sum() {
        // 0 -> 10 -> 30 and 0 -> 20 -> 30 both cover 30 in two hops.
        let mut index = index_with(&[(0, &[20]), (10, &[20]), (20, &[10]), (30, &[])]);
        assert_eq!(plan_route(&mut index, 0, 30).unwrap().stops(), &[0, 10, 30]);
        assert_eq!(plan_route(&mut index, 30, 0).unwrap().stops(), &[30, 10, 0]);
    }

    #[test]
    fn best_vehicle_decides_reach() {
        let mut index = index_with(&[(0, &[5, 60, 10]), (50, &[1]), (100, &[])]);
        assert_eq!(
            plan_route(&mut index, 0, 100),
            Err(RouteError::Unreachable { from: 0, to: 100 })
        );
        index.get_mut(50).unwrap().fleet.add_range(50).unwrap();
        assert_eq!(
            plan_route(&mut index, 0, 100).unwrap().stops(),
            &[0, 50, 100]
        );
    }

    #[test]
    fn direct_hop_wins_when_in_range() {
        let mut index = index_with(&[(0, &[100]), (40, &[100]), (100, &[])]);
        assert_eq!(plan_route(&mut index, 0, 100).unwrap().stops(), &[0, 100]);
    }

    #[test]
    fn stations_outside_the_segment_are_ignored() {
        // -5 could carry on to 100, but lies behind the start.
        let mut index = index_with(&[(0, &[10]), (-5, &[200]), (100, &[])]);
        assert!(plan_route(&mut index, 0, 100).is_err());
        assert_eq!(plan_route(&mut index, -5, 100).unwrap().stops(), &[-5, 100]);
    }

    #[test]
    fn backward_query_uses_fleet_of_lower_station() {
        // The search always runs upwards from the lower distance, so a hop is
        // judged by the vehicles of its lower station, whatever the direction.
        let mut index = index_with(&[(0, &[]), (100, &[100])]);
        assert!(plan_route(&mut index, 100, 0).is_err());
        assert!(plan_route(&mut index, 0, 100).is_err());

        let mut index = index_with(&[(0, &[100]), (100, &[])]);
        assert_eq!(plan_route(&mut index, 100, 0).unwrap().stops(), &[100, 0]);
    }

    #[test]
    fn search_state_does_not_leak_between_queries() {
        let mut index = three_evenly_spaced();
        assert!(plan_route(&mut index, 0, 400).is_ok());
        assert!(index.remove(200));
        assert!(plan_route(&mut index, 0, 400).is_err());
        assert!(index.insert(200, crate::test::sample::fleet(&[200])));
        assert_eq!(
            plan_route(&mut index, 0, 400).unwrap().stops(),
            &[0, 200, 400]
        );
    }

    #[test]
    fn negative_ranges_cover_nothing() {
        let mut index = index_with(&[(0, &[-1]), (1, &[])]);
        assert!(plan_route(&mut index, 0, 1).is_err());
        assert!(!covers(-5, 0));
        assert!(covers(0, 0));
    }
}
