use crate::{
    fleet::{FleetCapacity, VehicleFleet},
    index::StationIndex,
    primitives::{Distance, Range},
};

pub fn fleet(ranges: &[Range]) -> VehicleFleet {
    let mut fleet = VehicleFleet::new(FleetCapacity::Unbounded);
    for &range in ranges {
        fleet.add_range(range).unwrap();
    }
    fleet
}

/// Builds an index by inserting the stations in the given order.
pub fn index_with(stations: &[(Distance, &[Range])]) -> StationIndex {
    let mut index = StationIndex::new();
    for &(distance, ranges) in stations {
        assert!(
            index.insert(distance, fleet(ranges)),
            "Duplicate station {} in sample",
            distance
        );
    }
    index
}

/// Stations at 0, 200 and 400, each with one vehicle of range 200.
pub fn three_evenly_spaced() -> StationIndex {
    index_with(&[(0, &[200]), (200, &[200]), (400, &[200])])
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_three_evenly_spaced() {
        let index = three_evenly_spaced();
        assert_eq!(
            index.iter().map(|it| (it.distance, it.fleet.peek_max())).collect_vec(),
            vec![(0, Some(200)), (200, Some(200)), (400, Some(200))]
        );
    }
}
