use log::{debug, warn};

use crate::{
    fleet::{FleetCapacity, FleetError, VehicleFleet},
    index::StationIndex,
    planner::{Route, RouteError, plan_route},
    primitives::{Distance, Range},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HighwayError {
    #[error("a station already exists at distance {0}")]
    DuplicateStation(Distance),

    #[error("no station at distance {0}")]
    UnknownStation(Distance),

    #[error("no vehicle with range {range} at station {station}")]
    UnknownVehicle { station: Distance, range: Range },

    #[error("station {station} cannot take more vehicles: {source}")]
    FleetFull {
        station: Distance,
        #[source]
        source: FleetError,
    },
}

/// The stations along the highway together with their fleets.
#[derive(Debug, Default)]
pub struct Highway {
    index: StationIndex,
    fleet_capacity: FleetCapacity,
}

impl Highway {
    pub fn new(fleet_capacity: FleetCapacity) -> Self {
        Self {
            index: StationIndex::new(),
            fleet_capacity,
        }
    }

    pub fn stations(&self) -> &StationIndex {
        &self.index
    }

    /// Builds a station at `distance` with vehicles of the given ranges.
    /// Nothing changes if the distance is taken or the ranges overflow the fleet.
    pub fn add_station(
        &mut self,
        distance: Distance,
        ranges: &[Range],
    ) -> Result<(), HighwayError> {
        if self.index.contains(distance) {
            return Err(HighwayError::DuplicateStation(distance));
        }
        let mut fleet = VehicleFleet::new(self.fleet_capacity);
        for &range in ranges {
            fleet.add_range(range).map_err(|source| {
                warn!(
                    "Station {} rejected: {} vehicles exceed its capacity",
                    distance,
                    ranges.len()
                );
                HighwayError::FleetFull {
                    station: distance,
                    source,
                }
            })?;
        }
        debug!("Adding station {} with {} vehicles", distance, fleet.len());
        let added = self.index.insert(distance, fleet);
        debug_assert!(added);
        Ok(())
    }

    pub fn demolish_station(&mut self, distance: Distance) -> Result<(), HighwayError> {
        if !self.index.remove(distance) {
            return Err(HighwayError::UnknownStation(distance));
        }
        debug!("Demolished station {}", distance);
        Ok(())
    }

    pub fn add_vehicle(&mut self, distance: Distance, range: Range) -> Result<(), HighwayError> {
        let station = self
            .index
            .get_mut(distance)
            .ok_or(HighwayError::UnknownStation(distance))?;
        station
            .fleet
            .add_range(range)
            .map_err(|source| HighwayError::FleetFull {
                station: distance,
                source,
            })
    }

    pub fn scrap_vehicle(&mut self, distance: Distance, range: Range) -> Result<(), HighwayError> {
        let station = self
            .index
            .get_mut(distance)
            .ok_or(HighwayError::UnknownStation(distance))?;
        if !station.fleet.remove_range(range) {
            return Err(HighwayError::UnknownVehicle {
                station: distance,
                range,
            });
        }
        Ok(())
    }

    pub fn plan_route(
        &mut self,
        source: Distance,
        destination: Distance,
    ) -> Result<Route, RouteError> {
        plan_route(&mut self.index, source, destination)
    }
}
