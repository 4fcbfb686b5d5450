use std::fmt::{Debug, Display};

use crate::primitives::Range;

/// Vehicles a station holds unless configured otherwise.
pub const DEFAULT_FLEET_CAPACITY: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FleetCapacity {
    Bounded(usize),
    Unbounded,
}

impl Default for FleetCapacity {
    fn default() -> Self {
        FleetCapacity::Bounded(DEFAULT_FLEET_CAPACITY)
    }
}

impl Display for FleetCapacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FleetCapacity::Bounded(capacity) => write!(f, "{}", capacity),
            FleetCapacity::Unbounded => f.write_str("unbounded"),
        }
    }
}

impl std::str::FromStr for FleetCapacity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("unbounded") {
            return Ok(FleetCapacity::Unbounded);
        }
        s.parse::<usize>()
            .map(FleetCapacity::Bounded)
            .map_err(|err| format!("expected a vehicle count or `unbounded`: {}", err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FleetError {
    #[error("fleet is full (capacity {capacity})")]
    Full { capacity: usize },
}

/// The vehicles parked at one station, kept as a binary max-heap over their ranges.
#[derive(Clone, Default)]
pub struct VehicleFleet {
    ranges: Vec<Range>,
    capacity: FleetCapacity,
}

impl Debug for VehicleFleet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ranges()).finish()
    }
}

impl VehicleFleet {
    pub fn new(capacity: FleetCapacity) -> Self {
        let ranges = match capacity {
            FleetCapacity::Bounded(capacity) => Vec::with_capacity(capacity),
            FleetCapacity::Unbounded => Vec::new(),
        };
        Self { ranges, capacity }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// The ranges in heap order.
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Adds a vehicle and sifts it up to its heap position.
    pub fn add_range(&mut self, range: Range) -> Result<(), FleetError> {
        if let FleetCapacity::Bounded(capacity) = self.capacity {
            if self.ranges.len() >= capacity {
                return Err(FleetError::Full { capacity });
            }
        }
        self.ranges.push(range);
        self.sift_up(self.ranges.len() - 1);
        Ok(())
    }

    /// Removes one vehicle with exactly this range. Returns false if there is none.
    pub fn remove_range(&mut self, range: Range) -> bool {
        let Some(i) = self.ranges.iter().position(|&it| it == range) else {
            return false;
        };
        self.ranges.swap_remove(i);
        if i < self.ranges.len() {
            // The former last element may belong above or below `i`.
            let i = self.sift_up(i);
            self.sift_down(i);
        }
        true
    }

    /// The longest range available here, `None` for an empty fleet.
    pub fn peek_max(&self) -> Option<Range> {
        self.ranges.first().copied()
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i != 0 {
            let parent = (i - 1) / 2;
            if self.ranges[parent] >= self.ranges[i] {
                break;
            }
            self.ranges.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.ranges.len();
        loop {
            let mut largest = i;
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            if left < len && self.ranges[left] > self.ranges[largest] {
                largest = left;
            }
            if right < len && self.ranges[right] > self.ranges[largest] {
                largest = right;
            }
            if largest == i {
                return;
            }
            self.ranges.swap(i, largest);
            i = largest;
        }
    }
}
