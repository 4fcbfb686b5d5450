use crate::{
    col::{HashMap, map_with_capacity},
    primitives::{Cost, TieBreak},
    station::StationIdx,
};

const INITIAL_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierEntry {
    pub station: StationIdx,
    pub cost: Cost,
    pub tie_break: TieBreak,
}

impl FrontierEntry {
    /// Pair order: lower cost first, then lower tie-break sum. Equal pairs are not "less".
    fn precedes(&self, other: &FrontierEntry) -> bool {
        (self.cost, self.tie_break) < (other.cost, other.tie_break)
    }
}

/// Binary min-heap of search candidates with decrease-key.
///
/// The heap itself does not forbid several entries for one station; the planner
/// checks `contains` before choosing between `insert` and `decrease_key`.
/// `positions` maps each queued station to its slot in `heap`.
#[derive(Debug)]
pub struct Frontier {
    heap: Vec<FrontierEntry>,
    positions: HashMap<StationIdx, usize>,
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            heap: Vec::with_capacity(INITIAL_CAPACITY),
            positions: map_with_capacity(INITIAL_CAPACITY),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn contains(&self, station: StationIdx) -> bool {
        self.positions.contains_key(&station)
    }

    pub fn insert(&mut self, station: StationIdx, cost: Cost, tie_break: TieBreak) {
        self.heap.push(FrontierEntry {
            station,
            cost,
            tie_break,
        });
        let i = self.heap.len() - 1;
        self.positions.insert(station, i);
        self.sift_up(i);
    }

    pub fn extract_min(&mut self) -> Option<FrontierEntry> {
        if self.heap.is_empty() {
            return None;
        }
        let min = self.heap.swap_remove(0);
        self.positions.remove(&min.station);
        if let Some(&moved) = self.heap.first() {
            self.positions.insert(moved.station, 0);
            self.sift_down(0);
        }
        Some(min)
    }

    /// Lowers the key of a queued station. Returns false if the station is not queued.
    ///
    /// The new key must not be greater than the current one; no sift-down happens.
    pub fn decrease_key(&mut self, station: StationIdx, cost: Cost, tie_break: TieBreak) -> bool {
        let Some(&i) = self.positions.get(&station) else {
            return false;
        };
        let entry = &mut self.heap[i];
        debug_assert!(
            (cost, tie_break) <= (entry.cost, entry.tie_break),
            "decrease_key raised the key of {:?}",
            station
        );
        entry.cost = cost;
        entry.tie_break = tie_break;
        self.sift_up(i);
        true
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].station, a);
        self.positions.insert(self.heap[b].station, b);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i != 0 {
            let parent = (i - 1) / 2;
            if !self.heap[i].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let mut smallest = i;
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == i {
                return;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}
