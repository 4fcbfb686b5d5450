use crate::fleet::VehicleFleet;
use crate::primitives::Distance;
use crate::station::{SearchState, Station, StationIdx};

#[derive(Debug)]
struct Node {
    station: Station,
    left: Option<StationIdx>,
    right: Option<StationIdx>,
}

/// Where a node hangs in the tree.
#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Left(StationIdx),
    Right(StationIdx),
}

/// Stations ordered by distance in an (unbalanced) binary search tree.
///
/// Nodes live in an arena and refer to each other by `StationIdx`, so all walks
/// are iterative and the search can keep back references to stations without
/// borrowing the tree. Slots of removed stations are recycled.
#[derive(Debug, Default)]
pub struct StationIndex {
    nodes: Vec<Option<Node>>,
    free: Vec<StationIdx>,
    root: Option<StationIdx>,
    len: usize,
}

impl StationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn node(&self, idx: StationIdx) -> &Node {
        self.nodes[idx.0 as usize]
            .as_ref()
            .expect("station handle refers to a vacant slot")
    }

    fn node_mut(&mut self, idx: StationIdx) -> &mut Node {
        self.nodes[idx.0 as usize]
            .as_mut()
            .expect("station handle refers to a vacant slot")
    }

    pub fn station(&self, idx: StationIdx) -> &Station {
        &self.node(idx).station
    }

    pub fn station_mut(&mut self, idx: StationIdx) -> &mut Station {
        &mut self.node_mut(idx).station
    }

    pub fn find(&self, distance: Distance) -> Option<StationIdx> {
        self.locate(distance).0
    }

    #[cfg(test)]
    pub fn get(&self, distance: Distance) -> Option<&Station> {
        self.find(distance).map(|idx| self.station(idx))
    }

    pub fn get_mut(&mut self, distance: Distance) -> Option<&mut Station> {
        self.find(distance).map(|idx| self.station_mut(idx))
    }

    pub fn contains(&self, distance: Distance) -> bool {
        self.find(distance).is_some()
    }

    /// Returns the node holding `distance` (if any) and the link it hangs on,
    /// or the link a new node for `distance` would hang on.
    fn locate(&self, distance: Distance) -> (Option<StationIdx>, Link) {
        let mut link = Link::Root;
        let mut current = self.root;
        while let Some(idx) = current {
            let node = self.node(idx);
            if distance < node.station.distance {
                link = Link::Left(idx);
                current = node.left;
            } else if distance > node.station.distance {
                link = Link::Right(idx);
                current = node.right;
            } else {
                return (Some(idx), link);
            }
        }
        (None, link)
    }

    fn set_link(&mut self, link: Link, child: Option<StationIdx>) {
        match link {
            Link::Root => self.root = child,
            Link::Left(parent) => self.node_mut(parent).left = child,
            Link::Right(parent) => self.node_mut(parent).right = child,
        }
    }

    fn alloc(&mut self, node: Node) -> StationIdx {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx.0 as usize] = Some(node);
                idx
            }
            None => {
                let idx = StationIdx(self.nodes.len() as u32);
                self.nodes.push(Some(node));
                idx
            }
        }
    }

    fn release(&mut self, idx: StationIdx) -> Node {
        let node = self.nodes[idx.0 as usize]
            .take()
            .expect("station handle refers to a vacant slot");
        self.free.push(idx);
        node
    }

    /// Adds a station at `distance` owning `fleet`.
    /// Returns false, dropping `fleet`, if the distance is already taken.
    pub fn insert(&mut self, distance: Distance, fleet: VehicleFleet) -> bool {
        let (existing, link) = self.locate(distance);
        if existing.is_some() {
            return false;
        }
        let idx = self.alloc(Node {
            station: Station::new(distance, fleet),
            left: None,
            right: None,
        });
        self.set_link(link, Some(idx));
        self.len += 1;
        true
    }

    /// Removes the station at `distance`, dropping its fleet.
    ///
    /// A station with two subtrees takes over distance and fleet of its in-order
    /// successor, whose node is then spliced out of the right subtree.
    pub fn remove(&mut self, distance: Distance) -> bool {
        let (Some(idx), link) = self.locate(distance) else {
            return false;
        };
        let (left, right) = {
            let node = self.node(idx);
            (node.left, node.right)
        };
        match (left, right) {
            (None, child) | (child, None) => {
                self.set_link(link, child);
                self.release(idx);
            }
            (Some(_), Some(right)) => {
                let mut successor_link = Link::Right(idx);
                let mut successor = right;
                while let Some(next) = self.node(successor).left {
                    successor_link = Link::Left(successor);
                    successor = next;
                }
                let successor_right = self.node(successor).right;
                self.set_link(successor_link, successor_right);
                let promoted = self.release(successor).station;

                let station = &mut self.node_mut(idx).station;
                station.distance = promoted.distance;
                station.fleet = promoted.fleet;
                station.search = SearchState::default();
            }
        }
        self.len -= 1;
        true
    }

    /// Resets the transient search state of every station.
    pub fn reset_search_state(&mut self) {
        for node in self.nodes.iter_mut().flatten() {
            node.station.search = SearchState::default();
        }
    }

    /// Handles of all stations in tree pre-order (node, left subtree, right subtree).
    pub fn preorder(&self) -> Vec<StationIdx> {
        let mut order = Vec::with_capacity(self.len);
        let mut stack: Vec<StationIdx> = self.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            order.push(idx);
            let node = self.node(idx);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        order
    }

    /// Stations in ascending distance order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> + '_ {
        InOrder {
            index: self,
            stack: Vec::new(),
            next: self.root,
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(StationIdx, usize)> =
            self.root.map(|it| (it, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.node(idx);
            stack.extend(node.left.map(|it| (it, depth + 1)));
            stack.extend(node.right.map(|it| (it, depth + 1)));
        }
        height
    }
}

struct InOrder<'a> {
    index: &'a StationIndex,
    stack: Vec<StationIdx>,
    next: Option<StationIdx>,
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Station;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.next {
            self.stack.push(idx);
            self.next = self.index.node(idx).left;
        }
        let idx = self.stack.pop()?;
        let node = self.index.node(idx);
        self.next = node.right;
        Some(&node.station)
    }
}
