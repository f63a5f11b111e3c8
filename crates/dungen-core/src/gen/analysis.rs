//! Breadth-first distance and path labeling.
//!
//! Walks the adjacency index from the start room and records, per room, its
//! hop distance and the ordered chain of predecessor rooms from the start
//! (exclusive of the room itself). Connectivity is an upheld graph
//! invariant, so every living room appears in the result.

use std::collections::{BTreeMap, VecDeque};

use crate::map::{RoomGraph, RoomId};

/// BFS labeling of the whole graph from the start room
#[derive(Debug, Clone, Default)]
pub struct Topology {
    /// Hop distance from the start room
    pub distance: BTreeMap<RoomId, u32>,
    /// Predecessor chain from the start room, exclusive of the room itself
    pub path: BTreeMap<RoomId, Vec<RoomId>>,
}

impl Topology {
    /// Distance of one room; the start room is at 0
    pub fn distance_of(&self, room: RoomId) -> u32 {
        self.distance.get(&room).copied().unwrap_or(0)
    }
}

/// Label every reachable room with distance and predecessor path
pub fn analyze(graph: &RoomGraph, start: RoomId) -> Topology {
    let mut topology = Topology::default();
    if graph.room(start).is_none() {
        return topology;
    }

    topology.distance.insert(start, 0);
    topology.path.insert(start, Vec::new());
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let current_distance = topology.distance_of(current);
        for neighbor in graph.adjacent_rooms(current) {
            if topology.distance.contains_key(&neighbor) {
                continue;
            }
            topology.distance.insert(neighbor, current_distance + 1);
            let mut path = topology.path.get(&current).cloned().unwrap_or_default();
            path.push(current);
            topology.path.insert(neighbor, path);
            queue.push_back(neighbor);
        }
    }

    topology
}
