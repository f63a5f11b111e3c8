//! The room graph aggregate.
//!
//! Owns every room, every edge and the adjacency index, and is the sole
//! owner of all mutation; the generation stages act through its operations
//! only. Rooms and edges are stored in an arena keyed by stable handles so
//! that edges can reference rooms without ownership cycles.
//!
//! All orderable state (id maps, adjacency sets, creation order) is kept in
//! deterministic collections so that a seeded run replays identically.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::coord::Coordinate;
use super::edge::{Edge, EdgeId};
use super::room::{Room, RoomId, RoomType};
use crate::rng::MapRng;

#[derive(Debug, Clone, Default)]
pub struct RoomGraph {
    rooms: BTreeMap<RoomId, Room>,
    edges: BTreeMap<EdgeId, Edge>,
    /// room handle -> incident edge handles
    adjacency: BTreeMap<RoomId, BTreeSet<EdgeId>>,
    /// living rooms in creation order
    creation_order: Vec<RoomId>,
    next_room: u32,
    next_edge: u32,
}

impl RoomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of living rooms
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of living edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Insert a room, returning its fresh handle
    pub fn add_room(&mut self, room: Room) -> RoomId {
        let id = RoomId(self.next_room);
        self.next_room += 1;
        self.rooms.insert(id, room);
        self.adjacency.insert(id, BTreeSet::new());
        self.creation_order.push(id);
        id
    }

    /// Remove a room, purging its incident edges and adjacency entry.
    ///
    /// Idempotent: a no-op if the room is already gone.
    pub fn remove_room(&mut self, id: RoomId) {
        if self.rooms.remove(&id).is_none() {
            return;
        }
        if let Some(incident) = self.adjacency.remove(&id) {
            for edge_id in incident {
                self.remove_edge(edge_id);
            }
        }
        self.creation_order.retain(|&r| r != id);
    }

    /// Insert an edge between two rooms, returning its fresh handle
    pub fn add_edge(
        &mut self,
        a: RoomId,
        a_anchor: Coordinate,
        b: RoomId,
        b_anchor: Coordinate,
    ) -> EdgeId {
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        self.edges.insert(id, Edge::new(a, a_anchor, b, b_anchor));
        self.adjacency.entry(a).or_default().insert(id);
        self.adjacency.entry(b).or_default().insert(id);
        id
    }

    /// Remove a single edge from the edge list and both adjacency entries.
    ///
    /// Idempotent by edge identity.
    pub fn remove_edge(&mut self, id: EdgeId) {
        if let Some(edge) = self.edges.remove(&id) {
            if let Some(set) = self.adjacency.get_mut(&edge.a) {
                set.remove(&id);
            }
            if let Some(set) = self.adjacency.get_mut(&edge.b) {
                set.remove(&id);
            }
        }
    }

    /// Replace the whole edge collection and rebuild the adjacency index
    pub fn set_edges(&mut self, edges: BTreeMap<EdgeId, Edge>) {
        for set in self.adjacency.values_mut() {
            set.clear();
        }
        for (&id, edge) in &edges {
            self.adjacency.entry(edge.a).or_default().insert(id);
            self.adjacency.entry(edge.b).or_default().insert(id);
        }
        self.edges = edges;
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Iterate living rooms in handle order
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter().map(|(&id, room)| (id, room))
    }

    /// Iterate living edges in handle order
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges.iter().map(|(&id, edge)| (id, edge))
    }

    /// Living rooms in creation order
    pub fn creation_order(&self) -> &[RoomId] {
        &self.creation_order
    }

    /// Handles of the edges incident to a room, in handle order
    pub fn neighbors_of(&self, id: RoomId) -> Vec<EdgeId> {
        self.adjacency
            .get(&id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of edges incident to a room
    pub fn degree(&self, id: RoomId) -> usize {
        self.adjacency.get(&id).map(BTreeSet::len).unwrap_or(0)
    }

    /// Rooms reachable over one edge, in incident-edge order, deduplicated
    pub fn adjacent_rooms(&self, id: RoomId) -> Vec<RoomId> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for edge_id in self.neighbors_of(id) {
            if let Some(other) = self.edges.get(&edge_id).and_then(|e| e.other(id)) {
                if seen.insert(other) {
                    out.push(other);
                }
            }
        }
        out
    }

    /// True when at least one edge connects the two rooms
    pub fn are_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.neighbors_of(a)
            .into_iter()
            .filter_map(|id| self.edges.get(&id))
            .any(|edge| edge.connects(a, b))
    }

    /// Find the room whose footprint covers a cell (scans footprints)
    pub fn room_at(&self, cell: Coordinate) -> Option<RoomId> {
        self.creation_order
            .iter()
            .copied()
            .find(|&id| self.rooms.get(&id).is_some_and(|room| room.contains(cell)))
    }

    /// Find the first room of a type, in creation order
    pub fn find_type(&self, room_type: RoomType) -> Option<RoomId> {
        self.creation_order
            .iter()
            .copied()
            .find(|&id| self.rooms.get(&id).is_some_and(|r| r.room_type == room_type))
    }

    /// Pick a room uniformly at random, in creation order
    pub fn random_room(&self, rng: &mut MapRng) -> Option<RoomId> {
        if self.creation_order.is_empty() {
            None
        } else {
            Some(self.creation_order[rng.index(self.creation_order.len())])
        }
    }

    /// True when every living room is reachable from the first created room
    pub fn is_connected(&self) -> bool {
        let Some(&start) = self.creation_order.first() else {
            return true;
        };
        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for neighbor in self.adjacent_rooms(current) {
                if seen.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        seen.len() == self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: i32, y: i32) -> Room {
        Room::unit(Coordinate::new(x, y), RoomType::Pending)
    }

    #[test]
    fn test_add_room_assigns_fresh_handles() {
        let mut graph = RoomGraph::new();
        let a = graph.add_room(unit_at(0, 0));
        let b = graph.add_room(unit_at(1, 0));
        assert_ne!(a, b);
        assert_eq!(graph.room_count(), 2);
        assert_eq!(graph.creation_order(), &[a, b]);
    }

    #[test]
    fn test_remove_room_purges_edges() {
        let mut graph = RoomGraph::new();
        let a = graph.add_room(unit_at(0, 0));
        let b = graph.add_room(unit_at(1, 0));
        let c = graph.add_room(unit_at(2, 0));
        graph.add_edge(a, Coordinate::new(0, 0), b, Coordinate::new(1, 0));
        graph.add_edge(b, Coordinate::new(1, 0), c, Coordinate::new(2, 0));
        assert_eq!(graph.degree(b), 2);

        graph.remove_room(b);
        assert_eq!(graph.room_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.degree(a), 0);
        assert_eq!(graph.degree(c), 0);

        // idempotent
        graph.remove_room(b);
        assert_eq!(graph.room_count(), 2);
    }

    #[test]
    fn test_room_at_scans_footprints() {
        let mut graph = RoomGraph::new();
        let a = graph.add_room(Room::new(Coordinate::new(0, 0), 2, 1, RoomType::Pending));
        assert_eq!(graph.room_at(Coordinate::new(1, 0)), Some(a));
        assert_eq!(graph.room_at(Coordinate::new(2, 0)), None);
    }

    #[test]
    fn test_set_edges_rebuilds_adjacency() {
        let mut graph = RoomGraph::new();
        let a = graph.add_room(unit_at(0, 0));
        let b = graph.add_room(unit_at(1, 0));
        let c = graph.add_room(unit_at(2, 0));
        let ab = graph.add_edge(a, Coordinate::new(0, 0), b, Coordinate::new(1, 0));
        graph.add_edge(b, Coordinate::new(1, 0), c, Coordinate::new(2, 0));

        let mut replacement = BTreeMap::new();
        replacement.insert(
            ab,
            Edge::new(a, Coordinate::new(0, 0), b, Coordinate::new(1, 0)),
        );
        graph.set_edges(replacement);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(a), 1);
        assert_eq!(graph.degree(b), 1);
        assert_eq!(graph.degree(c), 0);
    }

    #[test]
    fn test_connectivity_check() {
        let mut graph = RoomGraph::new();
        let a = graph.add_room(unit_at(0, 0));
        let b = graph.add_room(unit_at(1, 0));
        assert!(!graph.is_connected());
        graph.add_edge(a, Coordinate::new(0, 0), b, Coordinate::new(1, 0));
        assert!(graph.is_connected());
    }

    #[test]
    fn test_random_room_is_deterministic() {
        let mut graph = RoomGraph::new();
        for x in 0..5 {
            graph.add_room(unit_at(x, 0));
        }
        let mut rng1 = MapRng::new(7);
        let mut rng2 = MapRng::new(7);
        for _ in 0..20 {
            assert_eq!(graph.random_room(&mut rng1), graph.random_room(&mut rng2));
        }
    }
}
