//! Frontier-driven graph growth.
//!
//! Grows a connected tree of 1x1 rooms from the start room. Each round the
//! frontier holds only the cells published by the most recently placed room,
//! so a strand advances as a single path instead of fanning out into a star;
//! cells that were published but not chosen accumulate in a reserve pool that
//! later seeds branch strands. A cell is never offered twice: publication
//! marks it excluded for the rest of the run.

use std::collections::BTreeSet;

use crate::map::{Coordinate, Room, RoomGraph, RoomId, RoomType, SnapshotLog};
use crate::rng::MapRng;

/// Branch strand lengths are drawn from this pool (mode 2)
const BRANCH_LENGTH_POOL: [u32; 4] = [1, 2, 2, 3];

/// A frontier entry: a candidate cell and the room that published it
type FrontierPair = (Coordinate, RoomId);

#[derive(Debug, Default)]
pub struct FrontierGrowth {
    /// Cells that have been offered once and may never be offered again
    excluded: BTreeSet<Coordinate>,
    /// Published pairs not consumed by their own round
    reserve: Vec<FrontierPair>,
}

impl FrontierGrowth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the start room at the grid origin
    pub fn place_start(&mut self, graph: &mut RoomGraph, log: &mut SnapshotLog) -> RoomId {
        let origin = Coordinate::new(0, 0);
        self.excluded.insert(origin);
        let start = graph.add_room(Room::unit(origin, RoomType::Start));
        log.record(graph);
        start
    }

    /// Grow the main path: `steps` rooms in one strand leading away from
    /// `start`. Returns the number of rooms actually placed; a shortfall
    /// means the frontier emptied early and is not an error.
    pub fn grow_main_path(
        &mut self,
        graph: &mut RoomGraph,
        start: RoomId,
        steps: u32,
        log: &mut SnapshotLog,
        rng: &mut MapRng,
    ) -> u32 {
        let origin = match graph.room(start) {
            Some(room) => room.coordinate,
            None => return 0,
        };
        let frontier = self.publish_neighbors(graph, start, origin);
        self.grow_strand(graph, frontier, steps, log, rng)
    }

    /// Spend the branch budget on strands seeded from the reserve pool.
    ///
    /// Each strand's length is drawn from {1, 2, 2, 3}, clipped to the
    /// remaining budget. Stops when the budget is exhausted or no frontier
    /// pair remains.
    pub fn grow_branches(
        &mut self,
        graph: &mut RoomGraph,
        budget: u32,
        log: &mut SnapshotLog,
        rng: &mut MapRng,
    ) -> u32 {
        let mut placed_total = 0;
        let mut remaining = budget;
        while remaining > 0 && !self.reserve.is_empty() {
            let length = BRANCH_LENGTH_POOL[rng.index(BRANCH_LENGTH_POOL.len())].min(remaining);
            let seed = self.reserve.remove(rng.index(self.reserve.len()));
            let placed = self.grow_strand(graph, vec![seed], length, log, rng);
            placed_total += placed;
            remaining -= placed;
        }
        placed_total
    }

    /// Round-restricted strand growth.
    ///
    /// Each step picks uniformly from the previous round's frontier only,
    /// places a 1x1 pending room there, joins it to its parent, then
    /// publishes the new room's open neighbors as the next round. Leftover
    /// pairs from every round drop into the reserve pool.
    fn grow_strand(
        &mut self,
        graph: &mut RoomGraph,
        mut frontier: Vec<FrontierPair>,
        steps: u32,
        log: &mut SnapshotLog,
        rng: &mut MapRng,
    ) -> u32 {
        let mut placed = 0;
        for _ in 0..steps {
            if frontier.is_empty() {
                break;
            }
            let (cell, parent) = frontier.remove(rng.index(frontier.len()));
            self.reserve.append(&mut frontier);

            let parent_anchor = match graph.room(parent) {
                Some(room) => room.coordinate,
                None => break,
            };
            let room = graph.add_room(Room::unit(cell, RoomType::Pending));
            graph.add_edge(parent, parent_anchor, room, cell);
            log.record(graph);
            placed += 1;

            frontier = self.publish_neighbors(graph, room, cell);
        }
        self.reserve.append(&mut frontier);
        placed
    }

    /// Offer the open neighbors of a cell as the next round's frontier,
    /// marking each one excluded as it is published
    fn publish_neighbors(
        &mut self,
        graph: &RoomGraph,
        owner: RoomId,
        cell: Coordinate,
    ) -> Vec<FrontierPair> {
        let mut next = Vec::new();
        for neighbor in cell.neighbors() {
            if graph.room_at(neighbor).is_none() && !self.excluded.contains(&neighbor) {
                self.excluded.insert(neighbor);
                next.push((neighbor, owner));
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grown(seed: u64, main_steps: u32, branch_budget: u32) -> (RoomGraph, RoomId) {
        let mut graph = RoomGraph::new();
        let mut log = SnapshotLog::new();
        let mut rng = MapRng::new(seed);
        let mut growth = FrontierGrowth::new();
        let start = growth.place_start(&mut graph, &mut log);
        growth.grow_main_path(&mut graph, start, main_steps, &mut log, &mut rng);
        growth.grow_branches(&mut graph, branch_budget, &mut log, &mut rng);
        (graph, start)
    }

    #[test]
    fn test_main_path_is_a_single_strand() {
        for seed in 0..10 {
            let mut graph = RoomGraph::new();
            let mut log = SnapshotLog::new();
            let mut rng = MapRng::new(seed);
            let mut growth = FrontierGrowth::new();
            let start = growth.place_start(&mut graph, &mut log);
            let placed = growth.grow_main_path(&mut graph, start, 6, &mut log, &mut rng);
            assert!(placed >= 1);
            assert_eq!(graph.room_count() as u32, placed + 1);

            // a strand is a path: every degree <= 2, exactly two ends
            let ends = graph
                .rooms()
                .map(|(id, _)| graph.degree(id))
                .inspect(|&d| assert!(d <= 2))
                .filter(|&d| d == 1)
                .count();
            assert_eq!(ends, 2);
        }
    }

    #[test]
    fn test_growth_never_exceeds_budget() {
        for seed in 0..10 {
            let (graph, _) = grown(seed, 6, 13);
            assert!(graph.room_count() <= 20);
            assert!(graph.room_count() > 7, "branches should place rooms");
        }
    }

    #[test]
    fn test_grown_graph_is_connected_tree() {
        for seed in 0..10 {
            let (graph, _) = grown(seed, 6, 13);
            assert!(graph.is_connected());
            // tree: edges == rooms - 1
            assert_eq!(graph.edge_count(), graph.room_count() - 1);
        }
    }

    #[test]
    fn test_no_overlapping_footprints() {
        let (graph, _) = grown(3, 9, 20);
        let rooms: Vec<_> = graph.rooms().map(|(_, r)| r.clone()).collect();
        for (i, a) in rooms.iter().enumerate() {
            for b in rooms.iter().skip(i + 1) {
                assert!(!a.overlaps(b));
            }
        }
    }

    #[test]
    fn test_snapshot_recorded_per_placement() {
        let mut graph = RoomGraph::new();
        let mut log = SnapshotLog::new();
        let mut rng = MapRng::new(1);
        let mut growth = FrontierGrowth::new();
        let start = growth.place_start(&mut graph, &mut log);
        let placed = growth.grow_main_path(&mut graph, start, 4, &mut log, &mut rng);
        assert_eq!(log.len() as u32, 1 + placed);
    }
}
