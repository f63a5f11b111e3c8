//! Immutable graph captures for stepped replay.
//!
//! One snapshot is recorded after each atomic mutation; the ordered list of
//! snapshots is the replay artifact handed to renderers. Snapshots never
//! feed back into generation logic.

use serde::{Deserialize, Serialize};

use super::coord::Coordinate;
use super::edge::EdgeId;
use super::graph::RoomGraph;
use super::room::{RoomId, RoomType};

/// Read-only view of one room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomView {
    pub id: RoomId,
    pub coordinate: Coordinate,
    pub width: i32,
    pub height: i32,
    pub room_type: RoomType,
    pub annotation: String,
}

/// Read-only view of one edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeView {
    pub id: EdgeId,
    pub a: RoomId,
    pub a_anchor: Coordinate,
    pub b: RoomId,
    pub b_anchor: Coordinate,
}

/// Immutable capture of the whole graph, rooms and edges in handle order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub rooms: Vec<RoomView>,
    pub edges: Vec<EdgeView>,
}

impl GraphSnapshot {
    /// Capture the current graph state
    pub fn capture(graph: &RoomGraph) -> Self {
        let rooms = graph
            .rooms()
            .map(|(id, room)| RoomView {
                id,
                coordinate: room.coordinate,
                width: room.width,
                height: room.height,
                room_type: room.room_type,
                annotation: room.annotation.clone(),
            })
            .collect();
        let edges = graph
            .edges()
            .map(|(id, edge)| EdgeView {
                id,
                a: edge.a,
                a_anchor: edge.a_anchor,
                b: edge.b,
                b_anchor: edge.b_anchor,
            })
            .collect();
        Self { rooms, edges }
    }
}

/// Ordered log of snapshots, one per atomic mutation
#[derive(Debug, Clone, Default)]
pub struct SnapshotLog {
    steps: Vec<GraphSnapshot>,
}

impl SnapshotLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the graph as it stands right now
    pub fn record(&mut self, graph: &RoomGraph) {
        self.steps.push(GraphSnapshot::capture(graph));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[GraphSnapshot] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<GraphSnapshot> {
        self.steps
    }
}
