//! Corridor edges between rooms.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::coord::Coordinate;
use super::room::RoomId;

/// Stable handle identifying an edge
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EdgeId(pub u32);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Undirected corridor between two rooms.
///
/// Each side carries the grid cell used as the edge's visual and logical
/// anchor; the anchor always lies inside that side's room footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: RoomId,
    pub a_anchor: Coordinate,
    pub b: RoomId,
    pub b_anchor: Coordinate,
}

impl Edge {
    pub fn new(a: RoomId, a_anchor: Coordinate, b: RoomId, b_anchor: Coordinate) -> Self {
        Self {
            a,
            a_anchor,
            b,
            b_anchor,
        }
    }

    /// The endpoint opposite to `room`, or None if the edge does not touch it
    pub fn other(&self, room: RoomId) -> Option<RoomId> {
        if room == self.a {
            Some(self.b)
        } else if room == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// The anchor cell on `room`'s side of the edge
    pub fn anchor_of(&self, room: RoomId) -> Option<Coordinate> {
        if room == self.a {
            Some(self.a_anchor)
        } else if room == self.b {
            Some(self.b_anchor)
        } else {
            None
        }
    }

    /// True when the edge connects `x` and `y` (in either orientation)
    pub fn connects(&self, x: RoomId, y: RoomId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}
