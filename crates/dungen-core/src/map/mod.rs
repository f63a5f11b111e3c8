//! Map data model.
//!
//! Coordinates, rooms, edges, the owning room graph and immutable snapshots.

mod coord;
mod edge;
mod graph;
mod room;
mod snapshot;

pub use coord::Coordinate;
pub use edge::{Edge, EdgeId};
pub use graph::RoomGraph;
pub use room::{Room, RoomId, RoomType};
pub use snapshot::{EdgeView, GraphSnapshot, RoomView, SnapshotLog};
