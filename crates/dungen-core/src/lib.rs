//! dungen-core: procedural room-graph dungeon generation.
//!
//! Generates a connected, grid-aligned dungeon map for turn-based and
//! roguelike games: rectangular rooms joined by corridor edges, grown from a
//! start room, stochastically merged into larger footprints, BFS-labeled and
//! classified into gameplay types. Alongside the finished graph the pipeline
//! records one immutable snapshot per atomic mutation for stepped or
//! animated replay, plus a leaf/interior/total room report.
//!
//! The crate is pure and single-threaded: no I/O, no global state, and a
//! seeded, injectable RNG, so identical configuration and seed reproduce the
//! run bit for bit. Rendering, UI and CLI wiring live in consumer crates
//! that read the graph through its traversal interface only.

pub mod config;
pub mod gen;
pub mod map;
pub mod rng;

pub use config::{ConfigError, GeneratorConfig};
pub use gen::{generate, GenerationOutput, Report};
pub use map::{
    Coordinate, Edge, EdgeId, EdgeView, GraphSnapshot, Room, RoomGraph, RoomId, RoomType,
    RoomView, SnapshotLog,
};
pub use rng::MapRng;
