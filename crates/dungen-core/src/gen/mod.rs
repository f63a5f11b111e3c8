//! Generation stages.
//!
//! Frontier growth, the merge engine, BFS labeling, type assignment and the
//! orchestrating pipeline. Every stage mutates the same [`RoomGraph`]
//! through its operations only and runs to completion before returning.
//!
//! [`RoomGraph`]: crate::map::RoomGraph

pub mod analysis;
pub mod classify;
pub mod growth;
pub mod merge;
pub mod pipeline;

pub use analysis::{analyze, Topology};
pub use classify::assign_types;
pub use growth::FrontierGrowth;
pub use merge::MergeEngine;
pub use pipeline::{generate, GenerationOutput, Report};
