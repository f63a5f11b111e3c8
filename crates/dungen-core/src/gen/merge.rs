//! Stochastic room merging.
//!
//! Fuses adjacent 1x1 pending rooms into 2-cell, 1x3/3x1 and 2x2 composites
//! without ever disconnecting the graph or stranding a room. Every attempt
//! is validated before commit: a rejected attempt leaves the graph exactly
//! as it was and only charges a small penalty to the iteration budget, so
//! the loop terminates even when no merge remains possible.

use std::collections::BTreeSet;

use crate::config::GeneratorConfig;
use crate::map::{Coordinate, Room, RoomGraph, RoomId, RoomType, SnapshotLog};
use crate::rng::MapRng;

/// Budget charge for an attempt that could not commit
const FAILURE_PENALTY: f64 = 0.01;

/// Reasons a fuse attempt is rejected; never escapes the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeReject {
    /// The parts do not tile a solid rectangle
    NotRectangular,
    /// The composite would end with degree <= 1
    WouldStrand,
}

/// Shapes a committed 2-cell merge can be extended into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extension {
    OneByThree,
    TwoByTwo,
}

#[derive(Debug)]
pub struct MergeEngine {
    further_merge_ratio: f64,
    quota_1x3: u32,
    quota_2x2: u32,
}

impl MergeEngine {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            further_merge_ratio: config.further_merge_ratio,
            quota_1x3: config.room_1x3_capacity,
            quota_2x2: config.room_2x2_capacity,
        }
    }

    /// Run merge attempts until the accumulator reaches `target`.
    ///
    /// A committed primary merge is worth 1.0; a further merge adds 1.0 per
    /// extra room it consumed. The stopping rule is intentionally
    /// approximate: it expresses a ratio, not an exact merge count.
    pub fn run(
        &mut self,
        graph: &mut RoomGraph,
        target: f64,
        log: &mut SnapshotLog,
        rng: &mut MapRng,
    ) {
        let mut progress = 0.0;
        while progress < target {
            progress += self.step(graph, log, rng);
        }
    }

    /// One randomized merge attempt; returns the budget delta
    fn step(&mut self, graph: &mut RoomGraph, log: &mut SnapshotLog, rng: &mut MapRng) -> f64 {
        let Some(room_id) = graph.random_room(rng) else {
            return FAILURE_PENALTY;
        };
        let incident = graph.neighbors_of(room_id);
        if incident.is_empty() {
            return FAILURE_PENALTY;
        }
        let edge_id = incident[rng.index(incident.len())];
        let Some(partner_id) = graph.edge(edge_id).and_then(|e| e.other(room_id)) else {
            return FAILURE_PENALTY;
        };

        if !self.primary_eligible(graph, room_id, partner_id) {
            return FAILURE_PENALTY;
        }

        match fuse(graph, &[room_id, partner_id]) {
            Ok(composite) => {
                log.record(graph);
                let mut reward = 1.0;
                if rng.chance(self.further_merge_ratio) {
                    reward += self.further_merge(graph, composite, log, rng);
                }
                reward
            }
            Err(_) => FAILURE_PENALTY,
        }
    }

    /// Both rooms pending, both 1x1, and collinear on one axis so they tile
    /// a 2-cell rectangle
    fn primary_eligible(&self, graph: &RoomGraph, a: RoomId, b: RoomId) -> bool {
        let (Some(room_a), Some(room_b)) = (graph.room(a), graph.room(b)) else {
            return false;
        };
        room_a.room_type == RoomType::Pending
            && room_b.room_type == RoomType::Pending
            && room_a.is_unit()
            && room_b.is_unit()
            && room_a.coordinate.is_adjacent(room_b.coordinate)
    }

    /// Try to extend a just-committed 2-cell composite into a larger shape.
    ///
    /// Each shape has an independent quota; once a quota is spent only the
    /// other shape is attempted, and when both are spent the step is a
    /// no-op. A failed extension leaves the primary merge committed.
    /// Returns the extra budget reward (rooms consumed by the extension).
    fn further_merge(
        &mut self,
        graph: &mut RoomGraph,
        composite: RoomId,
        log: &mut SnapshotLog,
        rng: &mut MapRng,
    ) -> f64 {
        let shape = match (self.quota_1x3 > 0, self.quota_2x2 > 0) {
            (false, false) => return 0.0,
            (true, false) => Extension::OneByThree,
            (false, true) => Extension::TwoByTwo,
            (true, true) => {
                if rng.chance(0.5) {
                    Extension::OneByThree
                } else {
                    Extension::TwoByTwo
                }
            }
        };

        match shape {
            Extension::OneByThree => {
                if self.extend_1x3(graph, composite, log) {
                    self.quota_1x3 -= 1;
                    1.0
                } else {
                    0.0
                }
            }
            Extension::TwoByTwo => {
                if self.extend_2x2(graph, composite, log, rng) {
                    self.quota_2x2 -= 1;
                    2.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Pull one more collinear 1x1 pending neighbor (own degree > 1) into
    /// the composite, forming a 1x3 or 3x1 footprint
    fn extend_1x3(&self, graph: &mut RoomGraph, composite: RoomId, log: &mut SnapshotLog) -> bool {
        let Some(comp) = graph.room(composite) else {
            return false;
        };
        let horizontal = comp.width == 2;
        let anchor = comp.coordinate;

        let candidate = graph.adjacent_rooms(composite).into_iter().find(|&id| {
            let Some(room) = graph.room(id) else {
                return false;
            };
            if room.room_type != RoomType::Pending || !room.is_unit() || graph.degree(id) <= 1 {
                return false;
            }
            if horizontal {
                room.coordinate.y == anchor.y
                    && (room.coordinate.x == anchor.x - 1 || room.coordinate.x == anchor.x + 2)
            } else {
                room.coordinate.x == anchor.x
                    && (room.coordinate.y == anchor.y - 1 || room.coordinate.y == anchor.y + 2)
            }
        });

        let Some(neighbor) = candidate else {
            return false;
        };
        if fuse(graph, &[composite, neighbor]).is_ok() {
            log.record(graph);
            true
        } else {
            false
        }
    }

    /// Pull in the two 1x1 pending rooms forming the missing half of a 2x2,
    /// on one of the two sides perpendicular to the composite's long axis
    fn extend_2x2(
        &self,
        graph: &mut RoomGraph,
        composite: RoomId,
        log: &mut SnapshotLog,
        rng: &mut MapRng,
    ) -> bool {
        let Some(comp) = graph.room(composite) else {
            return false;
        };
        let horizontal = comp.width == 2;
        let anchor = comp.coordinate;

        // the two candidate cell pairs flanking the long axis
        let sides: [(Coordinate, Coordinate); 2] = if horizontal {
            [
                (
                    Coordinate::new(anchor.x, anchor.y - 1),
                    Coordinate::new(anchor.x + 1, anchor.y - 1),
                ),
                (
                    Coordinate::new(anchor.x, anchor.y + 1),
                    Coordinate::new(anchor.x + 1, anchor.y + 1),
                ),
            ]
        } else {
            [
                (
                    Coordinate::new(anchor.x - 1, anchor.y),
                    Coordinate::new(anchor.x - 1, anchor.y + 1),
                ),
                (
                    Coordinate::new(anchor.x + 1, anchor.y),
                    Coordinate::new(anchor.x + 1, anchor.y + 1),
                ),
            ]
        };

        let valid: Vec<(RoomId, RoomId)> = sides
            .iter()
            .filter_map(|&(cell_a, cell_b)| self.side_pair(graph, composite, cell_a, cell_b))
            .collect();

        let pair = match valid.as_slice() {
            [] => return false,
            [only] => *only,
            [first, second] => {
                if rng.chance(0.5) {
                    *first
                } else {
                    *second
                }
            }
            _ => return false,
        };

        if fuse(graph, &[composite, pair.0, pair.1]).is_ok() {
            log.record(graph);
            true
        } else {
            false
        }
    }

    /// A side qualifies when both cells hold 1x1 pending rooms that are
    /// mutually connected, with at least one of them connected to the
    /// composite
    fn side_pair(
        &self,
        graph: &RoomGraph,
        composite: RoomId,
        cell_a: Coordinate,
        cell_b: Coordinate,
    ) -> Option<(RoomId, RoomId)> {
        let a = graph.room_at(cell_a)?;
        let b = graph.room_at(cell_b)?;
        if a == b || a == composite || b == composite {
            return None;
        }
        let room_a = graph.room(a)?;
        let room_b = graph.room(b)?;
        let units_pending = room_a.room_type == RoomType::Pending
            && room_b.room_type == RoomType::Pending
            && room_a.is_unit()
            && room_b.is_unit();
        if !units_pending {
            return None;
        }
        if !graph.are_connected(a, b) {
            return None;
        }
        if !graph.are_connected(a, composite) && !graph.are_connected(b, composite) {
            return None;
        }
        Some((a, b))
    }
}

/// Fuse the given rooms into one composite.
///
/// The attempt is validated in full before any mutation, so a rejection
/// leaves the graph untouched. On commit the originals are retired, a fresh
/// identity is created for the composite, every edge that touched an
/// original is recreated against the composite (anchors preserved where they
/// still fall inside the new footprint), and edges internal to the fused set
/// are dropped.
fn fuse(graph: &mut RoomGraph, parts: &[RoomId]) -> Result<RoomId, MergeReject> {
    let rooms: Vec<&Room> = parts.iter().filter_map(|&id| graph.room(id)).collect();
    if rooms.len() != parts.len() {
        return Err(MergeReject::NotRectangular);
    }

    // bounding rectangle of all parts
    let min_x = rooms.iter().map(|r| r.coordinate.x).min().unwrap_or(0);
    let min_y = rooms.iter().map(|r| r.coordinate.y).min().unwrap_or(0);
    let max_x = rooms
        .iter()
        .map(|r| r.coordinate.x + r.width)
        .max()
        .unwrap_or(0);
    let max_y = rooms
        .iter()
        .map(|r| r.coordinate.y + r.height)
        .max()
        .unwrap_or(0);
    let width = max_x - min_x;
    let height = max_y - min_y;

    // the parts must tile the rectangle exactly
    let tiled: i32 = rooms.iter().map(|r| r.area()).sum();
    if tiled != width * height {
        return Err(MergeReject::NotRectangular);
    }

    let footprint = Room::new(Coordinate::new(min_x, min_y), width, height, RoomType::Pending);

    // plan the re-homed edge set before touching anything
    let mut rehomed: Vec<(Coordinate, RoomId, Coordinate)> = Vec::new();
    let mut outside: BTreeSet<RoomId> = BTreeSet::new();
    for &part in parts {
        for edge_id in graph.neighbors_of(part) {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let Some(other) = edge.other(part) else {
                continue;
            };
            if parts.contains(&other) {
                // now-internal edge, dropped
                continue;
            }
            let old_anchor = edge.anchor_of(part).unwrap_or(footprint.coordinate);
            let anchor = if footprint.contains(old_anchor) {
                old_anchor
            } else {
                footprint.coordinate
            };
            let other_anchor = edge.anchor_of(other).unwrap_or(footprint.coordinate);
            rehomed.push((anchor, other, other_anchor));
            outside.insert(other);
        }
    }

    // distinct neighbor rooms, not re-homed edges: parallel edges to one
    // neighbor must not count as degree 2
    if outside.len() <= 1 {
        return Err(MergeReject::WouldStrand);
    }

    // commit: retire originals, create the composite, recreate edges
    let composite = graph.add_room(footprint);
    for &part in parts {
        graph.remove_room(part);
    }
    for (anchor, other, other_anchor) in rehomed {
        graph.add_edge(composite, anchor, other, other_anchor);
    }
    Ok(composite)
}
