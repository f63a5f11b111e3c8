//! The generation pipeline.
//!
//! Pure entry point: configuration plus seed in, finished graph plus replay
//! snapshots plus report out. No global state, no I/O; any interactive shell
//! re-invokes [`generate`] whenever a knob changes.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GeneratorConfig};
use crate::gen::analysis::analyze;
use crate::gen::classify::assign_types;
use crate::gen::growth::FrontierGrowth;
use crate::gen::merge::MergeEngine;
use crate::map::{GraphSnapshot, RoomGraph, RoomType, SnapshotLog};
use crate::rng::MapRng;

/// Room counts after final classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Rooms with exactly one incident edge
    pub leaf_rooms: u32,
    /// Every other room (a solitary room counts as interior)
    pub interior_rooms: u32,
    pub total_rooms: u32,
}

impl Report {
    fn of(graph: &RoomGraph) -> Self {
        let leaf_rooms = graph
            .rooms()
            .filter(|&(id, _)| graph.degree(id) == 1)
            .count() as u32;
        let total_rooms = graph.room_count() as u32;
        Self {
            leaf_rooms,
            interior_rooms: total_rooms - leaf_rooms,
            total_rooms,
        }
    }
}

/// Everything one generation run produces
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// The finished graph
    pub graph: RoomGraph,
    /// One immutable capture per atomic mutation, in order
    pub snapshots: Vec<GraphSnapshot>,
    pub report: Report,
}

/// Generate one map.
///
/// Deterministic: identical configuration and seed produce an identical
/// snapshot sequence and final graph. Configuration is validated before the
/// first mutation; a shortfall against `room_count` (frontier exhaustion)
/// is not an error and shows up only in the report.
pub fn generate(config: &GeneratorConfig, seed: u64) -> Result<GenerationOutput, ConfigError> {
    config.validate()?;

    let mut rng = MapRng::new(seed);
    let mut graph = RoomGraph::new();
    let mut log = SnapshotLog::new();

    // grow the main path, then mark the provisional rest/boss rooms, then
    // spend the remaining budget on branches
    let mut growth = FrontierGrowth::new();
    let start = growth.place_start(&mut graph, &mut log);
    growth.grow_main_path(
        &mut graph,
        start,
        config.main_road_length() - 1,
        &mut log,
        &mut rng,
    );
    mark_provisional_rooms(&mut graph, &mut log);
    growth.grow_branches(&mut graph, config.branch_budget(), &mut log, &mut rng);

    // fuse unit rooms into larger footprints
    let target = config.merge_ratio * graph.room_count() as f64;
    MergeEngine::new(config).run(&mut graph, target, &mut log, &mut rng);

    // label distances, classify, and mark the path to the boss room
    let topology = analyze(&graph, start);
    for (&id, &distance) in topology.distance.iter() {
        if let Some(room) = graph.room_mut(id) {
            room.annotate(&distance.to_string());
        }
    }
    assign_types(&mut graph, &topology, &mut log, &mut rng);
    if let Some(boss) = graph.find_type(RoomType::Boss) {
        if let Some(path) = topology.path.get(&boss) {
            for &id in path {
                if let Some(room) = graph.room_mut(id) {
                    room.annotate("main_path");
                }
            }
        }
    }

    let report = Report::of(&graph);
    Ok(GenerationOutput {
        graph,
        snapshots: log.into_steps(),
        report,
    })
}

/// Mark the middle room (by creation order) as the provisional rest stop and
/// the most recently created room as the provisional boss room.
///
/// With a single room both indices resolve to it, so the later boss write
/// overwrites the rest mark; that collapse is intended.
fn mark_provisional_rooms(graph: &mut RoomGraph, log: &mut SnapshotLog) {
    let order = graph.creation_order().to_vec();
    if order.is_empty() {
        return;
    }
    let rest = order[order.len() / 2];
    if let Some(room) = graph.room_mut(rest) {
        room.room_type = RoomType::Rest;
        log.record(graph);
    }
    let boss = order[order.len() - 1];
    if let Some(room) = graph.room_mut(boss) {
        room.room_type = RoomType::Boss;
        log.record(graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_room_collapses_to_boss() {
        let config = GeneratorConfig {
            room_count: 1,
            ..Default::default()
        };
        let output = generate(&config, 99).unwrap();

        assert_eq!(output.report.total_rooms, 1);
        let (_, room) = output.graph.rooms().next().unwrap();
        // the rest mark lands on index 0, then the boss mark overwrites it
        assert_eq!(room.room_type, RoomType::Boss);
    }

    #[test]
    fn test_report_counts_are_consistent() {
        let output = generate(&GeneratorConfig::default(), 7).unwrap();
        let report = output.report;
        assert_eq!(report.leaf_rooms + report.interior_rooms, report.total_rooms);
        assert_eq!(report.total_rooms as usize, output.graph.room_count());
    }

    #[test]
    fn test_never_more_rooms_than_budget() {
        for seed in 0..20 {
            let output = generate(&GeneratorConfig::default(), seed).unwrap();
            assert!(output.report.total_rooms <= 20);
        }
    }

    #[test]
    fn test_exactly_one_boss_and_at_most_one_start() {
        for seed in 0..20 {
            let output = generate(&GeneratorConfig::default(), seed).unwrap();
            let bosses = output
                .graph
                .rooms()
                .filter(|(_, r)| r.room_type == RoomType::Boss)
                .count();
            assert_eq!(bosses, 1);
            let pending = output
                .graph
                .rooms()
                .filter(|(_, r)| r.room_type == RoomType::Pending)
                .count();
            assert_eq!(pending, 0, "no room may leave classification pending");
        }
    }

    #[test]
    fn test_merge_ratio_zero_keeps_unit_rooms() {
        let config = GeneratorConfig {
            merge_ratio: 0.0,
            ..Default::default()
        };
        for seed in 0..10 {
            let output = generate(&config, seed).unwrap();
            for (_, room) in output.graph.rooms() {
                assert!(room.is_unit());
            }
        }
    }

    #[test]
    fn test_zero_capacities_cap_composites_at_two_cells() {
        let config = GeneratorConfig {
            room_1x3_capacity: 0,
            room_2x2_capacity: 0,
            merge_ratio: 1.0,
            ..Default::default()
        };
        for seed in 0..10 {
            let output = generate(&config, seed).unwrap();
            for (_, room) in output.graph.rooms() {
                assert!(room.area() <= 2);
            }
        }
    }

    #[test]
    fn test_final_graph_is_connected_with_no_strands() {
        for seed in 0..20 {
            let output = generate(&GeneratorConfig::default(), seed).unwrap();
            assert!(output.graph.is_connected());
            if output.graph.room_count() > 1 {
                for (id, _) in output.graph.rooms().collect::<Vec<_>>() {
                    assert!(output.graph.degree(id) >= 1);
                }
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_any_mutation() {
        let config = GeneratorConfig {
            room_count: 0,
            ..Default::default()
        };
        assert!(generate(&config, 1).is_err());
    }
}
