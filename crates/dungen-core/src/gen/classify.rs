//! Topology-driven room type assignment.
//!
//! Runs once, after merging and BFS labeling, over every room still typed
//! pending. Leaves (degree 1) receive shop/event/blessing types, interior
//! rooms battle/elites; the entrance neighborhood is kept simple by forcing
//! battle near the start. Event/blessing and battle/elites are drawn from
//! self-balancing pools: after each draw the type *not* chosen is appended
//! back, which keeps the pair roughly even over a run instead of sampling
//! independently.

use crate::gen::analysis::Topology;
use crate::map::{RoomGraph, RoomId, RoomType, SnapshotLog};
use crate::rng::MapRng;

/// The counterweight appended to a pool after a draw
fn counterpart(room_type: RoomType) -> RoomType {
    match room_type {
        RoomType::Event => RoomType::Blessing,
        RoomType::Blessing => RoomType::Event,
        RoomType::Battle => RoomType::Elites,
        RoomType::Elites => RoomType::Battle,
        other => other,
    }
}

/// Draw one type from a self-balancing pool
fn draw(pool: &mut Vec<RoomType>, rng: &mut MapRng) -> RoomType {
    let chosen = pool.remove(rng.index(pool.len()));
    pool.push(counterpart(chosen));
    chosen
}

/// Assign a gameplay type to every pending room.
///
/// Each discrete assignment is one recorded snapshot.
pub fn assign_types(
    graph: &mut RoomGraph,
    topology: &Topology,
    log: &mut SnapshotLog,
    rng: &mut MapRng,
) {
    // partition pending rooms in creation order
    let pending: Vec<RoomId> = graph
        .creation_order()
        .iter()
        .copied()
        .filter(|&id| {
            graph
                .room(id)
                .is_some_and(|room| room.room_type == RoomType::Pending)
        })
        .collect();

    let mut leaves = Vec::new();
    let mut interior = Vec::new();
    for id in pending {
        if graph.degree(id) == 1 {
            if let Some(room) = graph.room_mut(id) {
                room.annotate("leaf");
            }
            leaves.push(id);
        } else {
            interior.push(id);
        }
    }

    // one random leaf becomes the shop
    if !leaves.is_empty() {
        let shop = leaves.remove(rng.index(leaves.len()));
        set_type(graph, shop, RoomType::Shop, log);
    }

    // remaining leaves alternate between event and blessing
    let mut leaf_pool = vec![RoomType::Event, RoomType::Blessing];
    for id in leaves {
        let chosen = draw(&mut leaf_pool, rng);
        set_type(graph, id, chosen, log);
    }

    // interior rooms: the entrance neighborhood and all remaining 1x1 rooms
    // stay battle; exact 2x2 footprints become elites; the rest alternate
    let mut interior_pool = vec![RoomType::Battle, RoomType::Elites];
    for id in interior {
        let Some(room) = graph.room(id) else {
            continue;
        };
        let chosen = if room.is_unit() || topology.distance_of(id) < 2 {
            RoomType::Battle
        } else if room.width == 2 && room.height == 2 {
            RoomType::Elites
        } else {
            draw(&mut interior_pool, rng)
        };
        set_type(graph, id, chosen, log);
    }
}

fn set_type(graph: &mut RoomGraph, id: RoomId, room_type: RoomType, log: &mut SnapshotLog) {
    if let Some(room) = graph.room_mut(id) {
        room.room_type = room_type;
        log.record(graph);
    }
}
