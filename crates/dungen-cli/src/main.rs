//! Terminal front-end for the dungen map generator.
//!
//! Parses the generation knobs, runs the pure pipeline, and renders the
//! resulting room graph as a colored grid on stdout. Can replay the whole
//! snapshot sequence step by step or dump the final map and report as JSON.

use std::collections::BTreeMap;
use std::error::Error;
use std::process;

use clap::Parser;
use crossterm::style::{Color, Stylize};

use dungen_core::{generate, GeneratorConfig, GraphSnapshot, MapRng, Report};

#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(author, version, about = "Grid-aligned dungeon map generator", long_about = None)]
struct Args {
    /// Total room budget
    #[arg(short = 'n', long = "rooms", default_value_t = 20)]
    rooms: u32,

    /// Fraction of the budget spent on the main road
    #[arg(long = "main-road-ratio", default_value_t = 0.35)]
    main_road_ratio: f64,

    /// Merge progress target as a fraction of the room count
    #[arg(long = "merge-ratio", default_value_t = 0.2)]
    merge_ratio: f64,

    /// Chance to attempt a second fuse after a successful one
    #[arg(long = "further-merge-ratio", default_value_t = 0.7)]
    further_merge_ratio: f64,

    /// How many 1x3 composite rooms a map may contain
    #[arg(long = "room-1x3-capacity", default_value_t = 1)]
    room_1x3_capacity: u32,

    /// How many 2x2 composite rooms a map may contain
    #[arg(long = "room-2x2-capacity", default_value_t = 1)]
    room_2x2_capacity: u32,

    /// RNG seed; omit for a fresh one per run
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Number of maps to generate
    #[arg(short = 'c', long = "count", default_value_t = 1)]
    count: u32,

    /// Dump the final map and report as JSON instead of rendering
    #[arg(long = "json")]
    json: bool,

    /// Render every snapshot in order instead of only the final map
    #[arg(long = "steps")]
    steps: bool,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("dungen: {err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = GeneratorConfig {
        room_count: args.rooms,
        main_road_ratio: args.main_road_ratio,
        merge_ratio: args.merge_ratio,
        further_merge_ratio: args.further_merge_ratio,
        room_1x3_capacity: args.room_1x3_capacity,
        room_2x2_capacity: args.room_2x2_capacity,
        ..Default::default()
    };
    let base_seed = args.seed.unwrap_or_else(|| MapRng::from_entropy().seed());

    for run_index in 0..args.count {
        let seed = base_seed.wrapping_add(run_index as u64);
        let output = generate(&config, seed)?;

        if args.json {
            let doc = serde_json::json!({
                "seed": seed,
                "report": output.report,
                "map": output.snapshots.last(),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
            continue;
        }

        println!("seed {seed}");
        if args.steps {
            for (step, snapshot) in output.snapshots.iter().enumerate() {
                println!("step {step}");
                render(snapshot);
                println!();
            }
        } else if let Some(last) = output.snapshots.last() {
            render(last);
        }
        print_report(&output.report);
        if run_index + 1 < args.count {
            println!();
        }
    }
    Ok(())
}

fn print_report(report: &Report) {
    println!(
        "rooms: {} total, {} leaf, {} interior",
        report.total_rooms, report.leaf_rooms, report.interior_rooms
    );
}

/// Draw one snapshot as a colored cell grid.
///
/// Each map cell is one two-column block; between adjacent room footprints a
/// dimmed connector marks the corridor at the edge's anchor midpoint.
fn render(snapshot: &GraphSnapshot) {
    // lay room cells onto a doubled grid so connectors get their own spot
    let mut cells: BTreeMap<(i32, i32), Color> = BTreeMap::new();
    for room in &snapshot.rooms {
        let color = rgb(room.room_type.color());
        for dy in 0..room.height {
            for dx in 0..room.width {
                let gx = (room.coordinate.x + dx) * 2;
                let gy = (room.coordinate.y + dy) * 2;
                cells.insert((gx, gy), color);
                // fill the seam between cells of the same room
                if dx > 0 {
                    cells.insert((gx - 1, gy), color);
                }
                if dy > 0 {
                    cells.insert((gx, gy - 1), color);
                }
                if dx > 0 && dy > 0 {
                    cells.insert((gx - 1, gy - 1), color);
                }
            }
        }
    }
    let connector = Color::Rgb {
        r: 0x60,
        g: 0x60,
        b: 0x60,
    };
    for edge in &snapshot.edges {
        let gx = edge.a_anchor.x + edge.b_anchor.x;
        let gy = edge.a_anchor.y + edge.b_anchor.y;
        cells.entry((gx, gy)).or_insert(connector);
    }

    let Some((&(first_x, first_y), _)) = cells.iter().next() else {
        return;
    };
    let mut min_x = first_x;
    let mut max_x = first_x;
    let mut min_y = first_y;
    let mut max_y = first_y;
    for &(x, y) in cells.keys() {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    for y in min_y..=max_y {
        let mut line = String::new();
        for x in min_x..=max_x {
            match cells.get(&(x, y)) {
                Some(&color) => line.push_str(&"██".with(color).to_string()),
                None => line.push_str("  "),
            }
        }
        println!("{line}");
    }
}

/// Parse a `#RRGGBB` color into a terminal color
fn rgb(hex: &str) -> Color {
    let value = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        value
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .unwrap_or(0)
    };
    Color::Rgb {
        r: channel(0..2),
        g: channel(2..4),
        b: channel(4..6),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_parses_hex_triplets() {
        let color = rgb("#4CAF50");
        assert_eq!(
            color,
            Color::Rgb {
                r: 0x4C,
                g: 0xAF,
                b: 0x50
            }
        );
    }

    #[test]
    fn test_rgb_tolerates_garbage() {
        assert_eq!(rgb("#zzzzzz"), Color::Rgb { r: 0, g: 0, b: 0 });
    }
}
