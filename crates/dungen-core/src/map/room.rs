//! Room types and structures.

use core::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::coord::Coordinate;

/// Stable handle identifying a room for the room's whole lifetime.
///
/// Merging never reuses a handle: the fused originals are retired and the
/// composite receives a fresh identity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Gameplay room types
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum RoomType {
    Start,
    Boss,
    Battle,
    Elites,
    Blessing,
    Shop,
    Event,
    Rest,
    /// Not yet assigned a gameplay type
    #[default]
    Pending,
}

impl RoomType {
    /// Display color for this room type, as a `#RRGGBB` hex string
    pub fn color(self) -> &'static str {
        match self {
            RoomType::Start => "#007D3C",
            RoomType::Boss => "#730505",
            RoomType::Battle => "#BA5D03",
            RoomType::Elites => "#8E0668",
            RoomType::Blessing => "#FCC737",
            RoomType::Shop => "#3E3CD8",
            RoomType::Event => "#21A1B3",
            RoomType::Rest => "#CC2BB1",
            RoomType::Pending => "#9E9E9E",
        }
    }
}

/// Rectangular room footprint anchored at its top-left cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Top-left cell of the footprint
    pub coordinate: Coordinate,
    /// Footprint width in cells
    pub width: i32,
    /// Footprint height in cells
    pub height: i32,
    /// Gameplay type
    pub room_type: RoomType,
    /// Free-text diagnostics buffer (distance labels, "leaf", "main_path")
    pub annotation: String,
}

impl Room {
    /// Create a room with the given footprint and type
    pub fn new(coordinate: Coordinate, width: i32, height: i32, room_type: RoomType) -> Self {
        Self {
            coordinate,
            width,
            height,
            room_type,
            annotation: String::new(),
        }
    }

    /// Create a 1x1 unit room
    pub fn unit(coordinate: Coordinate, room_type: RoomType) -> Self {
        Self::new(coordinate, 1, 1, room_type)
    }

    /// True for a 1x1 footprint
    pub fn is_unit(&self) -> bool {
        self.width == 1 && self.height == 1
    }

    /// Footprint area in cells
    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Check if a cell lies inside the footprint
    pub fn contains(&self, cell: Coordinate) -> bool {
        cell.x >= self.coordinate.x
            && cell.x < self.coordinate.x + self.width
            && cell.y >= self.coordinate.y
            && cell.y < self.coordinate.y + self.height
    }

    /// Check if this footprint overlaps another
    pub fn overlaps(&self, other: &Room) -> bool {
        self.coordinate.x < other.coordinate.x + other.width
            && other.coordinate.x < self.coordinate.x + self.width
            && self.coordinate.y < other.coordinate.y + other.height
            && other.coordinate.y < self.coordinate.y + self.height
    }

    /// Iterate every cell of the footprint, row by row
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let anchor = self.coordinate;
        let width = self.width;
        (0..self.height).flat_map(move |dy| {
            (0..width).map(move |dx| Coordinate::new(anchor.x + dx, anchor.y + dy))
        })
    }

    /// Append one line to the diagnostics buffer
    pub fn annotate(&mut self, line: &str) {
        self.annotation.push_str(line);
        self.annotation.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_color_lookup_is_total() {
        for room_type in RoomType::iter() {
            let color = room_type.color();
            assert!(color.starts_with('#'));
            assert_eq!(color.len(), 7);
        }
    }

    #[test]
    fn test_contains() {
        let room = Room::new(Coordinate::new(2, 3), 2, 1, RoomType::Pending);
        assert!(room.contains(Coordinate::new(2, 3)));
        assert!(room.contains(Coordinate::new(3, 3)));
        assert!(!room.contains(Coordinate::new(4, 3)));
        assert!(!room.contains(Coordinate::new(2, 4)));
    }

    #[test]
    fn test_overlaps() {
        let a = Room::new(Coordinate::new(0, 0), 2, 2, RoomType::Pending);
        let b = Room::new(Coordinate::new(1, 1), 2, 2, RoomType::Pending);
        let c = Room::new(Coordinate::new(2, 0), 1, 1, RoomType::Pending);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_cells_cover_footprint() {
        let room = Room::new(Coordinate::new(1, 1), 2, 2, RoomType::Pending);
        let cells: Vec<_> = room.cells().collect();
        assert_eq!(cells.len(), 4);
        for cell in &cells {
            assert!(room.contains(*cell));
        }
    }

    #[test]
    fn test_annotate_appends_lines() {
        let mut room = Room::unit(Coordinate::new(0, 0), RoomType::Pending);
        room.annotate("leaf");
        room.annotate("3");
        assert_eq!(room.annotation, "leaf\n3\n");
    }
}
