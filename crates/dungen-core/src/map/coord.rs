//! Grid coordinates.

use core::fmt;
use serde::{Deserialize, Serialize};

/// One integer grid cell. Value type, equality by value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four cardinal neighbors, in a fixed scan order
    pub fn neighbors(self) -> [Coordinate; 4] {
        [
            Coordinate::new(self.x - 1, self.y),
            Coordinate::new(self.x + 1, self.y),
            Coordinate::new(self.x, self.y - 1),
            Coordinate::new(self.x, self.y + 1),
        ]
    }

    /// True when the two cells share an edge on the grid
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors() {
        let c = Coordinate::new(2, 3);
        let n = c.neighbors();
        assert_eq!(n.len(), 4);
        for neighbor in n {
            assert!(c.is_adjacent(neighbor));
        }
    }

    #[test]
    fn test_adjacency() {
        let c = Coordinate::new(0, 0);
        assert!(c.is_adjacent(Coordinate::new(1, 0)));
        assert!(c.is_adjacent(Coordinate::new(0, -1)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coordinate::new(1, 1)));
        assert!(!c.is_adjacent(Coordinate::new(2, 0)));
    }
}
