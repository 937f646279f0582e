use serde::{Deserialize, Serialize};
use std::fmt;

/// A grid coordinate. The origin (0,0) is the top-left cell and `y`
/// grows downward, so `Down` increments `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin cell — where the actor starts every run.
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    /// Offset this coordinate by a direction's unit vector.
    pub fn offset(self, dir: Direction) -> Coord {
        let (dx, dy) = dir.unit_vector();
        Coord::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four directions an actor can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in grid space (y grows downward).
    pub fn unit_vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// What kind of thing sits on a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// The goal marker.
    Star,
    /// A collectible.
    Gem,
    /// A blocked cell (rendering only — moves are clamped by bounds, not items).
    Obstacle,
}

/// An item placed on the grid by a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Coord,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(pos: Coord, kind: ItemKind) -> Self {
        Self { pos, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_vectors() {
        assert_eq!(Direction::Up.unit_vector(), (0, -1));
        assert_eq!(Direction::Down.unit_vector(), (0, 1));
        assert_eq!(Direction::Left.unit_vector(), (-1, 0));
        assert_eq!(Direction::Right.unit_vector(), (1, 0));
    }

    #[test]
    fn test_offset() {
        let c = Coord::new(2, 2);
        assert_eq!(c.offset(Direction::Up), Coord::new(2, 1));
        assert_eq!(c.offset(Direction::Down), Coord::new(2, 3));
        assert_eq!(c.offset(Direction::Left), Coord::new(1, 2));
        assert_eq!(c.offset(Direction::Right), Coord::new(3, 2));
    }

    #[test]
    fn test_origin() {
        assert_eq!(Coord::ORIGIN, Coord::new(0, 0));
    }

    #[test]
    fn test_coord_display() {
        assert_eq!(Coord::new(2, 1).to_string(), "(2, 1)");
    }

    #[test]
    fn test_direction_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Right).unwrap(), "\"right\"");
        let d: Direction = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(d, Direction::Up);
    }

    #[test]
    fn test_coord_json_roundtrip() {
        let c = Coord::new(4, 0);
        let json = serde_json::to_string(&c).unwrap();
        let back: Coord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
