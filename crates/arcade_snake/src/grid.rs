//! Grid coordinates and headings.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Heading of the actor.
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
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    #[default]
    Right,
}

impl Direction {
    /// The heading pointing back the way this one came.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A cell on the grid; `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl Cell {
    /// Creates a cell.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The adjacent cell in `direction`, or `None` past the walls of a
    /// `width` by `height` grid.
    pub fn neighbor(self, direction: Direction, width: usize, height: usize) -> Option<Cell> {
        let Cell { x, y } = self;
        match direction {
            Direction::Up => y.checked_sub(1).map(|y| Cell::new(x, y)),
            Direction::Down => (y + 1 < height).then(|| Cell::new(x, y + 1)),
            Direction::Left => x.checked_sub(1).map(|x| Cell::new(x, y)),
            Direction::Right => (x + 1 < width).then(|| Cell::new(x + 1, y)),
        }
    }

    /// Whether the cell lies inside a `width` by `height` grid.
    pub fn in_bounds(self, width: usize, height: usize) -> bool {
        self.x < width && self.y < height
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_neighbor_stops_at_walls() {
        let corner = Cell::new(0, 0);
        assert_eq!(corner.neighbor(Direction::Up, 3, 3), None);
        assert_eq!(corner.neighbor(Direction::Left, 3, 3), None);
        assert_eq!(corner.neighbor(Direction::Right, 3, 3), Some(Cell::new(1, 0)));

        let far = Cell::new(2, 2);
        assert_eq!(far.neighbor(Direction::Down, 3, 3), None);
        assert_eq!(far.neighbor(Direction::Right, 3, 3), None);
    }

    #[test]
    fn test_direction_parses_case_insensitively() {
        assert_eq!(Direction::from_str("UP").unwrap(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }
}
