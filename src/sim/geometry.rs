//! Grid coordinates and move projection
//!
//! A move is a fixed-distance hop along one of eight compass directions.
//! There is no search here: the candidate set is always the eight
//! projections of the origin, minus whatever falls off the grid.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A cell coordinate on the course, 0-indexed from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// True when the position lies inside `[0, width) × [0, height)`
    #[inline]
    pub fn in_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }

    /// Row-major index into a flat cell list. Only meaningful in bounds.
    #[inline]
    pub fn index(self, width: i32) -> usize {
        (self.y * width + self.x) as usize
    }

    pub fn manhattan_distance(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn chebyshev_distance(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl From<IVec2> for Position {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Position> for IVec2 {
    fn from(p: Position) -> Self {
        p.as_ivec2()
    }
}

/// The eight hop directions, in the order candidates are reported:
/// left, right, up, down, then the diagonals up-left, up-right,
/// down-left, down-right. Up is toward row 0.
pub const DIRECTIONS: [IVec2; 8] = [
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(0, -1),
    IVec2::new(0, 1),
    IVec2::new(-1, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 1),
    IVec2::new(1, 1),
];

/// Project `origin` `distance` cells along each direction, keeping only
/// destinations inside the grid.
///
/// The result follows [`DIRECTIONS`] order. A zero distance is not a real
/// roll and yields copies of the origin.
pub fn calculate_possible_moves(
    origin: Position,
    distance: i32,
    width: i32,
    height: i32,
) -> Vec<Position> {
    let origin = origin.as_ivec2();
    DIRECTIONS
        .iter()
        .map(|&dir| Position::from(origin + dir * distance))
        .filter(|pos| pos.in_bounds(width, height))
        .collect()
}

#[inline]
pub fn is_same_position(a: Position, b: Position) -> bool {
    a.x == b.x && a.y == b.y
}
