//! Directions and corners around a single hex cell.

use crate::world::hex::{CartesianPoint, CubeCoord, GridCoord};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Distance from a cell's center to any of its corners, when adjacent centers
/// are 1 unit apart. `sqrt(0.75) * 2/3`
pub const HEX_OUTER_RADIUS: f64 = 0.577_350_269_189_625_8;
/// Distance from a cell's center to the midpoint of any of its sides
pub const HEX_INNER_RADIUS: f64 = 0.5;
/// Length of a single side of a hexagon
pub const HEX_EDGE_LENGTH: f64 = HEX_OUTER_RADIUS;

/// Any closed set of directions that wrap around a cell clockwise. Both the
/// side directions and the corners of a hexagon come in sixes, so they share
/// the same cyclic arithmetic.
pub trait Clockwise: 'static + Copy + Eq + Sized {
    /// Every member of the class, clockwise. Each member must have its
    /// opposite in the list, i.e. the length must be even.
    const CLOCKWISE: &'static [Self];

    fn clockwise_index(self) -> usize;

    /// The next member counter-clockwise
    fn left(self) -> Self {
        let len = Self::CLOCKWISE.len();
        // + len - 1 instead of - 1, because % is remainder, not modulus
        Self::CLOCKWISE[(self.clockwise_index() + len - 1) % len]
    }

    /// The next member clockwise
    fn right(self) -> Self {
        let len = Self::CLOCKWISE.len();
        Self::CLOCKWISE[(self.clockwise_index() + 1) % len]
    }

    fn opposite(self) -> Self {
        let len = Self::CLOCKWISE.len();
        Self::CLOCKWISE[(self.clockwise_index() + len / 2) % len]
    }
}

/// The 6 directions from a cell's center to the center of each neighbor.
/// Cells are pointy-topped, so there is a due east and due west, but no due
/// north or south. The discriminants are the clockwise index, starting from
/// north-east.
///
/// On a square grid, the directions land here:
///
/// ```text
/// NW NE  -
/// W   -  E
/// -  SW SE
/// ```
#[derive(
    Copy,
    Clone,
    Debug,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HexDirection {
    NorthEast = 0,
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
}

impl Clockwise for HexDirection {
    const CLOCKWISE: &'static [Self] = &[
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    fn clockwise_index(self) -> usize {
        self as usize
    }
}

/// Sign of a vector's `(x, y)` components, offset by one, maps to the slice
/// its endpoint falls in. The center has no direction.
const RELATIVE_DIRECTION_LOOKUP: [[Option<HexDirection>; 3]; 3] = [
    // y < 0
    [
        Some(HexDirection::SouthWest),
        Some(HexDirection::SouthWest),
        Some(HexDirection::SouthEast),
    ],
    // y == 0
    [Some(HexDirection::West), None, Some(HexDirection::East)],
    // y > 0
    [
        Some(HexDirection::NorthWest),
        Some(HexDirection::NorthEast),
        Some(HexDirection::NorthEast),
    ],
];

impl HexDirection {
    /// Offset that moves a grid coordinate one cell in this direction
    pub const fn grid_vector(self) -> GridCoord {
        match self {
            Self::NorthEast => GridCoord::new(0, 1),
            Self::East => GridCoord::new(1, 0),
            Self::SouthEast => GridCoord::new(1, -1),
            Self::SouthWest => GridCoord::new(0, -1),
            Self::West => GridCoord::new(-1, 0),
            Self::NorthWest => GridCoord::new(-1, 1),
        }
    }

    /// Offset that moves a cube coordinate one cell in this direction
    pub const fn cube_vector(self) -> CubeCoord {
        let grid = self.grid_vector();
        CubeCoord::new(grid.x, grid.y)
    }

    /// Classify a vector by which of the six slices its endpoint lies in.
    /// This is only a sign check on each component, so it's exact for
    /// vectors along one of the three axes (including all neighbors) but
    /// only approximate for anything else. E.g. `(2, 1)` and `(1, 5)` are
    /// both [Self::NorthEast]. Returns `None` for the zero vector.
    pub fn from_vector(vector: GridCoord) -> Option<Self> {
        let column = (vector.x.signum() + 1) as usize;
        let row = (vector.y.signum() + 1) as usize;
        RELATIVE_DIRECTION_LOOKUP[row][column]
    }

    /// Approximate direction of `to` as seen from `from`. See
    /// [Self::from_vector] for the caveats. Neither coordinate is wrapped.
    pub fn relative(from: GridCoord, to: GridCoord) -> Option<Self> {
        Self::from_vector(to - from)
    }
}

impl GridCoord {
    /// The neighboring cell in the given direction
    pub fn adjacent(self, direction: HexDirection) -> GridCoord {
        self + direction.grid_vector()
    }

    /// All 6 neighbors of this cell, clockwise from north-east
    pub fn adjacents(self) -> impl Iterator<Item = GridCoord> {
        HexDirection::iter().map(move |dir| self.adjacent(dir))
    }
}

/// The 6 corners of a cell, clockwise from the top
#[derive(
    Copy, Clone, Debug, EnumIter, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HexCorner {
    North = 0,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Clockwise for HexCorner {
    const CLOCKWISE: &'static [Self] = &[
        Self::North,
        Self::NorthEast,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::NorthWest,
    ];

    fn clockwise_index(self) -> usize {
        self as usize
    }
}

impl HexCorner {
    /// Offset from a cell's center to this corner, in cartesian space
    pub fn offset(self) -> CartesianPoint {
        let half_edge = HEX_EDGE_LENGTH / 2.0;
        match self {
            Self::North => CartesianPoint::new(0.0, HEX_OUTER_RADIUS),
            Self::NorthEast => CartesianPoint::new(HEX_INNER_RADIUS, half_edge),
            Self::SouthEast => {
                CartesianPoint::new(HEX_INNER_RADIUS, -half_edge)
            }
            Self::South => CartesianPoint::new(0.0, -HEX_OUTER_RADIUS),
            Self::SouthWest => {
                CartesianPoint::new(-HEX_INNER_RADIUS, -half_edge)
            }
            Self::NorthWest => {
                CartesianPoint::new(-HEX_INNER_RADIUS, half_edge)
            }
        }
    }

    /// The two side directions that flank this corner, counter-clockwise one
    /// first. For a hexagon's corners, the side just clockwise of a corner
    /// shares its index.
    pub fn adjacent_directions(self) -> (HexDirection, HexDirection) {
        let right = HexDirection::CLOCKWISE[self.clockwise_index()];
        (right.left(), right)
    }
}
