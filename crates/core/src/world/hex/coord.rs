//! Integer coordinate types for the hex grid, and conversions between them
//! and cartesian world space. See the parent module docs for a description of
//! each coordinate system.

use derive_more::{Add, AddAssign, Display, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// `sqrt(0.75)`, the vertical distance between two rows of hex centers when
/// adjacent centers are 1 unit apart
pub const ROW_HEIGHT: f64 = 0.866_025_403_784_438_6;

/// An address in the skewed hex grid. `+x` is due east, `+y` is north-east.
/// These are unbounded; chunk maps wrap them before using them as indexes.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Neg,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a row-major index into a coordinate on a grid of the given
    /// width
    pub fn from_index(index: usize, width: u32) -> Self {
        let width = width as usize;
        Self::new((index % width) as i32, (index / width) as i32)
    }

    /// Row-major index of this coordinate on a grid of the given width. The
    /// coordinate must already be inside the grid.
    pub fn to_index(self, width: u32) -> usize {
        self.x as usize + (self.y as usize * width as usize)
    }

    pub fn to_cube(self) -> CubeCoord {
        CubeCoord::new(self.x, self.y)
    }

    /// Number of steps between this cell and another, ignoring any wrapping
    pub fn hex_distance(self, other: GridCoord) -> usize {
        hex_steps(
            other.x as i64 - self.x as i64,
            other.y as i64 - self.y as i64,
        )
    }

    /// Treat this coordinate as a vector and get its length in steps
    pub fn hex_magnitude(self) -> usize {
        hex_steps(self.x as i64, self.y as i64)
    }

    /// Position of this cell's center in cartesian world space
    pub fn to_cartesian(self) -> CartesianPoint {
        CartesianPoint::new(
            self.x as f64 + (self.y as f64 * 0.5),
            self.y as f64 * ROW_HEIGHT,
        )
    }

    /// Straight-line distance between two cell centers, without wrapping
    pub fn cartesian_distance(self, other: GridCoord) -> f64 {
        let delta = other.to_cartesian() - self.to_cartesian();
        delta.length()
    }
}

/// Length in steps of the grid vector `(x, y)`. Takes `i64` so that the
/// difference of any two `i32` coordinates fits.
pub(crate) fn hex_steps(x: i64, y: i64) -> usize {
    // |q| + |r| + |s| is always even on the lattice, so this is exact
    ((x.abs() + (x + y).abs() + y.abs()) / 2) as usize
}

impl From<CubeCoord> for GridCoord {
    fn from(cube: CubeCoord) -> Self {
        Self::new(cube.q, cube.r)
    }
}

/// Three-axis hex coordinate. `q + r + s == 0` always holds, so `s` is derived
/// on construction rather than accepted from the caller.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Neg,
    Serialize,
)]
#[display(fmt = "({}, {}, {})", q, r, s)]
pub struct CubeCoord {
    q: i32,
    r: i32,
    s: i32,
}

impl CubeCoord {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    pub fn q(&self) -> i32 {
        self.q
    }

    pub fn r(&self) -> i32 {
        self.r
    }

    pub fn s(&self) -> i32 {
        self.s
    }

    pub fn to_grid(self) -> GridCoord {
        self.into()
    }

    pub fn distance_to(self, other: CubeCoord) -> usize {
        hex_steps(
            other.q as i64 - self.q as i64,
            other.r as i64 - self.r as i64,
        )
    }

    /// Distance from the origin
    pub fn magnitude(self) -> usize {
        hex_steps(self.q as i64, self.r as i64)
    }
}

impl From<GridCoord> for CubeCoord {
    fn from(grid: GridCoord) -> Self {
        grid.to_cube()
    }
}

/// A point in cartesian world space. One unit is the distance between two
/// adjacent cell centers.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Display, Add, Sub, Serialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
}

impl CartesianPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// De-skew this point into fractional `(q, r)` hex coordinates
    pub fn to_hex_fractional(self) -> (f64, f64) {
        let q = self.x - (self.y * (0.5 / ROW_HEIGHT));
        let r = self.y / ROW_HEIGHT;
        (q, r)
    }

    /// Find the cell whose hexagon contains this point
    pub fn to_grid(self) -> GridCoord {
        let (q, r) = self.to_hex_fractional();
        hex_fractional_to_grid(q, r)
    }
}

/// Round fractional hex coordinates to the nearest lattice point. Each of the
/// floored pairwise differences is twice the distance along one axis, which
/// makes the nearest center a short calculation with no comparisons.
pub fn hex_fractional_to_grid(q: f64, r: f64) -> GridCoord {
    let s = -q - r;
    let qr = (q - r).floor();
    let rs = (r - s).floor();
    let sq = (s - q).floor();
    let qi = ((qr - sq) / 3.0).round();
    let ri = ((rs - qr) / 3.0).round();
    GridCoord::new(qi as i32, ri as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_cube_round_trip() {
        for x in -20..=20 {
            for y in -20..=20 {
                let grid = GridCoord::new(x, y);
                let cube = grid.to_cube();
                assert_eq!(cube.q() + cube.r() + cube.s(), 0);
                assert_eq!(cube.to_grid(), grid);
            }
        }
    }

    #[test]
    fn test_hex_distance() {
        let p0 = GridCoord::ORIGIN;
        let p1 = GridCoord::new(-1, 1);
        let p2 = GridCoord::new(2, -1);
        let p3 = GridCoord::new(2, -3);

        assert_eq!(p0.hex_distance(p0), 0);
        assert_eq!(p3.hex_distance(p3), 0);

        assert_eq!(p0.hex_distance(p1), 1);
        assert_eq!(p0.hex_distance(p2), 2);
        assert_eq!(p0.hex_distance(p3), 3);

        assert_eq!(p1.hex_distance(p2), 3);
        assert_eq!(p1.hex_distance(p3), 4);
        assert_eq!(p2.hex_distance(p3), 2);

        // Symmetric
        assert_eq!(p3.hex_distance(p1), p1.hex_distance(p3));
        // Cube distance agrees
        assert_eq!(p1.to_cube().distance_to(p3.to_cube()), 4);
    }

    #[test]
    fn test_hex_distance_extremes() {
        let west = GridCoord::new(i32::MIN, 0);
        let east = GridCoord::new(i32::MAX, 0);
        assert_eq!(west.hex_distance(east), u32::MAX as usize);
        assert_eq!(east.hex_distance(west), u32::MAX as usize);
        assert_eq!(
            west.to_cube().distance_to(east.to_cube()),
            u32::MAX as usize
        );

        let south = GridCoord::new(0, i32::MIN);
        let north = GridCoord::new(0, i32::MAX);
        assert_eq!(south.hex_distance(north), u32::MAX as usize);
        // Opposite corners of the rhombus, along neither axis
        let corner = GridCoord::new(i32::MAX, i32::MIN + 1);
        assert_eq!(corner.hex_distance(-corner), u32::MAX as usize - 1);
        assert_eq!(GridCoord::new(i32::MIN, 0).hex_magnitude(), 1 << 31);
    }

    #[test]
    fn test_index_conversion() {
        assert_eq!(GridCoord::from_index(0, 8), GridCoord::new(0, 0));
        assert_eq!(GridCoord::from_index(9, 8), GridCoord::new(1, 1));
        assert_eq!(GridCoord::new(7, 2).to_index(8), 23);
    }

    #[test]
    fn test_to_cartesian() {
        let p = GridCoord::new(1, 0).to_cartesian();
        assert_approx_eq!(p.x, 1.0);
        assert_approx_eq!(p.y, 0.0);

        let p = GridCoord::new(0, 2).to_cartesian();
        assert_approx_eq!(p.x, 1.0);
        assert_approx_eq!(p.y, 2.0 * ROW_HEIGHT);

        // All six neighbors are exactly one unit away
        assert_approx_eq!(
            GridCoord::ORIGIN.cartesian_distance(GridCoord::new(-1, 1)),
            1.0
        );
        assert_approx_eq!(
            GridCoord::ORIGIN.cartesian_distance(GridCoord::new(1, -1)),
            1.0
        );
    }

    #[test]
    fn test_cartesian_to_grid_lattice_points() {
        for x in -15..=15 {
            for y in -15..=15 {
                let grid = GridCoord::new(x, y);
                assert_eq!(grid.to_cartesian().to_grid(), grid);
            }
        }
    }

    #[test]
    fn test_cartesian_to_grid_nearest() {
        // Just shy of halfway to the eastern neighbor
        assert_eq!(
            CartesianPoint::new(0.45, 0.0).to_grid(),
            GridCoord::ORIGIN
        );
        assert_eq!(
            CartesianPoint::new(0.55, 0.0).to_grid(),
            GridCoord::new(1, 0)
        );
        // Most of the way up towards the north-east neighbor
        assert_eq!(
            CartesianPoint::new(0.4, 0.7).to_grid(),
            GridCoord::new(0, 1)
        );
        assert_eq!(
            CartesianPoint::new(-0.4, -0.7).to_grid(),
            GridCoord::new(0, -1)
        );
    }
}
