//! This module holds basic types and pure functions related to hexagon grids.
//! Nothing in here knows about map bounds or wrapping; see
//! [ChunkMap](crate::ChunkMap) for that.
//!
//! ## Coordinate Systems
//!
//! There are three coordinate systems in play. All of them describe the same
//! infinite grid of pointy-topped hexagons.
//!
//! ### Grid Coordinates
//!
//! [GridCoord] is the address used everywhere in the public API. It has two
//! integer components, but the axes aren't perpendicular: `+x` is due east
//! and `+y` is north-east, 60 degrees apart. That makes the grid a rhombus
//! rather than a rectangle when laid out on screen:
//!
//! ```text
//!       (0,2) (1,2) (2,2)
//!    (0,1) (1,1) (2,1)
//! (0,0) (1,0) (2,0)
//! ```
//!
//! The skew is what lets a rectangular block of storage wrap into a torus
//! with no special casing at the seams: moving east is always `+x`, moving
//! north-east is always `+y`, no matter which row you're in.
//!
//! ### Cube Coordinates
//!
//! [CubeCoord] is the [cube coordinate system described by Amit
//! Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-cube). It
//! adds a redundant third axis so that `q + r + s = 0` for every cell, which
//! makes distance, rings and spirals symmetric in all six directions.
//! Conversion to and from grid coordinates is trivial: `q = x`, `r = y`,
//! `s = -x - y`.
//!
//! ### Cartesian Coordinates
//!
//! [CartesianPoint] is plain 2D world space, used for rendering, noise
//! sampling and true straight-line distance. Cell centers are exactly 1 unit
//! from each of their neighbors:
//!
//! ```text
//! world_x = grid_x + grid_y * 0.5
//! world_y = grid_y * sqrt(0.75)
//! ```
//!
//! Going the other way requires finding the hexagon that contains an
//! arbitrary point; see [CartesianPoint::to_grid].

mod coord;
mod direction;
mod spiral;

pub use self::{coord::*, direction::*, spiral::*};
