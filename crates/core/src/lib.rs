//! Geomap is the storage and generation core for worlds built on a wrapping
//! hex grid. The world is a torus: walk off the east edge and you come back
//! on the west, walk off the top and you come back on the bottom. This crate
//! holds the coordinate math, the chunked cell storage, a spatial hash for
//! locating entities, and the deterministic noise that world gen is built
//! on. Rendering, input, and game logic live elsewhere.
//!
//! ```
//! use geomap::{GridCoord, World, WorldConfig};
//!
//! let config = WorldConfig {
//!     seed: "potato".into(),
//!     ..Default::default()
//! };
//! let world = World::generate(config).unwrap();
//! let map = world.map();
//!
//! // Every coordinate is valid, no matter how far off the map it is
//! let cell = map.cell(GridCoord::new(-1, 10_000));
//! assert!((0.0..=1.0).contains(&cell.elevation));
//! ```
//!
//! See [WorldConfig] for details on how the world generation can be
//! customized. The lower-level pieces ([ChunkMap], [ValueMap],
//! [SpatialStorage], and the fills and noise functions) are all usable on
//! their own.

mod config;
mod error;
mod util;
mod world;

pub use crate::{
    config::{ContinentConfig, MapConfig, NoiseConfig, Seed, WorldConfig},
    error::{GeoMapError, GeoMapResult},
    util::range::{NumRange, RangeValue, Rangeable},
    world::{
        generate::{
            circular_gradient_by_grid_coord, fill_checker,
            fill_circular_gradient, fill_gradient, fill_noise, fill_perlin,
            fill_simplex, fill_smooth_noise, fill_uniform, noise,
            simplex_by_grid_coord,
        },
        hex::*,
        Chunk, ChunkMap, SpatialStorage, TerrainCell, ValueMap, World,
    },
};
