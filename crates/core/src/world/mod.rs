mod chunk_map;
pub mod generate;
pub mod hex;
mod spatial;
mod value_map;

pub use self::{
    chunk_map::{Chunk, ChunkMap},
    spatial::SpatialStorage,
    value_map::ValueMap,
};

use crate::{
    timed, util::range::NumRange, world::generate::WorldBuilder, WorldConfig,
};
use anyhow::Context;
use bytemuck::{Pod, Zeroable};
use log::info;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The data stored for every cell of a generated world. The layout is fixed
/// (`repr(C)`, no padding) so chunks can be handed to a renderer as raw
/// bytes with [Chunk::as_bytes].
#[repr(C)]
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    Pod,
    Zeroable,
)]
pub struct TerrainCell {
    /// Normalized height, in [World::ELEVATION_RANGE]
    pub elevation: f32,
    /// Normalized wetness, in [World::MOISTURE_RANGE]
    pub moisture: f32,
}

/// A fully generated world: a chunk map of [TerrainCell]s, plus the config
/// that was used to generate it.
#[derive(Clone, Debug)]
pub struct World {
    /// The config used to generate this world. World generation is
    /// deterministic based on world config, and once the world has been
    /// generated, the config can never change.
    config: WorldConfig,

    map: ChunkMap<TerrainCell>,
}

impl World {
    /// We guarantee that every cell's elevation will be in this range
    /// (inclusive on both ends).
    pub const ELEVATION_RANGE: NumRange<f32> = NumRange::new(0.0, 1.0);
    /// We guarantee that every cell's moisture will be in this range
    /// (inclusive on both ends).
    pub const MOISTURE_RANGE: NumRange<f32> = NumRange::new(0.0, 1.0);

    /// Get a reference to the config that defines this world.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Get a reference to the map of cells that make up this world.
    pub fn map(&self) -> &ChunkMap<TerrainCell> {
        &self.map
    }

    /// Get the owned cell map for this world
    pub fn into_map(self) -> ChunkMap<TerrainCell> {
        self.map
    }

    /// Generate a new world with the given config. Returns an error if the
    /// given config is invalid, in which case the error wraps the
    /// [validator::ValidationErrors].
    pub fn generate(config: WorldConfig) -> anyhow::Result<Self> {
        info!("Generating world with config {:#?}", config);

        config.validate().context("invalid config")?;

        let map = timed!("World generation", log::Level::Info, {
            WorldBuilder::new(config.clone())?.generate_world()
        })?;

        Ok(Self { config, map })
    }
}
