mod elevation;
mod fill;
mod moisture;
pub mod noise;

pub use self::fill::*;

use crate::{
    config::WorldConfig,
    timed,
    world::{
        chunk_map::ChunkMap,
        generate::{
            elevation::ElevationGenerator, moisture::MoistureGenerator,
        },
        hex::GridCoord,
        TerrainCell,
    },
};
use anyhow::Context;
use log::info;
use rand_pcg::Pcg64;
use std::fmt::Debug;

/// A container for generating a new world. This applies a series of
/// generators in sequence to fill in the map. These fields are public to
/// allow for disjoint borrowing of multiple fields at once.
///
/// Generators that need to look at other cells while computing a value
/// (anything that calls a [ChunkMap] query) compute the whole layer into a
/// buffer first, then write it into the map in a second pass. Once you have
/// a mutable borrow of the map you can't query it.
pub struct WorldBuilder {
    /// This config deterministically controls world gen, meaning two worlds
    /// with the same config will always be identical (provided they were
    /// generated on the same version of the code).
    ///
    /// This is public to allow for disjoint borrowing, but please **do not
    /// mutate the config**.
    pub config: WorldConfig,

    /// RNG provider. Each generator draws its noise seeds from here, so the
    /// order that generators run in is part of the output.
    pub rng: Pcg64,

    /// Every cell in the world. Cells are mutated during generation, but the
    /// map's dimensions never change.
    pub map: ChunkMap<TerrainCell>,
}

impl WorldBuilder {
    pub fn new(config: WorldConfig) -> anyhow::Result<Self> {
        let map: ChunkMap<TerrainCell> = timed!(
            "World initialization",
            ChunkMap::from_config(&config.map)
        )
        .context("error initializing map")?;

        info!(
            "Initialized {}x{} world with {} chunks",
            map.width(),
            map.height(),
            map.chunk_count()
        );
        Ok(Self {
            rng: config.seed.rng(),
            config,
            map,
        })
    }

    /// Generate a world by running a series of generation steps
    /// sequentially. Must be run from a blank slate. Outputs the finished
    /// map.
    pub fn generate_world(mut self) -> anyhow::Result<ChunkMap<TerrainCell>> {
        // Run each generation step. The order is very important!
        self.apply_generator(ElevationGenerator)?;
        self.apply_generator(MoistureGenerator)?;
        Ok(self.map)
    }

    /// Cell at the middle of the map. Continents are centered here.
    pub fn center(&self) -> GridCoord {
        GridCoord::new(
            (self.map.width() / 2) as i32,
            (self.map.height() / 2) as i32,
        )
    }

    /// A helper to run a generation step on this builder.
    fn apply_generator(
        &mut self,
        generator: impl Debug + Generate,
    ) -> anyhow::Result<()> {
        timed!(&format!("{:?}", generator), generator.generate(self))
            .with_context(|| format!("error in {:?}", generator))
    }
}

/// A type that generates some sort of data for the world. Each generator
/// fills in one field of every cell, and later generators can read what
/// earlier ones wrote.
trait Generate {
    /// Apply some generation step to the given world. This can mutate any
    /// cell, but never the shape of the map. The config has already been
    /// validated, so an error from here means a bug rather than bad input.
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()>;
}
