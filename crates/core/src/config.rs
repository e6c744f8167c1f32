mod seed;

pub use self::seed::Seed;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration that defines a world gen process. Two worlds generated with
/// same config will always be identical.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WorldConfig {
    /// RNG seed to use for all randomized processes during world gen. See
    /// [Seed] for the accepted formats.
    pub seed: Seed,

    /// Dimensions of the chunk map that holds the world
    #[validate]
    pub map: MapConfig,

    /// Config for the noise function used to generate elevation values
    #[validate]
    pub elevation: NoiseConfig,

    /// Config for the noise function used to generate moisture values
    #[validate]
    pub moisture: NoiseConfig,

    /// Config for the falloff mask that gathers land into one continent
    #[validate]
    pub continent: ContinentConfig,
}

/// Dimensions of a [ChunkMap](crate::ChunkMap). The full map is
/// `chunk_size * chunk_count_x` cells wide and `chunk_size * chunk_count_y`
/// cells tall.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MapConfig {
    /// Width and height of each (square) chunk, in cells
    #[validate(range(min = 1, max = 1024))]
    pub chunk_size: u32,

    /// Number of chunks along the x axis
    #[validate(range(min = 1, max = 1024))]
    pub chunk_count_x: u32,

    /// Number of chunks along the y axis
    #[validate(range(min = 1, max = 1024))]
    pub chunk_count_y: u32,
}

/// Config for a layered noise function. Noise is sampled so that it tiles
/// seamlessly across the edges of the map, which means the frequency is
/// expressed as a whole number of lattice periods per map, rather than a
/// float.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct NoiseConfig {
    /// Number of layers to add together. Each layer has double the frequency
    /// and half the weight of the previous one.
    #[validate(range(min = 1, max = 16))]
    pub octaves: u32,

    /// Number of lattice points that the first (lowest) layer has across the
    /// full width and height of the map. Higher values give smaller features.
    #[validate(range(min = 1))]
    pub samples_per_repeat: u32,

    /// Exponent to apply to values after generation. This is applied to
    /// normalized composite values. "Normalized" means they're in the range
    /// [0,1] (meaning we can apply any non-negative exponent and the values
    /// remain in that range) and "composite" means this is *after* we add all
    /// our layers together.
    #[validate(range(min = 0.0))]
    pub exponent: f64,
}

/// Config for the continent mask. When enabled, elevation is pushed down the
/// further a cell is from the middle of the map, so land gathers in the
/// middle and the wrap seams tend to be ocean.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContinentConfig {
    pub enabled: bool,

    /// Radius of the falloff, as a fraction of the map's width. Cells at or
    /// beyond this distance from the center get the full push.
    #[validate(range(min = 0.01, max = 1.0))]
    pub radius: f64,

    /// How hard elevation gets pushed down at the edge of the radius. 1.0
    /// flattens cells past the edge to zero, 0.0 is the same as disabled.
    #[validate(range(min = 0.0, max = 1.0))]
    pub strength: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        // This should be the general source of truth for a "nice world", but
        // doesn't need to be kept 100% up to date.
        Self {
            // Danger! This means the default will vary between calls!
            seed: Seed::Int(rand::random()),
            map: MapConfig::default(),
            elevation: NoiseConfig {
                octaves: 5,
                samples_per_repeat: 6,
                exponent: 1.2,
            },
            moisture: NoiseConfig {
                octaves: 3,
                samples_per_repeat: 4,
                exponent: 1.0,
            },
            continent: ContinentConfig::default(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            chunk_size: 32,
            chunk_count_x: 8,
            chunk_count_y: 8,
        }
    }
}

impl Default for ContinentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 0.4,
            strength: 0.8,
        }
    }
}
