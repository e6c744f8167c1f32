//! Whole-map fills for [ValueMap], and single-cell equivalents for
//! [ChunkMap]. Every [ValueMap] fill visits each cell exactly once, in
//! row-major order, and keeps every value it writes in
//! `[0, max_magnitude]`. Fills are pure functions of their arguments, so
//! running one twice with the same parameters gives the same map.
//!
//! Parameters are checked before anything is written, so a fill that
//! returns an error leaves the map untouched.

use crate::{
    error::{GeoMapError, GeoMapResult},
    util,
    world::{
        chunk_map::ChunkMap,
        generate::noise::{
            perlin2d, perlin2d_repeating, simplex2d_layered, smooth_value2d,
            value2d,
        },
        hex::{GridCoord, ROW_HEIGHT},
        value_map::ValueMap,
    },
};
use std::num::NonZeroU32;

/// Scale a noise value in `[0, 1]` onto `[0, max_magnitude]`. Each integer
/// gets an equal share of the input range, with 1.0 landing on the max.
fn to_magnitude(value: f64, max_magnitude: i32) -> i32 {
    let max = max_magnitude as i64;
    let scaled = (value * (max + 1) as f64).floor() as i64;
    scaled.clamp(0, max) as i32
}

fn check_octaves(octaves: u32) -> GeoMapResult<()> {
    if octaves == 0 {
        Err(GeoMapError::InvalidParameter {
            name: "octaves",
            reason: "must be at least 1",
        })
    } else {
        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> GeoMapResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GeoMapError::InvalidParameter {
            name,
            reason: "must be positive and finite",
        })
    }
}

fn check_repeat(
    name: &'static str,
    repeat: u32,
) -> GeoMapResult<NonZeroU32> {
    NonZeroU32::new(repeat).ok_or(GeoMapError::InvalidParameter {
        name,
        reason: "must be at least 1",
    })
}

/// Set every cell to the same value, clamped to the map's range
pub fn fill_uniform(map: &mut ValueMap, value: i32) {
    let value = value.clamp(0, map.max_magnitude());
    map.fill_with(|_| value);
}

/// Alternate between two values in square blocks of `2^grid_order` cells.
/// A `grid_order` of 0 gives a single-cell checkerboard.
pub fn fill_checker(
    map: &mut ValueMap,
    value1: i32,
    value2: i32,
    grid_order: u32,
) -> GeoMapResult<()> {
    if grid_order >= 31 {
        return Err(GeoMapError::InvalidParameter {
            name: "grid_order",
            reason: "blocks must be smaller than 2^31 cells",
        });
    }

    let max = map.max_magnitude();
    let (value1, value2) = (value1.clamp(0, max), value2.clamp(0, max));
    map.fill_with(|coord| {
        if ((coord.x >> grid_order) + (coord.y >> grid_order)) & 1 == 0 {
            value1
        } else {
            value2
        }
    });
    Ok(())
}

/// Vertical linear gradient, from `start` on the first row to `end` on the
/// last. A single-row map gets `start` everywhere.
pub fn fill_gradient(map: &mut ValueMap, start: i32, end: i32) {
    let max = map.max_magnitude();
    let (start, end) = (start.clamp(0, max), end.clamp(0, max));
    let last_row = (map.height() - 1) as f64;
    map.fill_with(|coord| {
        let progress = if last_row > 0.0 {
            coord.y as f64 / last_row
        } else {
            0.0
        };
        util::lerp_int(start, end, progress)
    });
}

/// Radial gradient around a cell. Values go from `start` at `center` to
/// `end` at `radius` cartesian units away, and stay at `end` beyond that.
/// Value maps don't wrap, so neither does the distance.
pub fn fill_circular_gradient(
    map: &mut ValueMap,
    center: GridCoord,
    start: i32,
    end: i32,
    radius: f64,
) -> GeoMapResult<()> {
    check_positive("radius", radius)?;

    let max = map.max_magnitude();
    let (start, end) = (start.clamp(0, max), end.clamp(0, max));
    map.fill_with(|coord| {
        let progress = coord.cartesian_distance(center) / radius;
        util::lerp_int(start, end, progress)
    });
    Ok(())
}

/// Grid position of a cell once the map is placed at `origin`. Summed in
/// `f64` so an origin near the edge of `i32` can't overflow.
fn offset_position(coord: GridCoord, origin: GridCoord) -> (f64, f64) {
    (
        coord.x as f64 + origin.x as f64,
        coord.y as f64 + origin.y as f64,
    )
}

/// Sample a noise function at each cell's cartesian center, scaled by
/// `frequency`. The map's first cell sits at `origin`, so neighboring maps
/// with matching origins line up seamlessly.
fn fill_cartesian_noise(
    map: &mut ValueMap,
    origin: GridCoord,
    frequency: f64,
    noise: impl Fn(f64, f64) -> f64,
) -> GeoMapResult<()> {
    check_positive("frequency", frequency)?;

    let max = map.max_magnitude();
    map.fill_with(|coord| {
        let (x, y) = offset_position(coord, origin);
        // Same skew as GridCoord::to_cartesian
        let (x, y) = (x + (y * 0.5), y * ROW_HEIGHT);
        to_magnitude(noise(x * frequency, y * frequency), max)
    });
    Ok(())
}

/// Fill with [value2d] noise
pub fn fill_noise(
    map: &mut ValueMap,
    seed: u32,
    frequency: f64,
) -> GeoMapResult<()> {
    fill_cartesian_noise(map, GridCoord::ORIGIN, frequency, |x, y| {
        value2d(seed, x, y)
    })
}

/// Fill with [smooth_value2d] noise
pub fn fill_smooth_noise(
    map: &mut ValueMap,
    seed: u32,
    frequency: f64,
) -> GeoMapResult<()> {
    fill_cartesian_noise(map, GridCoord::ORIGIN, frequency, |x, y| {
        smooth_value2d(seed, x, y)
    })
}

/// Fill with [perlin2d] noise. The map's first cell sits at `origin` in
/// the noise field, and `frequency` applies to the first octave.
///
/// With a `repeat` of `(x, y)`, the noise comes from [perlin2d_repeating]
/// instead, and repeats every `x` and `y` units of the scaled sample space.
pub fn fill_perlin(
    map: &mut ValueMap,
    seed: u32,
    octaves: u32,
    origin: GridCoord,
    frequency: f64,
    repeat: Option<(u32, u32)>,
) -> GeoMapResult<()> {
    check_octaves(octaves)?;
    match repeat {
        None => fill_cartesian_noise(map, origin, frequency, |x, y| {
            perlin2d(seed, x, y, octaves)
        }),
        Some((repeat_x, repeat_y)) => {
            let repeat_x = check_repeat("repeat_x", repeat_x)?;
            let repeat_y = check_repeat("repeat_y", repeat_y)?;
            fill_cartesian_noise(map, origin, frequency, |x, y| {
                perlin2d_repeating(seed, x, y, octaves, repeat_x, repeat_y)
            })
        }
    }
}

/// Fill with layered simplex noise. Unlike the other noise fills, this
/// samples in grid space rather than cartesian space: every
/// `repeat_interval` cells along either axis span `samples_per_repeat`
/// lattice periods, and the noise repeats with that interval. The map's
/// first cell sits at `origin`. A square map whose side is
/// `repeat_interval` tiles: the last column blends into the first and the
/// last row into the first row.
pub fn fill_simplex(
    map: &mut ValueMap,
    seed: u32,
    octaves: u32,
    origin: GridCoord,
    repeat_interval: u32,
    samples_per_repeat: u32,
) -> GeoMapResult<()> {
    check_octaves(octaves)?;
    let interval = check_repeat("repeat_interval", repeat_interval)?;
    let repeat = check_repeat("samples_per_repeat", samples_per_repeat)?;

    let max = map.max_magnitude();
    let scale = repeat.get() as f64;
    let interval = interval.get() as f64;
    map.fill_with(|coord| {
        let (x, y) = offset_position(coord, origin);
        let (x, y) = (x / interval * scale, y / interval * scale);
        to_magnitude(simplex2d_layered(seed, x, y, repeat, octaves), max)
    });
    Ok(())
}

/// The value a circular gradient would have at one cell of a chunk map.
/// Distance is measured across the seams with
/// [ChunkMap::hex_cartesian_distance], so the gradient stays round even
/// when it straddles the edge of the map.
pub fn circular_gradient_by_grid_coord<T>(
    map: &ChunkMap<T>,
    cell: GridCoord,
    center: GridCoord,
    start: f64,
    end: f64,
    radius: f64,
) -> GeoMapResult<f64> {
    check_positive("radius", radius)?;
    let distance = map.hex_cartesian_distance(cell, center);
    Ok(util::lerp(start, end, (distance / radius).min(1.0)))
}

/// Layered simplex noise at one cell of a chunk map, in `[0, 1]`. The map's
/// width and height each span `samples_per_repeat` lattice periods, so the
/// noise is continuous across the seams.
pub fn simplex_by_grid_coord<T>(
    map: &ChunkMap<T>,
    cell: GridCoord,
    seed: u32,
    octaves: u32,
    samples_per_repeat: NonZeroU32,
) -> f64 {
    let (x, y) = map.unit_position(cell);
    let scale = samples_per_repeat.get() as f64;
    simplex2d_layered(seed, x * scale, y * scale, samples_per_repeat, octaves)
}
