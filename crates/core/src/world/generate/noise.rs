//! Deterministic, seeded 2D noise. Everything in here is a pure function of
//! its arguments: same seed and same sample always gives a bit-identical
//! result, on any platform.
//!
//! The building block is [hash2d], a cut-down xxHash32 specialized for two
//! 32-bit inputs. Everything else is interpolation between hashed lattice
//! points:
//!
//! - [value2d] - bilinear blend of the 4 surrounding lattice points
//! - [smooth_value2d] - the same, eased so the lattice doesn't show
//! - [perlin2d] - octaves of [value2d] at doubling frequency
//! - [simplex2d] - barycentric blend of the 3 corners of the hex-skewed
//!   triangle the sample falls in
//!
//! Lattice cells are picked with `floor`, so negative samples are continuous
//! with positive ones. All output is normalized to `[0, 1]`.

use crate::{
    config::NoiseConfig,
    util::{
        self,
        range::{NumRange, RangeValue},
    },
};
use rand::Rng;
use std::num::NonZeroU32;

const PRIME32_2: u32 = 0x85EB_CA77;
const PRIME32_3: u32 = 0xC2B2_AE3D;
const PRIME32_4: u32 = 0x27D4_EB2F;
const PRIME32_5: u32 = 0x1656_67B1;

/// Hash two 32-bit integers with a seed. This is the xxHash32 algorithm,
/// unrolled for exactly 8 bytes of input.
pub fn hash2d(seed: u32, x: u32, y: u32) -> u32 {
    // Length of the input in bytes, mixed in the same way as xxHash does
    let mut hash = seed.wrapping_add(PRIME32_5).wrapping_add(8);

    for word in [x, y] {
        hash = hash.wrapping_add(word.wrapping_mul(PRIME32_3));
        hash = hash.rotate_left(17).wrapping_mul(PRIME32_4);
    }

    // Avalanche
    hash ^= hash >> 15;
    hash = hash.wrapping_mul(PRIME32_2);
    hash ^= hash >> 13;
    hash = hash.wrapping_mul(PRIME32_3);
    hash ^= hash >> 16;
    hash
}

/// Hash a lattice point and normalize it to `[0, 1]`
fn lattice_value(seed: u32, x: u32, y: u32) -> f64 {
    hash2d(seed, x, y) as f64 / u32::MAX as f64
}

/// Split a sample into its lattice cell and the fractional position inside
/// the cell. The cell index wraps into `u32` the same way the hash would see
/// a two's-complement integer.
fn split_sample(sample: f64) -> (u32, f64) {
    let integral = sample.floor();
    (integral as i64 as u32, sample - integral)
}

/// `3t² - 2t³`. Zero slope at both ends of `[0, 1]`.
pub fn smooth_curve(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// `6t⁵ - 15t⁴ + 10t³`. Zero slope and curvature at both ends of `[0, 1]`.
pub fn smoother_curve(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Value noise. Hashes the 4 lattice points around the sample and blends them
/// bilinearly, so the output is continuous but has visible grid artifacts at
/// low frequency. Output is in `[0, 1]`.
pub fn value2d(seed: u32, x: f64, y: f64) -> f64 {
    interpolated_value2d(seed, x, y, |t| t)
}

/// [value2d], with the interpolation weights eased through
/// [smoother_curve]. The slope is zero at every lattice point, which hides
/// most of the grid artifacts.
pub fn smooth_value2d(seed: u32, x: f64, y: f64) -> f64 {
    interpolated_value2d(seed, x, y, smoother_curve)
}

fn interpolated_value2d(
    seed: u32,
    x: f64,
    y: f64,
    curve: impl Fn(f64) -> f64,
) -> f64 {
    let (x0, fract_x) = split_sample(x);
    let (y0, fract_y) = split_sample(y);
    let (fract_x, fract_y) = (curve(fract_x), curve(fract_y));
    let x1 = x0.wrapping_add(1);
    let y1 = y0.wrapping_add(1);

    let bottom = util::lerp(
        lattice_value(seed, x0, y0),
        lattice_value(seed, x1, y0),
        fract_x,
    );
    let top = util::lerp(
        lattice_value(seed, x0, y1),
        lattice_value(seed, x1, y1),
        fract_x,
    );
    util::lerp(bottom, top, fract_y).clamp(0.0, 1.0)
}

/// Wrap a sample into `[0, repeat)`
fn wrap_sample(sample: f64, repeat: NonZeroU32) -> f64 {
    let repeat = repeat.get() as f64;
    sample - (repeat * (sample / repeat).floor())
}

/// [value2d], but the sample space tiles every `repeat_x` and `repeat_y`
/// units. The interpolated edge between the last lattice cell and the first
/// does not wrap, so only the lattice itself tiles.
pub fn value2d_repeating(
    seed: u32,
    x: f64,
    y: f64,
    repeat_x: NonZeroU32,
    repeat_y: NonZeroU32,
) -> f64 {
    value2d(seed, wrap_sample(x, repeat_x), wrap_sample(y, repeat_y))
}

/// Weights for a stack of octaves, where each octave gets half the weight of
/// the one before it and the total is 1.
fn octave_weights(octaves: u32) -> impl Iterator<Item = f64> {
    let denominator = 2f64.powi(octaves as i32) - 1.0;
    (0..octaves).map(move |i| {
        2f64.powi(octaves as i32 - 1 - i as i32) / denominator
    })
}

/// Sum a noise function over several octaves. Each octave samples at double
/// the frequency of the previous one, with half the weight. The result is
/// clamped to `[0, 1]` to absorb rounding in the weights.
fn layered(
    octaves: u32,
    x: f64,
    y: f64,
    mut sample: impl FnMut(u32, f64, f64) -> f64,
) -> f64 {
    octave_weights(octaves)
        .enumerate()
        .map(|(i, weight)| {
            let scale = 2f64.powi(i as i32);
            sample(i as u32, x * scale, y * scale) * weight
        })
        .sum::<f64>()
        .clamp(0.0, 1.0)
}

/// Fractal value noise. Zero octaves produces a constant 0.
pub fn perlin2d(seed: u32, x: f64, y: f64, octaves: u32) -> f64 {
    layered(octaves, x, y, |_, x, y| value2d(seed, x, y))
}

/// [perlin2d] built on [value2d_repeating]. The repeat interval is the same
/// for every octave, in the scaled sample space.
pub fn perlin2d_repeating(
    seed: u32,
    x: f64,
    y: f64,
    octaves: u32,
    repeat_x: NonZeroU32,
    repeat_y: NonZeroU32,
) -> f64 {
    layered(octaves, x, y, |_, x, y| {
        value2d_repeating(seed, x, y, repeat_x, repeat_y)
    })
}

/// Simplex-style noise on the hex lattice. In grid space the x and y axes are
/// 60 degrees apart rather than 120, so each lattice rhombus splits into two
/// triangles along the `fract_x + fract_y == 1` diagonal. The three corners of
/// the containing triangle are hashed and blended by their barycentric
/// weights, which are exactly `1 - cube distance` to each corner.
///
/// Lattice indices wrap at `repeat_x`/`repeat_y`, so sampling a region that
/// is exactly one repeat wide tiles seamlessly in both directions.
pub fn simplex2d(
    seed: u32,
    x: f64,
    y: f64,
    repeat_x: NonZeroU32,
    repeat_y: NonZeroU32,
) -> f64 {
    let (fract_x, fract_y) = (x - x.floor(), y - y.floor());
    let (repeat_x, repeat_y) = (repeat_x.get() as i64, repeat_y.get() as i64);
    let x0 = (x.floor() as i64).rem_euclid(repeat_x);
    let y0 = (y.floor() as i64).rem_euclid(repeat_y);
    let x1 = (x0 + 1) % repeat_x;
    let y1 = (y0 + 1) % repeat_y;
    let (x0, x1, y0, y1) = (x0 as u32, x1 as u32, y0 as u32, y1 as u32);

    // 0 for the lower-left triangle, 1 for the upper-right
    let simplex = if fract_x + fract_y < 1.0 { 0.0 } else { 1.0 };

    let k1 = lattice_value(seed, x1, y0);
    let k2 = lattice_value(seed, x0, y1);
    let k3 = if simplex == 0.0 {
        lattice_value(seed, x0, y0)
    } else {
        lattice_value(seed, x1, y1)
    };

    let d1 = cube_distance(fract_x, fract_y, 1.0, 0.0);
    let d2 = cube_distance(fract_x, fract_y, 0.0, 1.0);
    let d3 = cube_distance(fract_x, fract_y, simplex, simplex);

    let sum = k1 * (1.0 - d1) + k2 * (1.0 - d2) + k3 * (1.0 - d3);
    sum.clamp(0.0, 1.0)
}

/// Hex distance between two fractional grid positions
fn cube_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x1 - x2).abs() + (x1 + y1 - x2 - y2).abs() + (y1 - y2).abs()) / 2.0
}

/// Fractal [simplex2d]. The repeat interval doubles with each layer along
/// with the sample frequency, so every layer tiles over the same region.
pub fn simplex2d_layered(
    seed: u32,
    x: f64,
    y: f64,
    repeat: NonZeroU32,
    layers: u32,
) -> f64 {
    layered(layers, x, y, |i, x, y| {
        // 1 << i is never zero, so this can't fall back
        let factor =
            NonZeroU32::new(1 << i.min(31)).unwrap_or(NonZeroU32::MIN);
        let repeat = repeat.saturating_mul(factor);
        simplex2d(seed, x, y, repeat, repeat)
    })
}

/// A layered simplex noise function bound to a seed and an output range, for
/// generating per-cell values. Each instance draws its own seed from the
/// world RNG, so two functions built from the same config still produce
/// unrelated noise.
#[derive(Clone, Debug)]
pub struct CellNoiseFn {
    seed: u32,
    octaves: u32,
    samples_per_repeat: NonZeroU32,
    exponent: f64,
    output_range: NumRange<f32>,
}

impl CellNoiseFn {
    /// Output range of the underlying noise
    const NOISE_RANGE: NumRange<f64> = NumRange::new(0.0, 1.0);

    /// Initialize a new function. The config should already be validated;
    /// out-of-range values are clamped to the nearest usable value.
    pub fn new(
        rng: &mut impl Rng,
        config: &NoiseConfig,
        output_range: NumRange<f32>,
    ) -> Self {
        Self {
            // Gen a new seed so that we get a different one per function
            seed: rng.gen(),
            octaves: config.octaves.max(1),
            samples_per_repeat: NonZeroU32::new(config.samples_per_repeat)
                .unwrap_or(NonZeroU32::MIN),
            exponent: config.exponent,
            output_range,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sample the function at a fractional position, where `(0, 0)` to
    /// `(1, 1)` covers the whole map once
    pub fn get(&self, x: f64, y: f64) -> RangeValue<f32> {
        let scale = self.samples_per_repeat.get() as f64;
        let noise = simplex2d_layered(
            self.seed,
            x * scale,
            y * scale,
            self.samples_per_repeat,
            self.octaves,
        );
        let shaped = Self::NOISE_RANGE
            .value(noise)
            .normalize()
            .apply(|value| value.powf(self.exponent))
            .inner();
        NumRange::normal_range()
            .value(shaped as f32)
            .map_to(self.output_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn nz(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap()
    }

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(hash2d(42, 5, 7), hash2d(42, 5, 7));
        assert_ne!(hash2d(42, 5, 7), hash2d(43, 5, 7));
        assert_ne!(hash2d(42, 5, 7), hash2d(42, 7, 5));

        // Fixed outputs, so a change to the mixing can't slip through
        assert_eq!(hash2d(42, 5, 7), 2615215103);
        assert_eq!(hash2d(0, 0, 0), 3736311059);
        assert_eq!(hash2d(0xDEAD_BEEF, u32::MAX, 123), 2462728827);
    }

    #[test]
    fn test_hash_distribution() {
        // Low bits should be roughly uniform, since spatial storage masks
        // them off to pick a slot
        let mut buckets = [0usize; 16];
        for x in 0..64 {
            for y in 0..64 {
                buckets[(hash2d(7, x, y) & 0xF) as usize] += 1;
            }
        }
        assert!(buckets.iter().all(|&count| count > 128 && count < 384));
    }

    #[test]
    fn test_curves() {
        for curve in [smooth_curve, smoother_curve] {
            assert_approx_eq!(curve(0.0), 0.0);
            assert_approx_eq!(curve(0.5), 0.5);
            assert_approx_eq!(curve(1.0), 1.0);
        }
        assert!(smoother_curve(0.1) < smooth_curve(0.1));
    }

    #[test]
    fn test_value2d() {
        // Lattice points are just the normalized hash
        assert_approx_eq!(
            value2d(3, 4.0, 9.0),
            hash2d(3, 4, 9) as f64 / u32::MAX as f64
        );
        // Halfway along an edge is the mean of the two ends
        assert_approx_eq!(
            value2d(3, 4.5, 9.0),
            (value2d(3, 4.0, 9.0) + value2d(3, 5.0, 9.0)) / 2.0
        );

        for i in 0..500 {
            let x = i as f64 * 0.37 - 90.0;
            let y = i as f64 * 0.73 - 40.0;
            let value = value2d(11, x, y);
            assert!((0.0..=1.0).contains(&value));
            assert_eq!(value.to_bits(), value2d(11, x, y).to_bits());
        }
    }

    #[test]
    fn test_smooth_value2d() {
        // Same values on the lattice, different in between
        assert_approx_eq!(smooth_value2d(3, 4.0, 9.0), value2d(3, 4.0, 9.0));
        assert_approx_eq!(smooth_value2d(3, 4.5, 9.5), value2d(3, 4.5, 9.5));
        for i in 0..200 {
            let value = smooth_value2d(3, i as f64 * 0.3, i as f64 * 0.9);
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_value2d_repeating() {
        let (rx, ry) = (nz(8), nz(5));
        assert_approx_eq!(
            value2d_repeating(1, 2.25, 3.5, rx, ry),
            value2d_repeating(1, 2.25 + 16.0, 3.5 - 5.0, rx, ry)
        );
        assert_approx_eq!(
            value2d_repeating(1, 2.25, 3.5, rx, ry),
            value2d(1, 2.25, 3.5)
        );
    }

    #[test]
    fn test_perlin2d() {
        // One octave is plain value noise
        assert_approx_eq!(perlin2d(9, 1.3, 2.7, 1), value2d(9, 1.3, 2.7));
        assert_approx_eq!(perlin2d(9, 1.3, 2.7, 0), 0.0);

        let weights: f64 = octave_weights(6).sum();
        assert_approx_eq!(weights, 1.0);

        for i in 0..200 {
            let value = perlin2d(9, i as f64 * 0.11, i as f64 * 0.07, 5);
            assert!((0.0..=1.0).contains(&value));
        }

        let value = perlin2d_repeating(9, 0.5, 0.5, 4, nz(4), nz(4));
        assert!((0.0..=1.0).contains(&value));
    }

    #[test]
    fn test_simplex2d_corners() {
        // On a lattice point, the sample is exactly that point's hash
        let (rx, ry) = (nz(16), nz(16));
        assert_approx_eq!(
            simplex2d(5, 3.0, 4.0, rx, ry),
            hash2d(5, 3, 4) as f64 / u32::MAX as f64
        );
        // Lattice indices wrap at the repeat
        assert_approx_eq!(
            simplex2d(5, 3.0, 4.0, rx, ry),
            simplex2d(5, 19.0, -12.0, rx, ry)
        );
    }

    #[test]
    fn test_simplex2d_tiles() {
        let repeat = nz(6);
        for i in 0..100 {
            let x = i as f64 * 0.173;
            let y = i as f64 * 0.311;
            let value = simplex2d(2, x, y, repeat, repeat);
            assert!((0.0..=1.0).contains(&value));
            assert_approx_eq!(value, simplex2d(2, x + 6.0, y, repeat, repeat));
            assert_approx_eq!(value, simplex2d(2, x, y - 12.0, repeat, repeat));
        }
    }

    #[test]
    fn test_simplex2d_layered_tiles() {
        let repeat = nz(4);
        for i in 0..50 {
            let x = i as f64 * 0.21;
            let y = i as f64 * 0.13;
            let value = simplex2d_layered(8, x, y, repeat, 4);
            assert!((0.0..=1.0).contains(&value));
            assert_approx_eq!(
                value,
                simplex2d_layered(8, x + 4.0, y, repeat, 4)
            );
        }
    }

    #[test]
    fn test_cell_noise_fn() {
        let mut rng = Pcg64::seed_from_u64(1);
        let config = NoiseConfig {
            octaves: 3,
            samples_per_repeat: 4,
            exponent: 1.0,
        };
        let output_range = NumRange::new(-10.0, 10.0);
        let noise_fn = CellNoiseFn::new(&mut rng, &config, output_range);
        let other_fn = CellNoiseFn::new(&mut rng, &config, output_range);
        assert_ne!(noise_fn.seed(), other_fn.seed());

        for i in 0..100 {
            let x = i as f64 / 100.0;
            let value = noise_fn.get(x, 1.0 - x).inner();
            assert!(output_range.contains(value));
            // Tiles across the seam
            assert_approx_eq!(value, noise_fn.get(x + 1.0, -x).inner(), 1e-4);
        }
    }
}
