use derive_more::Display;
use std::{
    fmt::{Debug, Display},
    ops,
};

/// A numeric type that we can build ranges out of. Noise output, elevation,
/// and fill values all get shuffled between ranges, so this keeps the math in
/// one place.
pub trait Rangeable:
    Copy
    + Debug
    + Display
    + PartialOrd
    + ops::Add<Self, Output = Self>
    + ops::Sub<Self, Output = Self>
    + ops::Mul<Self, Output = Self>
    + ops::Div<Self, Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
}

impl Rangeable for f32 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }
}

impl Rangeable for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }
}

/// A range between two numeric values, inclusive on both ends.
#[derive(Copy, Clone, Debug, Display, PartialEq)]
#[display(fmt = "[{}, {}]", min, max)]
pub struct NumRange<T: Rangeable = f64> {
    pub min: T,
    pub max: T,
}

impl<T: Rangeable> NumRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Get a [0,1] range for this type.
    pub fn normal_range() -> Self {
        Self::new(T::zero(), T::one())
    }

    /// Wrap a value in this range, for chaining operations on it
    pub fn value(self, value: T) -> RangeValue<T> {
        RangeValue { value, range: self }
    }

    /// Max minus min
    pub fn span(&self) -> T {
        self.max - self.min
    }

    /// Check if a value is in this range. Ranges are inclusive on both ends.
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Map a value from this range to the target range. A zero-span source
    /// range can't say where the value falls, so everything maps to the
    /// **minimum** of the target range.
    pub fn map_to(&self, dest_range: &Self, value: T) -> T {
        let span = self.span();
        if span > T::zero() {
            let normalized = (value - self.min) / span;
            dest_range.min + (normalized * dest_range.span())
        } else {
            dest_range.min
        }
    }

    /// Map a value from this range to the range [0, 1]
    pub fn normalize(&self, value: T) -> T {
        self.map_to(&Self::normal_range(), value)
    }

    /// Force a value into this range, snapping to the nearer bound
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

/// A value paired with the range it lives in, so that several range
/// operations can be chained on it.
///
/// ```
/// use geomap::NumRange;
///
/// let range: NumRange<f64> = NumRange::new(10.0, 20.0);
/// let value = range.value(15.0).normalize().apply(|x| x + 1.0).inner();
/// assert_eq!(value, 1.5);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct RangeValue<T: Rangeable> {
    value: T,
    range: NumRange<T>,
}

impl<T: Rangeable> RangeValue<T> {
    pub fn inner(self) -> T {
        self.value
    }

    /// Map this value to the range [0,1]
    pub fn normalize(self) -> Self {
        self.map_to(NumRange::normal_range())
    }

    /// Flip the value within its range, so that its distance from the min
    /// becomes its distance from the max. `0.7` in `[0,1]` becomes `0.3`.
    pub fn invert(mut self) -> Self {
        self.value = self.range.min + self.range.max - self.value;
        self
    }

    /// Map this value from the current range to a new range
    pub fn map_to(self, range: NumRange<T>) -> Self {
        Self {
            value: self.range.map_to(&range, self.value),
            range,
        }
    }

    /// Force the value into its range
    pub fn clamp(self) -> Self {
        Self {
            value: self.range.clamp(self.value),
            range: self.range,
        }
    }

    /// Replace the value with the output of the given function. The range is
    /// unchanged.
    pub fn apply(self, f: impl FnOnce(T) -> T) -> Self {
        Self {
            value: f(self.value),
            range: self.range,
        }
    }
}
