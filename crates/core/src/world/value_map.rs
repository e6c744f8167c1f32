use crate::{
    error::{GeoMapError, GeoMapResult},
    world::hex::GridCoord,
};
use log::{debug, warn};
use std::fmt::{self, Display};

/// A dense, rectangular grid of integer values, stored row-major. Unlike
/// [ChunkMap](crate::ChunkMap), this does **not** wrap: any access outside
/// `[0, width) x [0, height)` is an error, and the map is left untouched.
///
/// Values are free-form, but generation fills keep everything they write in
/// `[0, max_magnitude]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueMap {
    width: u32,
    height: u32,
    max_magnitude: i32,
    values: Vec<i32>,
}

impl ValueMap {
    /// Create a map with every value set to 0
    pub fn new(
        width: u32,
        height: u32,
        max_magnitude: i32,
    ) -> GeoMapResult<Self> {
        // Coordinates are i32, so anything wider can't be addressed
        for (name, value) in [("width", width), ("height", height)] {
            if value == 0 || value > i32::MAX as u32 {
                return Err(GeoMapError::InvalidDimensions { name, value });
            }
        }
        if max_magnitude < 0 {
            return Err(GeoMapError::InvalidParameter {
                name: "max_magnitude",
                reason: "must not be negative",
            });
        }

        debug!(
            "Created {}x{} value map (max magnitude {})",
            width, height, max_magnitude
        );
        Ok(Self {
            width,
            height,
            max_magnitude,
            values: vec![0; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Largest value that generation fills will write
    pub fn max_magnitude(&self) -> i32 {
        self.max_magnitude
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false, since zero-sized maps can't be created
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values, row-major
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Every coordinate in the map, in row-major order
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> {
        let width = self.width;
        (0..self.len()).map(move |index| GridCoord::from_index(index, width))
    }

    fn index_of(&self, coord: GridCoord) -> GeoMapResult<usize> {
        let in_bounds = (0..self.width as i64).contains(&(coord.x as i64))
            && (0..self.height as i64).contains(&(coord.y as i64));
        if in_bounds {
            Ok(coord.to_index(self.width))
        } else {
            Err(GeoMapError::OutOfRange {
                x: coord.x,
                y: coord.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, coord: GridCoord) -> GeoMapResult<i32> {
        let index = self.index_of(coord)?;
        Ok(self.values[index])
    }

    /// Write a single value. Out-of-range writes are logged and rejected.
    pub fn set(&mut self, coord: GridCoord, value: i32) -> GeoMapResult<()> {
        match self.index_of(coord) {
            Ok(index) => {
                self.values[index] = value;
                Ok(())
            }
            Err(error) => {
                warn!("Ignoring value map write: {}", error);
                Err(error)
            }
        }
    }

    pub fn get_by_index(&self, index: usize) -> GeoMapResult<i32> {
        self.values
            .get(index)
            .copied()
            .ok_or(GeoMapError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    pub fn set_by_index(
        &mut self,
        index: usize,
        value: i32,
    ) -> GeoMapResult<()> {
        let len = self.values.len();
        match self.values.get_mut(index) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => {
                let error = GeoMapError::IndexOutOfRange { index, len };
                warn!("Ignoring value map write: {}", error);
                Err(error)
            }
        }
    }

    /// Overwrite every value with the output of a function of its
    /// coordinate. Each cell is visited exactly once, row-major.
    pub fn fill_with(&mut self, mut f: impl FnMut(GridCoord) -> i32) {
        let width = self.width;
        for (index, value) in self.values.iter_mut().enumerate() {
            *value = f(GridCoord::from_index(index, width));
        }
    }
}

/// One row per line, top row (`y = 0`) first
impl Display for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.values.chunks(self.width as usize) {
            let mut first = true;
            for value in row {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}", value)?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
