use crate::{
    config::MapConfig,
    error::{GeoMapError, GeoMapResult},
    world::hex::{hex_steps, CartesianPoint, GridCoord, ROW_HEIGHT},
};
use bytemuck::Pod;
use log::debug;
use std::mem;

/// A square block of cells, stored row-major. Chunks are the unit that gets
/// handed to a renderer, so the cell layout within a chunk is fixed:
/// `index = local_y * chunk_size + local_x`.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk<T> {
    cells: Vec<T>,
}

impl<T> Chunk<T> {
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }
}

impl<T: Pod> Chunk<T> {
    /// View the cells as raw bytes, `size_of::<T>()` bytes per cell in
    /// row-major order. This is the buffer layout the rendering layer uploads.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }
}

/// The primary world representation: a toroidal grid of square chunks, each
/// holding a fixed number of cells of type `T`.
///
/// The map is logically infinite. Every [GridCoord] is valid input to every
/// accessor here; coordinates are wrapped (with floor modulo) against the map
/// width and height before they're used as indexes. That means there's no
/// way for a coordinate lookup to fail, and callers never have to think about
/// the seams.
///
/// Chunks are laid out row-major by chunk coordinate, and cells row-major
/// within each chunk.
#[derive(Clone, Debug)]
pub struct ChunkMap<T> {
    chunk_size: u32,
    chunk_count_x: u32,
    chunk_count_y: u32,
    width: u32,
    height: u32,
    chunks: Vec<Chunk<T>>,
}

/// Floor modulo of a single axis. The result is always in `[0, extent)`.
fn wrap_axis(value: i64, extent: u32) -> i32 {
    value.rem_euclid(extent as i64) as i32
}

/// Reject a zero dimension
fn non_zero(name: &'static str, value: u32) -> GeoMapResult<u32> {
    if value == 0 {
        Err(GeoMapError::InvalidDimensions { name, value })
    } else {
        Ok(value)
    }
}

/// Multiply a chunk size by a chunk count, making sure the result can still
/// be addressed with an `i32` coordinate
fn map_extent(
    name: &'static str,
    chunk_size: u32,
    chunk_count: u32,
) -> GeoMapResult<u32> {
    chunk_size
        .checked_mul(chunk_count)
        .filter(|extent| *extent <= i32::MAX as u32)
        .ok_or(GeoMapError::InvalidDimensions {
            name,
            value: chunk_count,
        })
}

impl<T: Default + Clone> ChunkMap<T> {
    /// Allocate a new map, with every cell set to `T::default()`
    pub fn new(
        chunk_size: u32,
        chunk_count_x: u32,
        chunk_count_y: u32,
    ) -> GeoMapResult<Self> {
        let chunk_size = non_zero("chunk_size", chunk_size)?;
        let chunk_count_x = non_zero("chunk_count_x", chunk_count_x)?;
        let chunk_count_y = non_zero("chunk_count_y", chunk_count_y)?;
        if mem::size_of::<T>() == 0 {
            return Err(GeoMapError::ZeroSizedCell);
        }
        let width = map_extent("chunk_count_x", chunk_size, chunk_count_x)?;
        let height = map_extent("chunk_count_y", chunk_size, chunk_count_y)?;

        let cells_per_chunk = chunk_size as usize * chunk_size as usize;
        let chunk_count = chunk_count_x as usize * chunk_count_y as usize;
        let chunks = (0..chunk_count)
            .map(|_| Chunk {
                cells: vec![T::default(); cells_per_chunk],
            })
            .collect();

        debug!(
            "Created {}x{} chunk map ({}x{} chunks of {} cells, {} bytes/cell)",
            width,
            height,
            chunk_count_x,
            chunk_count_y,
            cells_per_chunk,
            mem::size_of::<T>()
        );
        Ok(Self {
            chunk_size,
            chunk_count_x,
            chunk_count_y,
            width,
            height,
            chunks,
        })
    }

    pub fn from_config(config: &MapConfig) -> GeoMapResult<Self> {
        Self::new(
            config.chunk_size,
            config.chunk_count_x,
            config.chunk_count_y,
        )
    }
}

impl<T> ChunkMap<T> {
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    pub fn chunk_count_x(&self) -> u32 {
        self.chunk_count_x
    }

    pub fn chunk_count_y(&self) -> u32 {
        self.chunk_count_y
    }

    /// Total number of chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Width of the full map, in cells
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the full map, in cells
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes each cell occupies in a chunk buffer
    pub fn cell_data_size(&self) -> usize {
        mem::size_of::<T>()
    }

    fn cells_per_chunk(&self) -> usize {
        self.chunk_size as usize * self.chunk_size as usize
    }

    /// Wrap any coordinate onto the map, so that `0 <= x < width` and
    /// `0 <= y < height`
    pub fn wrap(&self, coord: GridCoord) -> GridCoord {
        GridCoord::new(
            wrap_axis(coord.x as i64, self.width),
            wrap_axis(coord.y as i64, self.height),
        )
    }

    /// Add two coordinates and wrap the result onto the map
    pub fn add_grid_coords_wrapped(
        &self,
        a: GridCoord,
        b: GridCoord,
    ) -> GridCoord {
        GridCoord::new(
            wrap_axis(a.x as i64 + b.x as i64, self.width),
            wrap_axis(a.y as i64 + b.y as i64, self.height),
        )
    }

    /// Get the shortest equivalent of a vector on the torus. Each component
    /// of the result is within half of the map's extent on that axis, i.e.
    /// `-width/2 <= x < width - width/2`.
    pub fn wrap_vector(&self, vector: GridCoord) -> GridCoord {
        let half_width = (self.width / 2) as i64;
        let half_height = (self.height / 2) as i64;
        GridCoord::new(
            wrap_axis(vector.x as i64 + half_width, self.width)
                - half_width as i32,
            wrap_axis(vector.y as i64 + half_height, self.height)
                - half_height as i32,
        )
    }

    /// Number of steps between two cells, taking the shortest route across
    /// the seams. Use this rather than [GridCoord::hex_distance] for anything
    /// on the map.
    ///
    /// The wrapped vector from [Self::wrap_vector] is the shortest route on
    /// each axis individually, but with the skew, trading a short x for a
    /// long x of the opposite sign can pay off in y. So the vector is also
    /// shifted one map over on each axis, towards the opposite sign, and the
    /// shortest of the 4 candidates wins.
    pub fn hex_distance(&self, a: GridCoord, b: GridCoord) -> usize {
        // Wrap first so the difference can't overflow
        let delta = self.wrap_vector(self.wrap(b) - self.wrap(a));
        let (x, y) = (delta.x as i64, delta.y as i64);
        let shift_x = if x < 0 {
            self.width as i64
        } else {
            -(self.width as i64)
        };
        let shift_y = if y < 0 {
            self.height as i64
        } else {
            -(self.height as i64)
        };

        [
            (x, y),
            (x + shift_x, y),
            (x, y + shift_y),
            (x + shift_x, y + shift_y),
        ]
        .into_iter()
        .map(|(x, y)| hex_steps(x, y))
        .min()
        .unwrap_or(0)
    }

    /// Straight-line distance between two cell centers in cartesian space,
    /// across the seams. Because of the grid skew, wrapping vertically also
    /// shifts the map horizontally by half its height, so a per-axis wrap
    /// isn't enough. Instead, `b` is copied one map over in whichever
    /// direction is towards `a` on each grid axis, and the nearest of the 4
    /// copies wins.
    ///
    /// The directions come from the grid coordinates, not the cartesian
    /// ones. On a map taller than it is wide, the skew can put `b` to the
    /// right of `a` in cartesian space while its nearest copy is still one
    /// map width to the left.
    pub fn hex_cartesian_distance(&self, a: GridCoord, b: GridCoord) -> f64 {
        let (a, b) = (self.wrap(a), self.wrap(b));
        let x_dir = if a.x > b.x { 1.0 } else { -1.0 };
        let y_dir = if a.y > b.y { 1.0 } else { -1.0 };
        let (a, b) = (a.to_cartesian(), b.to_cartesian());

        let extent_x = self.width as f64;
        let extent_y = self.height as f64 * ROW_HEIGHT;
        let skew_x = self.height as f64 * 0.5;

        let offsets = [
            CartesianPoint::new(0.0, 0.0),
            CartesianPoint::new(x_dir * extent_x, 0.0),
            CartesianPoint::new(y_dir * skew_x, y_dir * extent_y),
            CartesianPoint::new(
                x_dir * extent_x + y_dir * skew_x,
                y_dir * extent_y,
            ),
        ];
        offsets
            .iter()
            .map(|offset| (b + *offset - a).length())
            .fold(f64::INFINITY, f64::min)
    }

    /// Get the index of a chunk from its position in the grid of chunks.
    /// Chunk coordinates wrap the same way cell coordinates do.
    pub fn chunk_index_by_chunk_coord(&self, chunk_coord: GridCoord) -> usize {
        let x = wrap_axis(chunk_coord.x as i64, self.chunk_count_x) as usize;
        let y = wrap_axis(chunk_coord.y as i64, self.chunk_count_y) as usize;
        y * self.chunk_count_x as usize + x
    }

    /// Inverse of [Self::chunk_index_by_chunk_coord]. Indexes past the end
    /// wrap around to the start.
    pub fn chunk_coord_by_index(&self, chunk_index: usize) -> GridCoord {
        let chunk_index = chunk_index % self.chunks.len();
        GridCoord::from_index(chunk_index, self.chunk_count_x)
    }

    /// Find the chunk that holds a cell, and the index of the cell within
    /// that chunk
    pub fn chunk_and_cell_index(&self, coord: GridCoord) -> (usize, usize) {
        let wrapped = self.wrap(coord);
        let chunk_size = self.chunk_size as i32;
        let chunk_coord = GridCoord::new(
            wrapped.x.div_euclid(chunk_size),
            wrapped.y.div_euclid(chunk_size),
        );
        let local = GridCoord::new(
            wrapped.x - chunk_coord.x * chunk_size,
            wrapped.y - chunk_coord.y * chunk_size,
        );
        (
            self.chunk_index_by_chunk_coord(chunk_coord),
            local.to_index(self.chunk_size),
        )
    }

    /// Inverse of [Self::chunk_and_cell_index]. The result is always a
    /// wrapped coordinate.
    pub fn chunk_and_cell_to_grid_coord(
        &self,
        chunk_index: usize,
        cell_index: usize,
    ) -> GridCoord {
        let chunk_coord = self.chunk_coord_by_index(chunk_index);
        let local = GridCoord::from_index(
            cell_index % self.cells_per_chunk(),
            self.chunk_size,
        );
        let chunk_size = self.chunk_size as i32;
        GridCoord::new(
            chunk_coord.x * chunk_size + local.x,
            chunk_coord.y * chunk_size + local.y,
        )
    }

    /// Position of a chunk's first cell in cartesian space. The renderer uses
    /// this to place each chunk's geometry.
    pub fn chunk_root_position(&self, chunk_index: usize) -> CartesianPoint {
        self.chunk_and_cell_to_grid_coord(chunk_index, 0)
            .to_cartesian()
    }

    /// Walk from one chunk to another by an offset in chunk coordinates,
    /// wrapping around the map
    pub fn chunk_index_at_offset(
        &self,
        start_chunk: usize,
        offset: GridCoord,
    ) -> usize {
        let start = self.chunk_coord_by_index(start_chunk);
        self.chunk_index_by_chunk_coord(GridCoord::new(
            start.x.wrapping_add(offset.x),
            start.y.wrapping_add(offset.y),
        ))
    }

    /// Get the chunk containing the cell that contains a cartesian point
    pub fn cartesian_to_hex_chunk_index(&self, point: CartesianPoint) -> usize {
        self.chunk_and_cell_index(point.to_grid()).0
    }

    /// Position of a cell on the map as a fraction of the map's extent.
    /// Both components are in `[0, 1)`.
    pub fn unit_position(&self, coord: GridCoord) -> (f64, f64) {
        let wrapped = self.wrap(coord);
        (
            wrapped.x as f64 / self.width as f64,
            wrapped.y as f64 / self.height as f64,
        )
    }

    pub fn chunk(&self, chunk_index: usize) -> Option<&Chunk<T>> {
        self.chunks.get(chunk_index)
    }

    pub fn chunks(&self) -> &[Chunk<T>] {
        &self.chunks
    }

    pub fn cell(&self, coord: GridCoord) -> &T {
        let (chunk_index, cell_index) = self.chunk_and_cell_index(coord);
        &self.chunks[chunk_index].cells[cell_index]
    }

    pub fn cell_mut(&mut self, coord: GridCoord) -> &mut T {
        let (chunk_index, cell_index) = self.chunk_and_cell_index(coord);
        &mut self.chunks[chunk_index].cells[cell_index]
    }

    pub fn set_cell(&mut self, coord: GridCoord, value: T) {
        *self.cell_mut(coord) = value;
    }

    /// Iterate over every cell with its (wrapped) coordinate. Cells come out
    /// in storage order: chunk by chunk, row-major within each chunk.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &T)> {
        self.chunks
            .iter()
            .enumerate()
            .flat_map(move |(chunk_index, chunk)| {
                let cells = chunk.cells.iter().enumerate();
                cells.map(move |(i, cell)| {
                    (self.chunk_and_cell_to_grid_coord(chunk_index, i), cell)
                })
            })
    }

    /// Overwrite every cell with the output of a function of its coordinate.
    /// Each cell is visited exactly once.
    pub fn fill_with(&mut self, mut f: impl FnMut(GridCoord) -> T) {
        for chunk_index in 0..self.chunks.len() {
            for cell_index in 0..self.cells_per_chunk() {
                let coord =
                    self.chunk_and_cell_to_grid_coord(chunk_index, cell_index);
                self.chunks[chunk_index].cells[cell_index] = f(coord);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            ChunkMap::<u32>::new(0, 2, 2).unwrap_err(),
            GeoMapError::InvalidDimensions {
                name: "chunk_size",
                value: 0
            }
        );
        assert_eq!(
            ChunkMap::<u32>::new(4, 2, 0).unwrap_err(),
            GeoMapError::InvalidDimensions {
                name: "chunk_count_y",
                value: 0
            }
        );
        assert_eq!(
            ChunkMap::<()>::new(4, 2, 2).unwrap_err(),
            GeoMapError::ZeroSizedCell
        );
        assert!(matches!(
            ChunkMap::<u8>::new(u32::MAX, 2, 1),
            Err(GeoMapError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_dimensions() {
        let map = ChunkMap::<u32>::new(4, 3, 2).unwrap();
        assert_eq!(map.width(), 12);
        assert_eq!(map.height(), 8);
        assert_eq!(map.chunk_count(), 6);
        assert_eq!(map.cell_data_size(), 4);
        assert!(map.chunks().iter().all(|chunk| chunk.cells().len() == 16));
    }

    #[test]
    fn test_wrap() {
        let map = ChunkMap::<u8>::new(4, 2, 3).unwrap();
        assert_eq!(map.wrap(GridCoord::new(8, 12)), GridCoord::new(0, 0));
        assert_eq!(map.wrap(GridCoord::new(-1, -1)), GridCoord::new(7, 11));
        assert_eq!(map.wrap(GridCoord::new(-17, 25)), GridCoord::new(7, 1));
        assert_eq!(
            map.wrap(GridCoord::new(i32::MIN, i32::MAX)),
            GridCoord::new(0, 7)
        );

        for x in -30..30 {
            for y in -30..30 {
                let wrapped = map.wrap(GridCoord::new(x, y));
                assert!((0..8).contains(&wrapped.x));
                assert!((0..12).contains(&wrapped.y));
                assert_eq!(map.wrap(wrapped), wrapped);
            }
        }
    }

    #[test]
    fn test_wrapped_cell_access() {
        let mut map = ChunkMap::<u32>::new(4, 2, 2).unwrap();
        map.set_cell(GridCoord::new(0, 0), 0xDEAD_BEEF);
        assert_eq!(*map.cell(GridCoord::new(8, 0)), 0xDEAD_BEEF);
        assert_eq!(*map.cell(GridCoord::new(-8, 16)), 0xDEAD_BEEF);
        assert_eq!(*map.cell(GridCoord::new(1, 0)), 0);

        *map.cell_mut(GridCoord::new(-1, -1)) = 7;
        assert_eq!(*map.cell(GridCoord::new(7, 7)), 7);
    }

    #[test]
    fn test_chunk_and_cell_index() {
        let map = ChunkMap::<u8>::new(4, 2, 2).unwrap();
        assert_eq!(map.chunk_and_cell_index(GridCoord::new(0, 0)), (0, 0));
        assert_eq!(map.chunk_and_cell_index(GridCoord::new(5, 1)), (1, 5));
        assert_eq!(map.chunk_and_cell_index(GridCoord::new(3, 6)), (2, 11));
        assert_eq!(map.chunk_and_cell_index(GridCoord::new(-1, -1)), (3, 15));

        // Every cell maps to a unique pair, and back again
        let mut seen = std::collections::HashSet::new();
        for x in 0..8 {
            for y in 0..8 {
                let coord = GridCoord::new(x, y);
                let (chunk_index, cell_index) = map.chunk_and_cell_index(coord);
                assert!(seen.insert((chunk_index, cell_index)));
                assert_eq!(
                    map.chunk_and_cell_to_grid_coord(chunk_index, cell_index),
                    coord
                );
            }
        }
    }

    #[test]
    fn test_chunk_offsets() {
        let map = ChunkMap::<u8>::new(4, 3, 2).unwrap();
        assert_eq!(map.chunk_index_at_offset(0, GridCoord::new(1, 0)), 1);
        assert_eq!(map.chunk_index_at_offset(0, GridCoord::new(-1, 0)), 2);
        assert_eq!(map.chunk_index_at_offset(0, GridCoord::new(0, -1)), 3);
        assert_eq!(map.chunk_index_at_offset(5, GridCoord::new(1, 1)), 0);
        // Offsets much larger than the map still wrap correctly
        assert_eq!(
            map.chunk_index_at_offset(0, GridCoord::new(-31, -10)),
            map.chunk_index_by_chunk_coord(GridCoord::new(2, 0))
        );
    }

    #[test]
    fn test_chunk_root_position() {
        let map = ChunkMap::<u8>::new(4, 2, 2).unwrap();
        let root = map.chunk_root_position(3);
        let expected = GridCoord::new(4, 4).to_cartesian();
        assert_approx_eq!(root.x, expected.x);
        assert_approx_eq!(root.y, expected.y);
        assert_eq!(map.cartesian_to_hex_chunk_index(root), 3);
    }

    #[test]
    fn test_wrap_vector() {
        let map = ChunkMap::<u8>::new(8, 10, 10).unwrap();
        assert_eq!(
            map.wrap_vector(GridCoord::new(79, 0)),
            GridCoord::new(-1, 0)
        );
        assert_eq!(
            map.wrap_vector(GridCoord::new(-41, 41)),
            GridCoord::new(39, -39)
        );
        for x in -200..200 {
            let vector = map.wrap_vector(GridCoord::new(x, -x * 3));
            assert!((-40..40).contains(&vector.x));
            assert!((-40..40).contains(&vector.y));
        }
    }

    #[test]
    fn test_hex_distance() {
        let map = ChunkMap::<u8>::new(8, 10, 10).unwrap();
        let origin = GridCoord::ORIGIN;
        assert_eq!(map.hex_distance(origin, GridCoord::new(79, 0)), 1);
        assert_eq!(map.hex_distance(origin, GridCoord::new(0, 79)), 1);
        assert_eq!(map.hex_distance(origin, GridCoord::new(79, 79)), 2);
        assert_eq!(map.hex_distance(origin, GridCoord::new(3, 2)), 5);
        assert_eq!(
            map.hex_distance(GridCoord::new(78, 5), GridCoord::new(2, 5)),
            4
        );

        // Wrapping each axis alone would give 71 here
        assert_eq!(
            map.hex_distance(GridCoord::new(-5, 400), GridCoord::new(33, 33)),
            42
        );

        for (a, b) in [
            (GridCoord::new(1, 70), GridCoord::new(60, 3)),
            (GridCoord::new(-5, 400), GridCoord::new(33, 33)),
        ] {
            assert_eq!(map.hex_distance(a, b), map.hex_distance(b, a));
            assert_eq!(map.hex_distance(a, a), 0);
            assert!(map.hex_distance(a, b) <= a.hex_distance(b));
        }
    }

    #[test]
    fn test_hex_cartesian_distance() {
        let map = ChunkMap::<u8>::new(8, 10, 10).unwrap();
        let origin = GridCoord::ORIGIN;
        assert_approx_eq!(
            map.hex_cartesian_distance(origin, GridCoord::new(79, 0)),
            1.0
        );
        assert_approx_eq!(
            map.hex_cartesian_distance(origin, GridCoord::new(0, 79)),
            1.0
        );
        assert_approx_eq!(
            map.hex_cartesian_distance(origin, GridCoord::new(79, 79)),
            3f64.sqrt()
        );
        // Away from the seams it's plain cartesian distance
        let (a, b) = (GridCoord::new(10, 10), GridCoord::new(14, 12));
        assert_approx_eq!(
            map.hex_cartesian_distance(a, b),
            a.cartesian_distance(b)
        );
    }

    #[test]
    fn test_hex_cartesian_distance_tall_map() {
        // 4x10, so wrapping vertically skews by more than the map width
        let map = ChunkMap::<u8>::new(2, 2, 5).unwrap();
        // The nearest copy of (3, 0) is at (-1, 10), one step north-west
        let (a, b) = (GridCoord::new(0, 8), GridCoord::new(3, 0));
        assert_approx_eq!(map.hex_cartesian_distance(a, b), 3f64.sqrt());

        // Never longer than the distance to any nearby copy of the target
        for (a, _) in map.iter() {
            for (b, _) in map.iter() {
                let distance = map.hex_cartesian_distance(a, b);
                let nearest = (-3..=3)
                    .flat_map(|i| (-3..=3).map(move |j| (i, j)))
                    .map(|(i, j)| {
                        let copy = GridCoord::new(b.x + i * 4, b.y + j * 10);
                        a.cartesian_distance(copy)
                    })
                    .fold(f64::INFINITY, f64::min);
                assert_approx_eq!(distance, nearest);
                assert_approx_eq!(distance, map.hex_cartesian_distance(b, a));
            }
        }
    }

    #[test]
    fn test_iter_and_fill() {
        let mut map = ChunkMap::<i64>::new(3, 2, 3).unwrap();
        map.fill_with(|coord| coord.x as i64 * 100 + coord.y as i64);

        let mut count = 0;
        for (coord, value) in map.iter() {
            assert_eq!(*value, coord.x as i64 * 100 + coord.y as i64);
            assert_eq!(map.wrap(coord), coord);
            count += 1;
        }
        assert_eq!(count, 6 * 9);
    }

    #[test]
    fn test_chunk_bytes() {
        let mut map = ChunkMap::<u32>::new(2, 1, 1).unwrap();
        map.set_cell(GridCoord::new(1, 0), u32::from_ne_bytes([1, 2, 3, 4]));
        let bytes = map.chunk(0).unwrap().as_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
        assert!(map.chunk(1).is_none());
    }
}
