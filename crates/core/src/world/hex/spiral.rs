use crate::world::hex::{Clockwise, CubeCoord, HexDirection};

/// Number of cells in a hexagon with the given edge length, i.e. a center cell
/// plus `edge_length - 1` rings around it. An edge length of 1 is the center
/// cell alone.
pub fn hex_area(edge_length: usize) -> usize {
    3 * edge_length * edge_length - 3 * edge_length + 1
}

/// Number of cells in the outermost ring of a hexagon with the given edge
/// length. The single center cell counts as a ring of 1.
pub fn hex_perimeter(edge_length: usize) -> usize {
    (6 * edge_length.saturating_sub(1)).max(1)
}

/// Take one step along an infinite clockwise spiral around the origin. Each
/// ring ends on its north-east axis cell `(0, n)`, and the spiral leaves it
/// by stepping east. The next ring therefore starts at `(1, n)`, one step
/// east of the previous ring's north-east axis cell, which is not a corner.
pub fn next_hex_spiral_coord(coord: CubeCoord) -> CubeCoord {
    let (q, r, s) = (coord.q(), coord.r(), coord.s());

    // Due north-east of center is the last cell of each ring
    if q == 0 && r >= s {
        return coord + HexDirection::East.cube_vector();
    }

    // Each wedge runs from one corner axis (inclusive) to the next one
    // clockwise. Cells on an axis match two tests; the later one wins so that
    // corners turn the walk.
    // q >= 0 && r > 0
    let mut wedge = 0;
    if r <= 0 && s < 0 {
        wedge = 1;
    }
    if s >= 0 && q > 0 {
        wedge = 2;
    }
    if q <= 0 && r < 0 {
        wedge = 3;
    }
    if r >= 0 && s > 0 {
        wedge = 4;
    }
    if s <= 0 && q < 0 {
        wedge = 5;
    }

    let direction = HexDirection::CLOCKWISE[(wedge + 2) % 6];
    coord + direction.cube_vector()
}

/// An endless iterator that walks outward from a center cell in a clockwise
/// spiral. The first item is the center itself. Combine with [hex_area] to
/// visit everything within a radius:
///
/// ```
/// use geomap::{hex_area, CubeCoord, HexSpiral};
///
/// let cells: Vec<CubeCoord> =
///     HexSpiral::new(CubeCoord::ORIGIN).take(hex_area(2)).collect();
/// assert_eq!(cells.len(), 7);
/// ```
#[derive(Clone, Debug)]
pub struct HexSpiral {
    center: CubeCoord,
    offset: CubeCoord,
}

impl HexSpiral {
    pub fn new(center: CubeCoord) -> Self {
        Self {
            center,
            offset: CubeCoord::ORIGIN,
        }
    }
}

impl Iterator for HexSpiral {
    type Item = CubeCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let coord = self.center + self.offset;
        self.offset = next_hex_spiral_coord(self.offset);
        Some(coord)
    }
}
