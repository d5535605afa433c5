//! Fine lattice coordinates shared by the board, the engine and the reader.
//!
//! A board of `rows x cols` logical cells lives on a lattice of
//! `(2 * cols + 1) x (2 * rows + 1)` points. Odd-odd points are cell centers;
//! every other point sits on a cell boundary, which is where lasers travel.

/// A point on the fine lattice, `(x, y)` with `x` along columns.
pub type Point = (i32, i32);

/// A diagonal unit velocity: both components are exactly `+1` or `-1`.
pub type Velocity = (i32, i32);

/// Offset from a cell center to one of its four boundary points.
pub type Side = (i32, i32);

/// A logical cell, `(row, col)`.
pub type Cell = (usize, usize);

/// The four sides of a cell: left, right, top, bottom.
pub const SIDES: [Side; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Bounds of the fine lattice for a board of `rows x cols` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lattice {
    rows: usize,
    cols: usize,
}

impl Lattice {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of lattice points along x (`2 * cols + 1`).
    #[inline]
    pub const fn width(&self) -> usize {
        2 * self.cols + 1
    }

    /// Number of lattice points along y (`2 * rows + 1`).
    #[inline]
    pub const fn height(&self) -> usize {
        2 * self.rows + 1
    }

    /// Total number of lattice points.
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// Returns true if `point` lies within `[0, 2*cols] x [0, 2*rows]`.
    ///
    /// Leaving these bounds is how a ray exits the board.
    #[inline(always)]
    pub fn contains(&self, (x, y): Point) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Converts a point to a row-major index into a lattice-sized array.
    ///
    /// Returns `None` for points outside the lattice.
    #[inline(always)]
    pub fn index(&self, point: Point) -> Option<usize> {
        if self.contains(point) {
            Some(point.1 as usize * self.width() + point.0 as usize)
        } else {
            None
        }
    }

    /// Converts a row-major index back to its lattice point.
    #[inline]
    pub fn point(&self, index: usize) -> Point {
        ((index % self.width()) as i32, (index / self.width()) as i32)
    }
}

/// Lattice center of the cell at `(row, col)`.
#[inline(always)]
pub fn cell_center((row, col): Cell) -> Point {
    (2 * col as i32 + 1, 2 * row as i32 + 1)
}

/// Cell whose center is `point`, or `None` if `point` is not odd-odd.
#[inline]
pub fn center_to_cell((x, y): Point) -> Option<Cell> {
    if x > 0 && y > 0 && x % 2 == 1 && y % 2 == 1 {
        Some(((y / 2) as usize, (x / 2) as usize))
    } else {
        None
    }
}

/// The four boundary points of a cell, each paired with its side offset.
pub fn boundary_points(cell: Cell) -> [(Side, Point); 4] {
    let (center_x, center_y) = cell_center(cell);
    SIDES.map(|side| (side, (center_x + side.0, center_y + side.1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_dimensions() {
        let lattice = Lattice::new(3, 4);
        assert_eq!(lattice.width(), 9);
        assert_eq!(lattice.height(), 7);
        assert_eq!(lattice.len(), 63);
    }

    #[test]
    fn test_contains_is_inclusive_of_outer_boundary() {
        let lattice = Lattice::new(2, 3);
        assert!(lattice.contains((0, 0)));
        assert!(lattice.contains((6, 4)));
        assert!(!lattice.contains((7, 4)));
        assert!(!lattice.contains((6, 5)));
        assert!(!lattice.contains((-1, 2)));
        assert!(!lattice.contains((3, -1)));
    }

    #[test]
    fn test_index_roundtrip() {
        let lattice = Lattice::new(3, 2);
        for index in 0..lattice.len() {
            let point = lattice.point(index);
            assert_eq!(
                lattice.index(point),
                Some(index),
                "Roundtrip failed for index {index}"
            );
        }
        assert_eq!(lattice.index((5, 0)), None);
    }

    #[test]
    fn test_cell_center_roundtrip() {
        for row in 0..4 {
            for col in 0..5 {
                let center = cell_center((row, col));
                assert_eq!(center.0 % 2, 1);
                assert_eq!(center.1 % 2, 1);
                assert_eq!(center_to_cell(center), Some((row, col)));
            }
        }
        assert_eq!(center_to_cell((2, 1)), None);
        assert_eq!(center_to_cell((1, 0)), None);
    }

    #[test]
    fn test_boundary_points_surround_center() {
        let points = boundary_points((1, 2));
        assert_eq!(
            points,
            [
                ((-1, 0), (4, 3)),
                ((1, 0), (6, 3)),
                ((0, -1), (5, 2)),
                ((0, 1), (5, 4)),
            ]
        );
    }
}
