//! The immutable puzzle definition handed to the solver.

use crate::blocks::{BlockKind, Inventory};
use crate::lattice::{Cell, Lattice, Point, Velocity};

/// Classification of a logical cell as read from the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Locked cell. `Fixed(Empty)` is a cell that can never hold a block.
    Fixed(BlockKind),
    /// Cell whose kind is chosen by the search.
    Open,
}

/// A laser entering the board at a lattice point with a diagonal velocity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LaserSource {
    pub position: Point,
    pub velocity: Velocity,
}

impl LaserSource {
    pub const fn new(position: Point, velocity: Velocity) -> Self {
        Self { position, velocity }
    }
}

/// A complete puzzle: cells, inventory, lasers and targets.
///
/// Cells are stored row-major. The reader guarantees the invariants checked
/// in [`GridLayout::new`]; the inventory total is checked later by the
/// placement generator, which reports a mismatch as an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    lattice: Lattice,
    cells: Vec<Slot>,
    inventory: Inventory,
    lasers: Vec<LaserSource>,
    targets: Vec<Point>,
}

impl GridLayout {
    /// Builds a layout from row-major cells.
    ///
    /// Panics if the dimensions are zero or `cells` does not hold exactly
    /// `rows * cols` entries.
    pub fn new(
        rows: usize,
        cols: usize,
        cells: Vec<Slot>,
        inventory: Inventory,
        lasers: Vec<LaserSource>,
        targets: Vec<Point>,
    ) -> Self {
        assert!(rows > 0 && cols > 0, "layout must be at least 1x1");
        assert_eq!(cells.len(), rows * cols, "cells must be rows * cols");
        Self {
            lattice: Lattice::new(rows, cols),
            cells,
            inventory,
            lasers,
            targets,
        }
    }

    pub fn rows(&self) -> usize {
        self.lattice.rows()
    }

    pub fn cols(&self) -> usize {
        self.lattice.cols()
    }

    pub fn lattice(&self) -> Lattice {
        self.lattice
    }

    /// Returns the slot at `(row, col)`.
    #[inline]
    pub fn slot(&self, (row, col): Cell) -> Slot {
        self.cells[row * self.cols() + col]
    }

    /// Iterates every cell with its slot, row-major.
    pub fn slots(&self) -> impl Iterator<Item = (Cell, Slot)> + '_ {
        let cols = self.cols();
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, &slot)| ((index / cols, index % cols), slot))
    }

    /// Open cells in row-major order. Placements assign kinds in this order.
    pub fn open_cells(&self) -> Vec<Cell> {
        self.slots()
            .filter(|&(_, slot)| slot == Slot::Open)
            .map(|(cell, _)| cell)
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&slot| slot == Slot::Open).count()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn lasers(&self) -> &[LaserSource] {
        &self.lasers
    }

    pub fn targets(&self) -> &[Point] {
        &self.targets
    }
}
