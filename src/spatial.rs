//! Spatial partitioning for neighbor queries.
//!
//! A uniform grid over the surface, rebuilt from scratch every step, maps
//! each cell to the slot indices of the particles inside it. Collision
//! resolution asks for the 3×3 block of cells around a position instead of
//! scanning all n particles, bounding the pairwise cost to near O(n).
//!
//! The grid stores indices, never particles: ownership stays with the
//! arena, and a retired slot simply stops being inserted.
//!
//! The 3×3 query is exact only while `cell_size` is at least as large as
//! the biggest interaction radius in play; with the default 100 px cells
//! and particle sizes capped well below that, it always is here.

use glam::Vec2;

/// Default cell edge length in surface pixels.
pub const DEFAULT_CELL_SIZE: f32 = 100.0;

/// Uniform-cell spatial index over particle slot indices.
#[derive(Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    /// Create a grid covering `width` x `height` with the given cell size.
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        let mut grid = Self {
            cell_size: cell_size.max(1.0),
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        };
        grid.resize(width, height);
        grid
    }

    /// Re-dimension the grid for a new surface size. Existing contents are
    /// discarded; callers rebuild afterwards.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.cols = (width.max(0.0) / self.cell_size).ceil().max(1.0) as usize;
        self.rows = (height.max(0.0) / self.cell_size).ceil().max(1.0) as usize;
        self.cells.clear();
        self.cells.resize_with(self.cols * self.rows, Vec::new);
    }

    /// Cell edge length.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Grid dimensions as (rows, cols).
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The (row, col) cell containing `pos`, or `None` when out of bounds.
    pub fn cell_of(&self, pos: Vec2) -> Option<(usize, usize)> {
        if pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let col = (pos.x / self.cell_size) as usize;
        let row = (pos.y / self.cell_size) as usize;
        if col < self.cols && row < self.rows {
            Some((row, col))
        } else {
            None
        }
    }

    /// Clear every cell and re-insert the given `(slot_index, position)`
    /// pairs. Out-of-bounds particles are dropped from the grid; they still
    /// exist in the arena and re-enter once the walls push them back.
    pub fn rebuild(&mut self, particles: impl Iterator<Item = (usize, Vec2)>) {
        for cell in &mut self.cells {
            cell.clear();
        }
        for (index, pos) in particles {
            if let Some((row, col)) = self.cell_of(pos) {
                self.cells[row * self.cols + col].push(index);
            }
        }
    }

    /// Append the contents of the 3×3 block of cells centered on `pos` to
    /// `out` (cleared first). Includes the particle's own cell, so callers
    /// filter out their own index. Out-of-grid positions yield an empty
    /// set.
    pub fn neighbors(&self, pos: Vec2, out: &mut Vec<usize>) {
        out.clear();
        let Some((row, col)) = self.cell_of(pos) else {
            return;
        };
        let row_lo = row.saturating_sub(1);
        let row_hi = (row + 1).min(self.rows - 1);
        let col_lo = col.saturating_sub(1);
        let col_hi = (col + 1).min(self.cols - 1);
        for r in row_lo..=row_hi {
            for c in col_lo..=col_hi {
                out.extend_from_slice(&self.cells[r * self.cols + c]);
            }
        }
    }

    /// Indices in one cell, for diagnostics and tests.
    pub fn cell_contents(&self, row: usize, col: usize) -> &[usize] {
        if row < self.rows && col < self.cols {
            &self.cells[row * self.cols + col]
        } else {
            &[]
        }
    }
}
