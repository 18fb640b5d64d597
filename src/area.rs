use fixedbitset::FixedBitSet;
use std::collections::VecDeque;

use crate::{Grid, grid::ORTHOGONAL_DELTAS};

/// A 4-connected region of floor cells found by flood fill.
#[derive(Clone, Debug)]
pub struct Area {
    cells: Vec<(usize, usize)>,
}

impl Area {
    /// Flood fills every floor region of `grid`, scanning columns left to right.
    pub(crate) fn discover_all(grid: &Grid) -> Vec<Self> {
        let (width, height) = grid.size();
        let mut visited = FixedBitSet::with_capacity(width * height);
        let mut areas = Vec::new();

        for (x, y) in grid.positions() {
            if grid.is_floor(x, y) && !visited.contains(x * height + y) {
                areas.push(Self::flood_fill(grid, (x, y), &mut visited));
            }
        }

        areas
    }

    /// Breadth-first fill from `start`, marking every reached cell in `visited`.
    fn flood_fill(grid: &Grid, start: (usize, usize), visited: &mut FixedBitSet) -> Self {
        let height = grid.height();
        let mut cells = Vec::new();
        let mut queue = VecDeque::from([start]);
        visited.insert(start.0 * height + start.1);

        while let Some((x, y)) = queue.pop_front() {
            cells.push((x, y));

            for &(dx, dy) in &ORTHOGONAL_DELTAS {
                let Some((nx, ny)) = grid.offset(x, y, dx, dy) else {
                    continue;
                };
                let index = nx * height + ny;
                if !visited.contains(index) && grid.is_floor(nx, ny) {
                    visited.insert(index);
                    queue.push_back((nx, ny));
                }
            }
        }

        // Sorted cells keep `contains` a binary search without a per-region bitmap.
        cells.sort_unstable();
        Self { cells }
    }

    /// Number of cells in the region.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the region holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `(x, y)` belongs to the region.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells.binary_search(&(x, y)).is_ok()
    }

    /// Cells sorted by column, then row.
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }
}
