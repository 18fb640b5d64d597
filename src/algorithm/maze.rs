use fixedbitset::FixedBitSet;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::common::{interior_cells, smooth_edges};
use crate::{
    Grid, LayoutError, LayoutGenerator, MazeSettings,
    error::check_dimensions,
    grid::WALL,
};

const MIN_SIZE: usize = 3;
const LOOP_ATTEMPTS_PER_LOOP: usize = 10;
const LOOP_MARGIN: usize = 2; // Loop candidates stay this far from the edge

// Carving strides: north, east, south, west.
const CARVE_DELTAS: [(isize, isize); 4] = [(0, -2), (2, 0), (0, 2), (-2, 0)];

/// Maze generator using a randomised depth-first walk.
///
/// The walk carves a perfect maze on a two-cell stride from the centre of the grid. Extra
/// connections are then opened to form loops, and dead ends are pruned.
pub struct MazeGenerator {
    settings: MazeSettings,
    rng: ChaCha8Rng,
}

impl MazeGenerator {
    /// Creates a generator after validating `settings`.
    pub fn new(settings: MazeSettings) -> Result<Self, LayoutError> {
        settings.validate()?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(settings.seed),
            settings,
        })
    }

    /// Settings the generator was built with.
    pub fn settings(&self) -> &MazeSettings {
        &self.settings
    }

    /// Carves a perfect maze with an explicit stack.
    fn carve(&mut self, width: usize, height: usize) -> Grid {
        let floor = self.settings.height;
        let index = |(x, y): (usize, usize)| y * width + x;
        let inside = |(x, y): &(usize, usize)| *x > 0 && *x < width - 1 && *y > 0 && *y < height - 1;

        let mut grid = Grid::walls(width, height);
        let mut visited = FixedBitSet::with_capacity(width * height);
        let start = (width / 2, height / 2);
        visited.insert(index(start));
        grid[start] = floor;

        let mut stack = vec![start];
        let mut candidates = Vec::with_capacity(CARVE_DELTAS.len());
        while let Some(&(x, y)) = stack.last() {
            candidates.clear();
            candidates.extend(
                CARVE_DELTAS
                    .iter()
                    .filter_map(|&(dx, dy)| grid.offset(x, y, dx, dy))
                    .filter(inside)
                    .filter(|&cell| !visited.contains(index(cell))),
            );

            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            let (nx, ny) = candidates[self.rng.random_range(0..candidates.len())];
            grid[((x + nx) / 2, (y + ny) / 2)] = floor;
            grid[(nx, ny)] = floor;
            visited.insert(index((nx, ny)));
            stack.push((nx, ny));
        }

        grid
    }

    /// Opens walls between corridors until `loop_count` loops exist or attempts run out.
    fn add_loops(&mut self, grid: &mut Grid) -> usize {
        let (width, height) = grid.size();
        if width <= 2 * LOOP_MARGIN || height <= 2 * LOOP_MARGIN {
            return 0;
        }

        // No more loops than candidate cells.
        let candidates = (width - 2 * LOOP_MARGIN) * (height - 2 * LOOP_MARGIN);
        let loop_count = self.settings.loop_count.min(candidates);
        let max_attempts = loop_count.saturating_mul(LOOP_ATTEMPTS_PER_LOOP);
        let mut added = 0;
        let mut attempts = 0;
        while added < loop_count && attempts < max_attempts {
            attempts += 1;
            let x = self.rng.random_range(LOOP_MARGIN..width - LOOP_MARGIN);
            let y = self.rng.random_range(LOOP_MARGIN..height - LOOP_MARGIN);
            if grid.is_wall(x, y) && grid.floor_neighbours(x, y) >= 2 {
                grid.set(x, y, self.settings.height);
                added += 1;
            }
        }

        log::debug!("Added {added} of {loop_count} loops in {attempts} attempts");
        added
    }

    /// Removes dead ends according to the keep chance. Returns the number removed.
    fn prune_dead_ends(&mut self, grid: &mut Grid) -> usize {
        let keep_chance = self.settings.dead_end_keep_chance;
        let removed = if keep_chance <= 0.0 {
            remove_all_dead_ends(grid)
        } else if keep_chance < 1.0 {
            let mut removed = 0;
            for (x, y) in grid.dead_ends() {
                if !self.rng.random_bool(keep_chance) {
                    grid.set(x, y, WALL);
                    removed += 1;
                }
            }
            removed
        } else {
            0
        };

        log::debug!("Removed {removed} dead ends (keep chance {keep_chance})");
        removed
    }
}

impl Default for MazeGenerator {
    fn default() -> Self {
        let settings = MazeSettings::default();
        Self {
            rng: ChaCha8Rng::seed_from_u64(settings.seed),
            settings,
        }
    }
}

impl LayoutGenerator for MazeGenerator {
    fn min_size(&self) -> usize {
        MIN_SIZE
    }

    fn generate(&mut self, width: usize, height: usize) -> Result<Grid, LayoutError> {
        check_dimensions(width, height, MIN_SIZE)?;
        self.rng = ChaCha8Rng::seed_from_u64(self.settings.seed);

        let mut grid = self.carve(width, height);
        log::debug!(
            "Carved {width}x{height} maze with {} floor cells",
            grid.floor_count()
        );

        if self.settings.loop_count > 0 {
            self.add_loops(&mut grid);
        }

        self.prune_dead_ends(&mut grid);

        if self.settings.smooth_edges {
            smooth_edges(&mut grid, self.settings.height);
        }

        Ok(grid)
    }
}

/// Erodes dead ends until none remain. Returns the number of cells removed.
pub(crate) fn remove_all_dead_ends(grid: &mut Grid) -> usize {
    let (width, height) = grid.size();
    let mut removed = 0;
    loop {
        let mut changed = false;
        for (x, y) in interior_cells(width, height) {
            if grid.is_dead_end(x, y) {
                grid.set(x, y, WALL);
                removed += 1;
                changed = true;
            }
        }
        if !changed {
            return removed;
        }
    }
}
