use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::common::{count_wall_neighbours, interior_cells, smooth_edges};
use crate::{
    DungeonSettings, Grid, LayoutError, LayoutGenerator,
    error::check_dimensions,
    grid::WALL,
};

const MIN_SIZE: usize = 3;
const WALL_CUTOFF: usize = 5; // At or above: the cell becomes a wall
const FLOOR_CUTOFF: usize = 3; // At or below: the cell becomes floor

/// Cave generator driven by a cellular automaton.
///
/// Cells start as random noise, are smoothed by repeated neighbourhood votes, and are then cut
/// down to the largest connected floor region.
pub struct DungeonGenerator {
    settings: DungeonSettings,
    rng: ChaCha8Rng,
}

impl DungeonGenerator {
    /// Creates a generator after validating `settings`.
    pub fn new(settings: DungeonSettings) -> Result<Self, LayoutError> {
        settings.validate()?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(settings.seed),
            settings,
        })
    }

    /// Settings the generator was built with.
    pub fn settings(&self) -> &DungeonSettings {
        &self.settings
    }

    /// Walls on the border, random noise inside.
    fn initialise(&mut self, width: usize, height: usize) -> Grid {
        let mut grid = Grid::walls(width, height);
        for (x, y) in interior_cells(width, height) {
            if self.rng.random::<f64>() >= self.settings.density {
                grid.set(x, y, self.settings.height);
            }
        }
        grid
    }

    /// One automaton step, read from `grid` and written to a fresh grid.
    fn step(&self, grid: &Grid) -> Grid {
        let (width, height) = grid.size();
        let mut next = Grid::walls(width, height);
        for (x, y) in interior_cells(width, height) {
            let walls = count_wall_neighbours(grid, x, y);
            next[(x, y)] = if walls >= WALL_CUTOFF {
                WALL
            } else if walls <= FLOOR_CUTOFF {
                self.settings.height
            } else {
                grid[(x, y)]
            };
        }
        next
    }

    /// Stamps a `path_width` square at every floor cell, keeping clear of the border ring.
    fn widen(&self, grid: &Grid) -> Grid {
        let (width, height) = grid.size();
        let path_width = self.settings.path_width;
        let mut widened = grid.clone();
        for (x, y) in interior_cells(width, height) {
            if grid.is_wall(x, y) {
                continue;
            }
            for nx in x..x.saturating_add(path_width).min(width - 1) {
                for ny in y..y.saturating_add(path_width).min(height - 1) {
                    widened.set(nx, ny, self.settings.height);
                }
            }
        }
        widened
    }
}

impl Default for DungeonGenerator {
    fn default() -> Self {
        let settings = DungeonSettings::default();
        Self {
            rng: ChaCha8Rng::seed_from_u64(settings.seed),
            settings,
        }
    }
}

impl LayoutGenerator for DungeonGenerator {
    fn min_size(&self) -> usize {
        MIN_SIZE
    }

    fn generate(&mut self, width: usize, height: usize) -> Result<Grid, LayoutError> {
        check_dimensions(width, height, MIN_SIZE)?;
        self.rng = ChaCha8Rng::seed_from_u64(self.settings.seed);

        let mut grid = self.initialise(width, height);
        log::debug!(
            "Initialised {width}x{height} dungeon with {} floor cells",
            grid.floor_count()
        );

        for iteration in 0..self.settings.iterations {
            grid = self.step(&grid);
            log::trace!(
                "Automaton step {iteration}: {} floor cells",
                grid.floor_count()
            );
        }

        keep_largest_region(&mut grid);

        if self.settings.path_width > 1 {
            grid = self.widen(&grid);
        }

        if self.settings.smooth_edges {
            smooth_edges(&mut grid, self.settings.height);
        }

        Ok(grid)
    }
}

/// Walls off every floor region except the largest one. Ties go to the region found first.
///
/// Returns the number of cells removed.
pub(crate) fn keep_largest_region(grid: &mut Grid) -> usize {
    let regions = grid.regions();
    let Some(largest) = regions
        .iter()
        .reduce(|best, area| if area.len() > best.len() { area } else { best })
    else {
        log::debug!("No floor regions to connect");
        return 0;
    };

    let mut removed = 0;
    for area in regions.iter().filter(|area| !std::ptr::eq(*area, largest)) {
        for &(x, y) in area.cells() {
            grid.set(x, y, WALL);
        }
        removed += area.len();
    }

    log::debug!(
        "Kept region of {} cells out of {} regions, removed {removed} cells",
        largest.len(),
        regions.len()
    );
    removed
}
