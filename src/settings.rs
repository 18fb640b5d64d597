use serde::{Deserialize, Serialize};

use crate::{
    LayoutError,
    error::check_unit_interval,
    grid::FLOOR_THRESHOLD,
};

/// Parameters for the cellular-automata dungeon generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonSettings {
    /// Seed of the random stream.
    pub seed: u64,
    /// Probability that an interior cell starts as a wall.
    pub density: f64,
    /// Number of cellular-automata steps.
    pub iterations: usize,
    /// Side of the square stamped at every floor cell when widening paths.
    pub path_width: usize,
    /// Fill wall notches surrounded by floor on three sides.
    pub smooth_edges: bool,
    /// Value written to floor cells.
    pub height: f32,
}

impl Default for DungeonSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            density: 0.45,
            iterations: 5,
            path_width: 1,
            smooth_edges: false,
            height: 1.0,
        }
    }
}

impl DungeonSettings {
    /// Replaces the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the initial wall density.
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Replaces the number of automata steps.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Replaces the path width.
    pub fn with_path_width(mut self, path_width: usize) -> Self {
        self.path_width = path_width;
        self
    }

    /// Enables or disables edge smoothing.
    pub fn with_smooth_edges(mut self, smooth_edges: bool) -> Self {
        self.smooth_edges = smooth_edges;
        self
    }

    /// Replaces the floor height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<(), LayoutError> {
        check_unit_interval("density", self.density)?;
        if self.path_width < 1 {
            return Err(LayoutError::invalid("path_width", "must be at least 1"));
        }
        check_floor_height(self.height)
    }
}

/// Parameters for the recursive-backtracking maze generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeSettings {
    /// Seed of the random stream.
    pub seed: u64,
    /// Upper bound on the number of extra connections opened after carving.
    pub loop_count: usize,
    /// Fraction of dead ends left in place.
    pub dead_end_keep_chance: f64,
    /// Fill wall notches surrounded by floor on three sides.
    pub smooth_edges: bool,
    /// Value written to floor cells.
    pub height: f32,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            loop_count: 5,
            dead_end_keep_chance: 0.3,
            smooth_edges: false,
            height: 1.0,
        }
    }
}

impl MazeSettings {
    /// Replaces the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the loop budget.
    pub fn with_loop_count(mut self, loop_count: usize) -> Self {
        self.loop_count = loop_count;
        self
    }

    /// Replaces the dead-end keep chance.
    pub fn with_dead_end_keep_chance(mut self, chance: f64) -> Self {
        self.dead_end_keep_chance = chance;
        self
    }

    /// Enables or disables edge smoothing.
    pub fn with_smooth_edges(mut self, smooth_edges: bool) -> Self {
        self.smooth_edges = smooth_edges;
        self
    }

    /// Replaces the floor height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<(), LayoutError> {
        check_unit_interval("dead_end_keep_chance", self.dead_end_keep_chance)?;
        check_floor_height(self.height)
    }
}

// A floor height below the threshold would be read back as wall.
fn check_floor_height(height: f32) -> Result<(), LayoutError> {
    if height.is_finite() && height >= FLOOR_THRESHOLD {
        Ok(())
    } else {
        Err(LayoutError::invalid(
            "height",
            format!("must be a finite value of at least {FLOOR_THRESHOLD}, got {height}"),
        ))
    }
}
