use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    DungeonGenerator, DungeonSettings, Grid, LayoutError, LayoutGenerator, MazeGenerator,
    MazeSettings,
};

/// Which algorithm to run, with its settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Algorithm {
    /// Cellular-automata caves.
    Dungeon(DungeonSettings),
    /// Recursive-backtracking maze.
    Maze(MazeSettings),
}

impl Algorithm {
    /// Seed of the selected settings.
    pub fn seed(&self) -> u64 {
        match self {
            Algorithm::Dungeon(settings) => settings.seed,
            Algorithm::Maze(settings) => settings.seed,
        }
    }

    /// A copy of the settings with the seed replaced.
    pub fn with_seed(&self, seed: u64) -> Self {
        match self {
            Algorithm::Dungeon(settings) => Algorithm::Dungeon(settings.clone().with_seed(seed)),
            Algorithm::Maze(settings) => Algorithm::Maze(settings.clone().with_seed(seed)),
        }
    }

    /// Builds the matching generator, validating the settings.
    pub fn generator(&self) -> Result<Box<dyn LayoutGenerator + Send>, LayoutError> {
        let generator: Box<dyn LayoutGenerator + Send> = match self {
            Algorithm::Dungeon(settings) => Box::new(DungeonGenerator::new(settings.clone())?),
            Algorithm::Maze(settings) => Box::new(MazeGenerator::new(settings.clone())?),
        };
        Ok(generator)
    }
}

/// A complete generation job: grid size plus algorithm settings.
///
/// ```yaml
/// width: 41
/// height: 25
/// layout:
///   algorithm: maze
///   seed: 7
///   loop_count: 3
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Algorithm and its settings.
    pub layout: Algorithm,
}

impl LayoutConfig {
    /// Creates a job for the given size and algorithm.
    pub fn new(width: usize, height: usize, layout: Algorithm) -> Self {
        Self {
            width,
            height,
            layout,
        }
    }

    /// Parses a YAML document.
    pub fn from_yaml(data: &str) -> Result<Self, LayoutError> {
        Ok(serde_yaml::from_str(data)?)
    }

    /// Reads and parses a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout config {}", path.display()))?;
        Self::from_yaml(&data)
            .with_context(|| format!("Failed to parse layout config {}", path.display()))
    }

    /// Serialises the job back to YAML.
    pub fn to_yaml(&self) -> Result<String, LayoutError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// A copy of the job with the seed replaced.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            layout: self.layout.with_seed(seed),
            ..*self
        }
    }

    /// Runs the job.
    pub fn generate(&self) -> Result<Grid, LayoutError> {
        self.layout.generator()?.generate(self.width, self.height)
    }
}
