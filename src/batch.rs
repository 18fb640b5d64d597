use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::{Grid, LayoutConfig, LayoutError};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} layouts";

/// Progress bar tracking a batch of layouts.
pub struct BatchProgress {
    progress_bar: ProgressBar,
}

impl BatchProgress {
    /// Creates a visible progress bar for `total` layouts.
    pub fn new(total: usize) -> Self {
        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
            .map(|style| style.progress_chars("##-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        Self { progress_bar: pb }
    }

    /// Creates a progress tracker that draws nothing.
    pub fn hidden() -> Self {
        Self {
            progress_bar: ProgressBar::hidden(),
        }
    }

    /// Records one finished layout.
    pub fn increment(&self) {
        self.progress_bar.inc(1);
    }

    /// Number of layouts finished so far.
    pub fn position(&self) -> u64 {
        self.progress_bar.position()
    }

    /// Finish and clear progress display.
    pub fn finish(self) {
        self.progress_bar.finish_and_clear();
    }
}

/// Generates one layout per seed in parallel.
///
/// Every job gets its own generator, so the results are the same as generating each seed in
/// turn. The output is ordered like `seeds`.
pub fn generate_batch(
    config: &LayoutConfig,
    seeds: &[u64],
    progress: Option<&BatchProgress>,
) -> Result<Vec<Grid>, LayoutError> {
    // Surface bad settings once instead of once per seed.
    config.layout.generator()?;

    seeds
        .par_iter()
        .map(|&seed| {
            let grid = config.with_seed(seed).generate();
            if let Some(progress) = progress {
                progress.increment();
            }
            grid
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Algorithm, DungeonSettings, MazeSettings};

    #[test]
    fn test_batch_matches_sequential_generation() {
        let config = LayoutConfig::new(25, 19, Algorithm::Maze(MazeSettings::default()));
        let seeds = [3, 1, 4, 1, 5];
        let progress = BatchProgress::hidden();

        let grids = generate_batch(&config, &seeds, Some(&progress)).unwrap();
        assert_eq!(grids.len(), seeds.len());
        assert_eq!(progress.position(), seeds.len() as u64);
        for (grid, &seed) in grids.iter().zip(&seeds) {
            assert_eq!(grid, &config.with_seed(seed).generate().unwrap());
        }
        assert_eq!(grids[1], grids[3]);
        progress.finish();
    }

    #[test]
    fn test_batch_rejects_invalid_settings_up_front() {
        let config = LayoutConfig::new(
            25,
            19,
            Algorithm::Dungeon(DungeonSettings::default().with_density(-1.0)),
        );
        assert!(generate_batch(&config, &[1, 2], None).is_err());
    }

    #[test]
    fn test_empty_batch() {
        let config = LayoutConfig::new(9, 9, Algorithm::Dungeon(DungeonSettings::default()));
        assert!(generate_batch(&config, &[], None).unwrap().is_empty());
    }
}
