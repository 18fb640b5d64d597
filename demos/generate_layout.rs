use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use room_layout::{Algorithm, DungeonSettings, LayoutConfig, MazeSettings};
use std::{num::ParseIntError, path::PathBuf, str::FromStr};

/// Layout algorithms available from the command line.
#[derive(ValueEnum, Debug, Clone)]
enum Kind {
    Dungeon,
    Maze,
}

/// Holds "WxH" and parses into two usize fields
#[derive(Debug, Clone)]
struct MapSize {
    width: usize,
    height: usize,
}

impl FromStr for MapSize {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        let mut parts = s.split('x');
        let width = parts
            .next()
            .ok_or("missing width")?
            .parse()
            .map_err(|e: ParseIntError| e.to_string())?;
        let height = parts
            .next()
            .ok_or("missing height")?
            .parse()
            .map_err(|e: ParseIntError| e.to_string())?;
        if parts.next().is_some() {
            return Err("too many parts".into());
        }
        Ok(MapSize { width, height })
    }
}

/// Generate a single layout and print it as ASCII.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Config {
    /// YAML job description; overrides every other option.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "dungeon")]
    algorithm: Kind,

    #[arg(short = 'S', long, default_value = "41x25")]
    size: MapSize,

    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Initial wall density (dungeon).
    #[arg(long, default_value_t = 0.45)]
    density: f64,

    /// Automaton steps (dungeon).
    #[arg(long, default_value_t = 5)]
    iterations: usize,

    /// Corridor width (dungeon).
    #[arg(long, default_value_t = 1)]
    path_width: usize,

    /// Extra connections (maze).
    #[arg(long, default_value_t = 5)]
    loops: usize,

    /// Fraction of dead ends kept (maze).
    #[arg(long, default_value_t = 0.3)]
    keep_dead_ends: f64,

    #[arg(long)]
    smooth_edges: bool,

    /// Print the job as YAML before the layout.
    #[clap(short, long)]
    verbose: bool,
}

impl Config {
    fn job(&self) -> Result<LayoutConfig> {
        if let Some(path) = &self.config {
            return LayoutConfig::load(path);
        }

        let layout = match self.algorithm {
            Kind::Dungeon => Algorithm::Dungeon(
                DungeonSettings::default()
                    .with_seed(self.seed)
                    .with_density(self.density)
                    .with_iterations(self.iterations)
                    .with_path_width(self.path_width)
                    .with_smooth_edges(self.smooth_edges),
            ),
            Kind::Maze => Algorithm::Maze(
                MazeSettings::default()
                    .with_seed(self.seed)
                    .with_loop_count(self.loops)
                    .with_dead_end_keep_chance(self.keep_dead_ends)
                    .with_smooth_edges(self.smooth_edges),
            ),
        };
        Ok(LayoutConfig::new(self.size.width, self.size.height, layout))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::parse();

    let job = config.job()?;
    if config.verbose {
        print!("{}", job.to_yaml()?);
    }

    let grid = job.generate().context("Failed to generate layout")?;
    info!(
        "Generated {}x{} layout with {} floor cells in {} regions",
        grid.width(),
        grid.height(),
        grid.floor_count(),
        grid.regions().len()
    );

    println!("{grid}");
    println!("Floor cells       : {}", grid.floor_count());
    println!("Dead ends         : {}", grid.dead_ends().len());
    Ok(())
}
