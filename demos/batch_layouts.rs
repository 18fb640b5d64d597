use anyhow::{Context, Result};
use clap::Parser;
use room_layout::{BatchProgress, LayoutConfig, generate_batch};
use std::path::PathBuf;

/// Generate many seeds of one job in parallel and report floor statistics.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Config {
    /// YAML job description.
    #[arg(short, long)]
    config: PathBuf,

    /// First seed of the batch.
    #[arg(short, long, default_value_t = 0)]
    first_seed: u64,

    /// Number of layouts to generate.
    #[arg(short, long, default_value_t = 100)]
    num_layouts: u64,

    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::parse();

    let job = LayoutConfig::load(&config.config)?;
    if config.verbose {
        println!("Job               : {}", config.config.display());
        println!("Size              : {}x{}", job.width, job.height);
        println!("Layouts           : {}", config.num_layouts);
    }

    let seeds: Vec<u64> = (config.first_seed..config.first_seed + config.num_layouts).collect();
    let progress = BatchProgress::new(seeds.len());
    let grids = generate_batch(&job, &seeds, Some(&progress)).context("Batch failed")?;
    progress.finish();

    let floors: Vec<usize> = grids.iter().map(|grid| grid.floor_count()).collect();
    let (Some(min), Some(max)) = (floors.iter().min(), floors.iter().max()) else {
        println!("No layouts generated");
        return Ok(());
    };
    let mean = floors.iter().sum::<usize>() as f64 / floors.len() as f64;
    let empty = floors.iter().filter(|&&floor| floor == 0).count();

    println!("Floor cells (min) : {min}");
    println!("Floor cells (max) : {max}");
    println!("Floor cells (mean): {mean:.1}");
    println!("All-wall layouts  : {empty}");
    Ok(())
}
