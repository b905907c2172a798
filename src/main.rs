//! Headless driver: evolves birds for a number of generations and reports
//! statistics for each one.

use anyhow::{Context, Result};
use clap::Parser;
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::population::Population;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flappy-evo")]
#[command(version)]
#[command(about = "Evolves neural-network birds through a scrolling obstacle course")]
struct Cli {
    /// Configuration file (JSON); defaults are used for missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of generations to evolve
    #[arg(short, long, default_value = "50")]
    generations: u32,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds per tick
    #[arg(long, default_value = "0.016666668")]
    dt: f32,

    /// Override the population size
    #[arg(short, long)]
    population: Option<usize>,

    /// Write the statistics history to this JSON file at the end
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if !(cli.dt.is_finite() && cli.dt > 0.0) {
        anyhow::bail!("--dt must be a positive number of seconds, got {}", cli.dt);
    }

    let mut params = match &cli.config {
        Some(path) => Params::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Params::default(),
    };
    if cli.seed.is_some() {
        params.seed = cli.seed;
    }
    if let Some(size) = cli.population {
        params.population_size = size;
    }

    let mut population = Population::new(params).context("creating population")?;

    while population.generation() < cli.generations {
        population.step(cli.dt)?;
    }

    let history = population.history();
    log::info!(
        "Finished {} generations: best fitness {:.2}, mean best over last {} generations {:.2}",
        population.generation(),
        history.best_fitness_ever().unwrap_or(0.0),
        history.len(),
        history.mean_best_fitness()
    );

    if let Some(path) = &cli.stats_out {
        let json = serde_json::to_string_pretty(history)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing statistics to {}", path.display()))?;
        log::info!("Statistics written to {}", path.display());
    }

    Ok(())
}
