#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for comparing grid-based and region-based
//! statistics of warehouse locations (the modifiable areal unit problem).
//!
//! Generates a seeded mock dataset for the Île-de-France départements, bins
//! it onto a regular grid and prints statistics, correlations or a
//! multi-scale comparison. Pass `--json` for machine-readable output.

mod config;
mod output;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use maup_generate::Dataset;
use maup_geography_models::Indicator;
use serde::Serialize;

use crate::config::AnalysisConfig;

#[derive(Parser)]
#[command(name = "maup", about = "Grid vs region statistics for warehouse locations")]
struct Cli {
    /// TOML file overriding the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for mock data and synthetic surfaces
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Number of mock warehouses to generate
    #[arg(long, global = true)]
    points: Option<usize>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Grid and region statistics plus density correlations
    Analyze {
        /// Cells per grid side
        #[arg(long, short = 'n')]
        grid_size: Option<usize>,

        /// Indicator to summarize (e.g. `median_income`)
        #[arg(long, short)]
        indicator: Option<String>,
    },
    /// Print the per-cell matrix of one indicator
    Grid {
        /// Cells per grid side
        #[arg(long, short = 'n')]
        grid_size: Option<usize>,

        /// Indicator to render (e.g. `employment_rate`)
        #[arg(long, short)]
        indicator: Option<String>,
    },
    /// Compare point-count statistics across grid sizes
    Sweep {
        /// Comma-separated grid sizes (e.g. `5,10,20`)
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = AnalysisConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(points) = cli.points {
        config.total_points = points;
    }

    let command = cli.command.unwrap_or(Commands::Analyze {
        grid_size: None,
        indicator: None,
    });

    match command {
        Commands::Analyze {
            grid_size,
            indicator,
        } => {
            apply_grid_args(&mut config, grid_size, indicator.as_deref())?;
            let dataset = load_dataset(&config)?;
            let report = report::analyze(&config, &dataset)?;
            print(cli.json, &report, || output::analysis(&report))?;
        }
        Commands::Grid {
            grid_size,
            indicator,
        } => {
            apply_grid_args(&mut config, grid_size, indicator.as_deref())?;
            let dataset = load_dataset(&config)?;
            let report = report::grid(&config, &dataset)?;
            print(cli.json, &report, || output::grid(&report))?;
        }
        Commands::Sweep { sizes } => {
            if let Some(sizes) = sizes {
                config.sweep_sizes = sizes;
            }
            let dataset = load_dataset(&config)?;
            let rows = report::sweep(&config, &dataset)?;
            print(cli.json, &rows, || output::sweep(&rows))?;
        }
    }

    Ok(())
}

fn apply_grid_args(
    config: &mut AnalysisConfig,
    grid_size: Option<usize>,
    indicator: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(grid_size) = grid_size {
        config.grid_size = grid_size;
    }
    if let Some(name) = indicator {
        config.indicator = Indicator::parse(name)?;
    }
    Ok(())
}

fn load_dataset(config: &AnalysisConfig) -> Result<Dataset, Box<dyn std::error::Error>> {
    log::debug!("Analysis config: {config:?}");
    Ok(Dataset::generate(&config.generate_options())?)
}

fn print<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}
