//! Cityforge - procedural city layout generator
//!
//! Generates a city into a placement JSON file.

use std::path::PathBuf;

use clap::Parser;
use cityforge::catalog::ModelCatalog;
use cityforge::city::{render_grid, CityGenerator};
use cityforge::core::{CityConfig, Result};
use cityforge::scene::{PlacementMetadata, PlacementRecorder};

/// Cityforge - roads, buildings and trees on a square grid
#[derive(Parser, Debug)]
#[command(name = "cityforge")]
#[command(about = "Generate a procedural city layout as placement JSON")]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML model catalog; the built-in asset set is used when absent
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output placement file
    #[arg(long, short = 'o', default_value = "scene_out.json")]
    output: PathBuf,

    /// Grid side length in cells
    #[arg(long, short = 's')]
    city_size: Option<usize>,

    /// Minimum building floors
    #[arg(long)]
    min_floors: Option<u32>,

    /// Maximum building floors
    #[arg(long)]
    max_floors: Option<u32>,

    /// Percent chance of a road fork at each step
    #[arg(long)]
    fork_chance: Option<u32>,

    /// Percent chance of a building on an empty cell
    #[arg(long)]
    building_chance: Option<u32>,

    /// Percent chance of trees on an empty cell
    #[arg(long)]
    tree_chance: Option<u32>,

    /// Percent of the grid radius that is urban core
    #[arg(long, short = 'u')]
    urbanization: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print an ASCII map of the grid
    #[arg(long)]
    ascii: bool,
}

impl Args {
    fn city_config(&self) -> Result<CityConfig> {
        let mut config = match &self.config {
            Some(path) => CityConfig::load_from_toml(path)?,
            None => CityConfig::default(),
        };

        if let Some(v) = self.city_size {
            config.city_size = v;
        }
        if let Some(v) = self.min_floors {
            config.min_floors = v;
        }
        if let Some(v) = self.max_floors {
            config.max_floors = v;
        }
        if let Some(v) = self.fork_chance {
            config.fork_chance = v;
        }
        if let Some(v) = self.building_chance {
            config.building_chance = v;
        }
        if let Some(v) = self.tree_chance {
            config.tree_chance = v;
        }
        if let Some(v) = self.urbanization {
            config.urbanization = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok(config)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cityforge=info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        tracing::error!(error = %e, "generation failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.city_config()?;
    let catalog = match &args.catalog {
        Some(path) => ModelCatalog::load_from_toml(path)?,
        None => ModelCatalog::with_defaults(),
    };

    let generator = CityGenerator::new(&config, &catalog)?;
    tracing::info!(seed = generator.seed(), "cityforge starting");

    let mut recorder = PlacementRecorder::new();
    let city = generator.generate(&mut recorder)?;

    let metadata = PlacementMetadata {
        created_by: Some(format!("cityforge {}", env!("CARGO_PKG_VERSION"))),
        seed: city.summary.seed,
        city_size: Some(city.summary.city_size),
    };
    recorder.into_file(Some(metadata)).write(&args.output)?;
    tracing::info!(path = %args.output.display(), "placements written");

    if args.ascii {
        print!("{}", render_grid(&city.grid));
    }
    println!("{}", serde_json::to_string_pretty(&city.summary)?);

    Ok(())
}
