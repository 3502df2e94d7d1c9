use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use greenspace_layers::config::MapConfig;
use greenspace_layers::dataset::Dataset;
use greenspace_layers::generation::generate::write_synthetic_dataset;
use greenspace_layers::map::memory::MemorySurface;
use greenspace_layers::map::surface::MapOptions;
use greenspace_layers::map::view::GreenspaceMap;
use log::info;

#[derive(Parser, Debug)]
#[command(version, about = "Greenspace map layers over GeoJSON datasets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a synthetic greenspace FeatureCollection
    Generate {
        /// Number of features to generate
        count: usize,
        /// Output GeoJSON file
        out: PathBuf,
        /// Seed for the random generator
        #[arg(default_value_t = 12345)]
        seed: u64,
    },
    /// Load a dataset, install every layer and print statistics
    Render {
        /// GeoJSON FeatureCollection to load
        dataset: PathBuf,
        /// JSON map configuration
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Generate { count, out, seed } => write_synthetic_dataset(&out, count, seed)?,
        Command::Render { dataset, config } => render(&dataset, config.as_deref())?,
    }
    Ok(())
}

fn render(dataset_path: &Path, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => MapConfig::from_path(path)?,
        None => MapConfig::default(),
    };

    let dataset = Dataset::from_path(dataset_path, &config.simplify)?;
    let surface = MemorySurface::new(MapOptions::from(&config));
    let mut map = GreenspaceMap::new(surface, dataset, config);
    map.refresh()?;

    let options = map.surface().options();
    info!(
        "Map view: {} at {:?}, zoom {}",
        options.style, options.center, options.zoom
    );
    for id in map.surface().source_ids() {
        let features = map
            .surface()
            .source(id)
            .map(|source| source.data.features.len())
            .unwrap_or(0);
        info!("{}: {} features", id, features);
    }
    info!("Layers: {}", map.surface().layer_ids().join(", "));

    println!("{}", serde_json::to_string_pretty(&map.statistics())?);
    Ok(())
}
