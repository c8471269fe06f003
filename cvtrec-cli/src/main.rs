//! cvtrec CLI - Command-line interface for central tracker cross reconstruction.
//!
//! Reads events of clusters as JSON, builds crosses with the shared geometry,
//! and writes the events back with their crosses.
#![allow(clippy::uninlined_format_args)]

use clap::{Parser, Subcommand, ValueEnum};
use cvtrec_core::{process_events, Event};
use cvtrec_geometry::constants::NLAYR;
use cvtrec_geometry::{inverse_landau, FieldConfiguration, Geometry, GeometryConfig};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Geometry error: {0}")]
    Geometry(#[from] cvtrec_geometry::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Solenoid field configuration selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Field {
    /// Nominal field polarity
    Nominal,
    /// Reversed field polarity
    Reverse,
}

impl From<Field> for FieldConfiguration {
    fn from(field: Field) -> Self {
        match field {
            Field::Nominal => Self::Nominal,
            Field::Reverse => Self::Reverse,
        }
    }
}

/// Geometry selection shared by every subcommand.
#[derive(Debug, clap::Args)]
struct GeometryArgs {
    /// JSON configuration file with a "geometry" section
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the simulation placement
    #[arg(long)]
    simulation: bool,

    /// Cosmic-ray running (no solenoid field)
    #[arg(long)]
    cosmics: bool,

    /// Solenoid field configuration
    #[arg(long, value_enum)]
    field: Option<Field>,
}

impl GeometryArgs {
    fn resolve(&self) -> Result<GeometryConfig> {
        let mut config = match &self.config {
            Some(path) => GeometryConfig::from_file(path)?,
            None => GeometryConfig::default(),
        };
        if self.simulation {
            config = config.with_simulation(true);
        }
        if self.cosmics {
            config = config.with_cosmics(true);
        }
        if let Some(field) = self.field {
            config = config.with_field(field.into());
        }
        Ok(config)
    }
}

/// Cross reconstruction for the central strip tracker.
#[derive(Parser)]
#[command(name = "cvtrec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build crosses for the events of a JSON file
    Crosses {
        /// Input JSON file holding an array of events
        input: PathBuf,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worker threads (rayon default if omitted)
        #[arg(short, long)]
        threads: Option<usize>,

        #[command(flatten)]
        geometry: GeometryArgs,
    },

    /// Show the detector layout
    Geometry {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        geometry: GeometryArgs,
    },

    /// Evaluate the inverse Landau distribution
    Landau {
        /// Cumulative probability, strictly between 0 and 1
        #[arg(short, long)]
        probability: f64,
    },
}

#[derive(Debug, Serialize)]
struct LayerSummary {
    layer: usize,
    sectors: usize,
    radius: f64,
    z0: f64,
    phi0: f64,
}

#[derive(Debug, Serialize)]
struct GeometrySummary<'a> {
    config: &'a GeometryConfig,
    solenoid_scale: f64,
    modules: usize,
    faces: usize,
    cross_radii: &'a [f64],
    layers: Vec<LayerSummary>,
}

fn summarize(geometry: &Geometry) -> Result<GeometrySummary<'_>> {
    let layers = (1..=NLAYR)
        .map(|layer| -> Result<LayerSummary> {
            Ok(LayerSummary {
                layer,
                sectors: geometry.sectors(layer)?,
                radius: geometry.module_radius(layer, 1)?,
                z0: geometry.z0(layer)?,
                phi0: geometry.phi0(layer)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(GeometrySummary {
        config: geometry.config(),
        solenoid_scale: geometry.solenoid_scale(),
        modules: geometry.module_count(),
        faces: geometry.face_count(),
        cross_radii: geometry.cross_radii(),
        layers,
    })
}

fn read_events(path: &Path) -> Result<Vec<Event>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn write_events(events: &[Event], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, events)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, events)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Crosses {
            input,
            output,
            threads,
            geometry,
        } => {
            if let Some(threads) = threads {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()?;
            }

            let config = geometry.resolve()?;
            let geometry = cvtrec_geometry::load(&config);
            if *geometry.config() != config {
                log::warn!(
                    "geometry already loaded with {:?}; ignoring {:?}",
                    geometry.config(),
                    config
                );
            }

            log::info!("Reading: {}", input.display());
            let mut events = read_events(&input)?;

            let start = Instant::now();
            let crosses = process_events(&mut events, &geometry);
            let elapsed = start.elapsed();

            write_events(&events, output.as_deref())?;

            eprintln!(
                "Processed {} events in {:.3}s",
                events.len(),
                elapsed.as_secs_f64()
            );
            eprintln!("Total crosses: {}", crosses);
        }

        Commands::Geometry { json, geometry } => {
            let config = geometry.resolve()?;
            let geometry = Geometry::new(&config);
            let summary = summarize(&geometry)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "Field: {} (solenoid scale {})",
                    config.field, summary.solenoid_scale
                );
                println!("Simulation: {}", config.simulation);
                println!("Cosmics: {}", config.cosmics);
                println!("Modules: {}", summary.modules);
                println!("Faces: {}", summary.faces);
                println!(
                    "{:<6} | {:<8} | {:<10} | {:<10} | {:<8}",
                    "Layer", "Sectors", "Radius", "z0", "phi0"
                );
                println!("{:-<52}", "");
                for layer in &summary.layers {
                    println!(
                        "{:<6} | {:<8} | {:<10.3} | {:<10.3} | {:<8.4}",
                        layer.layer, layer.sectors, layer.radius, layer.z0, layer.phi0
                    );
                }
                for (region, radius) in summary.cross_radii.iter().enumerate() {
                    println!("Region {} cross radius: {:.3}", region + 1, radius);
                }
            }
        }

        Commands::Landau { probability } => {
            println!("{}", inverse_landau(probability)?);
        }
    }

    Ok(())
}
