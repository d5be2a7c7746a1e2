//! Command line interface for Gravity

use clap::Parser;
use std::fmt;
use std::path::Path;

use crate::components::BodySnapshot;
use crate::config::{ForceAccumulation, SimulationConfig};
use crate::error::SimulationError;
use crate::mesh::MeshLibrary;
use crate::physics::simulation::Simulation;
use crate::plugins::simulation::spawn_scene_bodies;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded or an override was rejected
    ConfigLoad(String),
    /// The simulation failed while running headless
    Simulation(SimulationError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::Simulation(err) => write!(f, "Simulation failed: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigLoad(_) => None,
            CliError::Simulation(err) => Some(err),
        }
    }
}

impl From<SimulationError> for CliError {
    fn from(err: SimulationError) -> Self {
        CliError::Simulation(err)
    }
}

/// Gravity - N-body gravity simulation
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Random seed for body colors and spawn placement
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Start with path tracing enabled
    #[arg(short = 't', long)]
    pub trace: bool,

    /// Clear each body's accumulated force after every tick
    #[arg(long)]
    pub reset_forces: bool,

    /// Number of positions kept per path trace (overrides config file)
    #[arg(long, value_name = "COUNT")]
    pub trail_capacity: Option<usize>,

    /// Multiplier applied to every pairwise force (overrides config file)
    #[arg(short = 'f', long, value_name = "VALUE")]
    pub force_scale: Option<f64>,

    /// Run the scene for TICKS steps without a window, then print final positions
    #[arg(long, value_name = "TICKS")]
    pub headless: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        if !Path::new(config_path).exists() {
            return Err(CliError::ConfigLoad(format!(
                "{config_path} does not exist"
            )));
        }
        println!("Loading configuration from: {config_path}");
        SimulationConfig::load_or_default(config_path)
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(seed) = args.seed {
        println!("Using random seed: {seed}");
        config.physics.initial_seed = Some(seed);
    }

    if args.trace {
        println!("Path tracing enabled at start");
        config.trails.enabled_at_start = true;
    }

    if args.reset_forces {
        println!("Resetting accumulated forces each tick");
        config.physics.force_accumulation = ForceAccumulation::ResetEachTick;
    }

    if let Some(capacity) = args.trail_capacity {
        println!("Overriding trail capacity to: {capacity}");
        config.trails.capacity = capacity;
    }

    if let Some(force_scale) = args.force_scale {
        if !force_scale.is_finite() {
            return Err(CliError::ConfigLoad(format!(
                "force scale must be finite, got {force_scale}"
            )));
        }
        println!("Overriding force scale to: {force_scale}");
        config.physics.force_scale = force_scale;
    }

    Ok(config)
}

/// Steps the configured scene `ticks` times and returns the final snapshots.
pub fn run_headless(config: &SimulationConfig, ticks: u64) -> Result<Vec<BodySnapshot>, CliError> {
    let library = MeshLibrary::new();
    let mut simulation = Simulation::new(config);
    spawn_scene_bodies(&mut simulation, &config.scene, &library)?;

    for _ in 0..ticks {
        simulation.step()?;
    }

    Ok(simulation.snapshots().collect())
}

/// Prints one line per body: handle, location, and trace length
pub fn print_snapshots(snapshots: &[BodySnapshot]) {
    for snapshot in snapshots {
        let location = snapshot.position.truncate();
        println!(
            "body {}: ({:.6}, {:.6}, {:.6}) path={}",
            snapshot.handle,
            location.x,
            location.y,
            location.z,
            snapshot.path.len()
        );
    }
}
