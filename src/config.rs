use crate::components::trail::DEFAULT_TRAIL_CAPACITY;
use crate::physics::forces::{FORCE_SCALE, GRAVITATIONAL_CONSTANT};
use crate::physics::math::Scalar;
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment variable overrides, e.g. `GRAVITY__PHYSICS__FORCE_SCALE=8`
const ENVIRONMENT_PREFIX: &str = "GRAVITY";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub trails: TrailConfig,
    pub spawn: SpawnConfig,
    pub scene: SceneConfig,
    pub camera: CameraConfig,
    pub rendering: RenderingConfig,
}

/// What happens to a body's accumulated force after it has been applied
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ForceAccumulation {
    /// The accumulator keeps every force ever computed, so each tick re-applies
    /// the whole history and motion compounds
    #[default]
    Persistent,
    /// The accumulator is cleared after each tick's integration
    ResetEachTick,
}

/// Geometry a body is drawn with
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Model {
    Cube,
    Sphere,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravitational_constant: Scalar,
    pub force_scale: Scalar,
    pub force_accumulation: ForceAccumulation,
    pub initial_seed: Option<u64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            force_scale: FORCE_SCALE,
            force_accumulation: ForceAccumulation::Persistent,
            initial_seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TrailConfig {
    pub capacity: usize,
    pub enabled_at_start: bool,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_TRAIL_CAPACITY,
            enabled_at_start: false,
        }
    }
}

/// Parameters for bodies created interactively
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub mass: Scalar,
    /// Maximum offset on x and y from the default body position
    pub spread: Scalar,
    /// Offset on z from the default body position
    pub depth: Scalar,
    pub model: Model,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            mass: 1e6,
            spread: 100.0,
            depth: -150.0,
            model: Model::Sphere,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SceneBody {
    pub mass: Scalar,
    pub model: Model,
    pub position: [Scalar; 3],
    #[serde(default)]
    pub initial_force: [Scalar; 3],
    #[serde(default = "SceneBody::default_scale")]
    pub scale: Scalar,
}

impl SceneBody {
    fn default_scale() -> Scalar {
        1.0
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub bodies: Vec<SceneBody>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bodies: vec![
                SceneBody {
                    mass: 1e8,
                    model: Model::Cube,
                    position: [1.0, 1.0, -499.0],
                    initial_force: [0.0, 0.0, 0.0],
                    scale: 5.0,
                },
                SceneBody {
                    mass: 1e5,
                    model: Model::Cube,
                    position: [101.0, 301.0, -499.0],
                    initial_force: [-3.5, 0.0, 0.0],
                    scale: 10.0,
                },
                SceneBody {
                    mass: 1e7,
                    model: Model::Sphere,
                    position: [-99.0, -399.0, -499.0],
                    initial_force: [-3.5, 0.0, 0.0],
                    scale: 1.0,
                },
            ],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub movement_speed: f32,
    pub radius: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            movement_speed: 2.0,
            radius: 600.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderingConfig {
    pub background: [f32; 3],
    pub trail_alpha: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background: [0.13, 0.13, 0.13],
            trail_alpha: 0.8,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse config file {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path);
                Self::default()
            }
        }
    }

    /// Location of the per-user configuration file, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "gravity", "gravity")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load the per-user configuration file layered with `GRAVITY__*`
    /// environment variables, falling back to defaults on any error
    pub fn load_from_user_config() -> Self {
        let mut builder = config::Config::builder();

        if let Some(path) = Self::user_config_path() {
            debug!("Looking for user configuration at {}", path.display());
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let layered = builder
            .add_source(
                config::Environment::with_prefix(ENVIRONMENT_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .and_then(|settings| settings.try_deserialize::<Self>());

        match layered {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load user configuration: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Copies the settings that only affect presentation from `fresh`.
    ///
    /// Physics, trail, spawn and scene settings are left alone so a reload never
    /// disturbs a running simulation.
    pub fn apply_presentation(&mut self, fresh: SimulationConfig) {
        self.camera = fresh.camera;
        self.rendering = fresh.rendering;
    }
}
