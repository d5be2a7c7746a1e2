//! Gravity prelude module
//!
//! This module re-exports the most commonly used types, traits, and functions
//! across the application to reduce import boilerplate.

// External crate re-exports
pub use bevy::prelude::*;

// Internal re-exports - Config
pub use crate::config::SimulationConfig;

// Internal re-exports - Errors
pub use crate::error::SimulationError;

// Internal re-exports - Events
pub use crate::events::SimulationCommand;

// Internal re-exports - Resources
pub use crate::resources::{CameraLock, ConfigSource, SharedRng};

// Internal re-exports - Components
pub use crate::components::{BodyHandle, MeshHandle};

// Internal re-exports - Physics
pub use crate::physics::simulation::Simulation;
