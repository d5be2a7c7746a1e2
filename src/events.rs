//! Centralized event definitions
//!
//! Events are how the control surface talks to the simulation. Keyboard
//! handling produces them; the simulation and camera plugins consume them.

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationCommand {
    /// Create a body from the configured spawn parameters
    SpawnBody,
    ToggleTracing,
    /// Re-read the configuration; simulation state is not touched
    ReloadConfiguration,
    /// Move the camera lock to the next body, or release it
    CycleCameraLock,
    Quit,
}
