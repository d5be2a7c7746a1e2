//! Controls plugin - Keyboard mapping for the control surface
//!
//! Discrete key presses become [`SimulationCommand`]s. Continuous camera
//! movement keys are handled by the camera plugin.

use crate::prelude::*;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SimulationCommand>();
        app.add_systems(Update, map_keys_to_commands);
    }
}

/// Command bound to `key`, if any
pub fn command_for_key(key: KeyCode) -> Option<SimulationCommand> {
    match key {
        KeyCode::KeyT => Some(SimulationCommand::ToggleTracing),
        KeyCode::KeyC => Some(SimulationCommand::SpawnBody),
        KeyCode::KeyR => Some(SimulationCommand::ReloadConfiguration),
        KeyCode::KeyL => Some(SimulationCommand::CycleCameraLock),
        KeyCode::Escape => Some(SimulationCommand::Quit),
        _ => None,
    }
}

pub fn map_keys_to_commands(
    keys: Res<ButtonInput<KeyCode>>,
    mut commands: EventWriter<SimulationCommand>,
) {
    for &key in keys.get_just_pressed() {
        if let Some(command) = command_for_key(key) {
            commands.write(command);
        }
    }
}
