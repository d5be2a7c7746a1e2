//! Test utilities for plugin testing

use crate::prelude::*;

/// Creates a minimal headless app with the core Bevy plugins needed for testing
pub fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        bevy::asset::AssetPlugin::default(),
        bevy::input::InputPlugin,
        bevy::transform::TransformPlugin,
    ));

    app.init_asset::<Mesh>();
    app.init_asset::<StandardMaterial>();

    app.add_event::<SimulationCommand>();

    app
}

/// Helper to simulate a key press
pub fn press_key(app: &mut App, key: KeyCode) {
    // Clear the input state to ensure just_pressed works correctly
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
}

/// Helper to simulate a key release
pub fn release_key(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
}

/// Drains every pending [`SimulationCommand`]
pub fn drain_commands(app: &mut App) -> Vec<SimulationCommand> {
    app.world_mut()
        .resource_mut::<Events<SimulationCommand>>()
        .drain()
        .collect()
}
