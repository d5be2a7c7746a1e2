//! Simulation plugin - Self-contained plugin pattern
//!
//! Owns the [`Simulation`] resource, populates the initial scene, steps the
//! simulation on the fixed schedule, and applies [`SimulationCommand`]s from
//! the control surface.

use crate::config::{SceneConfig, SpawnConfig};
use crate::mesh::MeshLibrary;
use crate::physics::math::{Vector, random_signed_unit};
use crate::physics::simulation::SpawnRequest;
use crate::prelude::*;
use rand::Rng;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Step,
    Commands,
}

pub struct SimulationPlugin {
    config: Option<SimulationConfig>,
}

impl SimulationPlugin {
    pub fn new() -> Self {
        Self { config: None }
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config: Some(config),
        }
    }
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self
            .config
            .clone()
            .unwrap_or_else(SimulationConfig::load_from_user_config);

        match toml::to_string_pretty(&config) {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        app.insert_resource(Simulation::new(&config));
        app.insert_resource(config);
        app.init_resource::<MeshLibrary>();
        app.init_resource::<CameraLock>();
        app.init_resource::<ConfigSource>();

        app.add_event::<SimulationCommand>();

        app.add_systems(Startup, spawn_scene);
        app.add_systems(FixedUpdate, step_simulation.in_set(SimulationSet::Step));
        app.add_systems(
            Update,
            handle_simulation_commands.in_set(SimulationSet::Commands),
        );
    }
}

/// Adds every body of `scene` to `simulation`, in order.
pub fn spawn_scene_bodies(
    simulation: &mut Simulation,
    scene: &SceneConfig,
    library: &MeshLibrary,
) -> Result<Vec<BodyHandle>, SimulationError> {
    scene
        .bodies
        .iter()
        .map(|body| {
            simulation.spawn(SpawnRequest {
                mass: body.mass,
                mesh: library.handle(body.model),
                position: Vector::from_array(body.position),
                initial_force: Vector::from_array(body.initial_force),
                scale: body.scale,
            })
        })
        .collect()
}

/// Builds the request for an interactively spawned body.
///
/// The body lands at `(1 + x * spread, 1 + y * spread, 1 + depth)` for signed
/// random draws `x` and `y`, offset from the default body position.
pub fn interactive_spawn_request<R: Rng + ?Sized>(
    spawn: &SpawnConfig,
    library: &MeshLibrary,
    rng: &mut R,
) -> SpawnRequest {
    let x = random_signed_unit(rng) * spawn.spread;
    let y = random_signed_unit(rng) * spawn.spread;

    SpawnRequest {
        mass: spawn.mass,
        mesh: library.handle(spawn.model),
        position: Vector::ONE + Vector::new(x, y, spawn.depth),
        initial_force: Vector::ZERO,
        scale: 1.0,
    }
}

fn spawn_scene(
    mut simulation: ResMut<Simulation>,
    library: Res<MeshLibrary>,
    config: Res<SimulationConfig>,
) {
    match spawn_scene_bodies(&mut simulation, &config.scene, &library) {
        Ok(handles) => info!("Spawned {} bodies", handles.len()),
        Err(e) => error!("Failed to spawn scene: {}", e),
    }
}

/// Advances the simulation one tick; an error ends the application.
pub fn step_simulation(mut simulation: ResMut<Simulation>, mut exit: EventWriter<AppExit>) {
    if let Err(e) = simulation.step() {
        error!("Simulation step {} failed: {}", simulation.tick(), e);
        exit.write(AppExit::error());
    }
}

pub fn handle_simulation_commands(
    mut commands: EventReader<SimulationCommand>,
    mut simulation: ResMut<Simulation>,
    mut config: ResMut<SimulationConfig>,
    mut camera_lock: ResMut<CameraLock>,
    mut exit: EventWriter<AppExit>,
    library: Res<MeshLibrary>,
    source: Res<ConfigSource>,
) {
    for command in commands.read() {
        match command {
            SimulationCommand::SpawnBody => {
                let request =
                    interactive_spawn_request(&config.spawn, &library, &mut **simulation.rng_mut());
                if let Err(e) = simulation.spawn(request) {
                    warn!("Failed to spawn body: {}", e);
                }
            }
            SimulationCommand::ToggleTracing => simulation.toggle_tracing(),
            SimulationCommand::ReloadConfiguration => {
                let fresh = match &source.0 {
                    Some(path) => SimulationConfig::load_or_default(path),
                    None => SimulationConfig::load_from_user_config(),
                };
                config.apply_presentation(fresh);
                info!("Successfully reloaded configuration");
            }
            SimulationCommand::CycleCameraLock => {
                camera_lock.cycle(simulation.len());
                match **camera_lock {
                    Some(handle) => info!("Camera locked to body {}", handle),
                    None => info!("Camera unlocked"),
                }
            }
            SimulationCommand::Quit => {
                exit.write(AppExit::Success);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Model;
    use crate::test_utils::create_test_app;
    use bevy::ecs::system::RunSystemOnce;

    fn test_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.physics.initial_seed = Some(3);
        config
    }

    #[test]
    fn test_plugin_spawns_default_scene() {
        let mut app = create_test_app();
        app.add_plugins(SimulationPlugin::with_config(test_config()));
        app.update();

        let simulation = app.world().resource::<Simulation>();
        assert_eq!(simulation.len(), 3);

        let heavy = simulation.body(BodyHandle(0)).unwrap();
        assert_eq!(heavy.mass, 1e8);
        assert_eq!(heavy.scale, 5.0);
    }

    #[test]
    fn test_spawn_command_adds_body() {
        let mut app = create_test_app();
        app.add_plugins(SimulationPlugin::with_config(test_config()));
        app.update();

        app.world_mut().send_event(SimulationCommand::SpawnBody);
        app.update();

        let simulation = app.world().resource::<Simulation>();
        assert_eq!(simulation.len(), 4);
        assert_eq!(simulation.body(BodyHandle(3)).unwrap().mass, 1e6);
    }

    #[test]
    fn test_toggle_tracing_command() {
        let mut app = create_test_app();
        app.add_plugins(SimulationPlugin::with_config(test_config()));
        app.update();

        app.world_mut().send_event(SimulationCommand::ToggleTracing);
        app.update();
        assert!(app.world().resource::<Simulation>().tracing());

        app.world_mut().send_event(SimulationCommand::ToggleTracing);
        app.update();
        let simulation = app.world().resource::<Simulation>();
        assert!(!simulation.tracing());
        assert!(simulation.snapshots().all(|snapshot| snapshot.path.is_empty()));
    }

    #[test]
    fn test_cycle_camera_lock_command() {
        let mut app = create_test_app();
        app.add_plugins(SimulationPlugin::with_config(test_config()));
        app.update();

        app.world_mut().send_event(SimulationCommand::CycleCameraLock);
        app.update();

        assert_eq!(**app.world().resource::<CameraLock>(), Some(BodyHandle(0)));
    }

    #[test]
    fn test_reload_keeps_simulation_state() {
        let mut app = create_test_app();
        app.insert_resource(ConfigSource(Some(
            "/nonexistent/gravity/config.toml".to_string(),
        )));
        let mut config = test_config();
        config.camera.movement_speed = 11.0;
        app.add_plugins(SimulationPlugin::with_config(config));
        app.update();

        app.world_mut().send_event(SimulationCommand::ReloadConfiguration);
        app.update();

        // Presentation settings come from the (missing) file, physics state stays
        let config = app.world().resource::<SimulationConfig>();
        assert_eq!(config.camera.movement_speed, 2.0);
        assert_eq!(config.physics.initial_seed, Some(3));
        assert_eq!(app.world().resource::<Simulation>().len(), 3);
    }

    #[test]
    fn test_step_system_advances_ticks() {
        let mut app = create_test_app();
        app.add_plugins(SimulationPlugin::with_config(test_config()));
        app.update();

        let before = app.world().resource::<Simulation>().tick();
        app.world_mut().run_system_once(step_simulation).unwrap();
        let after = app.world().resource::<Simulation>().tick();

        assert_eq!(after, before + 1);
    }

    #[test]
    fn test_interactive_spawn_request_placement() {
        let library = MeshLibrary::new();
        let spawn = SpawnConfig::default();
        let mut rng = SharedRng::from_seed(5);

        for _ in 0..1_000 {
            let request = interactive_spawn_request(&spawn, &library, &mut *rng);
            assert!((request.position.x - 1.0).abs() < spawn.spread);
            assert!((request.position.y - 1.0).abs() < spawn.spread);
            assert_eq!(request.position.z, 1.0 + spawn.depth);
            assert_eq!(request.mesh, library.handle(Model::Sphere));
        }
    }

    #[test]
    fn test_spawn_scene_bodies_reports_invalid_mass() {
        let mut simulation = Simulation::new(&test_config());
        let mut scene = SceneConfig::default();
        scene.bodies[1].mass = -5.0;

        let result = spawn_scene_bodies(&mut simulation, &scene, &MeshLibrary::new());
        assert_eq!(result, Err(SimulationError::InvalidMass(-5.0)));
    }
}
