use bevy::log::{Level, LogPlugin};
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use clap::Parser;
use gravity::cli::{Args, load_and_apply_config, print_snapshots, run_headless};
use gravity::plugins::camera::CameraPlugin;
use gravity::plugins::controls::ControlsPlugin;
use gravity::plugins::simulation::SimulationPlugin;
use gravity::plugins::visualization::VisualizationPlugin;
use gravity::prelude::*;

fn main() -> AppExit {
    let args = Args::parse();

    println!(
        "Gravity v{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE")
    );

    let config = match load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::error();
        }
    };

    if let Some(ticks) = args.headless {
        return match run_headless(&config, ticks) {
            Ok(snapshots) => {
                println!("After {ticks} ticks:");
                print_snapshots(&snapshots);
                AppExit::Success
            }
            Err(e) => {
                eprintln!("Error: {e}");
                AppExit::error()
            }
        };
    }

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let mut app = App::new();

    app.add_plugins((
        DefaultPlugins
            .set(LogPlugin {
                level: log_level,
                ..default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Gravity".to_string(),
                    ..default()
                }),
                ..default()
            }),
        PanOrbitCameraPlugin,
    ));

    app.insert_resource(ConfigSource(args.config.clone()));

    app.add_plugins((
        SimulationPlugin::with_config(config),
        VisualizationPlugin,
        ControlsPlugin,
        CameraPlugin,
    ));

    app.run()
}
