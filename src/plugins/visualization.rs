//! Visualization plugin - Self-contained plugin pattern
//!
//! Draws the simulation: one mesh entity per body, kept in sync with the
//! post-step body state, and a line strip per path trace. Nothing here writes
//! to the simulation.

use crate::mesh::MeshLibrary;
use crate::prelude::*;
use std::collections::HashMap;

/// Plugin that renders bodies and their path traces
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MeshLibrary>();
        app.init_resource::<RenderedBodyCount>();

        app.add_systems(Startup, (upload_meshes, spawn_light));
        app.add_systems(
            Update,
            (
                apply_background.run_if(resource_changed::<SimulationConfig>),
                spawn_body_visuals,
                sync_body_transforms,
                draw_path_traces,
            )
                .chain(),
        );
    }
}

/// Links a rendered entity to the body it draws
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyVisual(pub BodyHandle);

/// GPU mesh for each [`MeshHandle`] id
#[derive(Resource, Deref, DerefMut, Default, Debug)]
pub struct RenderMeshes(pub HashMap<u32, Handle<Mesh>>);

/// Number of bodies that already have a visual; the registry only grows
#[derive(Resource, Deref, DerefMut, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedBodyCount(pub usize);

pub fn upload_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    library: Res<MeshLibrary>,
) {
    let render_meshes = library
        .iter()
        .map(|(_, handle, mesh)| (handle.id, meshes.add(mesh.clone())))
        .collect();

    commands.insert_resource(RenderMeshes(render_meshes));
}

fn spawn_light(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 10_000.0,
            ..default()
        },
        Transform::from_xyz(1.0, 2.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn apply_background(config: Res<SimulationConfig>, mut commands: Commands) {
    let [r, g, b] = config.rendering.background;
    commands.insert_resource(ClearColor(Color::srgb(r, g, b)));
}

/// Spawns a mesh entity for every body created since the last frame.
pub fn spawn_body_visuals(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut rendered: ResMut<RenderedBodyCount>,
    simulation: Res<Simulation>,
    render_meshes: Option<Res<RenderMeshes>>,
) {
    let Some(render_meshes) = render_meshes else {
        return;
    };

    for (handle, body) in simulation.registry().iter().skip(**rendered) {
        let Some(mesh) = render_meshes.get(&body.mesh.id) else {
            warn!("No mesh uploaded for body {}", handle);
            continue;
        };

        let color = body.color.as_vec3();
        commands.spawn((
            Name::new(format!("Body {}", handle)),
            BodyVisual(handle),
            Mesh3d(mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(color.x, color.y, color.z),
                ..default()
            })),
            Transform::from_translation(body.location().as_vec3())
                .with_scale(Vec3::splat(body.scale as f32)),
        ));
    }

    **rendered = simulation.len();
}

pub fn sync_body_transforms(
    simulation: Res<Simulation>,
    mut visuals: Query<(&BodyVisual, &mut Transform)>,
) {
    for (visual, mut transform) in &mut visuals {
        if let Ok(body) = simulation.body(visual.0) {
            transform.translation = body.location().as_vec3();
            transform.scale = Vec3::splat(body.scale as f32);
        }
    }
}

fn draw_path_traces(
    mut gizmos: Gizmos,
    simulation: Res<Simulation>,
    config: Res<SimulationConfig>,
) {
    if !simulation.tracing() {
        return;
    }

    for (_, body) in simulation.registry().iter() {
        if body.trail.len() < 2 {
            continue;
        }

        let color = body.color.as_vec3();
        gizmos.linestrip(
            body.trail.line_strip(),
            Color::srgba(color.x, color.y, color.z, config.rendering.trail_alpha),
        );
    }
}
