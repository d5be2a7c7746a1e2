//! Camera plugin - Self-contained plugin pattern
//!
//! Spawns an orbit camera, moves its focus with the movement keys, and carries
//! it along with the locked body when a camera lock is active. The camera never
//! touches simulation state.

use crate::physics::math::{Vector, strafe_direction};
use crate::prelude::*;
use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_panorbit_camera::TouchControls;
use bevy_panorbit_camera::TrackpadBehavior;

/// Where the camera looks before any input, roughly the center of the default scene
const INITIAL_FOCUS: Vec3 = Vec3::new(0.0, 0.0, -500.0);

/// Plugin that handles camera setup and control
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera);
        app.add_systems(Update, (move_camera_focus, follow_locked_body).chain());
    }
}

fn spawn_camera(mut commands: Commands, config: Res<SimulationConfig>) {
    commands.spawn((
        Name::new("Main Camera"),
        Camera {
            hdr: true,
            ..default()
        },
        Camera3d::default(),
        Tonemapping::AcesFitted,
        Bloom::NATURAL,
        Msaa::Sample4,
        PanOrbitCamera {
            allow_upside_down: true,
            focus: INITIAL_FOCUS,
            pan_smoothness: 0.0,
            radius: Some(config.camera.radius),
            touch_controls: TouchControls::OneFingerOrbit,
            trackpad_behavior: TrackpadBehavior::blender_default(),
            trackpad_pinch_to_zoom_enabled: true,
            ..default()
        },
    ));
}

/// Focus offset for the movement keys currently held.
///
/// `W`/`S` move along the view direction and `A`/`D` strafe along
/// `front × up`, each by `speed`.
pub fn movement_offset(keys: &ButtonInput<KeyCode>, front: Vec3, up: Vec3, speed: f32) -> Vec3 {
    let front = front.as_dvec3();
    let side = strafe_direction(front, up.as_dvec3());
    let speed = speed as f64;

    let mut offset = Vector::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        offset += front * speed;
    }
    if keys.pressed(KeyCode::KeyS) {
        offset -= front * speed;
    }
    if keys.pressed(KeyCode::KeyD) {
        offset += side * speed;
    }
    if keys.pressed(KeyCode::KeyA) {
        offset -= side * speed;
    }

    offset.as_vec3()
}

fn move_camera_focus(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<SimulationConfig>,
    mut camera: Single<(&mut PanOrbitCamera, &Transform)>,
) {
    let (pan_orbit, transform) = &mut *camera;
    let offset = movement_offset(
        &keys,
        transform.forward().as_vec3(),
        transform.up().as_vec3(),
        config.camera.movement_speed,
    );

    if offset != Vec3::ZERO {
        pan_orbit.target_focus += offset;
        pan_orbit.force_update = true;
    }
}

/// Focus after following a locked body to `location`.
///
/// While the same body stays locked the focus moves by the body's change in
/// location, so any offset from the movement keys is kept. A newly locked body
/// snaps the focus onto it.
pub fn locked_focus(
    focus: Vec3,
    previous: Option<(BodyHandle, Vec3)>,
    handle: BodyHandle,
    location: Vec3,
) -> Vec3 {
    match previous {
        Some((followed, last_location)) if followed == handle => {
            focus + (location - last_location)
        }
        _ => location,
    }
}

fn follow_locked_body(
    camera_lock: Res<CameraLock>,
    simulation: Res<Simulation>,
    mut pan_orbit: Single<&mut PanOrbitCamera>,
    mut followed: Local<Option<(BodyHandle, Vec3)>>,
) {
    let Some(handle) = **camera_lock else {
        *followed = None;
        return;
    };

    match simulation.body(handle) {
        Ok(body) => {
            let location = body.location().as_vec3();
            if !location.is_finite() {
                return;
            }

            let focus = locked_focus(pan_orbit.target_focus, *followed, handle, location);
            if focus != pan_orbit.target_focus {
                pan_orbit.target_focus = focus;
                pan_orbit.force_update = true;
            }
            *followed = Some((handle, location));
        }
        Err(e) => warn!("Camera lock lost: {}", e),
    }
}
