//! Simulation step driver
//!
//! [`Simulation`] owns the registry and all simulation-wide state. The render
//! loop calls [`Simulation::step`] once per tick and reads
//! [`Simulation::snapshots`] afterwards.
//!
//! A step updates bodies in place, in registry order: a body's force is
//! computed against the positions of bodies earlier in the order *after*
//! they moved this tick, and of later bodies *before* they move.

use crate::components::{Body, BodyHandle, BodySnapshot, MeshHandle};
use crate::config::{ForceAccumulation, SimulationConfig};
use crate::error::SimulationError;
use crate::physics::forces::{ForceParameters, compute_pairwise_force};
use crate::physics::math::{
    Homogeneous, Scalar, Vector, normalize_by_mass, to_homogeneous_direction,
};
use crate::physics::registry::BodyRegistry;
use crate::resources::SharedRng;
use bevy::prelude::*;

/// Request to add a body, as delivered by the control surface
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub mass: Scalar,
    pub mesh: MeshHandle,
    pub position: Vector,
    pub initial_force: Vector,
    pub scale: Scalar,
}

#[derive(Resource, Debug, Clone)]
pub struct Simulation {
    registry: BodyRegistry,
    params: ForceParameters,
    accumulation: ForceAccumulation,
    trail_capacity: usize,
    tracing: bool,
    tick: u64,
    rng: SharedRng,
}

impl Simulation {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            registry: BodyRegistry::new(),
            params: ForceParameters {
                gravitational_constant: config.physics.gravitational_constant,
                force_scale: config.physics.force_scale,
            },
            accumulation: config.physics.force_accumulation,
            trail_capacity: config.trails.capacity,
            tracing: config.trails.enabled_at_start,
            tick: 0,
            rng: SharedRng::from_optional_seed(config.physics.initial_seed),
        }
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn tracing(&self) -> bool {
        self.tracing
    }

    pub fn rng_mut(&mut self) -> &mut SharedRng {
        &mut self.rng
    }

    /// Creates a body with a random color and the configured trail capacity.
    pub fn spawn(&mut self, request: SpawnRequest) -> Result<BodyHandle, SimulationError> {
        let capacity = self.trail_capacity;
        let configure = |body: Body| {
            body.with_position(request.position)
                .with_initial_force(request.initial_force)
                .with_scale(request.scale)
                .with_trail_capacity(capacity)
        };
        let handle = self
            .registry
            .create_with(request.mass, request.mesh, &mut *self.rng, configure)?;

        debug!(
            "Spawned body {} with mass {} at {}",
            handle, request.mass, request.position
        );
        Ok(handle)
    }

    /// Switches path tracing on or off.
    ///
    /// Any change of state clears every body's path trace, so a trace never
    /// spans a period where recording was paused.
    pub fn set_tracing(&mut self, enabled: bool) {
        if self.tracing == enabled {
            return;
        }

        self.tracing = enabled;
        for body in self.registry.iter_mut() {
            body.trail.clear();
        }
        info!("Path tracing {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn toggle_tracing(&mut self) {
        self.set_tracing(!self.tracing);
    }

    /// Advances the simulation by one tick.
    ///
    /// An allocation failure while recording a path aborts the step; bodies
    /// earlier in the order have already moved when that happens.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        let params = self.params;
        let bodies = self.registry.bodies_mut();

        for index in 0..bodies.len() {
            let accumulated = accumulate_forces_on(bodies, index, &params);

            let body = &mut bodies[index];
            body.accumulated_force = accumulated;
            body.position += body.accumulated_force;

            if self.tracing {
                body.record_path()?;
            }

            if self.accumulation == ForceAccumulation::ResetEachTick {
                body.accumulated_force = Homogeneous::ZERO;
            }
        }

        self.tick += 1;
        Ok(())
    }

    /// Post-step view of every body, in registry order
    pub fn snapshots(&self) -> impl Iterator<Item = BodySnapshot> + '_ {
        self.registry.iter().map(|(handle, body)| BodySnapshot {
            handle,
            position: body.position,
            color: body.color,
            scale: body.scale,
            mesh: body.mesh,
            path: body.trail.iter().collect(),
        })
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&Body, SimulationError> {
        self.registry.get(handle)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

/// Accumulated force of `bodies[index]` after adding the mass-normalized force
/// from every other body, one pair at a time, in registry order.
fn accumulate_forces_on(bodies: &[Body], index: usize, params: &ForceParameters) -> Homogeneous {
    let source = &bodies[index];
    debug_assert!(
        source.mass > 0.0,
        "body {index} has non-positive mass {}",
        source.mass
    );

    bodies
        .iter()
        .enumerate()
        .filter(|&(other, _)| other != index)
        .map(|(_, target)| {
            let force = compute_pairwise_force(source, target, params);
            normalize_by_mass(to_homogeneous_direction(force), source.mass)
        })
        .fold(source.accumulated_force, |acc, force| force + acc)
}
