use crate::components::trail::{DEFAULT_TRAIL_CAPACITY, PathTrace};
use crate::error::SimulationError;
use crate::physics::math::{Homogeneous, Scalar, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable reference to a body in a [`BodyRegistry`](crate::physics::registry::BodyRegistry).
///
/// Handles index the registry's insertion order and stay valid for the life of
/// the registry, since bodies are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub usize);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque reference to externally loaded geometry.
///
/// The core never interprets the geometry; it only keeps the counts the mesh
/// provider reported, for bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MeshHandle {
    pub id: u32,
    pub vertex_count: usize,
    pub index_count: usize,
    pub normal_count: usize,
}

/// One simulated body
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub mass: Scalar,
    pub position: Homogeneous,
    pub accumulated_force: Homogeneous,
    pub color: Vector,
    pub scale: Scalar,
    pub trail: PathTrace,
    pub mesh: MeshHandle,
}

impl Body {
    /// Creates a body at the default position `(1, 1, 1, 1)` with no force,
    /// unit scale, and a trail of the default capacity.
    pub fn new(mass: Scalar, mesh: MeshHandle, color: Vector) -> Result<Self, SimulationError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimulationError::InvalidMass(mass));
        }

        Ok(Self {
            mass,
            position: Homogeneous::ONE,
            accumulated_force: Homogeneous::ZERO,
            color,
            scale: 1.0,
            trail: PathTrace::new(DEFAULT_TRAIL_CAPACITY),
            mesh,
        })
    }

    pub fn with_position(mut self, position: Vector) -> Self {
        self.position = position.extend(self.position.w);
        self
    }

    pub fn with_initial_force(mut self, force: Vector) -> Self {
        self.accumulated_force = force.extend(0.0);
        self
    }

    pub fn with_scale(mut self, scale: Scalar) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_trail_capacity(mut self, capacity: usize) -> Self {
        self.trail = PathTrace::new(capacity);
        self
    }

    /// Spatial part of the position
    pub fn location(&self) -> Vector {
        self.position.truncate()
    }

    /// Displacement applied to the position on the most recent tick
    pub fn displacement(&self) -> Vector {
        self.accumulated_force.truncate()
    }

    /// Records the current location in the path trace.
    pub fn record_path(&mut self) -> Result<(), SimulationError> {
        let location = self.location();
        self.trail.record(location)
    }
}

/// Read-only view of a body handed to the renderer after each step
#[derive(Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    pub handle: BodyHandle,
    pub position: Homogeneous,
    pub color: Vector,
    pub scale: Scalar,
    pub mesh: MeshHandle,
    pub path: Vec<Vector>,
}

/// Factory functions for body attributes.
pub mod factory {
    use super::*;
    use crate::physics::math::random_signed_unit;
    use rand::Rng;

    /// Draws a body color with every channel in [0.5, 1.0).
    ///
    /// Each channel is `0.5 + |x| / 2` for a signed draw `x` in (-1, 1).
    pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Vector {
        let mut channel = || 0.5 + random_signed_unit(&mut *rng).abs() / 2.0;
        let r = channel();
        let g = channel();
        let b = channel();
        Vector::new(r, g, b)
    }
}
