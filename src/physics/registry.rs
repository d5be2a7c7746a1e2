//! Append-only collection of live bodies

use crate::components::body::factory::random_color;
use crate::components::{Body, BodyHandle, MeshHandle};
use crate::error::SimulationError;
use crate::physics::math::Scalar;
use rand::Rng;

/// Owns every body in the simulation, in insertion order.
///
/// Bodies are never removed, so a [`BodyHandle`] issued by this registry stays
/// valid for its whole lifetime.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a body with `mass` and `mesh`, a random color, and default
    /// position, scale, and trail capacity.
    pub fn create<R: Rng + ?Sized>(
        &mut self,
        mass: Scalar,
        mesh: MeshHandle,
        rng: &mut R,
    ) -> Result<BodyHandle, SimulationError> {
        self.create_with(mass, mesh, rng, |body| body)
    }

    /// Like [`create`](Self::create), but passes the new body through
    /// `configure` before it is inserted.
    pub fn create_with<R, F>(
        &mut self,
        mass: Scalar,
        mesh: MeshHandle,
        rng: &mut R,
        configure: F,
    ) -> Result<BodyHandle, SimulationError>
    where
        R: Rng + ?Sized,
        F: FnOnce(Body) -> Body,
    {
        let body = Body::new(mass, mesh, random_color(rng))?;
        Ok(self.insert(configure(body)))
    }

    /// Appends an already-built body.
    pub fn insert(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len());
        self.bodies.push(body);
        handle
    }

    /// Handles of every body, oldest first
    pub fn all(&self) -> impl ExactSizeIterator<Item = BodyHandle> + use<> {
        (0..self.bodies.len()).map(BodyHandle)
    }

    pub fn get(&self, handle: BodyHandle) -> Result<&Body, SimulationError> {
        self.bodies
            .get(handle.index())
            .ok_or(SimulationError::UnknownBody(handle))
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Result<&mut Body, SimulationError> {
        self.bodies
            .get_mut(handle.index())
            .ok_or(SimulationError::UnknownBody(handle))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (BodyHandle(index), body))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }
}
