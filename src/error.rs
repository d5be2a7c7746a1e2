//! Error types for the simulation core

use crate::components::BodyHandle;
use crate::physics::math::Scalar;
use std::collections::TryReserveError;
use std::fmt;

/// Errors surfaced by the simulation core
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Path trace storage could not grow
    Allocation(TryReserveError),
    /// Body mass must be finite and strictly positive
    InvalidMass(Scalar),
    /// Handle not issued by this registry
    UnknownBody(BodyHandle),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Allocation(err) => {
                write!(f, "Failed allocating memory for path trace: {err}")
            }
            SimulationError::InvalidMass(mass) => {
                write!(f, "Invalid body mass {mass}: mass must be finite and positive")
            }
            SimulationError::UnknownBody(handle) => write!(f, "Unknown body {handle}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Allocation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TryReserveError> for SimulationError {
    fn from(err: TryReserveError) -> Self {
        SimulationError::Allocation(err)
    }
}
