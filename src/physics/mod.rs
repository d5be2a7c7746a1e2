//! Simulation core: force law, body registry, and the step driver

pub mod forces;
pub mod math;
pub mod registry;
pub mod simulation;
