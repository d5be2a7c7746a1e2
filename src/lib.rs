//! Gravity library
//!
//! This provides the core functionality of gravity as a library
//! to enable integration testing.

pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod mesh;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod resources;

// Test utilities are public for integration tests
pub mod test_utils;
