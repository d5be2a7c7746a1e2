//! Per-body state: the body model and its path trace

pub mod body;
pub mod trail;

pub use body::{Body, BodyHandle, BodySnapshot, MeshHandle};
pub use trail::PathTrace;
