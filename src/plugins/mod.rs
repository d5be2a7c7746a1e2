pub mod camera;
pub mod controls;
pub mod simulation;
pub mod visualization;
