//! Engine Kernel: frame loop state for the cube grid viewer.
//!
//! # Invariants
//! - One synchronous tick per frame; the engine is the single owner of all
//!   scene state.
//! - The vertex count handed to renderers always matches the vertex data.
//! - Configuration is validated before anything is built from it.

mod config;
mod engine;
mod params;
mod timing;

pub use config::{CameraStart, ConfigError, EngineConfig, ProjectionSettings};
pub use engine::{Engine, FrameData};
pub use params::{SceneParams, UniformMode};
pub use timing::{FpsCounter, FrameTimer};

pub fn crate_info() -> &'static str {
    "cubegrid-kernel v0.1.0"
}
