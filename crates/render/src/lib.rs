//! Rendering Adapter: renderer-agnostic frame interface.
//!
//! # Invariants
//! - Renderers consume [`FrameData`](cubegrid_kernel::FrameData) and never
//!   mutate engine state.
//! - The vertex count drawn is the one carried by the frame.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "cubegrid-render v0.1.0"
}
