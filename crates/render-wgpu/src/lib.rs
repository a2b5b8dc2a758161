//! wgpu render backend for the cube grid.
//!
//! Draws the engine's interleaved position + uv vertex data with a single
//! uniform matrix and a 4x3 cube-map atlas.
//!
//! # Invariants
//! - Renderer never mutates engine state.
//! - Vertex data is re-uploaded only when the frame's geometry revision changes.
//! - The uniform matrix is uploaded as-is: row-major data read column-major by
//!   WGSL is the transpose, so `matrix * position` applies `position · M`.

mod atlas;
mod gpu;
mod shaders;

pub use atlas::{ATLAS_CELL, ATLAS_HEIGHT, ATLAS_WIDTH, AtlasImage, generate_atlas};
pub use gpu::CubeRenderer;
