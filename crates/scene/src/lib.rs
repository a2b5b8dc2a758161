//! Scene Geometry: textured cubes and the flat cube grid ("chunk").
//!
//! # Invariants
//! - Every cube emits exactly 36 vertices (6 faces x 2 triangles).
//! - Triangles wind counter-clockwise when seen from outside the cube.
//! - Chunk flattening order is fixed (z outer, y middle, x inner) so the draw
//!   vertex count always matches the data written.

mod chunk;
mod cube;
mod side;

pub use chunk::{Chunk, ChunkSettings, GridDims, SceneError};
pub use cube::{Cube, CubeVertex, FLOATS_PER_CUBE, FLOATS_PER_VERTEX, VERTICES_PER_CUBE};
pub use side::{FACE_TEMPLATE, Side};

pub fn crate_info() -> &'static str {
    "cubegrid-scene v0.1.0"
}
