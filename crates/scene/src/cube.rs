use cubegrid_math::Vector3;
use serde::{Deserialize, Serialize};

use crate::side::{FACE_TEMPLATE, Side};

pub const VERTICES_PER_CUBE: usize = 36;
/// xyz + uv.
pub const FLOATS_PER_VERTEX: usize = 5;
pub const FLOATS_PER_CUBE: usize = VERTICES_PER_CUBE * FLOATS_PER_VERTEX;

/// A single vertex of cube geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeVertex {
    pub position: Vector3,
    pub uv: [f64; 2],
}

impl CubeVertex {
    pub fn to_array(self) -> [f64; FLOATS_PER_VERTEX] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.uv[0],
            self.uv[1],
        ]
    }
}

/// An axis-aligned textured cube, two units wide, centered on `coordinates`.
///
/// Geometry is rebuilt from [`FACE_TEMPLATE`] on every call, so it always
/// reflects the current center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    coordinates: Vector3,
}

impl Cube {
    pub fn new(coordinates: Vector3) -> Self {
        Self { coordinates }
    }

    pub fn coordinates(&self) -> Vector3 {
        self.coordinates
    }

    pub fn set_coordinates(&mut self, coordinates: Vector3) {
        self.coordinates = coordinates;
    }

    /// The six vertices of one side, in world space.
    pub fn side_vertices(&self, side: Side) -> [CubeVertex; 6] {
        let uvs = side.uvs();
        let mut out = [CubeVertex {
            position: Vector3::ZERO,
            uv: [0.0; 2],
        }; 6];
        for (i, corner) in FACE_TEMPLATE.iter().enumerate() {
            out[i] = CubeVertex {
                position: side.orient(*corner) + self.coordinates,
                uv: uvs[i],
            };
        }
        out
    }

    /// All 36 vertices, sides in [`Side::ALL`] order.
    pub fn vertices(&self) -> impl Iterator<Item = CubeVertex> + '_ {
        Side::ALL
            .into_iter()
            .flat_map(move |side| self.side_vertices(side))
    }

    /// Flat `x, y, z, u, v` buffer of [`FLOATS_PER_CUBE`] values.
    pub fn to_vertexes(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(FLOATS_PER_CUBE);
        self.write_vertexes(&mut out);
        out
    }

    /// Append this cube's flat vertex data to `out`.
    pub fn write_vertexes(&self, out: &mut Vec<f64>) {
        for v in self.vertices() {
            out.extend_from_slice(&v.to_array());
        }
    }
}
