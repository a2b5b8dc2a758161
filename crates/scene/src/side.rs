use cubegrid_math::Vector3;
use serde::{Deserialize, Serialize};

/// One textured quad: two triangles covering `[-1, 1]²` at `z = 1`.
///
/// Shared by every side; each side maps it into place with
/// [`Side::orient`] and never writes to it.
pub const FACE_TEMPLATE: [Vector3; 6] = [
    Vector3::new(-1.0, -1.0, 1.0),
    Vector3::new(-1.0, 1.0, 1.0),
    Vector3::new(1.0, 1.0, 1.0),
    Vector3::new(1.0, 1.0, 1.0),
    Vector3::new(1.0, -1.0, 1.0),
    Vector3::new(-1.0, -1.0, 1.0),
];

const ATLAS_COLUMNS: f64 = 4.0;
const ATLAS_ROWS: f64 = 3.0;

/// The six faces of a cube, in vertex-buffer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Face,
    Bottom,
    Right,
    Left,
    Top,
    Back,
}

impl Side {
    pub const ALL: [Side; 6] = [
        Side::Face,
        Side::Bottom,
        Side::Right,
        Side::Left,
        Side::Top,
        Side::Back,
    ];

    /// Axis permutation carrying the `z = 1` template onto this side.
    pub const fn orient(self, v: Vector3) -> Vector3 {
        match self {
            Side::Face => Vector3::new(-v.x, v.y, v.z),
            Side::Bottom => Vector3::new(v.x, -v.z, -v.y),
            Side::Right => Vector3::new(v.z, v.y, v.x),
            Side::Left => Vector3::new(-v.z, v.y, -v.x),
            Side::Top => Vector3::new(v.x, v.z, v.y),
            Side::Back => Vector3::new(v.x, v.y, -v.z),
        }
    }

    /// Outward unit normal of this side.
    pub const fn normal(self) -> Vector3 {
        match self {
            Side::Face => Vector3::new(0.0, 0.0, 1.0),
            Side::Bottom => Vector3::new(0.0, -1.0, 0.0),
            Side::Right => Vector3::new(1.0, 0.0, 0.0),
            Side::Left => Vector3::new(-1.0, 0.0, 0.0),
            Side::Top => Vector3::new(0.0, 1.0, 0.0),
            Side::Back => Vector3::new(0.0, 0.0, -1.0),
        }
    }

    /// `(column, row)` of this side in the 4x3 cube-map unfold.
    ///
    /// ```text
    ///         [top]
    /// [left] [face] [right] [back]
    ///        [bottom]
    /// ```
    pub const fn atlas_cell(self) -> (u32, u32) {
        match self {
            Side::Face => (1, 1),
            Side::Bottom => (1, 2),
            Side::Right => (2, 1),
            Side::Left => (0, 1),
            Side::Top => (1, 0),
            Side::Back => (3, 1),
        }
    }

    /// Texture coordinates for the six template vertices.
    pub fn uvs(self) -> [[f64; 2]; 6] {
        let (col, row) = self.atlas_cell();
        FACE_TEMPLATE.map(|p| {
            [
                (f64::from(col) + (p.x + 1.0) / 2.0) / ATLAS_COLUMNS,
                (f64::from(row) + (1.0 - p.y) / 2.0) / ATLAS_ROWS,
            ]
        })
    }
}
