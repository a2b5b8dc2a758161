use cubegrid_math::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cube::{Cube, FLOATS_PER_CUBE, VERTICES_PER_CUBE};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("chunk dimensions must be non-zero, got {0}")]
    ZeroDimension(GridDims),
    #[error("chunk of {dims} exceeds the limit of {max} cells")]
    TooLarge { dims: GridDims, max: usize },
    #[error("cube spacing must be positive and finite, got {0}")]
    InvalidSpacing(f64),
    #[error("cell ({x}, {y}, {z}) is outside chunk of {dims}")]
    OutOfRange {
        x: usize,
        y: usize,
        z: usize,
        dims: GridDims,
    },
}

/// Cell counts along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl GridDims {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Upper bound on cells per chunk.
    pub const MAX_CELLS: usize = 1 << 18;

    /// `None` when the product overflows.
    pub fn cell_count(&self) -> Option<usize> {
        self.x.checked_mul(self.y)?.checked_mul(self.z)
    }

    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.x && y < self.y && z < self.z
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::new(16, 1, 16)
    }
}

impl std::fmt::Display for GridDims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// How a chunk is laid out and scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkSettings {
    pub origin: Vector3,
    pub dims: GridDims,
    /// Distance between neighbouring cube centers. Cubes are two units wide.
    pub spacing: f64,
    /// Offset every cell by half the grid so `origin` sits in the middle.
    pub centered: bool,
    pub size: Vector3,
}

impl Default for ChunkSettings {
    fn default() -> Self {
        Self {
            origin: Vector3::ZERO,
            dims: GridDims::default(),
            spacing: 2.0,
            centered: false,
            size: Vector3::splat(100.0),
        }
    }
}

impl ChunkSettings {
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.dims.x == 0 || self.dims.y == 0 || self.dims.z == 0 {
            return Err(SceneError::ZeroDimension(self.dims));
        }
        match self.dims.cell_count() {
            Some(n) if n <= GridDims::MAX_CELLS => {}
            _ => {
                return Err(SceneError::TooLarge {
                    dims: self.dims,
                    max: GridDims::MAX_CELLS,
                });
            }
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(SceneError::InvalidSpacing(self.spacing));
        }
        Ok(())
    }
}

/// A fixed grid of optional cubes.
///
/// Cells are stored x fastest, then y, then z, which is also the draw order.
/// Scale, position and rotations are applied by the uniform matrix and never
/// baked into cube coordinates.
#[derive(Debug, Clone)]
pub struct Chunk {
    settings: ChunkSettings,
    cells: Vec<Option<Cube>>,
    pub size: Vector3,
    pub position: Vector3,
    pub rotations: Vector3,
}

impl Default for Chunk {
    fn default() -> Self {
        Self::build(ChunkSettings::default())
    }
}

impl Chunk {
    /// Fill every cell of a `dims` grid with a cube.
    pub fn generate(
        origin: Vector3,
        dims: GridDims,
        spacing: f64,
        centered: bool,
    ) -> Result<Self, SceneError> {
        Self::from_settings(ChunkSettings {
            origin,
            dims,
            spacing,
            centered,
            ..ChunkSettings::default()
        })
    }

    pub fn from_settings(settings: ChunkSettings) -> Result<Self, SceneError> {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    fn build(settings: ChunkSettings) -> Self {
        let _span = tracing::info_span!("chunk_generate", dims = %settings.dims).entered();
        let mut chunk = Self {
            size: settings.size,
            position: Vector3::ZERO,
            rotations: Vector3::ZERO,
            cells: Vec::with_capacity(settings.dims.cell_count().unwrap_or_default()),
            settings,
        };
        let dims = chunk.settings.dims;
        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    let cube = Cube::new(chunk.cell_position(x, y, z));
                    chunk.cells.push(Some(cube));
                }
            }
        }
        tracing::debug!(cubes = chunk.cells.len(), "chunk generated");
        chunk
    }

    pub fn settings(&self) -> &ChunkSettings {
        &self.settings
    }

    pub fn dims(&self) -> GridDims {
        self.settings.dims
    }

    /// World-space center of cell `(x, y, z)`, whether or not it holds a cube.
    pub fn cell_position(&self, x: usize, y: usize, z: usize) -> Vector3 {
        let s = &self.settings;
        let mut cell = Vector3::new(x as f64, y as f64, z as f64);
        if s.centered {
            let half = Vector3::new(s.dims.x as f64, s.dims.y as f64, s.dims.z as f64) * 0.5;
            cell = cell - half;
        }
        s.origin + cell * s.spacing
    }

    fn index(&self, x: usize, y: usize, z: usize) -> Result<usize, SceneError> {
        let dims = self.settings.dims;
        if !dims.contains(x, y, z) {
            return Err(SceneError::OutOfRange { x, y, z, dims });
        }
        Ok(x + dims.x * (y + dims.y * z))
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Result<Option<&Cube>, SceneError> {
        let i = self.index(x, y, z)?;
        Ok(self.cells[i].as_ref())
    }

    /// Empty a cell. Returns the cube that was there.
    pub fn clear(&mut self, x: usize, y: usize, z: usize) -> Result<Option<Cube>, SceneError> {
        let i = self.index(x, y, z)?;
        Ok(self.cells[i].take())
    }

    pub fn set(
        &mut self,
        x: usize,
        y: usize,
        z: usize,
        cube: Option<Cube>,
    ) -> Result<Option<Cube>, SceneError> {
        let i = self.index(x, y, z)?;
        Ok(std::mem::replace(&mut self.cells[i], cube))
    }

    /// Present cubes in draw order: z outer, y middle, x inner.
    pub fn visible_cubes(&self) -> impl Iterator<Item = &Cube> {
        self.cells.iter().flatten()
    }

    pub fn cube_count(&self) -> usize {
        self.visible_cubes().count()
    }

    pub fn vertex_count(&self) -> usize {
        VERTICES_PER_CUBE * self.cube_count()
    }

    pub fn vertex_buffer(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(FLOATS_PER_CUBE * self.cube_count());
        for cube in self.visible_cubes() {
            cube.write_vertexes(&mut out);
        }
        out
    }
}
