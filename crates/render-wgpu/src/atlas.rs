use cubegrid_scene::Side;

/// Pixel size of one atlas cell.
pub const ATLAS_CELL: u32 = 16;
pub const ATLAS_WIDTH: u32 = ATLAS_CELL * 4;
pub const ATLAS_HEIGHT: u32 = ATLAS_CELL * 3;

const GRASS: [u8; 3] = [96, 160, 56];
const DIRT: [u8; 3] = [134, 96, 67];
/// Rows of grass overhanging the top of each side cell.
const GRASS_LIP: u32 = 3;

/// RGBA8 image, rows top to bottom.
#[derive(Debug, Clone)]
pub struct AtlasImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl AtlasImage {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Deterministic per-pixel brightness jitter in `[-12, 12]`.
fn jitter(x: u32, y: u32) -> i16 {
    let mut h = x.wrapping_mul(0x9e37_79b9) ^ y.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 15;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 13;
    (h % 25) as i16 - 12
}

fn shade(base: [u8; 3], x: u32, y: u32) -> [u8; 4] {
    let j = jitter(x, y);
    let c = base.map(|v| (v as i16 + j).clamp(0, 255) as u8);
    [c[0], c[1], c[2], 255]
}

fn side_texel(side: Side, local_y: u32) -> [u8; 3] {
    match side {
        Side::Top => GRASS,
        Side::Bottom => DIRT,
        _ if local_y < GRASS_LIP => GRASS,
        _ => DIRT,
    }
}

/// Grass-block cube map: grass on top, dirt below, dirt with a grass lip on
/// the four walls. Cells no side samples stay transparent.
pub fn generate_atlas() -> AtlasImage {
    let mut pixels = vec![0u8; (ATLAS_WIDTH * ATLAS_HEIGHT * 4) as usize];
    for side in Side::ALL {
        let (col, row) = side.atlas_cell();
        for local_y in 0..ATLAS_CELL {
            for local_x in 0..ATLAS_CELL {
                let x = col * ATLAS_CELL + local_x;
                let y = row * ATLAS_CELL + local_y;
                let rgba = shade(side_texel(side, local_y), x, y);
                let i = ((y * ATLAS_WIDTH + x) * 4) as usize;
                pixels[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }
    tracing::debug!(width = ATLAS_WIDTH, height = ATLAS_HEIGHT, "atlas generated");
    AtlasImage {
        width: ATLAS_WIDTH,
        height: ATLAS_HEIGHT,
        pixels,
    }
}
