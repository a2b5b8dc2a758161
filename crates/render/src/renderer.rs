use cubegrid_kernel::FrameData;
use cubegrid_scene::VERTICES_PER_CUBE;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer receives finished frame data; whatever it caches (GPU buffers,
/// text) is its own state.
pub trait Renderer {
    type Output;

    fn render(&mut self, frame: &FrameData<'_>) -> Self::Output;
}

/// Human-readable frame summary for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Include the uniform matrix rows.
    pub show_matrix: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matrix() -> Self {
        Self { show_matrix: true }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &FrameData<'_>) -> String {
        let mut out = String::new();
        let p = frame.camera_position;
        let r = frame.camera_rotation;
        out.push_str(&format!(
            "=== Frame {} (fps={}) ===\n",
            frame.frame_index, frame.fps
        ));
        out.push_str(&format!(
            "Vertices: {} ({} cubes, revision {})\n",
            frame.vertex_count,
            frame.vertex_count / VERTICES_PER_CUBE as u32,
            frame.geometry_revision
        ));
        out.push_str(&format!(
            "Camera: pos=({:.2}, {:.2}, {:.2}) pitch={:.1} yaw={:.1}\n",
            p.x,
            p.y,
            p.z,
            r.x.to_degrees(),
            r.y.to_degrees()
        ));
        if self.show_matrix {
            out.push_str("Uniform:\n");
            for row in frame.uniform.rows() {
                out.push_str(&format!(
                    "  [{:>12.6} {:>12.6} {:>12.6} {:>12.6}]\n",
                    row[0], row[1], row[2], row[3]
                ));
            }
        }
        out
    }
}
