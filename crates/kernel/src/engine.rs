use std::time::Duration;

use cubegrid_camera::Camera;
use cubegrid_input::Controls;
use cubegrid_math::transform::{object_matrix, perspective};
use cubegrid_math::{Matrix4, Vector3};
use cubegrid_scene::{Chunk, FLOATS_PER_VERTEX};

use crate::config::{ConfigError, EngineConfig, ProjectionSettings};
use crate::timing::{FpsCounter, FrameTimer};
use crate::{SceneParams, UniformMode};

/// Smallest far/near gap, relative to `z_near`.
const MIN_DEPTH_SPAN: f64 = 1e-3;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FrameData<'a> {
    /// Row-major, applied to row vectors.
    pub uniform: Matrix4,
    /// Interleaved `x, y, z, u, v` per vertex.
    pub vertices: &'a [f32],
    pub vertex_count: u32,
    /// Bumped whenever `vertices` changes; renderers re-upload on change.
    pub geometry_revision: u64,
    pub frame_index: u64,
    pub fps: u32,
    pub camera_position: Vector3,
    pub camera_rotation: Vector3,
    /// Clear color, components in `[0, 1]`.
    pub background: Vector3,
}

impl FrameData<'_> {
    pub fn uniform_f32(&self) -> [f32; 16] {
        self.uniform.to_f32_array()
    }
}

/// Owns the scene and its inputs; turns each tick into [`FrameData`].
///
/// The engine is single-threaded and frame-driven: one [`Engine::tick`] per
/// redraw updates the camera, applies slider values and recomputes the
/// uniform matrix. Vertex data is rebuilt only after the chunk changes.
pub struct Engine {
    chunk: Chunk,
    camera: Camera,
    controls: Controls,
    params: SceneParams,
    projection: ProjectionSettings,
    background: Vector3,
    viewport: [u32; 2],
    vertices: Vec<f32>,
    geometry_revision: u64,
    geometry_dirty: bool,
    timer: FrameTimer,
    fps: FpsCounter,
    frame_index: u64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let background = config.background_color()?;
        let chunk = Chunk::from_settings(config.chunk)?;
        let camera = Camera::with_tuning(config.scene.fov(), config.camera_position.0, config.camera);
        tracing::info!(
            cubes = chunk.cube_count(),
            dims = %chunk.dims(),
            "engine created"
        );
        Ok(Self {
            chunk,
            camera,
            controls: Controls::new(config.keys),
            params: config.scene,
            viewport: config.projection.viewport,
            projection: config.projection,
            background,
            vertices: Vec::new(),
            geometry_revision: 0,
            geometry_dirty: true,
            timer: FrameTimer::new(120),
            fps: FpsCounter::new(),
            frame_index: 0,
        })
    }

    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    /// Mutable chunk access. Vertex data is rebuilt on the next tick.
    pub fn chunk_mut(&mut self) -> &mut Chunk {
        self.geometry_dirty = true;
        &mut self.chunk
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut SceneParams {
        &mut self.params
    }

    pub fn frame_timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Zero-sized viewports (minimized windows) keep the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.viewport = [width, height];
        }
    }

    pub fn aspect(&self) -> f64 {
        f64::from(self.viewport[0]) / f64::from(self.viewport[1])
    }

    /// Advance one frame of `dt` and produce its draw data.
    pub fn tick(&mut self, dt: Duration) -> FrameData<'_> {
        let _span = tracing::trace_span!("engine_tick", frame = self.frame_index).entered();
        self.timer.record(dt);
        self.fps.record(dt);

        let (dx, dy) = self.controls.take_mouse_delta();
        if dx != 0.0 || dy != 0.0 {
            self.camera.look(dx, dy, &self.controls);
        }
        self.camera.advance(dt.as_secs_f64() * 1000.0, &self.controls);
        self.apply_params();
        self.frame_index += 1;
        self.frame()
    }

    /// Draw data for the current state without advancing time.
    pub fn frame(&mut self) -> FrameData<'_> {
        if self.geometry_dirty {
            self.rebuild_geometry();
        }
        let uniform = self.uniform_matrix();
        FrameData {
            uniform,
            vertices: &self.vertices,
            vertex_count: (self.vertices.len() / FLOATS_PER_VERTEX) as u32,
            geometry_revision: self.geometry_revision,
            frame_index: self.frame_index,
            fps: self.fps.fps(),
            camera_position: self.camera.position,
            camera_rotation: self.camera.rotation,
            background: self.background,
        }
    }

    fn apply_params(&mut self) {
        self.camera.fov = self.params.fov();
        self.chunk.size = self.params.size_vector();
        self.chunk.position = self.params.position;
        self.chunk.rotations = self.params.rotations();
    }

    fn rebuild_geometry(&mut self) {
        self.vertices.clear();
        self.vertices
            .extend(self.chunk.vertex_buffer().into_iter().map(|v| v as f32));
        self.geometry_revision += 1;
        self.geometry_dirty = false;
        tracing::debug!(
            vertices = self.vertices.len() / FLOATS_PER_VERTEX,
            revision = self.geometry_revision,
            "chunk geometry rebuilt"
        );
    }

    /// The far plane is kept past the near plane whatever the slider says.
    pub fn uniform_matrix(&self) -> Matrix4 {
        let near = self.projection.z_near;
        let far = self.params.distance.max(near * (1.0 + MIN_DEPTH_SPAN));
        match self.params.mode {
            UniformMode::Camera => self
                .camera
                .uniform_matrix(self.aspect(), near, far, self.chunk.size),
            UniformMode::Object => object_matrix(
                &perspective(self.camera.fov, self.aspect(), near, far),
                self.chunk.position,
                self.chunk.rotations,
                self.chunk.size,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubegrid_scene::GridDims;

    const FRAME: Duration = Duration::from_millis(16);

    fn engine() -> Engine {
        Engine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn first_frame_carries_whole_chunk() {
        let mut e = engine();
        let frame = e.tick(FRAME);
        assert_eq!(frame.vertex_count, 256 * 36);
        assert_eq!(frame.vertices.len(), 256 * 180);
        assert_eq!(frame.geometry_revision, 1);
        assert!(frame.uniform.is_finite());
    }

    #[test]
    fn disengaged_tick_leaves_camera_alone() {
        let mut e = engine();
        e.controls_mut().key_down("KeyW");
        let start = e.camera().position;
        for _ in 0..30 {
            e.tick(FRAME);
        }
        assert_eq!(e.camera().position, start);
    }

    #[test]
    fn engaged_forward_moves_camera() {
        let mut e = engine();
        e.controls_mut().set_engaged(true);
        e.controls_mut().key_down("KeyW");
        let start = e.camera().position;
        for _ in 0..30 {
            e.tick(FRAME);
        }
        assert!(e.camera().position.z < start.z);
        assert_eq!(e.camera().position.x, start.x);
    }

    #[test]
    fn mouse_motion_turns_camera() {
        let mut e = engine();
        e.controls_mut().set_engaged(true);
        e.controls_mut().mouse_motion(90.0, 0.0);
        let frame = e.tick(FRAME);
        assert!((frame.camera_rotation.y - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        // delta is drained
        let frame = e.tick(FRAME);
        assert!((frame.camera_rotation.y - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn geometry_rebuilds_only_on_change() {
        let mut e = engine();
        assert_eq!(e.tick(FRAME).geometry_revision, 1);
        assert_eq!(e.tick(FRAME).geometry_revision, 1);
        e.chunk_mut().clear(0, 0, 0).unwrap();
        let frame = e.tick(FRAME);
        assert_eq!(frame.geometry_revision, 2);
        assert_eq!(frame.vertex_count, 255 * 36);
    }

    #[test]
    fn camera_mode_uniform() {
        let mut e = engine();
        e.tick(FRAME);
        let expected = e.camera().uniform_matrix(800.0 / 600.0, 1.0, 1000.0, Vector3::splat(100.0));
        assert!(e.uniform_matrix().approx_eq(&expected, 1e-12));
    }

    #[test]
    fn object_mode_uses_slider_pose() {
        let mut e = engine();
        e.params_mut().mode = UniformMode::Object;
        e.params_mut().size = 50.0;
        e.set_viewport(1000, 500);
        e.tick(FRAME);
        let expected = object_matrix(
            &perspective(std::f64::consts::FRAC_PI_2, 2.0, 1.0, 1000.0),
            Vector3::new(0.0, 0.0, -400.0),
            e.params().rotations(),
            Vector3::splat(50.0),
        );
        assert!(e.uniform_matrix().approx_eq(&expected, 1e-12));
    }

    #[test]
    fn fov_slider_drives_camera() {
        let mut e = engine();
        e.params_mut().set_fov_degrees(60.0);
        e.tick(FRAME);
        assert!((e.camera().fov - std::f64::consts::FRAC_PI_3).abs() < 1e-12);
    }

    #[test]
    fn zero_viewport_keeps_aspect() {
        let mut e = engine();
        e.set_viewport(0, 0);
        assert!((e.aspect() - 800.0 / 600.0).abs() < 1e-12);
    }

    #[test]
    fn fps_after_one_second() {
        let mut e = engine();
        for _ in 0..50 {
            e.tick(Duration::from_millis(20));
        }
        assert_eq!(e.fps(), 49);
        assert_eq!(e.frame_timer().average(), Duration::from_millis(20));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = EngineConfig::default();
        config.chunk.dims = GridDims::new(0, 1, 1);
        assert!(Engine::new(config).is_err());
    }

    #[test]
    fn background_reaches_frame() {
        let config = EngineConfig {
            background: "#ff0000".to_string(),
            ..EngineConfig::default()
        };
        let mut e = Engine::new(config).unwrap();
        assert_eq!(e.frame().background, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn nearest_far_plane_keeps_matrix_finite() {
        for mode in [UniformMode::Camera, UniformMode::Object] {
            let mut e = engine();
            e.params_mut().mode = mode;
            e.params_mut().distance = *SceneParams::DISTANCE.start();
            let frame = e.tick(FRAME);
            assert!(frame.uniform.is_finite(), "{mode:?}");
        }
    }
}
