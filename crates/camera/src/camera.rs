use std::f64::consts::FRAC_PI_2;

use cubegrid_input::MovementSource;
use cubegrid_math::transform::{perspective, rotation_x, rotation_y, scaling, translation};
use cubegrid_math::{Matrix4, Vector3, clamp, degrees_to_radians, wrap_angle};

use crate::motion::{CameraTuning, integrate_velocity, position_delta};

/// Free-flight camera with acceleration-based movement and mouse look.
///
/// `rotation.x` is pitch and `rotation.y` is yaw, both in radians and left
/// unbounded; pitch is clamped and yaw wrapped only when building matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vector3,
    pub rotation: Vector3,
    /// Vertical field of view, in radians.
    pub fov: f64,
    velocity: Vector3,
    pub tuning: CameraTuning,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(degrees_to_radians(90.0), Vector3::new(0.0, 200.0, 2000.0))
    }
}

impl Camera {
    pub fn new(fov: f64, position: Vector3) -> Self {
        Self::with_tuning(fov, position, CameraTuning::default())
    }

    pub fn with_tuning(fov: f64, position: Vector3, tuning: CameraTuning) -> Self {
        Self {
            position,
            rotation: Vector3::ZERO,
            fov,
            velocity: Vector3::ZERO,
            tuning,
        }
    }

    pub fn velocity(&self) -> Vector3 {
        self.velocity
    }

    pub fn yaw(&self) -> f64 {
        self.rotation.y
    }

    pub fn pitch(&self) -> f64 {
        self.rotation.x
    }

    /// Integrate one frame of movement. Does nothing unless `input` is engaged;
    /// velocity is kept as-is until input resumes.
    pub fn advance(&mut self, dt_ms: f64, input: &impl MovementSource) {
        if !input.is_engaged() {
            return;
        }
        let movement = input.movement();
        self.velocity = integrate_velocity(self.velocity, &movement, dt_ms, &self.tuning);
        self.position = self.position + position_delta(self.velocity, &movement, self.yaw());
        tracing::trace!(position = %self.position, velocity = %self.velocity, "camera advanced");
    }

    /// Apply mouse motion: `dx` turns yaw, `dy` turns pitch.
    pub fn look(&mut self, dx: f64, dy: f64, input: &impl MovementSource) {
        if !input.is_engaged() {
            return;
        }
        let per_unit = self.tuning.look_sensitivity.to_radians();
        self.rotation = self.rotation + Vector3::new(dy * per_unit, dx * per_unit, 0.0);
    }

    /// Camera placement in the world: rotate by pitch, then yaw, then translate.
    pub fn view_matrix(&self) -> Matrix4 {
        translation(self.position)
            .multiply(&rotation_y(wrap_angle(self.yaw())))
            .multiply(&rotation_x(clamp(self.pitch(), -FRAC_PI_2, FRAC_PI_2)))
    }

    /// World-to-camera transform, the inverse of [`Camera::view_matrix`].
    pub fn camera_matrix(&self) -> Matrix4 {
        let m = self.view_matrix().inverse();
        if !m.is_finite() {
            tracing::warn!(
                position = %self.position,
                rotation = %self.rotation,
                "camera matrix is not finite"
            );
        }
        m
    }

    pub fn projection_matrix(&self, aspect: f64, z_near: f64, z_far: f64) -> Matrix4 {
        perspective(self.fov, aspect, z_near, z_far)
    }

    /// `projection · camera · scaling(scale)`, ready for upload.
    pub fn uniform_matrix(&self, aspect: f64, z_near: f64, z_far: f64, scale: Vector3) -> Matrix4 {
        self.projection_matrix(aspect, z_near, z_far)
            .multiply(&self.camera_matrix())
            .multiply(&scaling(scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubegrid_input::{ControlKey, Movement};

    struct Held {
        engaged: bool,
        movement: Movement,
    }

    impl MovementSource for Held {
        fn is_engaged(&self) -> bool {
            self.engaged
        }

        fn movement(&self) -> Movement {
            self.movement
        }
    }

    fn held(key: ControlKey) -> Held {
        Held {
            engaged: true,
            movement: Movement::only(key),
        }
    }

    #[test]
    fn default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vector3::new(0.0, 200.0, 2000.0));
        assert!((cam.fov - FRAC_PI_2).abs() < 1e-12);
        assert!(cam.camera_matrix().is_finite());
    }

    #[test]
    fn disengaged_input_is_a_no_op() {
        let mut cam = Camera::default();
        let input = Held {
            engaged: false,
            movement: Movement::only(ControlKey::Forward),
        };
        for _ in 0..10 {
            cam.advance(16.0, &input);
            cam.look(30.0, -12.0, &input);
        }
        assert_eq!(cam.position, Vector3::new(0.0, 200.0, 2000.0));
        assert_eq!(cam.rotation, Vector3::ZERO);
        assert_eq!(cam.velocity(), Vector3::ZERO);
    }

    #[test]
    fn sustained_forward_plateaus_at_max_speed() {
        let mut cam = Camera::default();
        let input = held(ControlKey::Forward);
        let start = cam.position;
        let mut last_distance = 0.0;
        let mut last_step = 0.0;
        for _ in 0..2000 {
            let before = cam.position;
            cam.advance(100.0, &input);
            let v = cam.velocity();
            assert!(v.x.abs() <= cam.tuning.max_speed);
            assert!(v.y.abs() <= cam.tuning.max_speed);

            let distance = (cam.position.z - start.z).abs();
            assert!(distance > last_distance);
            let step = (cam.position.z - before.z).abs();
            assert!(step >= last_step);
            last_distance = distance;
            last_step = step;
        }
        assert_eq!(cam.velocity().x, -cam.tuning.max_speed);
        // forward is -z at zero yaw
        assert!(cam.position.z < start.z);
    }

    #[test]
    fn look_turns_by_degrees() {
        let mut cam = Camera::default();
        cam.look(90.0, -45.0, &held(ControlKey::Up));
        assert!((cam.yaw() - FRAC_PI_2).abs() < 1e-12);
        assert!((cam.pitch() + FRAC_PI_2 / 2.0).abs() < 1e-12);
    }

    #[test]
    fn camera_matrix_inverts_view() {
        let mut cam = Camera::default();
        cam.rotation = Vector3::new(0.4, -2.0, 0.0);
        let product = cam.view_matrix().multiply(&cam.camera_matrix());
        assert!(product.approx_eq(&Matrix4::IDENTITY, 1e-9));
    }

    #[test]
    fn pitch_is_clamped_yaw_is_wrapped() {
        let mut cam = Camera::new(1.0, Vector3::ZERO);
        cam.rotation = Vector3::new(FRAC_PI_2, 0.5, 0.0);
        let reference = cam.view_matrix();
        cam.rotation = Vector3::new(3.0, 0.5 + 2.0 * std::f64::consts::TAU, 0.0);
        assert!(cam.view_matrix().approx_eq(&reference, 1e-9));
    }

    #[test]
    fn point_ahead_projects_to_screen_center() {
        let cam = Camera::new(FRAC_PI_2, Vector3::ZERO);
        let m = cam.uniform_matrix(1.0, 1.0, 100.0, Vector3::ONE);
        let [x, y, z, w] = m.transform_point(Vector3::new(0.0, 0.0, -5.0), 1.0);
        assert!(x.abs() < 1e-12);
        assert!(y.abs() < 1e-12);
        assert!(w > 0.0);
        let depth = z / w;
        assert!(depth > 0.0 && depth < 1.0, "{depth}");
    }

    #[test]
    fn scale_is_applied_before_view() {
        let cam = Camera::new(FRAC_PI_2, Vector3::ZERO);
        let scaled = cam.uniform_matrix(1.0, 1.0, 1000.0, Vector3::splat(10.0));
        let plain = cam.uniform_matrix(1.0, 1.0, 1000.0, Vector3::ONE);
        let a = scaled.transform_point(Vector3::new(1.0, 2.0, -3.0), 1.0);
        let b = plain.transform_point(Vector3::new(10.0, 20.0, -30.0), 1.0);
        for i in 0..4 {
            assert!((a[i] - b[i]).abs() < 1e-9);
        }
    }
}
