//! The per-frame cube transform.

use glam::{Mat4, Vec3};

pub const FIELD_OF_VIEW_DEGREES: f32 = 25.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 20.0;
pub const EYE: Vec3 = Vec3::new(0.0, -2.0, -10.0);
pub const TARGET: Vec3 = Vec3::ZERO;
pub const UP: Vec3 = Vec3::Y;

/// The model-view-projection state of a spinning cube.
///
/// The cube yaws with wall-clock time and is tilted around the x axis by an angle set from
/// outside. Only the tilt is kept between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CubeTransform {
    tilt: f32,
}

impl CubeTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tilt angle in radians.
    pub fn set_rotation(&mut self, angle: f32) {
        self.tilt = angle;
    }

    pub fn rotation(&self) -> f32 {
        self.tilt
    }

    pub fn view() -> Mat4 {
        Mat4::look_at_rh(EYE, TARGET, UP)
    }

    /// Perspective projection for a canvas of `width`×`height` pixels.
    pub fn projection(width: u32, height: u32) -> Mat4 {
        let aspect = width as f32 / height.max(1) as f32;
        Mat4::perspective_rh_gl(FIELD_OF_VIEW_DEGREES.to_radians(), aspect, NEAR, FAR)
    }

    /// Yaw by `time` seconds (one radian per second), then tilt.
    pub fn model(&self, time: f32) -> Mat4 {
        Mat4::from_rotation_y(time) * Mat4::from_rotation_x(self.tilt)
    }

    /// `projection × view × yaw × tilt` for a canvas of `width`×`height` pixels at `time`.
    pub fn mvp(&self, width: u32, height: u32, time: f32) -> Mat4 {
        Self::projection(width, height) * Self::view() * self.model(time)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{PI, TAU};

    use glam::Vec4;

    use super::*;

    #[test]
    fn test_mvp_matches_explicit_product() {
        let transform = CubeTransform::new();
        let expected = Mat4::perspective_rh_gl(25.0_f32.to_radians(), 1.0, 0.1, 20.0)
            * Mat4::look_at_rh(
                Vec3::new(0.0, -2.0, -10.0),
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            )
            * Mat4::from_rotation_y(0.0)
            * Mat4::from_rotation_x(0.0);
        assert_eq!(transform.mvp(400, 400, 0.0), expected);
    }

    #[test]
    fn test_model_is_identity_at_rest() {
        assert_eq!(CubeTransform::new().model(0.0), Mat4::IDENTITY);
    }

    #[test]
    fn test_set_rotation_is_idempotent() {
        for angle in [0.0, TAU, PI / 3.0, -1.25, 1.0e4] {
            let mut transform = CubeTransform::new();
            transform.set_rotation(angle);
            let first = transform.mvp(400, 400, 2.5);
            transform.set_rotation(angle);
            let second = transform.mvp(400, 400, 2.5);
            assert_eq!(first, second, "angle {angle}");
            assert_eq!(transform.rotation(), angle);
        }
    }

    #[test]
    fn test_aspect_ratio_follows_canvas_size() {
        let wide = CubeTransform::projection(800, 400);
        let square = CubeTransform::projection(400, 400);
        // Horizontal scale shrinks by the aspect ratio, vertical scale is unchanged.
        assert!((wide.x_axis.x * 2.0 - square.x_axis.x).abs() < 1e-6);
        assert_eq!(wide.y_axis.y, square.y_axis.y);
    }

    #[test]
    fn test_zero_height_does_not_produce_nan() {
        let mvp = CubeTransform::new().mvp(400, 0, 1.0);
        assert!(!mvp.is_nan());
    }

    #[test]
    fn test_cube_is_inside_the_frustum() {
        let mvp = CubeTransform::new().mvp(400, 400, 0.7);
        for corner in crate::geometry::CUBE_POSITIONS.chunks(3) {
            let clip = mvp * Vec4::new(corner[0], corner[1], corner[2], 1.0);
            let ndc = clip / clip.w;
            assert!(clip.w > 0.0);
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && ndc.z.abs() <= 1.0);
        }
    }
}
