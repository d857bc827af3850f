use bevy_math::Mat4;
use bevy_math::Vec3;

/// Eye position of the default camera.
pub const DEFAULT_EYE: Vec3 = Vec3::new(0.0, 0.0, -5.0);

/// View / projection pair combined once per frame.
///
/// Matrices use column vectors: `projection * view` applies the view first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub view: Mat4,
    pub projection: Mat4,
}

impl Default for Camera {
    /// Left-handed look-at from [`DEFAULT_EYE`] toward the origin, `+Y` up,
    /// with an identity projection.
    fn default() -> Self {
        Self::new(Mat4::look_at_lh(DEFAULT_EYE, Vec3::ZERO, Vec3::Y), Mat4::IDENTITY)
    }
}

impl Camera {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self { view, projection }
    }

    /// Replaces the projection with a left-handed perspective one.
    pub fn with_perspective(mut self, aspect_ratio: f32) -> Self {
        self.projection = Mat4::perspective_lh(std::f32::consts::FRAC_PI_4, aspect_ratio, 0.1, 100.0);
        self
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    pub fn frame_transform(&self, seconds: f32) -> FrameTransform {
        FrameTransform {
            world_view: self.view_projection() * spin(seconds),
        }
    }
}

/// Rotation applied to the scene `seconds` into the run.
///
/// X first, then Y at twice the rate, then Z at 0.7 times the rate.
pub fn spin(seconds: f32) -> Mat4 {
    Mat4::from_rotation_z(seconds * 0.7)
        * Mat4::from_rotation_y(seconds * 2.0)
        * Mat4::from_rotation_x(seconds)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    /// World to clip space for the current frame.
    pub world_view: Mat4,
}

impl FrameTransform {
    /// The matrix in the layout the HLSL constant buffer expects
    /// (`mul(position, WorldView)` with column-major packing).
    pub fn shader_constant(&self) -> Mat4 {
        self.world_view.transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_math::Vec4;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn default_camera_puts_origin_five_units_ahead() {
        let camera = Camera::default();
        let origin = camera.view.transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), EPSILON));
        assert_eq!(camera.projection, Mat4::IDENTITY);
    }

    #[test]
    fn no_rotation_at_time_zero() {
        let camera = Camera::default().with_perspective(4.0 / 3.0);
        let transform = camera.frame_transform(0.0);
        assert!(
            transform
                .world_view
                .abs_diff_eq(camera.view_projection(), EPSILON)
        );
    }

    #[test]
    fn spin_preserves_lengths() {
        for seconds in [0.25_f32, 1.0, 3.7, 42.0] {
            let rotation = spin(seconds);
            let v = Vec3::new(1.0, -2.0, 0.5);
            assert!((rotation.transform_vector3(v).length() - v.length()).abs() < 1e-4);
        }
    }

    #[test]
    fn spin_rotates_about_x_first() {
        // Y axis: X rotation by pi/2 sends it to +Z; Y rotation by pi flips Z;
        // the Z rotation leaves -Z alone.
        let seconds = std::f32::consts::FRAC_PI_2;
        let moved = spin(seconds).transform_vector3(Vec3::Y);
        assert!(moved.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-4));
    }

    #[test]
    fn shader_constant_is_transposed() {
        let transform = Camera::default().frame_transform(1.5);
        let constant = transform.shader_constant();
        assert_eq!(constant.transpose(), transform.world_view);
        let p = Vec4::new(1.0, 2.0, 3.0, 1.0);
        // row-vector multiply against the constant equals column-vector against world_view
        let row = Vec4::new(
            p.dot(constant.x_axis),
            p.dot(constant.y_axis),
            p.dot(constant.z_axis),
            p.dot(constant.w_axis),
        );
        assert!(row.abs_diff_eq(transform.world_view * p, 1e-4));
    }

    #[test]
    fn perspective_keeps_cube_in_front_of_camera() {
        let camera = Camera::default().with_perspective(16.0 / 9.0);
        let transform = camera.frame_transform(2.0);
        for corner in [Vec3::splat(1.0), Vec3::splat(-1.0), Vec3::new(1.0, -1.0, 1.0)] {
            let clip = transform.world_view * corner.extend(1.0);
            assert!(clip.w > 0.0);
            let depth = clip.z / clip.w;
            assert!((0.0..=1.0).contains(&depth), "depth {depth}");
        }
    }
}
