//! Matrix helpers over `cgmath`.
//!
//! All helpers follow the OpenGL clip convention (z in `[-1, 1]`); wgpu
//! backends apply [`opengl_to_wgpu`] as the final transform.

pub use cgmath::{Deg, Matrix4, Point3, Vector2, Vector3, Vector4};

/// Right-handed look-at view matrix.
pub fn look_at(eye: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::look_at_rh(eye, target, up)
}

/// Perspective projection from a vertical field of view and a pixel size.
///
/// A degenerate size uses an aspect of 1.
pub fn perspective_fov(fov_y: Deg<f32>, width: f32, height: f32, near: f32, far: f32) -> Matrix4<f32> {
    let aspect = if width > 0.0 && height > 0.0 { width / height } else { 1.0 };
    cgmath::perspective(fov_y, aspect, near, far)
}

/// Remaps OpenGL clip depth (`[-1, 1]`) to wgpu clip depth (`[0, 1]`).
#[rustfmt::skip]
pub fn opengl_to_wgpu() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.0,
        0.0, 0.0, 0.5, 1.0,
    )
}

/// Orthographic volume, stored alongside the matrix built from it so the
/// bounds stay inspectable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoBounds {
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;

    /// Pixel-space volume centered on the origin with +Y pointing down:
    /// `[-w/2, w/2] × [h/2, -h/2]`.
    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            left: -width / 2.0,
            right: width / 2.0,
            bottom: height / 2.0,
            top: -height / 2.0,
            near: Self::NEAR,
            far: Self::FAR,
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        cgmath::ortho(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }

    /// Horizontal extent as `(min, max)`.
    pub fn x_range(&self) -> (f32, f32) {
        (self.left.min(self.right), self.left.max(self.right))
    }

    /// Vertical extent as `(min, max)`, independent of axis direction.
    pub fn y_range(&self) -> (f32, f32) {
        (self.bottom.min(self.top), self.bottom.max(self.top))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Transform};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn look_at_moves_target_onto_negative_z() {
        let view = look_at(Point3::new(0.0, 0.0, 2.0), Point3::new(0.0, 0.0, 0.0), Vector3::unit_y());
        let p = view.transform_point(Point3::new(0.0, 0.0, 0.0));
        assert!(approx(p.x, 0.0) && approx(p.y, 0.0) && approx(p.z, -2.0));
    }

    #[test]
    fn centered_ortho_maps_corners_to_ndc() {
        let m = OrthoBounds::centered(1024.0, 768.0).matrix();
        let tl = m * Vector4::new(-512.0, -384.0, -1.0, 1.0);
        let br = m * Vector4::new(512.0, 384.0, -1.0, 1.0);
        // +Y down in pixel space: the top edge lands on NDC +1.
        assert!(approx(tl.x, -1.0) && approx(tl.y, 1.0));
        assert!(approx(br.x, 1.0) && approx(br.y, -1.0));
    }

    #[test]
    fn wgpu_remap_puts_near_plane_at_zero() {
        let m = opengl_to_wgpu() * OrthoBounds::centered(2.0, 2.0).matrix();
        let near = m * Vector4::new(0.0, 0.0, -OrthoBounds::NEAR, 1.0);
        let far = m * Vector4::new(0.0, 0.0, -OrthoBounds::FAR, 1.0);
        assert!(approx(near.z, 0.0));
        assert!(approx(far.z, 1.0));
    }

    #[test]
    fn perspective_with_zero_height_does_not_divide_by_zero() {
        let m = perspective_fov(Deg(45.0), 100.0, 0.0, 0.1, 500.0);
        assert!(m.x.magnitude().is_finite());
    }

    #[test]
    fn perspective_with_zero_width_falls_back_to_square() {
        let m = perspective_fov(Deg(45.0), 0.0, 768.0, 0.1, 500.0);
        assert_eq!(m, perspective_fov(Deg(45.0), 1.0, 1.0, 0.1, 500.0));
    }
}
