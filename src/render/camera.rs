//! Look-at camera and per-pixel ray generation.

use crate::core::types::{Vec2, Vec3};
use crate::math::safe_normalize;

const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Pinhole camera with a precomputed orthonormal basis.
///
/// Pixel (x, y) maps to normalised coordinates
/// `uv = ((2x/W - 1) * W/H, -(2y/H - 1))` - y flipped so screen y = 0 is
/// the top row - and a ray through the virtual focal point at
/// `origin + forward / tan(fov/2)`.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub origin: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    zoom: f32,
}

impl Camera {
    /// Build a camera at `origin` looking at `lookat` with the given
    /// vertical field of view in degrees.
    pub fn new(origin: Vec3, lookat: Vec3, fov_degrees: f32) -> Self {
        let forward = safe_normalize(lookat - origin);
        let right = safe_normalize(WORLD_UP.cross(forward));
        let up = forward.cross(right);
        let zoom = 1.0 / (fov_degrees.to_radians() / 2.0).tan();
        Self { origin, forward, right, up, zoom }
    }

    /// Unit ray direction through normalised screen coordinates `uv`.
    #[inline]
    pub fn ray_direction(&self, uv: Vec2) -> Vec3 {
        let focal = self.origin + self.forward * self.zoom;
        let through = focal + self.right * uv.x + self.up * uv.y;
        safe_normalize(through - self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_is_forward() {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 60.0);
        let rd = cam.ray_direction(Vec2::ZERO);
        assert!((rd - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_rays_are_unit_length() {
        let cam = Camera::new(Vec3::new(2.0, 1.0, 4.0), Vec3::new(0.0, 1.0, 0.0), 45.0);
        for &(x, y) in &[(0.0, 0.0), (1.0, -1.0), (-0.7, 0.3), (1.3, 1.3)] {
            let rd = cam.ray_direction(Vec2::new(x, y));
            assert!((rd.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_screen_axes_orientation() {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 60.0);
        // +uv.y tilts the ray upward in world space
        let up_ray = cam.ray_direction(Vec2::new(0.0, 0.5));
        assert!(up_ray.y > 0.0);
        // +uv.x tilts it toward world -x: right = up cross forward
        let right_ray = cam.ray_direction(Vec2::new(0.5, 0.0));
        assert!(right_ray.x < 0.0);
    }
}
