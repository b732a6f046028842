//! Boolean combinators and domain deformers.

use crate::core::types::Vec3;

/// Hard union: min of two distances
#[inline]
pub fn op_union(d1: f32, d2: f32) -> f32 {
    d1.min(d2)
}

/// Subtraction: carve the first shape out of the second
#[inline]
pub fn op_subtraction(d1: f32, d2: f32) -> f32 {
    (-d1).max(d2)
}

/// Intersection: max of two distances
#[inline]
pub fn op_intersection(d1: f32, d2: f32) -> f32 {
    d1.max(d2)
}

/// Smooth union with blending radius `k` (quadratic polynomial blend).
///
/// Degenerates to the hard union as `k` approaches 0. Not associative:
/// a chain of smooth unions depends on the fold order, so scene
/// evaluation folds strictly by primitive index.
#[inline]
pub fn op_smooth_union(d1: f32, d2: f32, k: f32) -> f32 {
    let h = (0.5 + 0.5 * (d2 - d1) / k).clamp(0.0, 1.0);
    mix(d2, d1, h) - k * h * (1.0 - h)
}

/// Twist the domain around the y axis by angle `k * p.y`.
///
/// The resulting field is a Lipschitz-bounded approximation, not a true
/// distance; stack a global distance scale when tracing twisted fields.
#[inline]
pub fn op_twist(p: Vec3, k: f32) -> Vec3 {
    let (s, c) = (k * p.y).sin_cos();
    Vec3::new(c * p.x - s * p.z, p.y, s * p.x + c * p.z)
}

/// Bend the domain around the z axis by angle `k * p.x`
#[inline]
pub fn op_bend(p: Vec3, k: f32) -> Vec3 {
    let (s, c) = (k * p.x).sin_cos();
    Vec3::new(c * p.x - s * p.y, s * p.x + c * p.y, p.z)
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::primitives::sd_sphere;

    #[test]
    fn test_booleans() {
        assert_eq!(op_union(1.0, -2.0), -2.0);
        assert_eq!(op_intersection(1.0, -2.0), 1.0);
        assert_eq!(op_subtraction(-1.0, 0.5), 1.0);
    }

    #[test]
    fn test_smooth_union_bounds() {
        let k = 0.5;
        let mut state = 123u32;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as f32 / u32::MAX as f32) * 4.0 - 2.0
        };
        for _ in 0..1000 {
            let (d1, d2) = (next(), next());
            let s = op_smooth_union(d1, d2, k);
            let m = d1.min(d2);
            assert!(s <= m + 1e-6, "smooth union above min: {s} > {m}");
            assert!(s >= m - k / 4.0 - 1e-6, "smooth union below min - k/4");
        }
    }

    #[test]
    fn test_smooth_union_degenerates_to_min() {
        let s = op_smooth_union(1.0, -0.5, 1e-6);
        assert!((s - (-0.5)).abs() < 1e-4);
    }

    #[test]
    fn test_double_sphere_blend() {
        // two overlapping spheres, k = 0.5
        let field = |p: Vec3| {
            let s1 = sd_sphere(p - Vec3::new(-0.8, 0.0, 0.0), 1.0);
            let s2 = sd_sphere(p - Vec3::new(0.8, 0.0, 0.0), 0.8);
            op_smooth_union(s1, s2, 0.5)
        };
        // the blend bridges the gap between the spheres
        assert!(field(Vec3::ZERO) < 0.0);
        // far away the nearer sphere dominates: |3 - 0.8| - 0.8 = 1.4
        assert!((field(Vec3::new(3.0, 0.0, 0.0)) - 1.4).abs() < 0.05);
    }

    #[test]
    fn test_twist_preserves_y_and_radius() {
        let p = Vec3::new(1.0, 2.0, 0.5);
        let q = op_twist(p, 0.7);
        assert_eq!(q.y, p.y);
        let r_in = (p.x * p.x + p.z * p.z).sqrt();
        let r_out = (q.x * q.x + q.z * q.z).sqrt();
        assert!((r_in - r_out).abs() < 1e-5);
        // zero twist is the identity
        assert!((op_twist(p, 0.0) - p).length() < 1e-7);
    }

    #[test]
    fn test_bend_preserves_z() {
        let p = Vec3::new(0.3, 1.0, -2.0);
        let q = op_bend(p, 0.4);
        assert_eq!(q.z, p.z);
        assert!((op_bend(p, 0.0) - p).length() < 1e-7);
    }
}
