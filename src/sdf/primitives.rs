//! Closed-form primitive distance functions.
//!
//! Each returns the signed Euclidean distance from a query point (expressed
//! in the primitive's local frame) to the surface, negative inside. All
//! arithmetic is single precision. Primitives assume finite, non-degenerate
//! parameters; degenerate inputs (coincident capsule endpoints, zero box
//! extents) produce the natural limit shape or NaN, and are the caller's
//! job to validate.

use glam::Vec2;

use crate::core::types::Vec3;

/// Distance to a sphere of radius `r` centred at the origin
#[inline]
pub fn sd_sphere(p: Vec3, r: f32) -> f32 {
    p.length() - r
}

/// Distance to a box with half-extents `b` centred at the origin.
///
/// Exact Euclidean distance outside; inside, the largest component of
/// `|p| - b` is a pseudo-distance that stays Lipschitz-1, which is all
/// sphere tracing needs.
#[inline]
pub fn sd_box(p: Vec3, b: Vec3) -> f32 {
    let q = p.abs() - b;
    q.max(Vec3::ZERO).length() + q.x.max(q.y.max(q.z)).min(0.0)
}

/// Distance to a capped cylinder of half-height `h` and radius `r`, axis y
#[inline]
pub fn sd_cylinder(p: Vec3, h: f32, r: f32) -> f32 {
    let d = Vec2::new(Vec2::new(p.x, p.z).length() - r, p.y.abs() - h);
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Distance to a capsule from `a` to `b` with radius `r`
#[inline]
pub fn sd_capsule(p: Vec3, a: Vec3, b: Vec3, r: f32) -> f32 {
    let pa = p - a;
    let ba = b - a;
    let h = (pa.dot(ba) / ba.dot(ba)).clamp(0.0, 1.0);
    (pa - ba * h).length() - r
}

/// Distance to a round cone (tapered capsule) from `a` with radius `r1`
/// to `b` with radius `r2`.
///
/// Three algebraic branches select between the two endpoint hemispheres
/// and the conical side. Interpolating two capsule distances instead would
/// overshoot the taper and break the Lipschitz bound.
#[inline]
pub fn sd_round_cone(p: Vec3, a: Vec3, b: Vec3, r1: f32, r2: f32) -> f32 {
    let ba = b - a;
    let l2 = ba.dot(ba);
    let rr = r1 - r2;
    let a2 = l2 - rr * rr;
    let il2 = 1.0 / l2;

    let pa = p - a;
    let y = pa.dot(ba);
    let z = y - l2;

    let v = pa * l2 - ba * y;
    let x2 = v.dot(v);
    let y2 = y * y * l2;
    let z2 = z * z * l2;

    let k = rr.signum() * rr * rr * x2;

    if z.signum() * a2 * z2 > k {
        return (x2 + z2).sqrt() * il2 - r2;
    }
    if y.signum() * a2 * y2 < k {
        return (x2 + y2).sqrt() * il2 - r1;
    }
    ((x2 * a2 * il2).sqrt() + y * rr) * il2 - r1
}

/// Distance to a torus in the xz plane: major radius `r_main`, tube
/// radius `r_tube`
#[inline]
pub fn sd_torus(p: Vec3, r_main: f32, r_tube: f32) -> f32 {
    let q = Vec2::new(Vec2::new(p.x, p.z).length() - r_main, p.y);
    q.length() - r_tube
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic point sampler for property tests.
    fn sample_points(seed: u32, count: usize, extent: f32) -> Vec<Vec3> {
        let mut state = seed | 1;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as f32 / u32::MAX as f32) * 2.0 - 1.0
        };
        (0..count)
            .map(|_| Vec3::new(next(), next(), next()) * extent)
            .collect()
    }

    #[test]
    fn test_sphere_sign_and_surface() {
        let r = 1.5;
        assert_eq!(sd_sphere(Vec3::ZERO, r), -r);
        for p in sample_points(7, 100, 2.0) {
            if p.length() < 1e-3 {
                continue;
            }
            let on_surface = p.normalize() * r;
            assert!(sd_sphere(on_surface, r).abs() <= 1e-5 * r);
        }
    }

    #[test]
    fn test_box_faces_and_interior() {
        let b = Vec3::new(1.0, 0.5, 2.0);
        assert!((sd_box(Vec3::new(2.0, 0.0, 0.0), b) - 1.0).abs() < 1e-6);
        assert!((sd_box(Vec3::new(0.0, 1.5, 0.0), b) - 1.0).abs() < 1e-6);
        // interior pseudo-distance is the least face clearance, negated
        assert!((sd_box(Vec3::ZERO, b) + 0.5).abs() < 1e-6);
        // corner distance is the diagonal
        let corner = Vec3::new(2.0, 1.5, 3.0);
        let expected = Vec3::splat(1.0).length();
        assert!((sd_box(corner, b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_cylinder_side_and_cap() {
        assert!((sd_cylinder(Vec3::new(2.0, 0.0, 0.0), 1.0, 0.5) - 1.5).abs() < 1e-6);
        assert!((sd_cylinder(Vec3::new(0.0, 2.0, 0.0), 1.0, 0.5) - 1.0).abs() < 1e-6);
        assert!(sd_cylinder(Vec3::ZERO, 1.0, 0.5) < 0.0);
    }

    #[test]
    fn test_capsule_lipschitz() {
        let a = Vec3::new(-1.5, -0.5, 0.0);
        let b = Vec3::new(-1.5, 0.5, 0.0);
        let r = 0.5;
        let points = sample_points(42, 20_000, 3.0);
        for pair in points.chunks_exact(2) {
            let (p, q) = (pair[0], pair[1]);
            let dp = sd_capsule(p, a, b, r);
            let dq = sd_capsule(q, a, b, r);
            assert!(
                (dp - dq).abs() <= (p - q).length() + 1e-5,
                "Lipschitz violated at {p:?} / {q:?}"
            );
        }
    }

    #[test]
    fn test_capsule_axis() {
        let a = Vec3::new(0.0, -1.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        // anywhere on the segment the distance is -r
        assert!((sd_capsule(Vec3::ZERO, a, b, 0.25) + 0.25).abs() < 1e-6);
        assert!((sd_capsule(b, a, b, 0.25) + 0.25).abs() < 1e-6);
        // beyond an endpoint the cap is spherical
        assert!((sd_capsule(Vec3::new(0.0, 2.0, 0.0), a, b, 0.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_round_cone_matches_capsule_when_uniform() {
        let a = Vec3::new(0.0, -1.0, 0.0);
        let b = Vec3::new(0.5, 1.0, 0.0);
        let r = 0.4;
        for p in sample_points(11, 200, 3.0) {
            let dc = sd_capsule(p, a, b, r);
            let drc = sd_round_cone(p, a, b, r, r);
            assert!((dc - drc).abs() < 1e-4, "mismatch at {p:?}: {dc} vs {drc}");
        }
    }

    #[test]
    fn test_round_cone_endpoints() {
        let a = Vec3::ZERO;
        let b = Vec3::new(0.0, 2.0, 0.0);
        // directly beyond each endpoint the dominant term is that cap
        assert!((sd_round_cone(Vec3::new(0.0, -1.0, 0.0), a, b, 0.5, 0.25) - 0.5).abs() < 1e-5);
        assert!((sd_round_cone(Vec3::new(0.0, 3.0, 0.0), a, b, 0.5, 0.25) - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_torus_axis_values() {
        // centre sits r_main away from the tube ring
        assert!((sd_torus(Vec3::ZERO, 0.8, 0.2) - 0.6).abs() < 1e-6);
        // on the ring, fully inside the tube
        assert!((sd_torus(Vec3::new(0.8, 0.0, 0.0), 0.8, 0.2) + 0.2).abs() < 1e-6);
        // top of the tube
        assert!(sd_torus(Vec3::new(0.0, 0.2, 0.8), 0.8, 0.2).abs() < 1e-6);
    }
}
