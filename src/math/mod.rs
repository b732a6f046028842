//! Mathematical utilities and data structures

pub mod aabb;

pub use aabb::Aabb;

use crate::core::types::Vec3;

/// Normalise `v`, returning the zero vector when its length falls below 1e-8.
///
/// Distance-field gradients can vanish (e.g. at the centre of a sphere), so
/// callers get a well-defined zero instead of NaN components.
#[inline]
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let len = v.length();
    if len < 1e-8 {
        return Vec3::ZERO;
    }
    v / len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_normalize_unit() {
        let n = safe_normalize(Vec3::new(3.0, 0.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
        assert!((n.z - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_safe_normalize_degenerate() {
        assert_eq!(safe_normalize(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(safe_normalize(Vec3::splat(1e-9)), Vec3::ZERO);
    }
}
