//! Axis-aligned bounding box

use crate::core::types::Vec3;

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Get size (max - min)
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// True when max strictly exceeds min on every axis
    pub fn is_valid(&self) -> bool {
        self.max.x > self.min.x &&
        self.max.y > self.min.y &&
        self.max.z > self.min.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_size() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(aabb.size(), Vec3::ONE);
        assert_eq!(aabb.min, Vec3::ZERO);
    }

    #[test]
    fn test_is_valid() {
        assert!(Aabb::new(Vec3::ZERO, Vec3::ONE).is_valid());
        assert!(!Aabb::new(Vec3::ZERO, Vec3::ZERO).is_valid());
        assert!(!Aabb::new(Vec3::ONE, Vec3::new(2.0, 1.0, 2.0)).is_valid());
    }
}
