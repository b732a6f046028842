//! Voxel grid parameters for the polygonaliser.

use crate::core::error::Error;
use crate::core::types::{Result, UVec3, Vec3};
use crate::math::Aabb;

/// An axis-aligned box partitioned into `resolution` cells per axis.
///
/// Only the parameters are stored; corner field values are evaluated on
/// demand by the polygonaliser.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelGrid {
    /// World-space bounds, `max` strictly greater than `min` per axis
    pub bounds: Aabb,
    /// Cell count per axis, each at least 1
    pub resolution: UVec3,
    /// Distance threshold of the extracted surface (0 for the natural
    /// zero level-set)
    pub iso: f32,
}

impl VoxelGrid {
    pub fn new(bounds: Aabb, resolution: UVec3, iso: f32) -> Self {
        Self { bounds, resolution, iso }
    }

    /// Reject degenerate grids at kernel entry.
    pub fn validate(&self) -> Result<()> {
        if !self.bounds.is_valid() {
            return Err(Error::Config(format!(
                "grid bounds must satisfy max > min, got {:?}..{:?}",
                self.bounds.min, self.bounds.max
            )));
        }
        if self.resolution.cmpeq(UVec3::ZERO).any() {
            return Err(Error::Config(format!(
                "grid resolution must be at least 1 per axis, got {:?}",
                self.resolution
            )));
        }
        Ok(())
    }

    /// World-space size of one cell.
    #[inline]
    pub fn cell_size(&self) -> Vec3 {
        self.bounds.size() / self.resolution.as_vec3()
    }

    /// World-space origin (min corner) of cell `(x, y, z)`.
    #[inline]
    pub fn cell_origin(&self, x: u32, y: u32, z: u32) -> Vec3 {
        self.bounds.min + Vec3::new(x as f32, y as f32, z as f32) * self.cell_size()
    }
}
