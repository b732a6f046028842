//! Marching-cubes polygonaliser: grid, lookup tables, two-pass kernel

pub mod grid;
pub mod polygonize;
pub mod tables;

pub use grid::VoxelGrid;
pub use polygonize::{count_triangles, emit_triangles, polygonize};
