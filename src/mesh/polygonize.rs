//! Two-pass marching cubes over a voxel grid.
//!
//! Pass 1 counts triangles per z-plane, pass 2 re-traverses the cells
//! and writes vertices into disjoint output regions located by a prefix
//! sum of the plane counts. Planes run in parallel in both passes, yet
//! the emitted vertex sequence is exactly that of a serial
//! `for z, for y, for x` traversal, for any thread count.

use rayon::prelude::*;

use crate::core::types::{Result, Vec3};
use crate::sdf::DistanceField;

use super::grid::VoxelGrid;
use super::tables::{
    validate_tables, CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, TRI_TABLE,
};

/// Snap tolerance for the crossing interpolation.
const INTERP_EPS: f32 = 1e-5;

/// Count the triangles the grid will produce for `field`.
///
/// This is the authoritative size for the emission pass; the two passes
/// agree exactly because they traverse identical cells with identical
/// arithmetic.
pub fn count_triangles<F: DistanceField>(field: &F, grid: &VoxelGrid) -> Result<usize> {
    grid.validate()?;
    validate_tables()?;
    Ok(plane_counts(field, grid).into_iter().sum())
}

/// Polygonise the field over the grid into a flat, unwelded vertex list;
/// triangle `i` occupies indices `3i .. 3i + 3`.
pub fn polygonize<F: DistanceField>(field: &F, grid: &VoxelGrid) -> Result<Vec<Vec3>> {
    grid.validate()?;
    validate_tables()?;
    let counts = plane_counts(field, grid);
    let total: usize = counts.iter().sum();
    let mut vertices = vec![Vec3::ZERO; total * 3];
    let _written = emit_into(field, grid, &counts, &mut vertices);
    debug_assert_eq!(_written, total);
    Ok(vertices)
}

/// Emit into a caller-owned buffer, truncating at a triangle boundary if
/// it is too small. Returns the number of triangles actually written.
pub fn emit_triangles<F: DistanceField>(
    field: &F,
    grid: &VoxelGrid,
    out: &mut [Vec3],
) -> Result<usize> {
    grid.validate()?;
    validate_tables()?;
    let counts = plane_counts(field, grid);
    Ok(emit_into(field, grid, &counts, out))
}

/// Pass 1: triangles contributed by each z-plane of cells.
fn plane_counts<F: DistanceField>(field: &F, grid: &VoxelGrid) -> Vec<usize> {
    (0..grid.resolution.z)
        .into_par_iter()
        .map(|z| count_plane(field, grid, z))
        .collect()
}

fn count_plane<F: DistanceField>(field: &F, grid: &VoxelGrid, z: u32) -> usize {
    let mut count = 0;
    for y in 0..grid.resolution.y {
        for x in 0..grid.resolution.x {
            let (_, _, pattern) = sample_cell(field, grid, x, y, z);
            if EDGE_TABLE[pattern] == 0 {
                continue;
            }
            count += TRI_TABLE[pattern].iter().take_while(|&&e| e != -1).count() / 3;
        }
    }
    count
}

/// Pass 2: carve disjoint per-plane regions out of `out` (prefix sum in
/// z order) and fill them in parallel.
fn emit_into<F: DistanceField>(
    field: &F,
    grid: &VoxelGrid,
    counts: &[usize],
    out: &mut [Vec3],
) -> usize {
    let mut regions: Vec<(u32, &mut [Vec3])> = Vec::with_capacity(counts.len());
    let mut rest = out;
    for (z, &count) in counts.iter().enumerate() {
        let want = count * 3;
        let avail = rest.len() - rest.len() % 3;
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(want.min(avail));
        regions.push((z as u32, head));
        rest = tail;
    }

    regions
        .into_par_iter()
        .map(|(z, region)| emit_plane(field, grid, z, region))
        .sum()
}

fn emit_plane<F: DistanceField>(
    field: &F,
    grid: &VoxelGrid,
    z: u32,
    out: &mut [Vec3],
) -> usize {
    let mut cursor = 0;
    for y in 0..grid.resolution.y {
        for x in 0..grid.resolution.x {
            let (p, v, pattern) = sample_cell(field, grid, x, y, z);
            let edges = EDGE_TABLE[pattern];
            if edges == 0 {
                continue;
            }

            let mut crossings = [Vec3::ZERO; 12];
            for (e, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
                if edges & (1 << e) != 0 {
                    crossings[e] = vertex_interp(grid.iso, p[a], p[b], v[a], v[b]);
                }
            }

            for tri in TRI_TABLE[pattern].chunks_exact(3) {
                if tri[0] == -1 {
                    break;
                }
                if cursor + 3 > out.len() {
                    return cursor / 3;
                }
                out[cursor] = crossings[tri[0] as usize];
                out[cursor + 1] = crossings[tri[1] as usize];
                out[cursor + 2] = crossings[tri[2] as usize];
                cursor += 3;
            }
        }
    }
    cursor / 3
}

/// Evaluate the eight corners of cell `(x, y, z)`.
///
/// Bit `i` of the returned pattern is set iff corner `i` lies strictly
/// below iso - corners exactly on the level set count as outside.
#[inline]
fn sample_cell<F: DistanceField>(
    field: &F,
    grid: &VoxelGrid,
    x: u32,
    y: u32,
    z: u32,
) -> ([Vec3; 8], [f32; 8], usize) {
    let origin = grid.cell_origin(x, y, z);
    let step = grid.cell_size();
    let mut p = [Vec3::ZERO; 8];
    let mut v = [0.0f32; 8];
    let mut pattern = 0usize;
    for (i, off) in CORNER_OFFSETS.iter().enumerate() {
        p[i] = origin + Vec3::new(off[0] as f32, off[1] as f32, off[2] as f32) * step;
        v[i] = field.evaluate(p[i]);
        if v[i] < grid.iso {
            pattern |= 1 << i;
        }
    }
    (p, v, pattern)
}

/// Interpolate the iso crossing on an edge, snapping to a corner when the
/// crossing sits within tolerance of it (or the corner values coincide).
fn vertex_interp(iso: f32, p1: Vec3, p2: Vec3, v1: f32, v2: f32) -> Vec3 {
    if (iso - v1).abs() < INTERP_EPS {
        return p1;
    }
    if (iso - v2).abs() < INTERP_EPS {
        return p2;
    }
    let diff = v2 - v1;
    if diff.abs() < INTERP_EPS {
        return p1;
    }
    let mu = (iso - v1) / diff;
    p1.lerp(p2, mu)
}
