//! Wavefront OBJ writer for unwelded triangle soups.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::types::{Result, Vec3};

/// Write a flat vertex list as OBJ: triangle `i` occupies vertices
/// `3i .. 3i + 3`, faces are 1-based. No normals, no materials, no
/// vertex welding - downstream tools derive per-triangle normals.
pub fn save_obj(vertices: &[Vec3], path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    writeln!(w, "# isofield OBJ export")?;
    writeln!(w, "# vertices: {}", vertices.len())?;

    for v in vertices {
        writeln!(w, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
    }

    let triangles = vertices.len() / 3;
    for i in 0..triangles {
        let base = i * 3 + 1;
        writeln!(w, "f {} {} {}", base, base + 1, base + 2)?;
    }

    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obj_layout() {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 0.25, 1.0),
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.obj");
        save_obj(&vertices, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# isofield OBJ export");
        assert_eq!(lines[1], "# vertices: 6");
        assert_eq!(lines[2], "v 0.000000 0.000000 0.000000");
        assert_eq!(lines[7], "v 1.000000 0.250000 1.000000");
        assert_eq!(lines[8], "f 1 2 3");
        assert_eq!(lines[9], "f 4 5 6");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_empty_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.obj");
        save_obj(&[], &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
