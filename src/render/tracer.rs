//! Sphere tracing and shading.
//!
//! One ray per pixel, rows distributed across the rayon pool. Each worker
//! writes only its own row range, so the fill needs no locks and the
//! output bytes are identical for any thread count.

use rayon::prelude::*;

use crate::core::error::Error;
use crate::core::types::{Result, Vec2, Vec3};
use crate::math::safe_normalize;
use crate::sdf::DistanceField;

use super::camera::Camera;

/// Contact threshold: a step shorter than this is a hit.
const HIT_EPS: f32 = 1e-3;
/// Rays farther than this have missed.
const FAR_CLIP: f32 = 100.0;
/// Primary ray step budget.
const MAX_STEPS: usize = 256;

/// Central-difference epsilon for normals.
const NORMAL_EPS: f32 = 1e-4;

/// Shadow ray step budget and clip.
const SHADOW_STEPS: usize = 64;
const SHADOW_FAR: f32 = 50.0;
/// Shadow penumbra hardness.
const SHADOW_K: f32 = 16.0;

const LIGHT_POS: Vec3 = Vec3::new(2.0, 4.0, 3.0);
const AMBIENT: f32 = 0.1;
const MATERIAL: Vec3 = Vec3::new(1.0, 1.0, 1.0);
const BACKGROUND: Vec3 = Vec3::new(0.1, 0.1, 0.15);

/// Row-major 8-bit RGB pixel buffer, origin top-left.
#[derive(Clone, Debug)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Render the field from `camera` into a `width` x `height` image.
///
/// Rejects zero dimensions up front; past that the kernel runs to
/// completion.
pub fn render<F: DistanceField>(
    field: &F,
    camera: &Camera,
    width: usize,
    height: usize,
) -> Result<Image> {
    if width == 0 || height == 0 {
        return Err(Error::Config(format!(
            "image dimensions must be non-zero, got {width}x{height}"
        )));
    }

    let mut data = vec![0u8; width * height * 3];
    let aspect = width as f32 / height as f32;

    data.par_chunks_mut(width * 3)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                let uv = Vec2::new(
                    ((x as f32 / width as f32) * 2.0 - 1.0) * aspect,
                    -((y as f32 / height as f32) * 2.0 - 1.0),
                );
                let col = shade_pixel(field, camera, uv);
                let o = x * 3;
                row[o] = (col.x * 255.0) as u8;
                row[o + 1] = (col.y * 255.0) as u8;
                row[o + 2] = (col.z * 255.0) as u8;
            }
        });

    Ok(Image { width, height, data })
}

/// March a ray from `ro` along unit direction `rd`.
///
/// Steps by the field value itself (safe for Lipschitz-1 fields) and
/// returns the hit distance, or `FAR_CLIP` on a miss.
pub fn ray_march<F: DistanceField>(field: &F, ro: Vec3, rd: Vec3) -> f32 {
    let mut t = 0.0f32;
    for _ in 0..MAX_STEPS {
        let d = field.evaluate(ro + rd * t);
        if d < HIT_EPS {
            return t;
        }
        if t > FAR_CLIP {
            break;
        }
        t += d;
    }
    FAR_CLIP
}

/// Surface normal by central differences on the field.
pub fn surface_normal<F: DistanceField>(field: &F, p: Vec3) -> Vec3 {
    let e = NORMAL_EPS;
    let dx = field.evaluate(p + Vec3::new(e, 0.0, 0.0)) - field.evaluate(p - Vec3::new(e, 0.0, 0.0));
    let dy = field.evaluate(p + Vec3::new(0.0, e, 0.0)) - field.evaluate(p - Vec3::new(0.0, e, 0.0));
    let dz = field.evaluate(p + Vec3::new(0.0, 0.0, e)) - field.evaluate(p - Vec3::new(0.0, 0.0, e));
    safe_normalize(Vec3::new(dx, dy, dz))
}

/// Penumbra shadow factor in [0, 1] toward the light: 0 in contact
/// shadow, 1 fully lit. Tracks the closest angular miss `k * d / t`.
fn soft_shadow<F: DistanceField>(field: &F, ro: Vec3, rd: Vec3) -> f32 {
    let mut res = 1.0f32;
    let mut t = 0.01f32;
    for _ in 0..SHADOW_STEPS {
        let h = field.evaluate(ro + rd * t);
        if h < HIT_EPS {
            return 0.0;
        }
        res = res.min(SHADOW_K * h / t);
        t += h;
        if t > SHADOW_FAR {
            break;
        }
    }
    res
}

/// Ambient occlusion from five probes along the normal, geometrically
/// down-weighted; 1 is fully open, 0 fully occluded.
fn ambient_occlusion<F: DistanceField>(field: &F, p: Vec3, n: Vec3) -> f32 {
    let mut occ = 0.0f32;
    let mut w = 1.0f32;
    for i in 1..=5 {
        let d = i as f32 * 0.1;
        occ += (d - field.evaluate(p + n * d)) * w;
        w *= 0.5;
    }
    1.0 - occ.clamp(0.0, 1.0)
}

fn shade_pixel<F: DistanceField>(field: &F, camera: &Camera, uv: Vec2) -> Vec3 {
    let rd = camera.ray_direction(uv);
    let t = ray_march(field, camera.origin, rd);

    let mut col = BACKGROUND;
    if t < FAR_CLIP {
        let p = camera.origin + rd * t;
        let n = surface_normal(field, p);
        let l = safe_normalize(LIGHT_POS - p);

        let shadow = soft_shadow(field, p + n * HIT_EPS, l);
        let diffuse = n.dot(l).max(0.0);
        let ao = ambient_occlusion(field, p, n);

        col = MATERIAL * (diffuse * shadow + AMBIENT * ao);
    }
    col.clamp(Vec3::ZERO, Vec3::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> impl DistanceField {
        |p: Vec3| p.length() - 1.0
    }

    #[test]
    fn test_ray_march_hits_sphere() {
        let t = ray_march(&unit_sphere(), Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
        assert!((t - 2.0).abs() < 1e-2, "hit distance {t}");
    }

    #[test]
    fn test_ray_march_misses() {
        let t = ray_march(&unit_sphere(), Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(t, FAR_CLIP);
    }

    #[test]
    fn test_surface_normal_radial() {
        let p = Vec3::new(0.0, 1.0, 0.0);
        let n = surface_normal(&unit_sphere(), p);
        assert!((n - p).length() < 1e-3);
    }

    #[test]
    fn test_unit_sphere_image() {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 60.0);
        let img = render(&unit_sphere(), &cam, 64, 64).unwrap();
        assert_eq!(img.data.len(), 64 * 64 * 3);

        // corners see background (0.1, 0.1, 0.15) -> (25, 25, 38)
        for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
            let o = (y * 64 + x) * 3;
            assert_eq!(&img.data[o..o + 3], &[25, 25, 38], "corner ({x},{y})");
        }

        // the centre pixel hits the sphere and is lit brighter than background
        let o = (32 * 64 + 32) * 3;
        assert!(img.data[o] > 38, "centre pixel should be lit, got {}", img.data[o]);
    }

    #[test]
    fn test_render_deterministic() {
        let cam = Camera::new(Vec3::new(0.5, 1.0, 3.0), Vec3::ZERO, 60.0);
        let a = render(&unit_sphere(), &cam, 48, 32).unwrap();
        let b = render(&unit_sphere(), &cam, 48, 32).unwrap();
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn test_render_rejects_zero_dims() {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 60.0);
        assert!(render(&unit_sphere(), &cam, 0, 64).is_err());
        assert!(render(&unit_sphere(), &cam, 64, 0).is_err());
    }

    #[test]
    fn test_ao_open_space() {
        let field = unit_sphere();
        let p = Vec3::new(0.0, 1.0, 0.0);
        let n = Vec3::new(0.0, 1.0, 0.0);
        // probes along the outward normal see exactly their probe distance
        let ao = ambient_occlusion(&field, p, n);
        assert!(ao > 0.99, "open sphere surface should be unoccluded, got {ao}");
    }

    #[test]
    fn test_shadow_blocked_and_clear() {
        let field = unit_sphere();
        // start behind the sphere aiming straight through it
        let blocked = soft_shadow(&field, Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(blocked, 0.0);
        // aiming away from the sphere stays fully lit
        let clear = soft_shadow(&field, Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, -1.0));
        assert!((clear - 1.0).abs() < 1e-6);
    }
}
