//! Declarative scene file loading.
//!
//! The file is a JSON document with a `scene` mapping of per-kind
//! primitive lists and a `settings` mapping:
//!
//! ```json
//! {
//!   "scene": {
//!     "spheres":     [{ "p": [0, 0, 0], "r": 1.0 }],
//!     "capsules":    [{ "a": [0, -1, 0], "b": [0, 1, 0], "r": 0.5 }],
//!     "boxes":       [{ "p": [0, 0, 0], "b": [1, 1, 1] }],
//!     "round_cones": [{ "a": [0, 0, 0], "b": [0, 2, 0], "r1": 0.5, "r2": 0.2 }],
//!     "torus":       [{ "p": [0, 0, 0], "r_main": 0.8, "r_tube": 0.2 }]
//!   },
//!   "settings": {
//!     "noise_octaves": 3,
//!     "noise_amplitude": 0.1,
//!     "smooth_union_k": 0.5,
//!     "displacement_frequency": 4.0,
//!     "displacement_gain": 0.02,
//!     "distance_scale": 0.6,
//!     "seed": 12345
//!   }
//! }
//! ```
//!
//! Every entry takes an optional `translate` (3 floats, default zero).
//! The normalised primitive order is the kind order above - spheres,
//! capsules, boxes, round_cones, torus - each list in file order. That
//! order is load-bearing: smooth union folds are order dependent.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::types::Result;

use super::{Primitive, Scene, SceneSettings, Shape};

#[derive(Deserialize)]
struct SceneFile {
    scene: ShapeLists,
    #[serde(default)]
    settings: SettingsEntry,
}

#[derive(Default, Deserialize)]
struct ShapeLists {
    #[serde(default)]
    spheres: Vec<SphereEntry>,
    #[serde(default)]
    capsules: Vec<CapsuleEntry>,
    #[serde(default)]
    boxes: Vec<BoxEntry>,
    #[serde(default)]
    round_cones: Vec<RoundConeEntry>,
    #[serde(default)]
    torus: Vec<TorusEntry>,
}

#[derive(Deserialize)]
struct SettingsEntry {
    #[serde(default = "default_octaves")]
    noise_octaves: u32,
    #[serde(default)]
    noise_amplitude: f32,
    #[serde(default = "default_k")]
    smooth_union_k: f32,
    #[serde(default = "default_one")]
    displacement_frequency: f32,
    #[serde(default)]
    displacement_gain: f32,
    #[serde(default = "default_one")]
    distance_scale: f32,
    #[serde(default)]
    seed: u32,
}

fn default_octaves() -> u32 {
    3
}

fn default_k() -> f32 {
    0.5
}

fn default_one() -> f32 {
    1.0
}

impl Default for SettingsEntry {
    fn default() -> Self {
        Self {
            noise_octaves: default_octaves(),
            noise_amplitude: 0.0,
            smooth_union_k: default_k(),
            displacement_frequency: 1.0,
            displacement_gain: 0.0,
            distance_scale: 1.0,
            seed: 0,
        }
    }
}

#[derive(Deserialize)]
struct SphereEntry {
    p: [f32; 3],
    r: f32,
    #[serde(default)]
    translate: [f32; 3],
}

#[derive(Deserialize)]
struct CapsuleEntry {
    a: [f32; 3],
    b: [f32; 3],
    r: f32,
    #[serde(default)]
    translate: [f32; 3],
}

#[derive(Deserialize)]
struct BoxEntry {
    p: [f32; 3],
    b: [f32; 3],
    #[serde(default)]
    translate: [f32; 3],
}

#[derive(Deserialize)]
struct RoundConeEntry {
    a: [f32; 3],
    b: [f32; 3],
    r1: f32,
    r2: f32,
    #[serde(default)]
    translate: [f32; 3],
}

#[derive(Deserialize)]
struct TorusEntry {
    p: [f32; 3],
    r_main: f32,
    r_tube: f32,
    #[serde(default)]
    translate: [f32; 3],
}

/// Parse a scene description from JSON text and validate it.
pub fn parse_scene(text: &str) -> Result<Scene> {
    let file: SceneFile = serde_json::from_str(text)?;

    let mut scene = Scene::new(SceneSettings {
        noise_octaves: file.settings.noise_octaves,
        noise_amplitude: file.settings.noise_amplitude,
        smooth_union_k: file.settings.smooth_union_k,
        displacement_frequency: file.settings.displacement_frequency,
        displacement_gain: file.settings.displacement_gain,
        distance_scale: file.settings.distance_scale,
        seed: file.settings.seed,
    });

    for e in &file.scene.spheres {
        scene.push(
            Primitive::new(Shape::Sphere { center: e.p.into(), radius: e.r })
                .with_translate(e.translate.into()),
        );
    }
    for e in &file.scene.capsules {
        scene.push(
            Primitive::new(Shape::Capsule { a: e.a.into(), b: e.b.into(), radius: e.r })
                .with_translate(e.translate.into()),
        );
    }
    for e in &file.scene.boxes {
        scene.push(
            Primitive::new(Shape::Box { center: e.p.into(), half_extents: e.b.into() })
                .with_translate(e.translate.into()),
        );
    }
    for e in &file.scene.round_cones {
        scene.push(
            Primitive::new(Shape::RoundCone {
                a: e.a.into(),
                b: e.b.into(),
                r1: e.r1,
                r2: e.r2,
            })
            .with_translate(e.translate.into()),
        );
    }
    for e in &file.scene.torus {
        scene.push(
            Primitive::new(Shape::Torus {
                center: e.p.into(),
                r_main: e.r_main,
                r_tube: e.r_tube,
            })
            .with_translate(e.translate.into()),
        );
    }

    scene.validate()?;
    Ok(scene)
}

/// Load and parse a scene description file.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let text = fs::read_to_string(path.as_ref())?;
    let scene = parse_scene(&text)?;
    log::debug!(
        "loaded {} primitives from {}",
        scene.primitives.len(),
        path.as_ref().display()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;

    const TWO_SHAPES: &str = r#"{
        "scene": {
            "spheres": [{ "p": [-0.8, 0, 0], "r": 1.0 }],
            "capsules": [
                { "a": [0, -1, 0], "b": [0, 1, 0], "r": 0.5, "translate": [1.5, 0, 0] }
            ]
        },
        "settings": { "noise_octaves": 4, "noise_amplitude": 0.1, "smooth_union_k": 0.3, "seed": 7 }
    }"#;

    #[test]
    fn test_parse_two_shapes() {
        let scene = parse_scene(TWO_SHAPES).unwrap();
        assert_eq!(scene.primitives.len(), 2);
        assert_eq!(scene.settings.noise_octaves, 4);
        assert_eq!(scene.settings.seed, 7);
        assert!((scene.settings.smooth_union_k - 0.3).abs() < 1e-6);

        // spheres normalise ahead of capsules, translate lands on the capsule
        assert!(matches!(scene.primitives[0].shape, Shape::Sphere { .. }));
        match scene.primitives[1].shape {
            Shape::Capsule { radius, .. } => assert_eq!(radius, 0.5),
            other => panic!("expected capsule, got {other:?}"),
        }
        assert_eq!(scene.primitives[1].translate, Vec3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn test_defaults_and_missing_lists() {
        let scene = parse_scene(r#"{ "scene": {} }"#).unwrap();
        assert!(scene.primitives.is_empty());
        assert_eq!(scene.settings.noise_octaves, 3);
        assert!((scene.settings.smooth_union_k - 0.5).abs() < 1e-6);
        assert_eq!(scene.settings.displacement_gain, 0.0);
        assert_eq!(scene.settings.displacement_frequency, 1.0);
        assert_eq!(scene.settings.distance_scale, 1.0);
    }

    #[test]
    fn test_shaping_settings() {
        let text = r#"{
            "scene": { "spheres": [{ "p": [0, 0, 0], "r": 1.0 }] },
            "settings": {
                "displacement_frequency": 4.0,
                "displacement_gain": 0.02,
                "distance_scale": 0.6
            }
        }"#;
        let scene = parse_scene(text).unwrap();
        assert_eq!(scene.settings.displacement_frequency, 4.0);
        assert_eq!(scene.settings.displacement_gain, 0.02);
        assert_eq!(scene.settings.distance_scale, 0.6);

        // a non-positive distance scale fails validation at parse time
        let bad = r#"{
            "scene": { "spheres": [{ "p": [0, 0, 0], "r": 1.0 }] },
            "settings": { "distance_scale": 0.0 }
        }"#;
        assert!(parse_scene(bad).is_err());
    }

    #[test]
    fn test_all_kinds_in_normalised_order() {
        let text = r#"{
            "scene": {
                "torus": [{ "p": [0, 0, 0], "r_main": 0.8, "r_tube": 0.2 }],
                "round_cones": [{ "a": [0, 0, 0], "b": [0, 2, 0], "r1": 0.5, "r2": 0.2 }],
                "boxes": [{ "p": [0, 0, 0], "b": [1, 1, 1] }],
                "capsules": [{ "a": [0, -1, 0], "b": [0, 1, 0], "r": 0.5 }],
                "spheres": [{ "p": [0, 0, 0], "r": 1.0 }]
            }
        }"#;
        let scene = parse_scene(text).unwrap();
        let kinds: Vec<_> = scene
            .primitives
            .iter()
            .map(|p| match p.shape {
                Shape::Sphere { .. } => "sphere",
                Shape::Capsule { .. } => "capsule",
                Shape::Box { .. } => "box",
                Shape::RoundCone { .. } => "round_cone",
                Shape::Torus { .. } => "torus",
            })
            .collect();
        assert_eq!(kinds, ["sphere", "capsule", "box", "round_cone", "torus"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_scene("not json").is_err());
        // missing required field
        assert!(parse_scene(r#"{ "scene": { "spheres": [{ "p": [0,0,0] }] } }"#).is_err());
        // validation runs on the parsed scene
        let bad = r#"{
            "scene": { "spheres": [{ "p": [0,0,0], "r": -1.0 }] }
        }"#;
        assert!(parse_scene(bad).is_err());
    }
}
