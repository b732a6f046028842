//! Scene model: primitive records, global settings, and the composed SDF.
//!
//! A scene is an ordered list of primitive records plus the global noise
//! and blending settings. `Scene::sdf` binds those into a [`SceneSdf`],
//! the single `evaluate(point) -> distance` value the render and mesh
//! kernels consume.

pub mod parse;

pub use parse::{load_scene, parse_scene};

use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::noise::Permutation;
use crate::sdf::DistanceField;
use crate::sdf::{op_smooth_union, sd_box, sd_capsule, sd_round_cone, sd_sphere, sd_torus};

/// Distance fold starts from this stand-in for +infinity.
const FAR_DISTANCE: f32 = 1e9;

/// Global scene settings: noise shaping and smooth-union blending.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSettings {
    /// fBm octave count for the domain warp and surface displacement
    pub noise_octaves: u32,
    /// Domain-warp displacement scale; 0 disables the warp
    pub noise_amplitude: f32,
    /// Smooth-union blending radius, must be positive
    pub smooth_union_k: f32,
    /// Frequency multiplier for the surface-displacement fBm
    pub displacement_frequency: f32,
    /// Surface detail added to the folded distance as `fbm * gain`;
    /// 0 disables it
    pub displacement_gain: f32,
    /// Global multiplier on the final distance, must be positive.
    /// Values below 1 restore the Lipschitz bound that warp and
    /// displacement loosen, at the cost of shorter trace steps.
    pub distance_scale: f32,
    /// Permutation seed for the noise lattice
    pub seed: u32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            noise_octaves: 3,
            noise_amplitude: 0.0,
            smooth_union_k: 0.5,
            displacement_frequency: 1.0,
            displacement_gain: 0.0,
            distance_scale: 1.0,
            seed: 0,
        }
    }
}

/// Shape kind and parameters of one primitive, in its local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Sphere { center: Vec3, radius: f32 },
    Capsule { a: Vec3, b: Vec3, radius: f32 },
    Box { center: Vec3, half_extents: Vec3 },
    RoundCone { a: Vec3, b: Vec3, r1: f32, r2: f32 },
    Torus { center: Vec3, r_main: f32, r_tube: f32 },
}

/// One scene entry: a shape plus an optional pre-evaluation translation.
/// Immutable once the scene is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub translate: Vec3,
}

impl Primitive {
    pub fn new(shape: Shape) -> Self {
        Self { shape, translate: Vec3::ZERO }
    }

    pub fn with_translate(mut self, translate: Vec3) -> Self {
        self.translate = translate;
        self
    }

    /// Distance from `p` to this primitive, translation applied first.
    #[inline]
    pub fn distance(&self, p: Vec3) -> f32 {
        let q = p - self.translate;
        match self.shape {
            Shape::Sphere { center, radius } => sd_sphere(q - center, radius),
            Shape::Capsule { a, b, radius } => sd_capsule(q, a, b, radius),
            Shape::Box { center, half_extents } => sd_box(q - center, half_extents),
            Shape::RoundCone { a, b, r1, r2 } => sd_round_cone(q, a, b, r1, r2),
            Shape::Torus { center, r_main, r_tube } => sd_torus(q - center, r_main, r_tube),
        }
    }

    fn validate(&self, index: usize) -> Result<()> {
        let bad = |what: &str| Err(Error::Scene(format!("primitive {index}: negative {what}")));
        match self.shape {
            Shape::Sphere { radius, .. } if radius < 0.0 => bad("sphere radius"),
            Shape::Capsule { radius, .. } if radius < 0.0 => bad("capsule radius"),
            Shape::RoundCone { r1, r2, .. } if r1 < 0.0 || r2 < 0.0 => bad("round-cone radius"),
            Shape::Torus { r_main, r_tube, .. } if r_main < 0.0 || r_tube < 0.0 => {
                bad("torus radius")
            }
            _ => Ok(()),
        }
    }
}

/// An ordered collection of primitives plus global settings.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    pub settings: SceneSettings,
}

impl Scene {
    pub fn new(settings: SceneSettings) -> Self {
        Self { primitives: Vec::new(), settings }
    }

    /// Append a primitive; evaluation order is append order.
    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Reject scene content the kernels must not see: non-positive
    /// blending radius or distance scale, negative radii.
    pub fn validate(&self) -> Result<()> {
        if self.settings.smooth_union_k <= 0.0 {
            return Err(Error::Scene(format!(
                "smooth_union_k must be positive, got {}",
                self.settings.smooth_union_k
            )));
        }
        if self.settings.distance_scale <= 0.0 {
            return Err(Error::Scene(format!(
                "distance_scale must be positive, got {}",
                self.settings.distance_scale
            )));
        }
        for (i, prim) in self.primitives.iter().enumerate() {
            prim.validate(i)?;
        }
        Ok(())
    }

    /// Bind the primitive list, a freshly seeded permutation, and the
    /// settings into an evaluatable field.
    pub fn sdf(&self) -> Result<SceneSdf<'_>> {
        self.validate()?;
        Ok(SceneSdf {
            primitives: &self.primitives,
            perm: Permutation::from_seed(self.settings.seed),
            settings: self.settings,
        })
    }
}

/// The composed scene field: domain warp, a left fold of smooth union
/// over the primitives in declaration order, then fBm surface
/// displacement and the global distance scale.
///
/// The fold order is part of the contract - smooth union is not
/// associative, so reordering primitives changes the surface. The
/// displacement noise samples the warped point, so surface detail stays
/// attached to the deformed geometry.
pub struct SceneSdf<'a> {
    primitives: &'a [Primitive],
    perm: Permutation,
    settings: SceneSettings,
}

impl DistanceField for SceneSdf<'_> {
    fn evaluate(&self, p: Vec3) -> f32 {
        let s = self.settings;
        let q = if s.noise_amplitude != 0.0 && s.noise_octaves > 0 {
            self.perm.domain_warp(p, s.noise_octaves, s.noise_amplitude)
        } else {
            p
        };

        let mut d = FAR_DISTANCE;
        for prim in self.primitives {
            d = op_smooth_union(d, prim.distance(q), s.smooth_union_k);
        }

        if s.displacement_gain != 0.0 && s.noise_octaves > 0 {
            d += self.perm.fbm(q * s.displacement_frequency, s.noise_octaves)
                * s.displacement_gain;
        }
        d * s.distance_scale
    }
}
