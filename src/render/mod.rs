//! Sphere-tracing renderer: camera, tracer, shading, parallel image fill

pub mod camera;
pub mod tracer;

pub use camera::Camera;
pub use tracer::{render, Image};
