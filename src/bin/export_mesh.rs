//! Mesh exporter binary — polygonises a scene file to a Wavefront OBJ.
//!
//! Usage: cargo run --release --bin export_mesh -- [OPTIONS]
//!
//! Options:
//!   --scene <PATH>     Scene description JSON (required)
//!   --out <PATH>       Output OBJ path (default: "mesh.obj")
//!   --min <X,Y,Z>      Grid lower bound (default: -2,-2,-2)
//!   --max <X,Y,Z>      Grid upper bound (default: 2,2,2)
//!   --res <X,Y,Z>      Cells per axis (default: 64,64,64)
//!   --iso <V>          Iso value (default: 0)

use std::time::Instant;

use glam::{UVec3, Vec3};

use isofield::core::types::Result;
use isofield::export::save_obj;
use isofield::math::Aabb;
use isofield::mesh::{count_triangles, polygonize, VoxelGrid};
use isofield::scene::load_scene;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let scene_path = parse_str_arg(&args, "--scene").unwrap_or_else(|| {
        eprintln!("Usage: export_mesh --scene <PATH> [--out <PATH>] [--min <X,Y,Z>] [--max <X,Y,Z>] [--res <X,Y,Z>] [--iso <V>]");
        std::process::exit(2);
    });
    let out_path = parse_str_arg(&args, "--out").unwrap_or_else(|| "mesh.obj".to_string());
    let min = parse_vec3_arg(&args, "--min").unwrap_or(Vec3::splat(-2.0));
    let max = parse_vec3_arg(&args, "--max").unwrap_or(Vec3::splat(2.0));
    let res = parse_uvec3_arg(&args, "--res").unwrap_or(UVec3::splat(64));
    let iso = parse_f32_arg(&args, "--iso").unwrap_or(0.0);

    println!("=== Isofield Mesh Export ===");
    println!("Scene:  {}", scene_path);
    println!("Bounds: {:?} .. {:?}", min, max);
    println!("Grid:   {}x{}x{} cells, iso {}", res.x, res.y, res.z, iso);
    println!("Output: {}", out_path);
    println!();

    let scene = load_scene(&scene_path)?;
    log::info!("Loaded {} primitives", scene.primitives.len());

    let sdf = scene.sdf()?;
    let grid = VoxelGrid::new(Aabb::new(min, max), res, iso);

    let start = Instant::now();
    let count = count_triangles(&sdf, &grid)?;
    log::info!("Counted {} triangles in {:.2}s", count, start.elapsed().as_secs_f64());

    let start = Instant::now();
    let vertices = polygonize(&sdf, &grid)?;
    log::info!(
        "Emitted {} triangles in {:.2}s",
        vertices.len() / 3,
        start.elapsed().as_secs_f64()
    );

    save_obj(&vertices, &out_path)?;
    log::info!("Exported {} ({} triangles)", out_path, vertices.len() / 3);
    Ok(())
}

fn parse_str_arg(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_f32_arg(args: &[String], name: &str) -> Option<f32> {
    parse_str_arg(args, name).and_then(|v| v.parse().ok())
}

fn parse_vec3_arg(args: &[String], name: &str) -> Option<Vec3> {
    let raw = parse_str_arg(args, name)?;
    let parts: Vec<f32> = raw
        .split(',')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<_>>()?;
    if parts.len() != 3 {
        return None;
    }
    Some(Vec3::new(parts[0], parts[1], parts[2]))
}

fn parse_uvec3_arg(args: &[String], name: &str) -> Option<UVec3> {
    let raw = parse_str_arg(args, name)?;
    let parts: Vec<u32> = raw
        .split(',')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<_>>()?;
    if parts.len() != 3 {
        return None;
    }
    Some(UVec3::new(parts[0], parts[1], parts[2]))
}
