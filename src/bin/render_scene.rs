//! Scene renderer binary — sphere-traces a scene file to a PNG.
//!
//! Usage: cargo run --release --bin render_scene -- [OPTIONS]
//!
//! Options:
//!   --scene <PATH>     Scene description JSON (required)
//!   --out <PATH>       Output PNG path (default: "render.png")
//!   --width <W>        Image width in pixels (default: 800)
//!   --height <H>       Image height in pixels (default: 600)
//!   --from <X,Y,Z>     Camera position (default: 0,1.5,4)
//!   --at <X,Y,Z>       Look-at target (default: 0,0,0)
//!   --fov <DEG>        Vertical field of view (default: 60)

use std::time::Instant;

use glam::Vec3;

use isofield::core::types::Result;
use isofield::export::save_png;
use isofield::render::{render, Camera};
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
        eprintln!("Usage: render_scene --scene <PATH> [--out <PATH>] [--width <W>] [--height <H>] [--from <X,Y,Z>] [--at <X,Y,Z>] [--fov <DEG>]");
        std::process::exit(2);
    });
    let out_path = parse_str_arg(&args, "--out").unwrap_or_else(|| "render.png".to_string());
    let width = parse_usize_arg(&args, "--width").unwrap_or(800);
    let height = parse_usize_arg(&args, "--height").unwrap_or(600);
    let from = parse_vec3_arg(&args, "--from").unwrap_or(Vec3::new(0.0, 1.5, 4.0));
    let at = parse_vec3_arg(&args, "--at").unwrap_or(Vec3::ZERO);
    let fov = parse_f32_arg(&args, "--fov").unwrap_or(60.0);

    println!("=== Isofield Renderer ===");
    println!("Scene:  {}", scene_path);
    println!("Image:  {}x{}", width, height);
    println!("Camera: {:?} -> {:?}, fov {}", from, at, fov);
    println!("Output: {}", out_path);
    println!();

    let scene = load_scene(&scene_path)?;
    log::info!(
        "Loaded {} primitives (k = {}, octaves = {}, amplitude = {}, seed = {})",
        scene.primitives.len(),
        scene.settings.smooth_union_k,
        scene.settings.noise_octaves,
        scene.settings.noise_amplitude,
        scene.settings.seed,
    );

    let sdf = scene.sdf()?;
    let camera = Camera::new(from, at, fov);

    let start = Instant::now();
    let img = render(&sdf, &camera, width, height)?;
    let elapsed = start.elapsed();
    log::info!(
        "Rendered {}x{} in {:.2}s ({:.0} rays/sec)",
        width,
        height,
        elapsed.as_secs_f64(),
        (width * height) as f64 / elapsed.as_secs_f64()
    );

    save_png(&img, &out_path)?;
    log::info!("Saved {}", out_path);
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

fn parse_usize_arg(args: &[String], name: &str) -> Option<usize> {
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
