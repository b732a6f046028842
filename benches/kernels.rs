use criterion::{criterion_group, criterion_main, Criterion, black_box};

use glam::{UVec3, Vec3};

use isofield::math::Aabb;
use isofield::mesh::{polygonize, VoxelGrid};
use isofield::render::{render, Camera};
use isofield::scene::{Primitive, Scene, SceneSettings, Shape};

fn two_sphere_scene() -> Scene {
    let mut scene = Scene::new(SceneSettings {
        noise_octaves: 3,
        noise_amplitude: 0.1,
        smooth_union_k: 0.5,
        seed: 12345,
        ..Default::default()
    });
    scene.push(Primitive::new(Shape::Sphere {
        center: Vec3::new(-0.8, 0.0, 0.0),
        radius: 1.0,
    }));
    scene.push(Primitive::new(Shape::Sphere {
        center: Vec3::new(0.8, 0.0, 0.0),
        radius: 0.8,
    }));
    scene
}

fn bench_render_64(c: &mut Criterion) {
    let scene = two_sphere_scene();
    let sdf = scene.sdf().unwrap();
    let camera = Camera::new(Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO, 60.0);

    c.bench_function("render_64x64", |b| {
        b.iter(|| render(black_box(&sdf), black_box(&camera), 64, 64).unwrap());
    });
}

fn bench_polygonize_32(c: &mut Criterion) {
    let scene = two_sphere_scene();
    let sdf = scene.sdf().unwrap();
    let grid = VoxelGrid::new(
        Aabb::new(Vec3::splat(-2.5), Vec3::splat(2.5)),
        UVec3::splat(32),
        0.0,
    );

    c.bench_function("polygonize_32", |b| {
        b.iter(|| polygonize(black_box(&sdf), black_box(&grid)).unwrap());
    });
}

fn bench_sphere_trace_unit(c: &mut Criterion) {
    let sphere = |p: Vec3| p.length() - 1.0;
    let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, 60.0);

    c.bench_function("render_unit_sphere_64x64", |b| {
        b.iter(|| render(black_box(&sphere), black_box(&camera), 64, 64).unwrap());
    });
}

criterion_group!(
    benches,
    bench_render_64,
    bench_polygonize_32,
    bench_sphere_trace_unit
);
criterion_main!(benches);
