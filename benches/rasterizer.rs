use criterion::{black_box, criterion_group, criterion_main, Criterion};

use softpipe::camera::Camera;
use softpipe::light::{Light, Material};
use softpipe::math::Vec3;
use softpipe::mesh::Mesh;
use softpipe::projection::Projection;
use softpipe::render::framebuffer::{DepthBuffer, FrameBuffer};
use softpipe::render::rasterizer::fill_triangle;
use softpipe::render::shader::FlatShader;
use softpipe::render::{RenderMode, Renderer};
use softpipe::texture::TextureCache;
use softpipe::transform::Transform;

fn triangle(size: f32) -> [Vec3; 3] {
    [
        Vec3::new(10.0, 10.0, 0.5),
        Vec3::new(10.0 + size, 10.0, 0.5),
        Vec3::new(10.0, 10.0 + size, 0.5),
    ]
}

fn bench_fill_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_triangle");
    for (name, size) in [("small", 20.0), ("medium", 120.0), ("large", 400.0)] {
        group.bench_function(name, |b| {
            let mut surface = FrameBuffer::new(512, 512);
            let mut depth = DepthBuffer::new(512, 512);
            let shader = FlatShader { color: 0xFFC0_C0C0 };
            let tri = triangle(size);
            b.iter(|| {
                depth.clear();
                fill_triangle(&mut surface, &mut depth, black_box(tri), &shader);
            });
        });
    }
    group.finish();
}

fn bench_cube_frame(c: &mut Criterion) {
    let projection = Projection::from_degrees(60.0, 1.0, 0.1, 100.0).unwrap();
    let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, projection);
    let mesh = Mesh::unit_cube();
    let transform = Transform::new();
    let material = Material::default();
    let lights = [
        Light::ambient(0xFFFF_FFFF, 0.2),
        Light::directional(Vec3::new(0.0, 0.0, -1.0), 0xFFFF_FFFF, 0.8).unwrap(),
    ];
    let textures = TextureCache::new();

    let mut group = c.benchmark_group("cube_frame");
    for (name, mode) in [
        ("solid", RenderMode::Solid),
        ("wireframe", RenderMode::Wireframe),
        ("lit", RenderMode::Lit),
    ] {
        group.bench_function(name, |b| {
            let mut surface = FrameBuffer::new(320, 240);
            let mut renderer = Renderer::new(320, 240);
            renderer.mode = mode;
            b.iter(|| {
                renderer
                    .render_frame(
                        &mut surface,
                        &camera,
                        &mesh,
                        &transform,
                        &material,
                        &lights,
                        &textures,
                    )
                    .unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fill_triangle, bench_cube_frame);
criterion_main!(benches);
