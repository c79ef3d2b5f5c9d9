use blockfill::bench::{
    fill_polygon, EdgeFunctionRasterizer, FrameBuffer, Rasterizer, ScanlineRasterizer, Triangle,
};
use blockfill::math::vec2::Vec2;
use blockfill::math::vec3::Vec3;
use blockfill::{colors, Mesh, RenderConfig, RenderContext};
use blockfill::camera::Camera;
use blockfill::mesh::add_box;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_buffer() -> Vec<u32> {
    vec![0u32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize]
}

fn small_triangle() -> Triangle {
    Triangle::new([
        Vec2::new(100.0, 100.0),
        Vec2::new(120.0, 100.0),
        Vec2::new(110.0, 120.0),
    ])
}

fn medium_triangle() -> Triangle {
    Triangle::new([
        Vec2::new(100.0, 100.0),
        Vec2::new(300.0, 100.0),
        Vec2::new(200.0, 300.0),
    ])
}

fn large_triangle() -> Triangle {
    Triangle::new([
        Vec2::new(50.0, 50.0),
        Vec2::new(750.0, 100.0),
        Vec2::new(400.0, 550.0),
    ])
}

/// A regular polygon like a prism cap.
fn cap(segments: usize, radius: f32) -> Vec<Vec2> {
    (0..segments)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / segments as f32;
            Vec2::new(400.0 + radius * angle.cos(), 300.0 + radius * angle.sin())
        })
        .collect()
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let scanline = ScanlineRasterizer::new();
    let edge_fn = EdgeFunctionRasterizer::new();

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &triangle, |b, tri| {
            let mut buffer = create_buffer();
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut buffer, BUFFER_WIDTH, BUFFER_HEIGHT);
                scanline.fill_triangle(black_box(tri), &mut fb, 0xFFFF0000);
            });
        });

        group.bench_with_input(
            BenchmarkId::new("edge_function", name),
            &triangle,
            |b, tri| {
                let mut buffer = create_buffer();
                b.iter(|| {
                    let mut fb = FrameBuffer::new(&mut buffer, BUFFER_WIDTH, BUFFER_HEIGHT);
                    edge_fn.fill_triangle(black_box(tri), &mut fb, 0xFFFF0000);
                });
            },
        );
    }

    group.finish();
}

fn benchmark_polygon_fan(c: &mut Criterion) {
    let mut group = c.benchmark_group("polygon_fan");

    let scanline = ScanlineRasterizer::new();
    let edge_fn = EdgeFunctionRasterizer::new();

    for segments in [4, 12, 32] {
        let polygon = cap(segments, 200.0);
        group.bench_with_input(BenchmarkId::new("scanline", segments), &polygon, |b, points| {
            let mut buffer = create_buffer();
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut buffer, BUFFER_WIDTH, BUFFER_HEIGHT);
                fill_polygon(&scanline, black_box(points), &mut fb, 0xFF00FF00);
            });
        });
        group.bench_with_input(
            BenchmarkId::new("edge_function", segments),
            &polygon,
            |b, points| {
                let mut buffer = create_buffer();
                b.iter(|| {
                    let mut fb = FrameBuffer::new(&mut buffer, BUFFER_WIDTH, BUFFER_HEIGHT);
                    fill_polygon(&edge_fn, black_box(points), &mut fb, 0xFF00FF00);
                });
            },
        );
    }

    group.finish();
}

fn benchmark_full_frame(c: &mut Criterion) {
    let meshes: Vec<Mesh> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let position = Vec3::new(col as f32 * 40.0 - 400.0, 0.0, 100.0 + row as f32 * 40.0);
                let mut mesh = Mesh::new(position, (row + col) as f32 * 0.1);
                add_box(&mut mesh, 20.0, 20.0, 20.0, Vec3::ZERO, colors::STONE)
                    .expect("valid box");
                mesh
            })
        })
        .collect();
    let mut camera = Camera::new(Vec3::new(0.0, 80.0, 0.0));
    camera.rotate_pitch(-0.3);
    let mut context = RenderContext::new(&RenderConfig::default());

    c.bench_function("full_frame_400_boxes", |b| {
        b.iter(|| {
            let frame = context.render_frame(black_box(&camera), &meshes, colors::SKY);
            black_box(frame.stats);
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_polygon_fan,
    benchmark_full_frame
);
criterion_main!(benches);
