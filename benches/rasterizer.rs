use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use softraster::bench::{rasterize_with_shader, FlatShader, FrameBuffer, RasterOptions, RasterVertex};
use softraster::prelude::*;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_buffer() -> FrameBuffer {
    FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT, Color::BLACK)
}

fn vertex(x: f64, y: f64) -> RasterVertex {
    RasterVertex {
        x,
        y,
        ndc_z: 0.0,
        depth: 1.0,
        inv_depth: 1.0,
    }
}

fn small_triangle() -> [RasterVertex; 3] {
    [vertex(100.0, 100.0), vertex(120.0, 100.0), vertex(110.0, 120.0)]
}

fn medium_triangle() -> [RasterVertex; 3] {
    [vertex(100.0, 100.0), vertex(300.0, 100.0), vertex(200.0, 300.0)]
}

fn large_triangle() -> [RasterVertex; 3] {
    [vertex(50.0, 50.0), vertex(750.0, 100.0), vertex(400.0, 550.0)]
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let shader = FlatShader::new(Color::RED);

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        for (label, span_early_exit) in [("early_exit", true), ("full_box", false)] {
            let options = RasterOptions {
                span_early_exit,
                ..Default::default()
            };
            group.bench_with_input(BenchmarkId::new(label, name), &triangle, |b, tri| {
                let mut buffer = create_buffer();
                b.iter(|| {
                    buffer.clear();
                    rasterize_with_shader(black_box(*tri), &mut buffer, &shader, options)
                });
            });
        }
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");
    let shader = FlatShader::new(Color::RED);

    // Generate a grid of small triangles
    let triangles: Vec<[RasterVertex; 3]> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f64 * 40.0;
                let y = row as f64 * 30.0;
                [vertex(x, y), vertex(x + 35.0, y), vertex(x + 17.5, y + 25.0)]
            })
        })
        .collect();

    group.bench_function("edge_function_400_triangles", |b| {
        let mut buffer = create_buffer();
        b.iter(|| {
            buffer.clear();
            for tri in &triangles {
                rasterize_with_shader(black_box(*tri), &mut buffer, &shader, RasterOptions::default());
            }
        });
    });

    group.finish();
}

fn benchmark_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_frame");
    let light = PointLight::default();

    for (name, smooth) in [("flat", false), ("smooth", true)] {
        let scene = demo_scene(0.5, smooth);
        group.bench_function(BenchmarkId::new("demo_scene", name), |b| {
            let mut engine = Engine::new(RenderConfig::default()).expect("default config is valid");
            b.iter(|| {
                engine.render(black_box(&scene), Some(&light));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_full_frame
);
criterion_main!(benches);
