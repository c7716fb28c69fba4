use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use softpipe::bench::{draw_filled_triangle, draw_textured_triangle, FrameBuffer, Triangle};
use softpipe::math::vec3::Vec3;
use softpipe::math::vec4::Vec4;
use softpipe::texture::{TexCoord, Texture};
use softpipe::{Camera, Engine, Mesh, RenderConfig, RenderMode};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

const UVS: [TexCoord; 3] = [
    TexCoord::new(0.0, 0.0),
    TexCoord::new(1.0, 0.0),
    TexCoord::new(0.5, 1.0),
];

fn triangle(points: [(f32, f32, f32); 3]) -> Triangle {
    Triangle::new(points.map(|(x, y, w)| Vec4::new(x, y, 0.5, w)), UVS).with_color(0xFFFF0000)
}

fn small_triangle() -> Triangle {
    triangle([(100.0, 100.0, 2.0), (120.0, 100.0, 2.0), (110.0, 120.0, 2.0)])
}

fn medium_triangle() -> Triangle {
    triangle([(100.0, 100.0, 2.0), (300.0, 100.0, 3.0), (200.0, 300.0, 4.0)])
}

fn large_triangle() -> Triangle {
    triangle([(50.0, 50.0, 2.0), (750.0, 100.0, 5.0), (400.0, 550.0, 8.0)])
}

fn checker_texture() -> Texture {
    let size = 64u32;
    let pixels = (0..size * size)
        .map(|i| {
            if ((i % size) / 8 + (i / size) / 8) % 2 == 0 {
                0xFFFFFFFF
            } else {
                0xFF000000
            }
        })
        .collect();
    // 64x64 with matching pixel count cannot fail
    Texture::new(size, size, pixels).unwrap()
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let texture = checker_texture();

    for (name, tri) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("flat", name), &tri, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                fb.clear_depth();
                draw_filled_triangle(&mut fb, black_box(tri), tri.color);
            });
        });

        group.bench_with_input(BenchmarkId::new("textured", name), &tri, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                fb.clear_depth();
                draw_textured_triangle(&mut fb, black_box(tri), &texture);
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    // Generate a grid of small triangles
    let triangles: Vec<Triangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                triangle([(x, y, 2.0), (x + 35.0, y, 2.0), (x + 17.5, y + 25.0, 2.0)])
            })
        })
        .collect();

    group.bench_function("flat_400_triangles", |b| {
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            fb.clear_depth();
            for tri in &triangles {
                draw_filled_triangle(&mut fb, black_box(tri), tri.color);
            }
        });
    });

    group.finish();
}

fn benchmark_cube_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_frame");

    let mut cube = Mesh::cube();
    cube.transform_mut()
        .set_translation(Vec3::new(0.0, 0.0, 4.0))
        .set_rotation(Vec3::new(0.4, 0.7, 0.0));
    cube.set_texture(Rc::new(checker_texture()));
    let meshes = [cube];
    let camera = Camera::default();

    for mode in [RenderMode::Filled, RenderMode::Textured, RenderMode::FilledWireframe] {
        let config = RenderConfig {
            render_mode: mode,
            ..RenderConfig::default()
        };
        let mut engine = Engine::new(&config);
        group.bench_function(BenchmarkId::new("update_render", mode), |b| {
            b.iter(|| {
                // Capacity is far above the cube's 12 faces
                engine.update(black_box(&meshes), &camera).unwrap();
                engine.render();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_cube_frame
);
criterion_main!(benches);
