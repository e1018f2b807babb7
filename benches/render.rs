use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rastermap::math::mat4::Mat4;
use rastermap::math::vec3::Vec3;
use rastermap::{render_id_map, render_shaded, Camera, Mesh, RenderConfig};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

/// A regular triangulated grid of 2 * n * n faces on the z = -5 plane,
/// wound to face a camera at the origin looking down -z.
fn grid_mesh(n: u32) -> Mesh {
    let step = 2.0 / n as f64;
    let mut vertices = Vec::new();
    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Vec3::new(
                -1.0 + i as f64 * step,
                -1.0 + j as f64 * step,
                -5.0,
            ));
        }
    }

    let index = |i: u32, j: u32| j * (n + 1) + i;
    let mut faces = Vec::new();
    for j in 0..n {
        for i in 0..n {
            let v00 = index(i, j);
            let v10 = index(i + 1, j);
            let v01 = index(i, j + 1);
            let v11 = index(i + 1, j + 1);
            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }

    Mesh::new(vertices, vec![], faces).unwrap()
}

fn bench_camera() -> Camera {
    Camera::new(
        Mat4::identity(),
        Mat4::orthographic(-1.2, 1.2, -1.2, 1.2, 1.0, 10.0),
    )
}

fn benchmark_id_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("id_map");
    let camera = bench_camera();
    let config = RenderConfig::default();

    for n in [8u32, 32, 64] {
        let mesh = grid_mesh(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &mesh, |b, mesh| {
            b.iter(|| render_id_map(black_box(&camera), black_box(mesh), WIDTH, HEIGHT, &config));
        });
    }
    group.finish();
}

fn benchmark_shaded(c: &mut Criterion) {
    let camera = bench_camera();
    let mesh = grid_mesh(32);
    let lights = [
        Vec3::new(4.0, 4.0, 4.0),
        Vec3::new(-4.0, 2.0, 4.0),
        Vec3::new(0.0, -4.0, 2.0),
    ];

    c.bench_function("shaded_32", |b| {
        b.iter(|| render_shaded(black_box(&camera), black_box(&mesh), WIDTH, HEIGHT, &lights));
    });
}

criterion_group!(benches, benchmark_id_map, benchmark_shaded);
criterion_main!(benches);
