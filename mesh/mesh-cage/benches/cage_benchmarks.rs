//! Benchmarks for mesh-cage operations.
//!
//! Run with: cargo bench -p mesh-cage
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-cage -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-cage -- --baseline main

#![allow(clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_cage::{
    CageParams, TetMode, build_adjacency, build_cage, build_edge_list, point_triangle_distance_squared,
};
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;

// =============================================================================
// Test Surface Generation
// =============================================================================

struct Sphere {
    points: Vec<Point3<f64>>,
    faces: Vec<[u32; 3]>,
}

/// Create an icosphere with the given subdivision level.
fn create_sphere(subdivisions: u32) -> Sphere {
    let phi = f64::midpoint(1.0, 5.0_f64.sqrt());
    let a = 1.0;
    let b = 1.0 / phi;

    let ico_points = [
        [0.0, b, -a],
        [b, a, 0.0],
        [-b, a, 0.0],
        [0.0, b, a],
        [0.0, -b, a],
        [-a, 0.0, b],
        [0.0, -b, -a],
        [a, 0.0, -b],
        [a, 0.0, b],
        [-a, 0.0, -b],
        [b, -a, 0.0],
        [-b, -a, 0.0],
    ];

    let mut sphere = Sphere {
        points: ico_points
            .iter()
            .map(|&[x, y, z]| Point3::from(Vector3::new(x, y, z).normalize()))
            .collect(),
        faces: vec![
            [0, 1, 2],
            [3, 2, 1],
            [3, 4, 5],
            [3, 8, 4],
            [0, 6, 7],
            [0, 9, 6],
            [4, 10, 11],
            [6, 11, 10],
            [2, 5, 9],
            [11, 9, 5],
            [1, 7, 8],
            [10, 8, 7],
            [3, 5, 2],
            [3, 1, 8],
            [0, 2, 9],
            [0, 7, 1],
            [6, 9, 11],
            [6, 10, 7],
            [4, 11, 5],
            [4, 8, 10],
        ],
    };

    for _ in 0..subdivisions {
        sphere = subdivide_sphere(&sphere);
    }

    sphere
}

fn subdivide_sphere(sphere: &Sphere) -> Sphere {
    let mut points = sphere.points.clone();
    let mut faces = Vec::with_capacity(sphere.faces.len() * 4);
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();

    for &[v0, v1, v2] in &sphere.faces {
        let m01 = get_midpoint(v0, v1, &mut points, &mut midpoints);
        let m12 = get_midpoint(v1, v2, &mut points, &mut midpoints);
        let m20 = get_midpoint(v2, v0, &mut points, &mut midpoints);

        faces.push([v0, m01, m20]);
        faces.push([v1, m12, m01]);
        faces.push([v2, m20, m12]);
        faces.push([m01, m12, m20]);
    }

    Sphere { points, faces }
}

fn get_midpoint(
    v1: u32,
    v2: u32,
    points: &mut Vec<Point3<f64>>,
    midpoints: &mut HashMap<(u32, u32), u32>,
) -> u32 {
    let key = if v1 < v2 { (v1, v2) } else { (v2, v1) };

    if let Some(&idx) = midpoints.get(&key) {
        return idx;
    }

    let mid = nalgebra::center(&points[v1 as usize], &points[v2 as usize]);
    let idx = points.len() as u32;
    points.push(Point3::from(mid.coords.normalize()));
    midpoints.insert(key, idx);
    idx
}

// =============================================================================
// Cage Benchmarks
// =============================================================================

fn bench_build_cage(c: &mut Criterion) {
    let mut group = c.benchmark_group("BuildCage");

    let test_cases = [
        ("sphere_320tri", create_sphere(2)),
        ("sphere_1280tri", create_sphere(3)),
        ("sphere_5120tri", create_sphere(4)),
    ];

    for (name, sphere) in &test_cases {
        group.throughput(Throughput::Elements(sphere.faces.len() as u64));

        for mode in TetMode::ALL {
            group.bench_with_input(
                BenchmarkId::new(mode.as_str(), name),
                sphere,
                |b, sphere| {
                    let params = CageParams::with_mode(mode);
                    b.iter(|| build_cage(black_box(&sphere.points), black_box(&sphere.faces), &params));
                },
            );
        }
    }

    group.finish();
}

fn bench_topology(c: &mut Criterion) {
    let mut group = c.benchmark_group("Topology");
    let sphere = create_sphere(4);
    group.throughput(Throughput::Elements(sphere.faces.len() as u64));

    group.bench_function("edge_list", |b| {
        b.iter(|| build_edge_list(black_box(&sphere.faces)));
    });

    let cage = build_cage(&sphere.points, &sphere.faces, &CageParams::edge()).unwrap();
    group.bench_function("edge_adjacency", |b| {
        b.iter(|| build_adjacency(TetMode::Edge, black_box(cage.tets()), cage.edges(), cage.fans()));
    });

    group.finish();
}

fn bench_distance(c: &mut Criterion) {
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(1.0, 0.0, 0.0);
    let tri_c = Point3::new(0.0, 1.0, 0.0);
    let inside = Point3::new(0.2, 0.3, 0.5);
    let outside = Point3::new(2.0, 2.0, 0.5);

    c.bench_function("point_triangle_inside", |bench| {
        bench.iter(|| point_triangle_distance_squared(black_box(&inside), &a, &b, &tri_c));
    });
    c.bench_function("point_triangle_outside", |bench| {
        bench.iter(|| point_triangle_distance_squared(black_box(&outside), &a, &b, &tri_c));
    });
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_build_cage, bench_topology, bench_distance);
criterion_main!(benches);
