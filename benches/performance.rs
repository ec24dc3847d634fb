// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::{Matrix4, Vector3};
use slicer_bridge::export::build_scene_element;
use slicer_bridge::geometry::Primitive;
use slicer_bridge::io::{self, PlyFormat, PlyOptions};
use slicer_bridge::scene::{DiffuseColor, Material, Scene, SceneObject};

fn scene_with(objects: usize) -> Scene {
    let mut scene = Scene::new("Scene");
    for i in 0..objects {
        let offset = Vector3::new(i as f64 * 0.37, -(i as f64) * 1.1, 2.5);
        scene.push(
            SceneObject::new(format!("Object.{:04}", i))
                .with_matrix(Matrix4::new_translation(&offset))
                .with_material(Material::new("Tissue", DiffuseColor::new(0.8, 0.31, 0.27))),
        );
    }
    scene
}

fn bench_scene_xml(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_xml");

    for objects in [10, 100, 1000] {
        let scene = scene_with(objects);
        group.bench_with_input(BenchmarkId::new("serialize", objects), &scene, |b, scene| {
            b.iter(|| build_scene_element(black_box(scene)).to_xml_string(false).unwrap());
        });
    }

    let xml = build_scene_element(&scene_with(1000)).to_xml_string(false).unwrap();
    group.bench_function("parse_1000", |b| {
        b.iter(|| io::parse_scene_document(black_box(&xml)).unwrap());
    });

    group.finish();
}

fn bench_ply(c: &mut Criterion) {
    let mut group = c.benchmark_group("ply");
    let mesh = Primitive::sphere(10.0, 64).to_mesh();

    for format in [PlyFormat::Ascii, PlyFormat::BinaryLittleEndian] {
        let options = PlyOptions::geometry_only(format);
        group.bench_with_input(
            BenchmarkId::new("sphere_64", format!("{:?}", format)),
            &options,
            |b, options| {
                b.iter(|| {
                    let mut out = Vec::new();
                    io::write_ply(&mut out, black_box(&mesh), options).unwrap();
                    out
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_scene_xml, bench_ply);
criterion_main!(benches);
