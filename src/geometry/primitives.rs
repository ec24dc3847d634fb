// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Primitive mesh generators for manifest geometry

use super::{Mesh, Triangle, Vertex};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Geometric primitives, always centered on the local origin
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Cube { size: Vector3<f64> },
    Sphere { radius: f64, segments: u32 },
    Cylinder { height: f64, radius: f64, segments: u32 },
}

impl Primitive {
    pub fn cube(size: Vector3<f64>) -> Self {
        Self::Cube { size }
    }

    pub fn sphere(radius: f64, segments: u32) -> Self {
        Self::Sphere {
            radius,
            segments: segments.max(3),
        }
    }

    pub fn cylinder(height: f64, radius: f64, segments: u32) -> Self {
        Self::Cylinder {
            height,
            radius,
            segments: segments.max(3),
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cube { size } => cube_mesh(*size),
            Self::Sphere { radius, segments } => sphere_mesh(*radius, *segments),
            Self::Cylinder {
                height,
                radius,
                segments,
            } => cylinder_mesh(*height, *radius, *segments),
        }
    }
}

fn cube_mesh(size: Vector3<f64>) -> Mesh {
    let h = size / 2.0;
    let corner = |x: f64, y: f64, z: f64| Point3::new(x * h.x, y * h.y, z * h.z);

    // Four corners per face, counter-clockwise seen from outside
    let faces = [
        (Vector3::x(), [(1., -1., -1.), (1., 1., -1.), (1., 1., 1.), (1., -1., 1.)]),
        (-Vector3::x(), [(-1., 1., -1.), (-1., -1., -1.), (-1., -1., 1.), (-1., 1., 1.)]),
        (Vector3::y(), [(1., 1., -1.), (-1., 1., -1.), (-1., 1., 1.), (1., 1., 1.)]),
        (-Vector3::y(), [(-1., -1., -1.), (1., -1., -1.), (1., -1., 1.), (-1., -1., 1.)]),
        (Vector3::z(), [(-1., -1., 1.), (1., -1., 1.), (1., 1., 1.), (-1., 1., 1.)]),
        (-Vector3::z(), [(-1., 1., -1.), (1., 1., -1.), (1., -1., -1.), (-1., -1., -1.)]),
    ];

    let mut mesh = Mesh::with_capacity(24, 12);
    for (normal, quad) in faces {
        let base = mesh.vertex_count();
        for (x, y, z) in quad {
            mesh.add_vertex(Vertex::new(corner(x, y, z), normal));
        }
        mesh.add_triangle(Triangle::new([base, base + 1, base + 2]));
        mesh.add_triangle(Triangle::new([base, base + 2, base + 3]));
    }
    mesh
}

fn sphere_mesh(radius: f64, segments: u32) -> Mesh {
    let stacks = segments as usize;
    let slices = segments as usize;
    let mut mesh = Mesh::with_capacity((stacks + 1) * (slices + 1), stacks * slices * 2);

    for i in 0..=stacks {
        let phi = PI * i as f64 / stacks as f64;
        for j in 0..=slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            let normal = Vector3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());
            mesh.add_vertex(Vertex::new(Point3::from(normal * radius), normal));
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let a = i * (slices + 1) + j;
            let b = a + slices + 1;
            mesh.add_triangle(Triangle::new([a, b, a + 1]));
            mesh.add_triangle(Triangle::new([b, b + 1, a + 1]));
        }
    }
    mesh
}

fn cylinder_mesh(height: f64, radius: f64, segments: u32) -> Mesh {
    let n = segments as usize;
    let half = height / 2.0;
    let mut mesh = Mesh::with_capacity(4 * n + 2, 4 * n);

    let bottom_center = mesh.add_vertex(Vertex::new(Point3::new(0.0, 0.0, -half), -Vector3::z()));
    let top_center = mesh.add_vertex(Vertex::new(Point3::new(0.0, 0.0, half), Vector3::z()));

    let ring = |i: usize| {
        let angle = 2.0 * PI * i as f64 / n as f64;
        (angle.cos(), angle.sin())
    };

    // Caps
    let cap_start = mesh.vertex_count();
    for i in 0..n {
        let (c, s) = ring(i);
        mesh.add_vertex(Vertex::new(Point3::new(radius * c, radius * s, -half), -Vector3::z()));
        mesh.add_vertex(Vertex::new(Point3::new(radius * c, radius * s, half), Vector3::z()));
    }
    for i in 0..n {
        let next = (i + 1) % n;
        let (b0, t0) = (cap_start + 2 * i, cap_start + 2 * i + 1);
        let (b1, t1) = (cap_start + 2 * next, cap_start + 2 * next + 1);
        mesh.add_triangle(Triangle::new([bottom_center, b1, b0]));
        mesh.add_triangle(Triangle::new([top_center, t0, t1]));
    }

    // Side wall with outward normals
    let side_start = mesh.vertex_count();
    for i in 0..n {
        let (c, s) = ring(i);
        let normal = Vector3::new(c, s, 0.0);
        mesh.add_vertex(Vertex::new(Point3::new(radius * c, radius * s, -half), normal));
        mesh.add_vertex(Vertex::new(Point3::new(radius * c, radius * s, half), normal));
    }
    for i in 0..n {
        let next = (i + 1) % n;
        let (b0, t0) = (side_start + 2 * i, side_start + 2 * i + 1);
        let (b1, t1) = (side_start + 2 * next, side_start + 2 * next + 1);
        mesh.add_triangle(Triangle::new([b0, b1, t1]));
        mesh.add_triangle(Triangle::new([b0, t1, t0]));
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube() {
        let mesh = Primitive::cube(Vector3::new(2.0, 4.0, 6.0)).to_mesh();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);

        let max_z = mesh
            .vertices
            .iter()
            .map(|v| v.position.z)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(max_z, 3.0);
    }

    #[test]
    fn test_sphere_radius() {
        let mesh = Primitive::sphere(5.0, 8).to_mesh();
        assert_eq!(mesh.triangle_count(), 8 * 8 * 2);
        for v in &mesh.vertices {
            assert!((v.position.coords.norm() - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cylinder_minimum_segments() {
        let mesh = Primitive::cylinder(10.0, 1.0, 1).to_mesh();
        assert_eq!(mesh.triangle_count(), 4 * 3);
    }
}
