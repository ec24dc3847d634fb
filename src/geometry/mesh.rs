// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Evaluated mesh snapshot

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }
}

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Triangular mesh in object-local coordinates.
///
/// `uvs` and `colors` are per-vertex and either empty or exactly
/// `vertices.len()` long.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
    #[serde(default)]
    pub uvs: Vec<[f64; 2]>,
    #[serde(default)]
    pub colors: Vec<[f32; 3]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            uvs: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Build a mesh from shared positions and triangle indices, giving each
    /// vertex the area-weighted average of its adjacent face normals.
    ///
    /// Returns `None` if any index is out of range.
    pub fn from_faces(positions: &[Point3<f64>], faces: &[[usize; 3]]) -> Option<Self> {
        let mut normals = vec![Vector3::zeros(); positions.len()];

        for face in faces {
            if face.iter().any(|&i| i >= positions.len()) {
                return None;
            }
            let p0 = positions[face[0]];
            let p1 = positions[face[1]];
            let p2 = positions[face[2]];
            // Unnormalized cross product weights by area
            let n = (p1 - p0).cross(&(p2 - p0));
            for &i in face {
                normals[i] += n;
            }
        }

        let vertices = positions
            .iter()
            .zip(normals)
            .map(|(p, n)| {
                let normal = n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::z);
                Vertex::new(*p, normal)
            })
            .collect();

        Some(Self {
            vertices,
            triangles: faces.iter().map(|f| Triangle::new(*f)).collect(),
            uvs: Vec::new(),
            colors: Vec::new(),
        })
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty() && self.uvs.len() == self.vertices.len()
    }

    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty() && self.colors.len() == self.vertices.len()
    }
}
