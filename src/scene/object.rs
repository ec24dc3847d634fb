// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene objects, materials and the geometry they reference

use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Diffuse (base) color, channels nominally in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct DiffuseColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl DiffuseColor {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl From<[f64; 3]> for DiffuseColor {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<DiffuseColor> for [f64; 3] {
    fn from(c: DiffuseColor) -> Self {
        [c.r, c.g, c.b]
    }
}

impl Default for DiffuseColor {
    fn default() -> Self {
        Self::new(0.8, 0.8, 0.8)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub diffuse_color: DiffuseColor,
}

impl Material {
    pub fn new(name: impl Into<String>, diffuse_color: DiffuseColor) -> Self {
        Self {
            name: name.into(),
            diffuse_color,
        }
    }
}

/// A material slot; slots may be left empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialSlot {
    #[serde(default)]
    pub material: Option<Material>,
}

impl MaterialSlot {
    pub fn with(material: Material) -> Self {
        Self {
            material: Some(material),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Where an object's geometry comes from when it is evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeshSource {
    Cube {
        #[serde(default = "unit_size")]
        size: [f64; 3],
    },
    Sphere {
        radius: f64,
        #[serde(default = "default_segments")]
        segments: u32,
    },
    Cylinder {
        height: f64,
        radius: f64,
        #[serde(default = "default_segments")]
        segments: u32,
    },
    Inline {
        vertices: Vec<[f64; 3]>,
        faces: Vec<[usize; 3]>,
    },
    /// STL file, relative paths resolve against the manifest directory
    Stl { path: PathBuf },
}

fn unit_size() -> [f64; 3] {
    [2.0, 2.0, 2.0]
}

fn default_segments() -> u32 {
    32
}

impl MeshSource {
    pub fn inline(vertices: &[Point3<f64>], faces: &[[usize; 3]]) -> Self {
        Self::Inline {
            vertices: vertices.iter().map(|p| [p.x, p.y, p.z]).collect(),
            faces: faces.to_vec(),
        }
    }

    pub fn cube(size: Vector3<f64>) -> Self {
        Self::Cube {
            size: [size.x, size.y, size.z],
        }
    }
}

/// An object of the scene graph
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub matrix_world: Matrix4<f64>,
    pub material_slots: Vec<MaterialSlot>,
    pub selected: bool,
    pub mesh: Option<MeshSource>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matrix_world: Matrix4::identity(),
            material_slots: Vec::new(),
            selected: false,
            mesh: None,
        }
    }

    pub fn with_matrix(mut self, matrix_world: Matrix4<f64>) -> Self {
        self.matrix_world = matrix_world;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material_slots.push(MaterialSlot::with(material));
        self
    }

    pub fn with_slot(mut self, slot: MaterialSlot) -> Self {
        self.material_slots.push(slot);
        self
    }

    pub fn with_mesh(mut self, mesh: MeshSource) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// The slot whose material gets exported, if the object has any slots
    pub fn first_slot(&self) -> Option<&MaterialSlot> {
        self.material_slots.first()
    }
}
