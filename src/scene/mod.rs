// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene model - the read-only view of the authoring tool's scene graph

mod evaluate;
mod manifest;
mod object;

pub use evaluate::{evaluate, EvaluatedMesh, MeshEvaluator, SceneMeshEvaluator};
pub use manifest::load_scene_manifest;
pub use object::{DiffuseColor, Material, MaterialSlot, MeshSource, SceneObject};

/// Ordered collection of objects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub name: String,
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    pub fn with_object(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn push(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Objects in scene iteration order
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Selected objects, in scene iteration order
    pub fn selected_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|ob| ob.selected)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
